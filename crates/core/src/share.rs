//! Share recipient acceptance state machine.
//!
//! A share offer starts `Pending` and moves exactly once to `Accepted`
//! (the recipient adopted the objective) or `Ignored`. Both outcomes are
//! terminal; the only permitted "transition" out of a terminal state is
//! re-asserting the same value.

use serde::{Deserialize, Serialize};

/// Tri-state acceptance of a share offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptance {
    Pending,
    Accepted,
    Ignored,
}

impl Acceptance {
    /// Database / wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Acceptance::Pending => "pending",
            Acceptance::Accepted => "accepted",
            Acceptance::Ignored => "ignored",
        }
    }

    /// Parse the database representation. Returns `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Acceptance::Pending),
            "accepted" => Some(Acceptance::Accepted),
            "ignored" => Some(Acceptance::Ignored),
            _ => None,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_str() {
        for state in [Acceptance::Pending, Acceptance::Accepted, Acceptance::Ignored] {
            assert_eq!(Acceptance::parse(state.as_str()), Some(state));
        }
        assert_eq!(Acceptance::parse("maybe"), None);
    }
}
