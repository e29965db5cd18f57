//! Parent/child grouping projection for objective hierarchy views.
//!
//! Every screen that renders objectives (own list, pending approvals,
//! peer shares, cascade from manager, team rollup) shows Big Rocks with
//! their child RCIs underneath and leftover RCIs in a separate orphans
//! bucket. The partition is identical everywhere; only the "same owner"
//! rule differs (the team rollup mixes owners, personal views do not),
//! so the rule is a caller-supplied predicate.

use serde::Serialize;

use crate::objective::ObjectiveKind;
use crate::types::DbId;

/// A record that can participate in the grouping projection.
pub trait GroupItem {
    /// Big Rock (root) or RCI (leaf).
    fn kind(&self) -> ObjectiveKind;
    /// Identity a leaf's `parent_id` would reference.
    fn node_id(&self) -> DbId;
    /// The leaf's parent reference, if any.
    fn parent_id(&self) -> Option<DbId>;
}

/// One Big Rock together with the RCIs grouped under it.
#[derive(Debug, Serialize)]
pub struct ObjectiveGroup<T> {
    pub root: T,
    pub children: Vec<T>,
}

/// The full projection: groups in root input order, plus ungrouped RCIs
/// in leaf input order.
#[derive(Debug, Serialize)]
pub struct GroupedObjectives<T> {
    pub groups: Vec<ObjectiveGroup<T>>,
    pub orphans: Vec<T>,
}

/// Group a flat view into Big Rocks with their child RCIs.
///
/// An RCI attaches to the Big Rock whose id matches its `parent_id` and
/// for which `same_owner(root, leaf)` holds; RCIs that match no root end
/// up in `orphans`. The partition is stable: roots keep input order and
/// so do the children under each root.
pub fn group_by_parent<T, F>(items: Vec<T>, same_owner: F) -> GroupedObjectives<T>
where
    T: GroupItem,
    F: Fn(&T, &T) -> bool,
{
    let mut roots: Vec<T> = Vec::new();
    let mut leaves: Vec<Option<T>> = Vec::new();

    for item in items {
        match item.kind() {
            ObjectiveKind::BigRock => roots.push(item),
            ObjectiveKind::RiskCriticalInitiative => leaves.push(Some(item)),
        }
    }

    let mut groups: Vec<ObjectiveGroup<T>> = Vec::with_capacity(roots.len());
    for root in roots {
        let mut children = Vec::new();
        for slot in leaves.iter_mut() {
            let matches = slot
                .as_ref()
                .is_some_and(|leaf| leaf.parent_id() == Some(root.node_id()) && same_owner(&root, leaf));
            if matches {
                children.push(slot.take().unwrap());
            }
        }
        groups.push(ObjectiveGroup { root, children });
    }

    let orphans = leaves.into_iter().flatten().collect();
    GroupedObjectives { groups, orphans }
}

/// Group without an ownership rule (single-owner views).
pub fn group_single_owner<T: GroupItem>(items: Vec<T>) -> GroupedObjectives<T> {
    group_by_parent(items, |_, _| true)
}
