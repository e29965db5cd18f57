//! Outbound email for the credential flows (verification, password reset).
//!
//! Delivery is fire-and-forget: handlers spawn the send on a background
//! task so a slow SMTP server never delays the HTTP response. When SMTP
//! is not configured the mailer runs disabled and logs what it would
//! have sent, which keeps local development working without a relay.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::error::{AppError, AppResult};

/// SMTP mailer for verification and password-reset email.
pub struct Mailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
    /// Frontend base URL used to build links in email bodies.
    base_url: String,
}

impl Mailer {
    /// Build a mailer from environment variables.
    ///
    /// | Env Var         | Required | Default                  |
    /// |-----------------|----------|--------------------------|
    /// | `SMTP_HOST`     | no       | -- (disables sending)    |
    /// | `SMTP_PORT`     | no       | `587`                    |
    /// | `SMTP_USERNAME` | no       | --                       |
    /// | `SMTP_PASSWORD` | no       | --                       |
    /// | `SMTP_FROM`     | no       | `noreply@localhost`      |
    /// | `APP_BASE_URL`  | no       | `http://localhost:5173`  |
    ///
    /// # Panics
    ///
    /// Panics on a malformed `SMTP_FROM` address or an unreachable relay
    /// configuration; misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let from: Mailbox = std::env::var("SMTP_FROM")
            .unwrap_or_else(|_| "noreply@localhost".into())
            .parse()
            .expect("SMTP_FROM must be a valid email address");

        let base_url =
            std::env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:5173".into());

        let transport = match std::env::var("SMTP_HOST") {
            Ok(host) => {
                let port: u16 = std::env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "587".into())
                    .parse()
                    .expect("SMTP_PORT must be a valid u16");

                let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&host)
                    .expect("SMTP_HOST must be a valid relay host")
                    .port(port);

                if let (Ok(username), Ok(password)) =
                    (std::env::var("SMTP_USERNAME"), std::env::var("SMTP_PASSWORD"))
                {
                    builder = builder.credentials(Credentials::new(username, password));
                }

                Some(builder.build())
            }
            Err(_) => {
                tracing::warn!("SMTP_HOST not set, outbound email disabled");
                None
            }
        };

        Self {
            transport,
            from,
            base_url,
        }
    }

    /// A mailer that never sends (for tests).
    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: "noreply@localhost".parse().expect("static address"),
            base_url: "http://localhost:5173".into(),
        }
    }

    /// Send the email-verification link to a newly created user.
    pub async fn send_verification(&self, to: &str, token: &str) -> AppResult<()> {
        let link = format!("{}/verify-email?token={token}", self.base_url);
        let body = format!(
            "Welcome! Please verify your email address by visiting:\n\n{link}\n"
        );
        self.send(to, "Verify your email address", body).await
    }

    /// Send the password-reset link.
    pub async fn send_password_reset(&self, to: &str, token: &str) -> AppResult<()> {
        let link = format!("{}/reset-password?token={token}", self.base_url);
        let body = format!(
            "A password reset was requested for your account. Visit:\n\n{link}\n\n\
             If you did not request this, you can ignore this email.\n"
        );
        self.send(to, "Reset your password", body).await
    }

    async fn send(&self, to: &str, subject: &str, body: String) -> AppResult<()> {
        let Some(transport) = &self.transport else {
            tracing::info!(to, subject, "Email sending disabled, skipping");
            return Ok(());
        };

        let to: Mailbox = to
            .parse()
            .map_err(|e| AppError::BadRequest(format!("Invalid recipient address: {e}")))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .body(body)
            .map_err(|e| AppError::InternalError(format!("Failed to build email: {e}")))?;

        transport
            .send(message)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to send email: {e}")))?;

        Ok(())
    }
}
