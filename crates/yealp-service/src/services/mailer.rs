//! Outgoing mail
//!
//! Services only see the [`Mailer`] trait. The shipped [`LogMailer`] writes
//! each message to the log instead of talking to an SMTP server.

use async_trait::async_trait;
use tracing::{debug, info};

use super::error::ServiceResult;

/// A composed message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    /// The password reset message sent by `/reset_password`
    pub fn password_reset(from: &str, to: &str, name: &str, link: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: "Password Reset Request".to_string(),
            body: format!(
                "Hi {name}! This is the password reset instructions from Yealp platform. \
                 To reset your password, visit the following link:\n{link}\n\n\
                 If you did not make this request then simply ignore this email and no \
                 changes will be made.\n"
            ),
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> ServiceResult<()>;
}

/// Mailer that records messages through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> ServiceResult<()> {
        info!(from = %mail.from, to = %mail.to, subject = %mail.subject, "Mail queued");
        debug!(body = %mail.body, "Mail body");
        Ok(())
    }
}
