use super::{IMailer, Mail, MailError};
use std::sync::Mutex;
use tracing::info;

/// Keeps delivered mails in memory instead of sending them.
/// Used in tests and when no SMTP server is configured.
pub struct InMemoryMailer {
    sent: Mutex<Vec<Mail>>,
    failing_recipients: Mutex<Vec<String>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_recipients: Mutex::new(Vec::new()),
        }
    }

    /// Every following delivery to `email` fails with a transport error
    pub fn fail_for(&self, email: &str) {
        self.failing_recipients.lock().unwrap().push(email.into());
    }

    pub fn sent_mails(&self) -> Vec<Mail> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, mail: &Mail) -> Result<(), MailError> {
        if self
            .failing_recipients
            .lock()
            .unwrap()
            .contains(&mail.to.email)
        {
            return Err(MailError::Transport(format!(
                "Recipient {} rejected",
                mail.to.email
            )));
        }

        info!(
            "Mail from {} to {} with subject: {}",
            mail.from, mail.to, mail.subject
        );
        self.sent.lock().unwrap().push(mail.clone());
        Ok(())
    }
}
