mod inmemory;
mod smtp;

pub use inmemory::InMemoryMailer;
pub use smtp::{SmtpMailer, SmtpSecurity};
use std::fmt::Display;
use thiserror::Error;

/// Name and address of a mail sender or recipient
#[derive(Debug, Clone, PartialEq)]
pub struct Mailbox {
    pub name: String,
    pub email: String,
}

impl Mailbox {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Display for Mailbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            write!(f, "{}", self.email)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub file_name: String,
    /// MIME type, e.g. `text/csv`
    pub content_type: String,
    pub content: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mail {
    pub from: Mailbox,
    pub to: Mailbox,
    pub subject: String,
    pub body: String,
    pub attachment: Option<Attachment>,
}

#[derive(Error, Debug, PartialEq)]
pub enum MailError {
    #[error("Invalid mail address: `{0}`")]
    InvalidAddress(String),
    #[error("Unable to build mail. Error message: `{0}`")]
    Build(String),
    #[error("Unable to deliver mail. Error message: `{0}`")]
    Transport(String),
}

/// Delivers `Mail`s. Every call is one delivery attempt, retrying is up to the caller.
#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, mail: &Mail) -> Result<(), MailError>;
}
