use super::{IMailer, Mail, MailError, Mailbox};
use crate::config::SmtpConfig;
use lettre::{
    message::{header::ContentType, Attachment, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

/// How the connection to the SMTP relay is secured
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmtpSecurity {
    /// TLS from the first byte, the SMTPS port 465
    ImplicitTls,
    /// Plain connection upgraded with STARTTLS, e.g. the submission port 587
    StartTls,
}

impl SmtpSecurity {
    pub fn for_port(port: u16) -> Self {
        if port == 465 {
            Self::ImplicitTls
        } else {
            Self::StartTls
        }
    }
}

/// Sends mails through an SMTP relay
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    security: SmtpSecurity,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, MailError> {
        let security = SmtpSecurity::for_port(config.port);
        let builder = match security {
            SmtpSecurity::ImplicitTls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            }
        }
        .map_err(|e| MailError::Transport(format!("SMTP relay error: {}", e)))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            security,
        })
    }

    pub fn security(&self) -> SmtpSecurity {
        self.security
    }
}

fn to_lettre_mailbox(mailbox: &Mailbox) -> Result<lettre::message::Mailbox, MailError> {
    let address = mailbox
        .email
        .parse::<lettre::Address>()
        .map_err(|_| MailError::InvalidAddress(mailbox.email.clone()))?;
    let name = if mailbox.name.is_empty() {
        None
    } else {
        Some(mailbox.name.clone())
    };
    Ok(lettre::message::Mailbox::new(name, address))
}

pub(crate) fn build_message(mail: &Mail) -> Result<Message, MailError> {
    let builder = Message::builder()
        .from(to_lettre_mailbox(&mail.from)?)
        .to(to_lettre_mailbox(&mail.to)?)
        .subject(mail.subject.clone());

    let message = match &mail.attachment {
        None => builder
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body.clone()),
        Some(attachment) => {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| MailError::Build(format!("Invalid content type: {}", e)))?;
            builder.multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(mail.body.clone()))
                    .singlepart(
                        Attachment::new(attachment.file_name.clone())
                            .body(attachment.content.clone(), content_type),
                    ),
            )
        }
    };

    message.map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send(&self, mail: &Mail) -> Result<(), MailError> {
        let message = build_message(mail)?;
        self.transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| MailError::Transport(e.to_string()))
    }
}
