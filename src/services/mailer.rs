//! Mail transport used by the notification service.
//!
//! [`SmtpMailer`] delivers through an SMTP relay with Lettre;
//! [`LogMailer`] only logs, for development without a relay.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// Failures raised while building or dispatching an email.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address {0}")]
    Address(String),

    #[error("Failed to build email: {0}")]
    Build(String),

    #[error("Transport rejected email: {0}")]
    Transport(String),
}

/// A rendered HTML email ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct Email {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    pub attachment: Option<EmailAttachment>,
}

#[derive(Debug, Clone)]
pub struct EmailAttachment {
    /// File name shown to the recipient
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Something that can deliver an [`Email`].
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Dispatch `email`.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - An address does not parse
    /// - The message cannot be assembled
    /// - The transport refuses it
    async fn send(&self, email: Email) -> Result<(), MailError>;
}

/// SMTP mailer using Lettre's async transport.
///
/// # Configuration
///
/// - `host`: SMTP relay (e.g. "smtp.gmail.com"), reached over TLS
/// - `port`: usually 587 for STARTTLS or 465 for implicit TLS
/// - `username` / `password`: optional relay credentials
/// - `from`: sender mailbox, e.g. "Travel Bookings <no-reply@example.com>"
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Create a new SMTP mailer.
    ///
    /// No connection is opened until the first send.
    ///
    /// # Errors
    ///
    /// Returns error if the relay host or sender mailbox is invalid.
    pub fn new(
        host: &str,
        port: u16,
        username: Option<String>,
        password: Option<String>,
        from: &str,
    ) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| MailError::Transport(format!("SMTP relay error: {e}")))?
            .port(port);

        if let (Some(username), Some(password)) = (username, password) {
            builder = builder.credentials(Credentials::new(username, password));
        }

        let from: Mailbox = from
            .parse()
            .map_err(|e| MailError::Address(format!("{from}: {e}")))?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, email: Email) -> Result<Message, MailError> {
        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| MailError::Address(format!("{}: {e}", email.to)))?;

        let builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject);

        let message = match email.attachment {
            None => builder
                .header(ContentType::TEXT_HTML)
                .body(email.html_body),
            Some(attachment) => {
                let content_type = ContentType::parse(&attachment.content_type)
                    .map_err(|e| MailError::Build(format!("content type: {e}")))?;

                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::html(email.html_body))
                        .singlepart(
                            Attachment::new(attachment.filename)
                                .body(attachment.content, content_type),
                        ),
                )
            }
        };

        message.map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        let to = email.to.clone();
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::info!(to = %to, "Email sent");
        Ok(())
    }
}

/// Mailer that logs emails instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: Email) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            attachment = email.attachment.as_ref().map(|a| a.filename.as_str()),
            attachment_bytes = email.attachment.as_ref().map(|a| a.content.len()),
            "Email not sent: no SMTP relay configured"
        );
        Ok(())
    }
}
