use crate::error::Result;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use std::{fs, path::Path};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file attached to an outgoing mail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl MailAttachment {
    pub fn new(filename: &str, content_type: &str, data: Vec<u8>) -> Self {
        Self {
            filename: filename.to_owned(),
            content_type: content_type.to_owned(),
            data,
        }
    }

    /// Reads the file at `path`, attaching it under its file name as `application/octet-stream`.
    pub fn from_path(path: &str) -> Result<Self> {
        let data = fs::read(path)?;
        let filename = Path::new(path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_owned());
        Ok(Self {
            filename,
            content_type: DEFAULT_CONTENT_TYPE.to_owned(),
            data,
        })
    }
}

/// Sends plain text mails from one account through an SMTP relay over STARTTLS.
///
/// Subjects are prefixed with `[{user_name}] - `, where the user name is the
/// local account running the program unless overridden with [`EmailSender::with_user_name`].
pub struct EmailSender {
    host: String,
    port: u16,
    account: String,
    password: String,
    user_name: String,
}

impl EmailSender {
    pub fn new(host: &str, port: u16, account: &str, password: &str) -> Self {
        let user_name = std::env::var("USERNAME")
            .or_else(|_| std::env::var("USER"))
            .unwrap_or_else(|_| account.to_owned());
        Self {
            host: host.to_owned(),
            port,
            account: account.to_owned(),
            password: password.to_owned(),
            user_name,
        }
    }

    pub fn with_user_name(mut self, user_name: &str) -> Self {
        self.user_name = user_name.to_owned();
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Builds the mail [`EmailSender::send`] would deliver, without connecting anywhere.
    pub fn build_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Option<&MailAttachment>,
    ) -> Result<Message> {
        let builder = Message::builder()
            .from(self.account.parse::<Mailbox>()?)
            .to(to.parse::<Mailbox>()?)
            .subject(format!("[{}] - {subject}", self.user_name));

        let message = match attachment {
            None => builder
                .header(ContentType::TEXT_PLAIN)
                .body(body.to_owned())?,
            Some(attachment) => {
                let content_type = ContentType::parse(&attachment.content_type)?;
                builder.multipart(
                    MultiPart::mixed()
                        .singlepart(SinglePart::plain(body.to_owned()))
                        .singlepart(
                            Attachment::new(attachment.filename.clone())
                                .body(attachment.data.clone(), content_type),
                        ),
                )?
            }
        };
        Ok(message)
    }

    pub fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachment: Option<&MailAttachment>,
    ) -> Result<()> {
        let message = self.build_message(to, subject, body, attachment)?;
        let transport = SmtpTransport::starttls_relay(&self.host)?
            .port(self.port)
            .credentials(Credentials::new(
                self.account.clone(),
                self.password.clone(),
            ))
            .build();
        transport.send(&message)?;
        log::info!("sent mail to {to} through {}:{}", self.host, self.port);
        Ok(())
    }
}
