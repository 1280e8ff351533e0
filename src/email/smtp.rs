use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{parse_mailbox, Notifier, NotifyError, OutboundEmail, SEND_TIMEOUT};
use crate::config::{SmtpConfig, TlsMode};

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig, from: &str) -> Result<Self, NotifyError> {
        Ok(Self {
            transport: build_transport(config)?,
            from: parse_mailbox(from)?,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    fn transport(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, email: &OutboundEmail) -> Result<(), NotifyError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(parse_mailbox(&email.to)?)
            .subject(email.subject.as_str());

        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(parse_mailbox(reply_to)?);
        }

        let message = builder
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| NotifyError::Build(e.to_string()))?;

        self.transport.send(message).await?;

        Ok(())
    }
}

fn build_transport(config: &SmtpConfig) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
    let builder = match config.tls {
        TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?,
        TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?,
        TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
    };

    let builder = builder.port(config.port).timeout(Some(SEND_TIMEOUT));

    let transport = match (&config.user, &config.pass) {
        (Some(user), Some(pass)) => builder
            .credentials(Credentials::new(user.clone(), pass.clone()))
            .build(),
        _ => builder.build(),
    };

    Ok(transport)
}
