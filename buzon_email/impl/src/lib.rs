use std::time::Duration;

use anyhow::{anyhow, Context};
use buzon_email_contracts::{ContentType, Email, EmailService};
use buzon_utils::Apply;
use lettre::{
    message::{header, MessageBuilder},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    from: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
    configured: bool,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    pub server: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub timeout: Duration,
    /// False while the credentials are still the shipped placeholders, which
    /// turns every `send` into a no-op reporting `false`.
    pub configured: bool,
}

impl EmailServiceImpl {
    pub fn new(config: &EmailServiceConfig) -> anyhow::Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)
            .context("Failed to set up the smtp transport")?
            .port(config.port)
            .credentials(Credentials::new(
                config.user.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout))
            .build();

        Ok(Self {
            from: config.user.clone(),
            transport,
            configured: config.configured,
        })
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        if !self.configured {
            warn!(
                subject = %email.subject,
                "smtp credentials are still the placeholders, skipping delivery"
            );
            return Ok(false);
        }

        let message = Message::builder()
            .from(self.from.parse().context("Failed to parse sender address")?)
            .to(email.recipient.0)
            .apply_map(email.reply_to.map(|x| x.0), MessageBuilder::reply_to)
            .subject(email.subject)
            .header(match email.content_type {
                ContentType::Text => header::ContentType::TEXT_PLAIN,
                ContentType::Html => header::ContentType::TEXT_HTML,
            })
            .body(email.body)?;

        self.transport
            .send(message)
            .await
            .map(|response| response.is_positive())
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        if !self.configured {
            return Err(anyhow!("Smtp credentials are not configured"));
        }

        self.transport
            .test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}
