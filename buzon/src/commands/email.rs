use anyhow::ensure;
use buzon_config::Config;
use buzon_email_contracts::{ContentType, Email, EmailService};
use buzon_models::email_address::EmailAddressWithName;
use clap::Subcommand;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
    /// Verify credentials and reachability of the configured relay without
    /// sending anything
    Ping,
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
            EmailCommand::Ping => ping(config).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;

    let ok = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    ensure!(ok, "Failed to send email");

    Ok(())
}

async fn ping(config: Config) -> anyhow::Result<()> {
    let email_service = email::connect(&config.email)?;
    email_service.ping().await?;
    println!("Smtp connection successful");

    Ok(())
}
