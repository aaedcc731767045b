use anyhow::Context;
use buzon_config::EmailConfig;
use buzon_email_impl::{EmailServiceConfig, EmailServiceImpl};

/// Set up the smtp transport. The connection itself is only opened on the
/// first delivery attempt.
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&EmailServiceConfig {
        server: config.server.clone(),
        port: config.port,
        user: config.user.clone(),
        password: config.password.clone(),
        timeout: config.timeout.into(),
        configured: config.is_configured(),
    })
    .context("Failed to set up the smtp transport")
}
