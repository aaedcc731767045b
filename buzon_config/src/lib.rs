use std::{net::IpAddr, path::Path};

use anyhow::Context;
use buzon_models::email_address::EmailAddress;
use config::{File, FileFormat};
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Credentials shipped in the default config. As long as they are unchanged,
/// the mailer refuses to open a connection to the relay.
pub const PLACEHOLDER_SMTP_USER: &str = "tu-email@gmail.com";
pub const PLACEHOLDER_SMTP_PASS: &str = "tu-password-app";

/// Loads the default config file, any extra files listed in the `BUZON_CONFIG`
/// environment variable (colon separated) and finally the documented
/// environment variable overrides.
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![DEFAULT_CONFIG_PATH.to_owned()];
    if let Ok(extra) = std::env::var("BUZON_CONFIG") {
        paths.extend(extra.split(':').filter(|p| !p.is_empty()).map(ToOwned::to_owned));
    }
    load_paths(&paths)
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    let mut config: Config = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")?;

    apply_env_overrides(&mut config)?;

    Ok(config)
}

fn apply_env_overrides(config: &mut Config) -> anyhow::Result<()> {
    if let Ok(user) = std::env::var("SMTP_USER") {
        config.email.user = user;
    }
    if let Ok(password) = std::env::var("SMTP_PASS") {
        config.email.password = password;
    }
    if let Ok(server) = std::env::var("SMTP_SERVER") {
        config.email.server = server;
    }
    if let Ok(port) = std::env::var("SMTP_PORT") {
        config.email.port = port.parse().context("Failed to parse SMTP_PORT")?;
    }
    if let Ok(admin_email) = std::env::var("ADMIN_EMAIL") {
        config.contact.admin_email = admin_email
            .parse()
            .context("Failed to parse ADMIN_EMAIL")?;
    }
    if let Ok(port) = std::env::var("PORT") {
        config.http.port = port.parse().context("Failed to parse PORT")?;
    }

    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub database: DatabaseConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub server: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub timeout: Duration,
}

impl EmailConfig {
    /// True once both credentials have been changed away from the shipped
    /// placeholders.
    pub fn is_configured(&self) -> bool {
        self.user != PLACEHOLDER_SMTP_USER && self.password != PLACEHOLDER_SMTP_PASS
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub admin_email: EmailAddress,
}
