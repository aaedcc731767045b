use buzon_config::Config;
use buzon_persistence_contracts::Database as _;
use tracing::{info, warn};

use crate::{database, email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database");
    let db = database::connect(&config.database).await?;
    db.ping().await?;

    info!("Applying pending migrations");
    let mut applied = false;
    for name in db.run_migrations(None).await? {
        info!("Applied {name}");
        applied = true;
    }
    if !applied {
        info!("No migrations pending");
    }

    let email = email::connect(&config.email)?;
    if config.email.is_configured() {
        info!("Smtp relay configured at {}:{}", config.email.server, config.email.port);
    } else {
        warn!("Smtp credentials are still the placeholders, notifications will not be delivered");
    }
    info!(
        "Contact notifications addressed to {}",
        config.contact.admin_email
    );

    let server = environment::rest_server(&config, db, email);
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
