use std::sync::Arc;

use buzon_config::Config;
use buzon_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use buzon_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use buzon_persistence_sqlite::contact::SqliteContactRepository;
use buzon_shared_impl::time::TimeServiceImpl;
use types::{ContactFeature, Database, Email, HealthFeature, RestServer};

pub mod types;

/// Builds the contact feature from the connected external services. The
/// service graph is small enough to wire by hand.
pub fn contact_feature(config: &Config, database: Database, email: Email) -> ContactFeature {
    ContactFeatureServiceImpl::new(
        database,
        TimeServiceImpl,
        email,
        SqliteContactRepository,
        ContactFeatureConfig {
            admin_email: Arc::new(config.contact.admin_email.clone()),
        },
    )
}

pub fn health_feature(config: &Config) -> HealthFeature {
    HealthFeatureServiceImpl::new(HealthFeatureConfig {
        smtp_configured: config.email.is_configured(),
    })
}

pub fn rest_server(config: &Config, database: Database, email: Email) -> RestServer {
    RestServer::new(
        health_feature(config),
        contact_feature(config, database, email),
    )
}
