use buzon_core_contact_impl::ContactFeatureServiceImpl;
use buzon_core_health_impl::HealthFeatureServiceImpl;
use buzon_email_impl::EmailServiceImpl;
use buzon_persistence_sqlite::{contact::SqliteContactRepository, SqliteDatabase};
use buzon_shared_impl::time::TimeServiceImpl;

// API
pub type RestServer = buzon_api_rest::RestServer<HealthFeature, ContactFeature>;

// Persistence
pub type Database = SqliteDatabase;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type Time = TimeServiceImpl;

// Repositories
pub type ContactRepo = SqliteContactRepository;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<Database, Time, Email, ContactRepo>;
pub type HealthFeature = HealthFeatureServiceImpl;
