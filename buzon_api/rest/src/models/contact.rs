use buzon_models::contact::ContactForm;
use serde::{Deserialize, Serialize};

/// Incoming contact payload. Every key must be present (phone may be an empty
/// string); an absent or null key is a structural error, reported before any
/// content validation runs.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl ApiContactForm {
    pub fn into_form(self) -> Option<ContactForm> {
        Some(ContactForm {
            name: self.name?,
            email: self.email?,
            phone: self.phone?,
            message: self.message?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiContactSubmitted {
    pub success: bool,
    pub message: &'static str,
    pub email_sent: bool,
}
