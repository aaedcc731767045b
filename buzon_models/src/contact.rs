use chrono::{DateTime, Utc};
use nutype::nutype;
use serde::Serialize;
use thiserror::Error;

/// Row id assigned by the database on insert.
#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deref,
    From,
    Display,
    Serialize,
    Deserialize,
))]
pub struct ContactId(i64);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 2),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

/// The address of the person submitting the form. Deliberately lax: anything
/// containing an `@` after trimming is accepted, lowercased.
#[nutype(
    sanitize(trim, lowercase),
    validate(predicate = |email| email.contains('@')),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

/// Passed through exactly as submitted, no validation.
#[nutype(derive(Debug, Clone, PartialEq, Eq, From, Deref, Serialize, Deserialize))]
pub struct ContactPhone(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 10),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// Raw form input as received over the wire, before any validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    /// Validates the form and normalizes its fields.
    ///
    /// All rules are checked before reporting, so a single pass yields every
    /// violation, in field order. An empty phone maps to "no phone".
    pub fn normalized(self) -> Result<ContactSubmission, Vec<ContactFormViolation>> {
        let name = ContactName::try_new(self.name);
        let email = ContactEmail::try_new(self.email);
        let message = ContactMessageContent::try_new(self.message);

        let violations = [
            name.is_err().then_some(ContactFormViolation::Name),
            email.is_err().then_some(ContactFormViolation::Email),
            message.is_err().then_some(ContactFormViolation::Message),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        let (Ok(name), Ok(email), Ok(message)) = (name, email, message) else {
            return Err(violations);
        };

        Ok(ContactSubmission {
            name,
            email,
            phone: (!self.phone.is_empty()).then(|| self.phone.into()),
            message,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactFormViolation {
    #[error("El nombre debe tener al menos 2 caracteres")]
    Name,
    #[error("El email no es válido")]
    Email,
    #[error("El mensaje debe tener al menos 10 caracteres")]
    Message,
}

/// A validated and normalized submission, ready to be persisted and relayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: Option<ContactPhone>,
    pub message: ContactMessageContent,
}

/// A persisted contact record. Created once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: ContactName,
    pub email: ContactEmail,
    pub phone: Option<ContactPhone>,
    pub message: ContactMessageContent,
    pub created_at: DateTime<Utc>,
}
