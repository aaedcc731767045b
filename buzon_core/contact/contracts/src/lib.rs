use std::future::Future;

use buzon_models::contact::{Contact, ContactForm, ContactFormViolation, ContactId};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Validates and stores a submission, then relays it to the administrator
    /// by email.
    ///
    /// Delivery is best effort: a failed or skipped notification is reported
    /// through [`ContactSubmitted::email_sent`], never as an error, since the
    /// record has already been stored at that point.
    fn submit(
        &self,
        form: ContactForm,
    ) -> impl Future<Output = Result<ContactSubmitted, ContactSubmitError>> + Send;

    /// Returns the most recent contacts, newest first.
    fn list(&self, limit: u64) -> impl Future<Output = anyhow::Result<Vec<Contact>>> + Send;

    /// Returns the contact with the given id.
    fn get(
        &self,
        contact_id: ContactId,
    ) -> impl Future<Output = anyhow::Result<Option<Contact>>> + Send;

    /// Deletes the contact with the given id and reports whether it existed.
    fn delete(&self, contact_id: ContactId) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmitted {
    pub contact: Contact,
    pub email_sent: bool,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("The submission failed validation.")]
    Validation(Vec<ContactFormViolation>),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_submit(
        mut self,
        form: ContactForm,
        result: Result<ContactSubmitted, ContactSubmitError>,
    ) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_list(mut self, limit: u64, result: Vec<Contact>) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::eq(limit))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_get(mut self, contact_id: ContactId, result: Option<Contact>) -> Self {
        self.expect_get()
            .once()
            .with(mockall::predicate::eq(contact_id))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_delete(mut self, contact_id: ContactId, result: bool) -> Self {
        self.expect_delete()
            .once()
            .with(mockall::predicate::eq(contact_id))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
