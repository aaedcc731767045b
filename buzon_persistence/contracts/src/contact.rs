use std::future::Future;

use buzon_models::contact::{Contact, ContactId, ContactSubmission};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactRepository<Txn: Send + Sync + 'static>: Send + Sync + 'static {
    /// Inserts a new contact record. The id and creation timestamp are
    /// assigned by the database.
    fn create(
        &self,
        txn: &mut Txn,
        submission: &ContactSubmission,
    ) -> impl Future<Output = anyhow::Result<Contact>> + Send;

    /// Returns the most recent contacts, newest first.
    fn list(
        &self,
        txn: &mut Txn,
        limit: u64,
    ) -> impl Future<Output = anyhow::Result<Vec<Contact>>> + Send;

    /// Returns the contact with the given id.
    fn get(
        &self,
        txn: &mut Txn,
        contact_id: ContactId,
    ) -> impl Future<Output = anyhow::Result<Option<Contact>>> + Send;

    /// Deletes the contact with the given id and reports whether it existed.
    fn delete(
        &self,
        txn: &mut Txn,
        contact_id: ContactId,
    ) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

#[cfg(feature = "mock")]
impl<Txn: Send + Sync + 'static> MockContactRepository<Txn> {
    pub fn with_create(mut self, submission: ContactSubmission, result: Contact) -> Self {
        self.expect_create()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(submission))
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_list(mut self, limit: u64, result: Vec<Contact>) -> Self {
        self.expect_list()
            .once()
            .with(mockall::predicate::always(), mockall::predicate::eq(limit))
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_get(mut self, contact_id: ContactId, result: Option<Contact>) -> Self {
        self.expect_get()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(contact_id),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_delete(mut self, contact_id: ContactId, result: bool) -> Self {
        self.expect_delete()
            .once()
            .with(
                mockall::predicate::always(),
                mockall::predicate::eq(contact_id),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(Ok(result))));
        self
    }
}
