use std::sync::Arc;

use anyhow::Context;
use buzon_core_contact_contracts::{ContactFeatureService, ContactSubmitError, ContactSubmitted};
use buzon_email_contracts::EmailService;
use buzon_models::{
    contact::{Contact, ContactForm, ContactId},
    email_address::EmailAddress,
};
use buzon_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use buzon_shared_contracts::time::TimeService;
use tracing::{debug, error, info};

mod message;

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Db, Time, Email, ContactRepo> {
    db: Db,
    time: Time,
    email: Email,
    contact_repo: ContactRepo,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub admin_email: Arc<EmailAddress>,
}

impl<Db, Time, Email, ContactRepo> ContactFeatureServiceImpl<Db, Time, Email, ContactRepo> {
    pub fn new(
        db: Db,
        time: Time,
        email: Email,
        contact_repo: ContactRepo,
        config: ContactFeatureConfig,
    ) -> Self {
        Self {
            db,
            time,
            email,
            contact_repo,
            config,
        }
    }
}

impl<Db, Time, Email, ContactRepo> ContactFeatureService
    for ContactFeatureServiceImpl<Db, Time, Email, ContactRepo>
where
    Db: Database,
    Time: TimeService,
    Email: EmailService,
    ContactRepo: ContactRepository<Db::Transaction>,
{
    async fn submit(&self, form: ContactForm) -> Result<ContactSubmitted, ContactSubmitError> {
        let submission = form.normalized().map_err(ContactSubmitError::Validation)?;

        let mut txn = self.db.begin_transaction().await?;
        let contact = self
            .contact_repo
            .create(&mut txn, &submission)
            .await
            .context("Failed to store contact")?;
        txn.commit().await.context("Failed to commit transaction")?;

        // The record is durable now; delivery failures only flip the flag.
        let notification =
            message::admin_notification(&self.config.admin_email, &contact, self.time.now());
        let email_sent = match self.email.send(notification).await {
            Ok(sent) => {
                if sent {
                    info!(
                        contact_id = %contact.id,
                        "contact notification delivered to {}",
                        self.config.admin_email
                    );
                }
                sent
            }
            Err(err) => {
                error!("Failed to send contact notification: {err:#}");
                false
            }
        };

        // Independent of the notification above; the outcome is only logged.
        match contact.email.as_str().parse() {
            Ok(recipient) => {
                if let Err(err) = self
                    .email
                    .send(message::welcome_email(recipient, &contact))
                    .await
                {
                    error!("Failed to send welcome email: {err:#}");
                }
            }
            Err(err) => {
                debug!("Skipping welcome email, submitter address is not a mailbox: {err}");
            }
        }

        Ok(ContactSubmitted {
            contact,
            email_sent,
        })
    }

    async fn list(&self, limit: u64) -> anyhow::Result<Vec<Contact>> {
        let mut txn = self.db.begin_transaction().await?;
        self.contact_repo.list(&mut txn, limit).await
    }

    async fn get(&self, contact_id: ContactId) -> anyhow::Result<Option<Contact>> {
        let mut txn = self.db.begin_transaction().await?;
        self.contact_repo.get(&mut txn, contact_id).await
    }

    async fn delete(&self, contact_id: ContactId) -> anyhow::Result<bool> {
        let mut txn = self.db.begin_transaction().await?;
        let deleted = self.contact_repo.delete(&mut txn, contact_id).await?;
        txn.commit().await.context("Failed to commit transaction")?;
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use buzon_email_contracts::{ContentType, Email, MockEmailService};
    use buzon_models::contact::{ContactFormViolation, ContactSubmission};
    use buzon_persistence_contracts::{contact::MockContactRepository, MockDatabase, MockTransaction};
    use buzon_shared_contracts::time::MockTimeService;
    use buzon_utils::assert_matches;
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    type Sut = ContactFeatureServiceImpl<
        MockDatabase,
        MockTimeService,
        MockEmailService,
        MockContactRepository<MockTransaction>,
    >;

    fn config() -> ContactFeatureConfig {
        ContactFeatureConfig {
            admin_email: Arc::new("admin@example.com".parse().unwrap()),
        }
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "Ana Gómez".into(),
            email: "ana@example.com".into(),
            phone: "+51 999 888 777".into(),
            message: "Hola, quiero más información.".into(),
        }
    }

    fn submission() -> ContactSubmission {
        form().normalized().unwrap()
    }

    fn contact() -> Contact {
        let submission = submission();
        Contact {
            id: 1.into(),
            name: submission.name,
            email: submission.email,
            phone: submission.phone,
            message: submission.message,
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 17).unwrap()
    }

    fn admin_notification(sent_at: DateTime<Utc>) -> Email {
        Email {
            recipient: "admin@example.com".parse().unwrap(),
            subject: "Tienes un nuevo mensaje de Ana Gómez".into(),
            body: format!(
                "👤 Nombre: Ana Gómez\n✉ Email: ana@example.com\n📲 Teléfono: +51 999 888 \
                 777\n\n✅ Mensaje:\n\n- Hola, quiero más información.\n\n¡Espero tu \
                 respuesta!\n\nEnviado el: {}\n",
                sent_at.format("%Y-%m-%d %H:%M:%S")
            ),
            content_type: ContentType::Text,
            reply_to: Some("ana@example.com".parse().unwrap()),
        }
    }

    fn welcome() -> Email {
        Email {
            recipient: "ana@example.com".parse().unwrap(),
            subject: "Bienvenido".into(),
            body: "Hola Ana Gómez,\n\nGracias por contactarnos. Hemos recibido tu mensaje y nos \
                   pondremos en contacto contigo pronto.\n\nSaludos,\nEl equipo de Buzón\n"
                .into(),
            content_type: ContentType::Text,
            reply_to: None,
        }
    }

    #[tokio::test]
    async fn submit_ok() {
        // Arrange
        let sut: Sut = ContactFeatureServiceImpl {
            db: MockDatabase::build(true),
            time: MockTimeService::new().with_now(now()),
            email: MockEmailService::new()
                .with_send(admin_notification(now()), true)
                .with_send(welcome(), true),
            contact_repo: MockContactRepository::new().with_create(submission(), contact()),
            config: config(),
        };

        // Act
        let result = sut.submit(form()).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactSubmitted {
                contact: contact(),
                email_sent: true,
            }
        );
    }

    #[tokio::test]
    async fn submit_invalid_form_is_rejected_without_side_effects() {
        // Arrange
        let sut: Sut = ContactFeatureServiceImpl {
            db: MockDatabase::new(),
            time: MockTimeService::new(),
            email: MockEmailService::new(),
            contact_repo: MockContactRepository::new(),
            config: config(),
        };

        // Act
        let result = sut
            .submit(ContactForm {
                name: "A".into(),
                email: "bad".into(),
                phone: "".into(),
                message: "short".into(),
            })
            .await;

        // Assert
        assert_matches!(
            result,
            Err(ContactSubmitError::Validation(violations))
                if *violations == [
                    ContactFormViolation::Name,
                    ContactFormViolation::Email,
                    ContactFormViolation::Message,
                ]
        );
    }

    #[tokio::test]
    async fn submit_transport_error_is_absorbed() {
        // Arrange
        let sut: Sut = ContactFeatureServiceImpl {
            db: MockDatabase::build(true),
            time: MockTimeService::new().with_now(now()),
            email: MockEmailService::new()
                .with_send_error(admin_notification(now()), anyhow::anyhow!("connection refused"))
                .with_send(welcome(), true),
            contact_repo: MockContactRepository::new().with_create(submission(), contact()),
            config: config(),
        };

        // Act
        let result = sut.submit(form()).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactSubmitted {
                contact: contact(),
                email_sent: false,
            }
        );
    }

    #[tokio::test]
    async fn submit_rejected_by_relay_reports_email_not_sent() {
        // Arrange
        let sut: Sut = ContactFeatureServiceImpl {
            db: MockDatabase::build(true),
            time: MockTimeService::new().with_now(now()),
            email: MockEmailService::new()
                .with_send(admin_notification(now()), false)
                .with_send(welcome(), true),
            contact_repo: MockContactRepository::new().with_create(submission(), contact()),
            config: config(),
        };

        // Act
        let result = sut.submit(form()).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactSubmitted {
                contact: contact(),
                email_sent: false,
            }
        );
    }

    #[tokio::test]
    async fn submit_welcome_failure_is_swallowed() {
        // Arrange
        let sut: Sut = ContactFeatureServiceImpl {
            db: MockDatabase::build(true),
            time: MockTimeService::new().with_now(now()),
            email: MockEmailService::new()
                .with_send(admin_notification(now()), true)
                .with_send_error(welcome(), anyhow::anyhow!("mailbox unavailable")),
            contact_repo: MockContactRepository::new().with_create(submission(), contact()),
            config: config(),
        };

        // Act
        let result = sut.submit(form()).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactSubmitted {
                contact: contact(),
                email_sent: true,
            }
        );
    }

    #[tokio::test]
    async fn submit_skips_welcome_for_unparsable_submitter_address() {
        // Arrange
        let form = ContactForm {
            email: "ana gomez@sitio".into(),
            ..form()
        };
        let submission = form.clone().normalized().unwrap();
        let contact = Contact {
            id: 1.into(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            message: submission.message.clone(),
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap(),
        };
        let notification = Email {
            reply_to: None,
            body: format!(
                "👤 Nombre: Ana Gómez\n✉ Email: ana gomez@sitio\n📲 Teléfono: +51 999 888 \
                 777\n\n✅ Mensaje:\n\n- Hola, quiero más información.\n\n¡Espero tu \
                 respuesta!\n\nEnviado el: {}\n",
                now().format("%Y-%m-%d %H:%M:%S")
            ),
            ..admin_notification(now())
        };

        let sut: Sut = ContactFeatureServiceImpl {
            db: MockDatabase::build(true),
            time: MockTimeService::new().with_now(now()),
            email: MockEmailService::new().with_send(notification, true),
            contact_repo: MockContactRepository::new().with_create(submission, contact.clone()),
            config: config(),
        };

        // Act
        let result = sut.submit(form).await;

        // Assert
        assert_eq!(
            result.unwrap(),
            ContactSubmitted {
                contact,
                email_sent: true,
            }
        );
    }

    #[tokio::test]
    async fn list() {
        // Arrange
        let sut: Sut = ContactFeatureServiceImpl {
            db: MockDatabase::build(false),
            time: MockTimeService::new(),
            email: MockEmailService::new(),
            contact_repo: MockContactRepository::new().with_list(50, vec![contact()]),
            config: config(),
        };

        // Act
        let result = sut.list(50).await;

        // Assert
        assert_eq!(result.unwrap(), [contact()]);
    }

    #[tokio::test]
    async fn get() {
        // Arrange
        let sut: Sut = ContactFeatureServiceImpl {
            db: MockDatabase::build(false),
            time: MockTimeService::new(),
            email: MockEmailService::new(),
            contact_repo: MockContactRepository::new().with_get(1.into(), Some(contact())),
            config: config(),
        };

        // Act
        let result = sut.get(1.into()).await;

        // Assert
        assert_eq!(result.unwrap(), Some(contact()));
    }

    #[tokio::test]
    async fn delete() {
        // Arrange
        let sut: Sut = ContactFeatureServiceImpl {
            db: MockDatabase::build(true),
            time: MockTimeService::new(),
            email: MockEmailService::new(),
            contact_repo: MockContactRepository::new().with_delete(1.into(), true),
            config: config(),
        };

        // Act
        let result = sut.delete(1.into()).await;

        // Assert
        assert!(result.unwrap());
    }
}
