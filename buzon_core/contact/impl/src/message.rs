use buzon_email_contracts::{ContentType, Email};
use buzon_models::{
    contact::Contact,
    email_address::{EmailAddress, EmailAddressWithName},
};
use chrono::{DateTime, Utc};

/// Renders the notification relayed to the administrator. The timestamp is
/// supplied by the caller so rendering stays deterministic.
pub(crate) fn admin_notification(
    admin: &EmailAddress,
    contact: &Contact,
    sent_at: DateTime<Utc>,
) -> Email {
    Email {
        recipient: admin.clone().into(),
        subject: format!("Tienes un nuevo mensaje de {}", *contact.name),
        body: format!(
            "👤 Nombre: {name}\n\
             ✉ Email: {email}\n\
             📲 Teléfono: {phone}\n\
             \n\
             ✅ Mensaje:\n\
             \n\
             - {message}\n\
             \n\
             ¡Espero tu respuesta!\n\
             \n\
             Enviado el: {sent_at}\n",
            name = *contact.name,
            email = *contact.email,
            phone = contact.phone.as_deref().map(String::as_str).unwrap_or_default(),
            message = *contact.message,
            sent_at = sent_at.format("%Y-%m-%d %H:%M:%S"),
        ),
        content_type: ContentType::Text,
        // The submitter address is only laxly validated; when it does not
        // parse as a mailbox the header is omitted instead of failing the
        // send.
        reply_to: contact.email.as_str().parse().ok(),
    }
}

/// Renders the acknowledgment sent back to the submitter.
pub(crate) fn welcome_email(recipient: EmailAddressWithName, contact: &Contact) -> Email {
    Email {
        recipient,
        subject: "Bienvenido".into(),
        body: format!(
            "Hola {name},\n\
             \n\
             Gracias por contactarnos. Hemos recibido tu mensaje y nos pondremos en contacto \
             contigo pronto.\n\
             \n\
             Saludos,\n\
             El equipo de Buzón\n",
            name = *contact.name,
        ),
        content_type: ContentType::Text,
        reply_to: None,
    }
}

#[cfg(test)]
mod tests {
    use buzon_models::contact::ContactForm;
    use chrono::TimeZone;

    use super::*;

    fn contact(email: &str, phone: &str) -> Contact {
        let submission = ContactForm {
            name: "Ana Gómez".into(),
            email: email.into(),
            phone: phone.into(),
            message: "Hola, quiero más información.".into(),
        }
        .normalized()
        .unwrap();

        Contact {
            id: 7.into(),
            name: submission.name,
            email: submission.email,
            phone: submission.phone,
            message: submission.message,
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn admin_notification_contains_the_submission() {
        let admin = "admin@example.com".parse().unwrap();
        let sent_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 17).unwrap();

        let email = admin_notification(&admin, &contact("ana@example.com", "+51 999 888 777"), sent_at);

        assert_eq!(email.recipient.as_str(), "admin@example.com");
        assert_eq!(email.subject, "Tienes un nuevo mensaje de Ana Gómez");
        assert_eq!(email.content_type, ContentType::Text);
        assert!(email.body.contains("Ana Gómez"));
        assert!(email.body.contains("ana@example.com"));
        assert!(email.body.contains("+51 999 888 777"));
        assert!(email.body.contains("Hola, quiero más información."));
        assert!(email.body.contains("Enviado el: 2025-03-14 09:30:17"));
        assert_eq!(
            email.reply_to,
            Some("ana@example.com".parse().unwrap())
        );
    }

    #[test]
    fn admin_notification_without_phone() {
        let admin = "admin@example.com".parse().unwrap();
        let sent_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 17).unwrap();

        let email = admin_notification(&admin, &contact("ana@example.com", ""), sent_at);

        assert!(email.body.contains("📲 Teléfono: \n"));
    }

    #[test]
    fn admin_notification_omits_unparsable_reply_to() {
        let admin = "admin@example.com".parse().unwrap();
        let sent_at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 17).unwrap();

        // Passes the lax form validation but is not a real mailbox.
        let email = admin_notification(&admin, &contact("ana gomez@sitio", ""), sent_at);

        assert_eq!(email.reply_to, None);
        assert!(email.body.contains("ana gomez@sitio"));
    }

    #[test]
    fn welcome_email_greets_the_submitter() {
        let contact = contact("ana@example.com", "");
        let recipient = contact.email.as_str().parse().unwrap();

        let email = welcome_email(recipient, &contact);

        assert_eq!(email.recipient.as_str(), "ana@example.com");
        assert_eq!(email.subject, "Bienvenido");
        assert!(email.body.contains("Hola Ana Gómez,"));
        assert_eq!(email.reply_to, None);
    }
}
