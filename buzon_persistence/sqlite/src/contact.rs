use anyhow::Context;
use buzon_models::contact::{
    Contact, ContactEmail, ContactId, ContactMessageContent, ContactName, ContactSubmission,
};
use buzon_persistence_contracts::contact::ContactRepository;
use chrono::NaiveDateTime;
use sqlx::{sqlite::SqliteRow, Row};

use crate::SqliteTransaction;

#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteContactRepository;

const CONTACT_COLS: &str = "id, name, email, phone, message, created_at";

impl ContactRepository<SqliteTransaction> for SqliteContactRepository {
    async fn create(
        &self,
        txn: &mut SqliteTransaction,
        submission: &ContactSubmission,
    ) -> anyhow::Result<Contact> {
        let row = sqlx::query(
            "insert into contacts (name, email, phone, message) values (?1, ?2, ?3, ?4) \
             returning id, created_at",
        )
        .bind(submission.name.as_str())
        .bind(submission.email.as_str())
        .bind(submission.phone.as_ref().map(|phone| phone.as_str()))
        .bind(submission.message.as_str())
        .fetch_one(txn.conn())
        .await
        .context("Failed to insert contact")?;

        let created_at: NaiveDateTime = row.try_get("created_at")?;

        Ok(Contact {
            id: row.try_get::<i64, _>("id")?.into(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            message: submission.message.clone(),
            created_at: created_at.and_utc(),
        })
    }

    async fn list(
        &self,
        txn: &mut SqliteTransaction,
        limit: u64,
    ) -> anyhow::Result<Vec<Contact>> {
        sqlx::query(&format!(
            "select {CONTACT_COLS} from contacts order by created_at desc, id desc limit ?1"
        ))
        .bind(limit as i64)
        .fetch_all(txn.conn())
        .await
        .map_err(Into::into)
        .and_then(|rows| rows.iter().map(decode_contact).collect())
    }

    async fn get(
        &self,
        txn: &mut SqliteTransaction,
        contact_id: ContactId,
    ) -> anyhow::Result<Option<Contact>> {
        sqlx::query(&format!(
            "select {CONTACT_COLS} from contacts where id = ?1"
        ))
        .bind(*contact_id)
        .fetch_optional(txn.conn())
        .await
        .map_err(Into::into)
        .and_then(|row| row.as_ref().map(decode_contact).transpose())
    }

    async fn delete(
        &self,
        txn: &mut SqliteTransaction,
        contact_id: ContactId,
    ) -> anyhow::Result<bool> {
        sqlx::query("delete from contacts where id = ?1")
            .bind(*contact_id)
            .execute(txn.conn())
            .await
            .map(|result| result.rows_affected() > 0)
            .map_err(Into::into)
    }
}

fn decode_contact(row: &SqliteRow) -> anyhow::Result<Contact> {
    let created_at: NaiveDateTime = row.try_get("created_at")?;

    Ok(Contact {
        id: row.try_get::<i64, _>("id")?.into(),
        name: ContactName::try_new(row.try_get::<String, _>("name")?)?,
        email: ContactEmail::try_new(row.try_get::<String, _>("email")?)?,
        phone: row
            .try_get::<Option<String>, _>("phone")?
            .map(Into::into),
        message: ContactMessageContent::try_new(row.try_get::<String, _>("message")?)?,
        created_at: created_at.and_utc(),
    })
}
