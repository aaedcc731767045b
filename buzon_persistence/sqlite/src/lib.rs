use std::collections::HashSet;

use anyhow::Context;
use buzon_persistence_contracts::{Database, Transaction};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Connection, SqliteConnection,
};
use tracing::trace;

pub mod contact;

#[derive(Debug, Clone)]
pub struct SqliteDatabase {
    pool: SqlitePool,
}

#[derive(Debug)]
pub struct SqliteDatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: std::time::Duration,
    pub idle_timeout: Option<std::time::Duration>,
    pub max_lifetime: Option<std::time::Duration>,
}

impl SqliteDatabase {
    pub async fn connect(config: &SqliteDatabaseConfig) -> anyhow::Result<Self> {
        let options = config
            .url
            .parse::<SqliteConnectOptions>()
            .context("Failed to parse database url")?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect_with(options)
            .await
            .context("Failed to open database")?;

        Ok(Self { pool })
    }

    pub async fn list_migrations(&self) -> anyhow::Result<Vec<MigrationStatus>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;
        create_migrations_table(&mut conn)
            .await
            .context("Failed to create migrations table")?;
        list_migrations(&mut conn)
            .await
            .context("Failed to list migrations")
    }

    pub async fn run_migrations(&self, cnt: Option<usize>) -> anyhow::Result<Vec<&'static str>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;
        create_migrations_table(&mut conn)
            .await
            .context("Failed to create migrations table")?;

        let pending = list_migrations(&mut conn)
            .await
            .context("Failed to list migrations")?
            .into_iter()
            .filter_map(|MigrationStatus { migration, applied }| (!applied).then_some(migration))
            .take(cnt.unwrap_or(usize::MAX))
            .collect::<Vec<_>>();

        let mut out = Vec::new();
        for migration in pending {
            let mut txn = conn
                .begin()
                .await
                .context("Failed to begin transaction")?;
            sqlx::raw_sql(migration.up)
                .execute(&mut *txn)
                .await
                .with_context(|| format!("Failed to run migration {}", migration.name))?;
            sqlx::query("insert into _migrations (name) values (?1)")
                .bind(migration.name)
                .execute(&mut *txn)
                .await
                .with_context(|| format!("Failed to mark migration {} as run", migration.name))?;
            txn.commit().await.context("Failed to commit transaction")?;
            out.push(migration.name);
        }
        Ok(out)
    }

    pub async fn revert_migrations(&self, cnt: Option<usize>) -> anyhow::Result<Vec<&'static str>> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;
        create_migrations_table(&mut conn)
            .await
            .context("Failed to create migrations table")?;

        let applied = list_migrations(&mut conn)
            .await
            .context("Failed to list migrations")?
            .into_iter()
            .rev()
            .filter_map(|MigrationStatus { migration, applied }| applied.then_some(migration))
            .take(cnt.unwrap_or(usize::MAX))
            .collect::<Vec<_>>();

        let mut out = Vec::new();
        for migration in applied {
            let mut txn = conn
                .begin()
                .await
                .context("Failed to begin transaction")?;
            sqlx::raw_sql(migration.down)
                .execute(&mut *txn)
                .await
                .with_context(|| format!("Failed to revert migration {}", migration.name))?;
            sqlx::query("delete from _migrations where name = ?1")
                .bind(migration.name)
                .execute(&mut *txn)
                .await
                .with_context(|| {
                    format!("Failed to mark migration {} as reverted", migration.name)
                })?;
            txn.commit().await.context("Failed to commit transaction")?;
            out.push(migration.name);
        }

        Ok(out)
    }

    /// Drops every table, including the migration bookkeeping.
    pub async fn reset(&self) -> anyhow::Result<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;

        let tables = sqlx::query_scalar::<_, String>(
            "select name from sqlite_master where type = 'table' and name not like 'sqlite_%'",
        )
        .fetch_all(&mut *conn)
        .await
        .context("Failed to list tables")?;

        sqlx::query("pragma foreign_keys = off")
            .execute(&mut *conn)
            .await?;
        for table in tables {
            sqlx::query(&format!("drop table if exists \"{table}\""))
                .execute(&mut *conn)
                .await
                .with_context(|| format!("Failed to drop table {table}"))?;
        }
        sqlx::query("pragma foreign_keys = on")
            .execute(&mut *conn)
            .await?;

        Ok(())
    }
}

impl Database for SqliteDatabase {
    type Transaction = SqliteTransaction;

    async fn begin_transaction(&self) -> anyhow::Result<Self::Transaction> {
        trace!("begin transaction");

        self.pool
            .begin()
            .await
            .map(SqliteTransaction)
            .context("Failed to begin transaction")
    }

    async fn ping(&self) -> anyhow::Result<()> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire database connection")?;
        conn.ping().await.context("Failed to ping database")
    }
}

pub struct SqliteTransaction(sqlx::Transaction<'static, sqlx::Sqlite>);

impl SqliteTransaction {
    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.0
    }
}

impl Transaction for SqliteTransaction {
    async fn commit(self) -> anyhow::Result<()> {
        trace!("commit transaction");
        self.0.commit().await.context("Failed to commit transaction")
    }

    async fn rollback(self) -> anyhow::Result<()> {
        trace!("rollback transaction");
        self.0
            .rollback()
            .await
            .context("Failed to rollback transaction")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub name: &'static str,
    pub up: &'static str,
    pub down: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct MigrationStatus {
    pub migration: Migration,
    pub applied: bool,
}

pub const MIGRATIONS: &[Migration] = include!(env!("MIGRATIONS"));

async fn create_migrations_table(conn: &mut SqliteConnection) -> anyhow::Result<()> {
    sqlx::query("create table if not exists _migrations (name text primary key)")
        .execute(conn)
        .await?;
    Ok(())
}

async fn list_migrations(conn: &mut SqliteConnection) -> anyhow::Result<Vec<MigrationStatus>> {
    let applied = sqlx::query_scalar::<_, String>("select name from _migrations")
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .collect::<HashSet<_>>();

    Ok(MIGRATIONS
        .iter()
        .map(|&migration| MigrationStatus {
            migration,
            applied: applied.contains(migration.name),
        })
        .collect())
}
