use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Row, Sqlite,
};
use std::{collections::HashMap, str::FromStr, sync::Arc};
use tokio::sync::Mutex;
use tracing::{info, warn};

pub mod config;

/// Port onto the external key/value store: one serialized string value per
/// string key, last write wins.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>>;
    async fn save(&self, key: &str, value: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        config::ensure_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;
        let storage = Self { pool };
        storage.ensure_local_entries_table().await?;
        info!(%database_url, "opened local store");
        Ok(storage)
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    async fn ensure_local_entries_table(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS local_entries (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure local_entries table exists")?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for Storage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM local_entries WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| r.get::<String, _>(0)))
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            "INSERT INTO local_entries (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().await;
        Ok(entries.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Append-only log of submission records, one ordered JSON array per key.
///
/// Logs grow without bound: nothing in the product flow deletes or rewrites
/// entries, so retention is the embedder's concern.
#[derive(Clone)]
pub struct SubmissionLog {
    store: Arc<dyn KeyValueStore>,
}

impl SubmissionLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Records currently stored under `key`. An absent key, or a value that
    /// does not parse as a record array, reads as empty.
    pub async fn read_all<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let Some(raw) = self.store.load(key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(records),
            Err(error) => {
                warn!(%key, %error, "stored value is not a record array, reading as empty");
                Ok(Vec::new())
            }
        }
    }

    /// Appends `record` to the sequence under `key` via read-modify-write.
    /// Field order survives the rewrite (serde_json's `preserve_order`).
    /// Store faults propagate; the sequence is untouched when they do.
    pub async fn append<T>(&self, key: &str, record: &T) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let mut records = self.read_all::<serde_json::Value>(key).await?;
        records.push(
            serde_json::to_value(record)
                .with_context(|| format!("failed to serialize record for key '{key}'"))?,
        );
        let encoded = serde_json::to_string(&records)
            .with_context(|| format!("failed to encode record array for key '{key}'"))?;
        self.store.save(key, &encoded).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
