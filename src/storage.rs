use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use std::time::Duration;

use crate::config::StudioConfig;
use crate::models::Envelope;
use crate::seed;

// Key/value table holding the serialized studio record
const MIGRATIONS_SQL: &str = "
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);
";

/// Reads and writes the whole studio [`Envelope`] as one JSON value under a fixed key.
#[derive(Debug)]
pub struct StorageManager {
    pool: SqlitePool,
    key: String,
}

impl StorageManager {
    /// Connects using the database url and storage key from `config`.
    pub async fn new(config: &StudioConfig) -> Result<Self> {
        Self::connect(&config.database_url, &config.storage_key).await
    }

    /// Connects to the database, creating it if needed, and runs migrations.
    pub async fn connect(db_url: &str, key: &str) -> Result<Self> {
        log::info!("Connecting to database: {}", db_url);
        let options = SqliteConnectOptions::from_str(db_url)
            .context("Failed to parse database url")?
            .create_if_missing(true);

        // One long-lived connection: there is exactly one writer, and an
        // in-memory database lives only as long as its connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(Option::<Duration>::None)
            .max_lifetime(Option::<Duration>::None)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        Self::run_migrations(&pool).await?;

        Ok(Self {
            pool,
            key: key.to_string(),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        log::debug!("Running database migrations...");
        sqlx::query(MIGRATIONS_SQL)
            .execute(pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Loads the saved record, or the default record if it is absent or unreadable.
    /// Never fails.
    pub async fn load(&self) -> Envelope {
        match self.try_load().await {
            Ok(Some(envelope)) => {
                log::info!(
                    "Loaded studio state: {} templates, {} generations",
                    envelope.templates.len(),
                    envelope.gens.len()
                );
                envelope
            }
            Ok(None) => {
                log::info!("No saved studio state under '{}', using defaults", self.key);
                seed::default_envelope()
            }
            Err(e) => {
                log::warn!("Failed to load studio state, using defaults: {:?}", e);
                seed::default_envelope()
            }
        }
    }

    /// Loads the saved record, surfacing read and parse failures.
    pub async fn try_load(&self) -> Result<Option<Envelope>> {
        let Some(raw) = self.read_raw().await? else {
            return Ok(None);
        };
        let envelope = serde_json::from_str(&raw).context("Failed to parse saved studio state")?;
        Ok(Some(envelope))
    }

    /// Serializes and writes the full record, replacing whatever was stored.
    pub async fn save(&self, envelope: &Envelope) -> Result<()> {
        let value = serde_json::to_string(envelope).context("Failed to serialize studio state")?;
        self.write_raw(&value).await?;
        log::debug!("Saved studio state ({} bytes)", value.len());
        Ok(())
    }

    pub async fn read_raw(&self) -> Result<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT value FROM settings WHERE key = ?")
            .bind(self.key.as_str())
            .fetch_optional(&self.pool)
            .await
            .context("Failed to read studio state from database")
    }

    pub async fn write_raw(&self, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO settings (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(self.key.as_str())
        .bind(value)
        .execute(&self.pool)
        .await
        .context("Failed to write studio state to database")?;
        Ok(())
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_STORAGE_KEY;
    use crate::models::Template;

    async fn memory_storage() -> StorageManager {
        StorageManager::connect("sqlite::memory:", DEFAULT_STORAGE_KEY)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_load_defaults_when_absent() {
        let storage = memory_storage().await;
        assert!(storage.try_load().await.unwrap().is_none());

        let envelope = storage.load().await;
        assert_eq!(envelope.templates.len(), 7);
        assert!(envelope.gens.is_empty());
        assert!(envelope.provider.use_mock);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let storage = memory_storage().await;
        let mut envelope = seed::default_envelope();
        envelope.templates.truncate(2);
        envelope.context.mission = "Annen misjon".to_string();

        storage.save(&envelope).await.unwrap();
        assert_eq!(storage.load().await, envelope);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let storage = memory_storage().await;
        let mut envelope = seed::default_envelope();
        storage.save(&envelope).await.unwrap();

        envelope.templates = vec![Template::blank()];
        storage.save(&envelope).await.unwrap();

        let loaded = storage.load().await;
        assert_eq!(loaded.templates.len(), 1);
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM settings")
            .fetch_one(storage.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_corrupt_record_falls_back_to_defaults() {
        let storage = memory_storage().await;
        storage.write_raw("{not json").await.unwrap();

        assert!(storage.try_load().await.is_err());
        let envelope = storage.load().await;
        assert_eq!(envelope.templates.len(), 7);
    }

    #[tokio::test]
    async fn test_wrong_shape_falls_back_to_defaults() {
        let storage = memory_storage().await;
        storage.write_raw(r#"{"templates": 5}"#).await.unwrap();

        let envelope = storage.load().await;
        assert_eq!(envelope.templates.len(), 7);
    }

    #[tokio::test]
    async fn test_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("studio.sqlite").display());

        let mut envelope = seed::default_envelope();
        envelope.provider.model = "local-model".to_string();
        {
            let storage = StorageManager::connect(&url, DEFAULT_STORAGE_KEY).await.unwrap();
            storage.save(&envelope).await.unwrap();
            storage.close().await;
        }

        let storage = StorageManager::connect(&url, DEFAULT_STORAGE_KEY).await.unwrap();
        assert_eq!(storage.load().await, envelope);
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("studio.sqlite").display());

        let first = StorageManager::connect(&url, "first").await.unwrap();
        first.save(&seed::default_envelope()).await.unwrap();
        first.close().await;

        let second = StorageManager::connect(&url, "second").await.unwrap();
        assert_eq!(second.key(), "second");
        assert!(second.try_load().await.unwrap().is_none());
    }
}
