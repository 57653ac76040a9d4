pub mod models;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::Config;

use self::models::{Reading, StoredReading};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Sole gateway to the append-only `sensordata` table.
///
/// Rows are only ever inserted; there is no update or delete.
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// Insert one row and return the identifier the store assigned to it.
    async fn append(&self, reading: &Reading) -> Result<i64, StorageError>;

    /// The row with the highest identifier, or `None` when the table is empty.
    async fn latest(&self) -> Result<Option<StoredReading>, StorageError>;
}

/// PostgreSQL-backed `ReadingStore`.
///
/// Each call checks a connection out of the pool for one statement and
/// returns it when the statement's future completes or is dropped.
#[derive(Debug, Clone)]
pub struct PgReadingStore {
    pool: PgPool,
}

impl PgReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingStore for PgReadingStore {
    async fn append(&self, reading: &Reading) -> Result<i64, StorageError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO sensordata
                (soil_health, water_level, temperature, humidity, pump_status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&reading.soil_health)
        .bind(&reading.water_level)
        .bind(&reading.temperature)
        .bind(&reading.humidity)
        .bind(&reading.pump_status)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn latest(&self) -> Result<Option<StoredReading>, StorageError> {
        let row = sqlx::query_as::<_, StoredReading>(
            r#"
            SELECT id, soil_health, water_level, temperature, humidity, pump_status
            FROM sensordata
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

pub async fn create_pool(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to the database")?;
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("failed to run database migrations")?;
    Ok(())
}
