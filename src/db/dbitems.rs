use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Error as SqlxError;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::db::store::{ItemStore, StoreError};
use crate::models::{Item, ItemCreate};

const CREATE_ITEMS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id          BIGSERIAL PRIMARY KEY,
        name        VARCHAR(100) NOT NULL,
        description TEXT NULL,
        price       DOUBLE PRECISION NOT NULL,
        tax         DOUBLE PRECISION NOT NULL
    )
"#;

/// Connection pool settings
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

/// Item row from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ItemRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tax: f64,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            tax: row.tax,
        }
    }
}

/// PostgreSQL-backed item store.
///
/// Ids come from the `BIGSERIAL` sequence, so concurrent inserts never
/// collide and a rolled-back id is never handed out again.
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    /// Create a new database connection pool
    ///
    /// # Arguments
    /// * `database_url` - PostgreSQL connection string
    /// * `settings` - Pool sizing and timeouts
    pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<Self, SqlxError> {
        info!("Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(settings.acquire_timeout)
            .idle_timeout(Duration::from_secs(600)) // Close idle connections after 10 minutes
            .max_lifetime(Duration::from_secs(1800)) // Recycle connections after 30 minutes
            .connect(database_url)
            .await?;

        info!("Database connection pool created successfully");

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `items` table when it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), SqlxError> {
        sqlx::query(CREATE_ITEMS_TABLE).execute(&self.pool).await?;
        info!("Items table ready");
        Ok(())
    }

    /// Close every pooled connection, waiting for checked-out ones.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database connection pool closed");
    }

    fn log_pool_state(&self, operation: &str) {
        let pool_idle = self.pool.num_idle() as u32;
        let pool_size = self.pool.size();
        debug!(
            "{}. Pool connections: {} idle, {} in use",
            operation,
            pool_idle,
            pool_size.saturating_sub(pool_idle)
        );
    }
}

impl ItemStore for PgItemStore {
    async fn create(&self, item: ItemCreate) -> Result<Item, StoreError> {
        self.log_pool_state("Creating item");

        let mut tx = match self.pool.begin().await {
            Ok(tx) => tx,
            Err(e) => {
                error!(
                    "Failed to acquire connection from pool: {}. Pool state: {} idle, {} total",
                    e,
                    self.pool.num_idle(),
                    self.pool.size()
                );
                return Err(e.into());
            }
        };

        let query_sql = r#"
            INSERT INTO items (name, description, price, tax)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, price, tax;
        "#;
        let row = sqlx::query_as::<_, ItemRow>(query_sql)
            .bind(&item.name)
            .bind(&item.description)
            .bind(item.price)
            .bind(item.tax)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(item_id = row.id, "Item created");
        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        self.log_pool_state("Listing items");

        let rows = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description, price, tax FROM items ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Listed items");
        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Item, StoreError> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description, price, tax FROM items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Item::from).ok_or(StoreError::NotFound(id))
    }

    async fn sum_prices(&self) -> Result<f64, StoreError> {
        let total: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(price), 0)::DOUBLE PRECISION FROM items",
        )
        .fetch_one(&self.pool)
        .await?;

        if !total.is_finite() {
            return Err(StoreError::Overflow);
        }
        Ok(total)
    }
}
