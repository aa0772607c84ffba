use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::info;

use crate::domain::{Item, ItemType, Order, OrderId, Position, Price, User};

use super::{SalesPeriod, SqliteDaoManager, MIGRATION_001_INITIAL};

/// Handle on the SQLite store. Hands out one [`SqliteDaoManager`] per unit
/// of work.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database handle with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to an existing SQLite database.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let db = Self::connect(database_url).await?;
        db.migrate().await?;
        info!(url = %database_url, "Database initialized");
        Ok(db)
    }

    /// Create (if needed) and migrate the database file at `path`.
    pub async fn create_file(path: &str) -> Result<Self> {
        Self::init(&format!("sqlite:{}?mode=rwc", path)).await
    }

    /// Connect to an existing database file at `path`.
    pub async fn open_file(path: &str) -> Result<Self> {
        Self::connect(&format!("sqlite:{}", path)).await
    }

    /// Open a unit of work covering all sales.
    pub fn dao_manager(&self) -> SqliteDaoManager {
        SqliteDaoManager::new(self.pool.clone(), SalesPeriod::default())
    }

    /// Open a unit of work whose sales reports are limited to `period`.
    pub fn dao_manager_for(&self, period: SalesPeriod) -> SqliteDaoManager {
        SqliteDaoManager::new(self.pool.clone(), period)
    }

    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    // ========================
    // Read-back queries
    // ========================

    /// Load a committed order with its items in insertion order.
    pub async fn find_order(&self, order_id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT first_name, last_name, position, placed_at
            FROM orders
            WHERE id = ?
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch order")?;

        let Some(row) = row else {
            return Ok(None);
        };

        let position_str: String = row.get("position");
        let placed_at_str: String = row.get("placed_at");
        let user = User::new(
            row.get::<String, _>("first_name"),
            row.get::<String, _>("last_name"),
            Position::from_str(&position_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid position: {}", position_str))?,
        );
        let placed_at = DateTime::parse_from_rfc3339(&placed_at_str)
            .context("Invalid placed_at timestamp")?
            .with_timezone(&Utc);

        let rows = sqlx::query(
            r#"
            SELECT name, price, item_type
            FROM items
            WHERE order_id = ?
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch order items")?;

        let items = rows.iter().map(Self::row_to_item).collect::<Result<Vec<_>>>()?;

        Ok(Some(
            Order::new(user).with_items(items).with_placed_at(placed_at),
        ))
    }

    /// Number of committed orders.
    pub async fn count_orders(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM orders")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count orders")?;
        Ok(row.get("count"))
    }

    fn row_to_item(row: &sqlx::sqlite::SqliteRow) -> Result<Item> {
        let price_str: String = row.get("price");
        let item_type_str: String = row.get("item_type");

        Ok(Item::new(
            row.get::<String, _>("name"),
            Price::from_str(&price_str).context("Invalid stored price")?,
            ItemType::from_str(&item_type_str)
                .ok_or_else(|| anyhow::anyhow!("Invalid item type: {}", item_type_str))?,
        ))
    }
}
