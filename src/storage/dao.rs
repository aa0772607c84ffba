use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{Row, Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::debug;

use crate::application::{DaoManager, ItemDao, OrderDao, ReportDao};
use crate::domain::{sum_decimals, Item, Order, OrderId, Price, ReportRecord};

/// Bounds on the orders included in a sales report. `to` is exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesPeriod {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl SalesPeriod {
    pub fn between(from: Option<DateTime<Utc>>, to: Option<DateTime<Utc>>) -> Self {
        Self { from, to }
    }
}

/// Stored timestamps share one fixed-width format so they compare as text.
fn to_db_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// One unit of work against SQLite. The transaction is begun by the first
/// DAO call and lives until `commit` or `close_connection`.
pub struct SqliteDaoManager {
    pool: SqlitePool,
    period: SalesPeriod,
    tx: Option<Transaction<'static, Sqlite>>,
    closed: bool,
}

impl SqliteDaoManager {
    pub fn new(pool: SqlitePool, period: SalesPeriod) -> Self {
        Self {
            pool,
            period,
            tx: None,
            closed: false,
        }
    }

    async fn connection(&mut self) -> Result<&mut SqliteConnection> {
        if self.closed {
            bail!("Connection already closed");
        }

        let tx = match self.tx.take() {
            Some(tx) => tx,
            None => {
                debug!("Beginning transaction");
                self.pool
                    .begin()
                    .await
                    .context("Failed to begin transaction")?
            }
        };
        let tx = self.tx.insert(tx);
        Ok(&mut **tx)
    }
}

impl DaoManager for SqliteDaoManager {
    type Orders<'a> = SqliteOrderDao<'a>;
    type Items<'a> = SqliteItemDao<'a>;
    type Reports<'a> = SqliteReportDao<'a>;

    fn order_dao(&mut self) -> Self::Orders<'_> {
        SqliteOrderDao { uow: self }
    }

    fn item_dao(&mut self) -> Self::Items<'_> {
        SqliteItemDao { uow: self }
    }

    fn report_dao(&mut self) -> Self::Reports<'_> {
        SqliteReportDao { uow: self }
    }

    async fn commit(&mut self) -> Result<()> {
        if self.closed {
            bail!("Connection already closed");
        }
        if let Some(tx) = self.tx.take() {
            tx.commit().await.context("Failed to commit transaction")?;
            debug!("Transaction committed");
        }
        Ok(())
    }

    async fn close_connection(&mut self) -> Result<()> {
        self.closed = true;
        if let Some(tx) = self.tx.take() {
            tx.rollback()
                .await
                .context("Failed to roll back transaction")?;
            debug!("Uncommitted work rolled back");
        }
        Ok(())
    }
}

pub struct SqliteOrderDao<'a> {
    uow: &'a mut SqliteDaoManager,
}

impl OrderDao for SqliteOrderDao<'_> {
    async fn insert(&mut self, order: &Order) -> Result<OrderId> {
        let user = order.user();
        let conn = self.uow.connection().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (first_name, last_name, position, placed_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.position.as_str())
        .bind(to_db_timestamp(order.placed_at()))
        .execute(conn)
        .await
        .context("Failed to insert order")?;

        Ok(result.last_insert_rowid())
    }
}

pub struct SqliteItemDao<'a> {
    uow: &'a mut SqliteDaoManager,
}

impl ItemDao for SqliteItemDao<'_> {
    async fn insert(&mut self, item: &Item, order_id: OrderId) -> Result<()> {
        debug!(order_id, name = %item.name, "Inserting item");
        let conn = self.uow.connection().await?;

        sqlx::query(
            r#"
            INSERT INTO items (order_id, name, price, item_type)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(order_id)
        .bind(&item.name)
        .bind(item.price.to_string())
        .bind(item.item_type.as_str())
        .execute(conn)
        .await
        .context("Failed to insert item")?;

        Ok(())
    }
}

pub struct SqliteReportDao<'a> {
    uow: &'a mut SqliteDaoManager,
}

impl ReportDao for SqliteReportDao<'_> {
    /// One record per salesperson full name, sorted by name. The sales number
    /// counts orders; the sales value is the exact sum of their item prices.
    async fn get_sales_records(&mut self) -> Result<Vec<ReportRecord>> {
        let period = self.uow.period;
        let conn = self.uow.connection().await?;

        let rows = sqlx::query(
            r#"
            SELECT o.id AS order_id,
                   o.first_name || ' ' || o.last_name AS full_name,
                   i.price AS price
            FROM orders o
            JOIN items i ON i.order_id = o.id
            WHERE (?1 IS NULL OR o.placed_at >= ?1)
              AND (?2 IS NULL OR o.placed_at < ?2)
            ORDER BY full_name, o.id, i.id
            "#,
        )
        .bind(period.from.map(to_db_timestamp))
        .bind(period.to.map(to_db_timestamp))
        .fetch_all(conn)
        .await
        .context("Failed to fetch sales records")?;

        let mut groups: Vec<SalesGroup> = Vec::new();
        for row in &rows {
            let order_id: OrderId = row.get("order_id");
            let full_name: String = row.get("full_name");
            let price_str: String = row.get("price");
            let price = Price::from_str(&price_str).context("Invalid stored price")?;

            match groups.last_mut() {
                Some(group) if group.full_name == full_name => group.add(order_id, price),
                _ => groups.push(SalesGroup::start(full_name, order_id, price)),
            }
        }

        debug!(records = groups.len(), "Aggregated sales records");
        Ok(groups.into_iter().map(SalesGroup::into_record).collect())
    }
}

/// Running aggregate for one full name while scanning sorted rows.
struct SalesGroup {
    full_name: String,
    last_order: OrderId,
    orders: i64,
    prices: Vec<Price>,
}

impl SalesGroup {
    fn start(full_name: String, order_id: OrderId, price: Price) -> Self {
        Self {
            full_name,
            last_order: order_id,
            orders: 1,
            prices: vec![price],
        }
    }

    fn add(&mut self, order_id: OrderId, price: Price) {
        if order_id != self.last_order {
            self.last_order = order_id;
            self.orders += 1;
        }
        self.prices.push(price);
    }

    fn into_record(self) -> ReportRecord {
        let value = sum_decimals(&self.prices);
        ReportRecord::new(self.full_name, self.orders, value)
    }
}
