//! Boundaries the services depend on. The SQLite store and the exporters in
//! `io` implement these; unit tests substitute recording fakes.

// Services drive these from a single task, so no `Send` bound is required.
#![allow(async_fn_in_trait)]

use crate::domain::{Item, Order, OrderId, ReportRecord};

pub trait OrderDao {
    /// Insert the order and return its generated identifier.
    async fn insert(&mut self, order: &Order) -> anyhow::Result<OrderId>;
}

pub trait ItemDao {
    async fn insert(&mut self, item: &Item, order_id: OrderId) -> anyhow::Result<()>;
}

pub trait ReportDao {
    /// Grouped sales lines for the reporting period. May be empty.
    async fn get_sales_records(&mut self) -> anyhow::Result<Vec<ReportRecord>>;
}

/// Facade over one unit of work: per-entity access objects plus
/// transaction control.
pub trait DaoManager {
    type Orders<'a>: OrderDao
    where
        Self: 'a;
    type Items<'a>: ItemDao
    where
        Self: 'a;
    type Reports<'a>: ReportDao
    where
        Self: 'a;

    fn order_dao(&mut self) -> Self::Orders<'_>;
    fn item_dao(&mut self) -> Self::Items<'_>;
    fn report_dao(&mut self) -> Self::Reports<'_>;

    async fn commit(&mut self) -> anyhow::Result<()>;

    /// Release the underlying connection. Anything not committed is
    /// discarded.
    async fn close_connection(&mut self) -> anyhow::Result<()>;
}

/// (full name, sales number, sales value), already rendered as text.
pub type ExportRow = (String, String, String);

/// Output sink for a sales report. Called once per report.
pub trait Exporter {
    fn export(
        &mut self,
        rows: &[ExportRow],
        total_count: &str,
        total_value: &str,
    ) -> anyhow::Result<()>;
}
