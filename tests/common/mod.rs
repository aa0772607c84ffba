// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::str::FromStr;

use anyhow::Result;
use brewpos::application::{ExportRow, Exporter, OrderService};
use brewpos::domain::{Item, ItemType, Order, OrderId, Position, Price, User};
use brewpos::Database;
use chrono::{DateTime, NaiveDate, Utc};
use tempfile::TempDir;

/// Helper to create a migrated database in a temporary directory
pub async fn test_database() -> Result<(Database, TempDir)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("test.db");
    let db = Database::create_file(db_path.to_str().unwrap()).await?;
    Ok((db, temp_dir))
}

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

pub fn price(value: &str) -> Price {
    Price::from_str(value).unwrap()
}

pub fn beverage(name: &str, value: &str) -> Item {
    Item::new(name, price(value), ItemType::Beverage)
}

pub fn addition(name: &str, value: &str) -> Item {
    Item::new(name, price(value), ItemType::Addition)
}

/// Order placed by a salesman on the given day
pub fn order_on(first: &str, last: &str, date: &str, items: Vec<Item>) -> Order {
    Order::new(User::new(first, last, Position::Salesman))
        .with_items(items)
        .with_placed_at(parse_date(date))
}

/// Save an order through the service in its own unit of work
pub async fn place(db: &Database, order: &Order) -> Result<OrderId> {
    let mut service = OrderService::new(db.dao_manager());
    Ok(service.save(order).await?)
}

/// Exporter that keeps what it was given
#[derive(Debug, Default)]
pub struct CollectingExporter {
    pub calls: Vec<(Vec<ExportRow>, String, String)>,
}

impl Exporter for CollectingExporter {
    fn export(&mut self, rows: &[ExportRow], total_count: &str, total_value: &str) -> Result<()> {
        self.calls
            .push((rows.to_vec(), total_count.to_string(), total_value.to_string()));
        Ok(())
    }
}

pub fn row(full_name: &str, sales_number: &str, sales_value: &str) -> ExportRow {
    (
        full_name.to_string(),
        sales_number.to_string(),
        sales_value.to_string(),
    )
}
