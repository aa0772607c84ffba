//! Recording fakes for the facade and exporter ports.

use anyhow::bail;

use crate::domain::{Item, Order, OrderId, ReportRecord};

use super::{DaoManager, ExportRow, Exporter, ItemDao, OrderDao, ReportDao};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    InsertOrder(Order),
    InsertItem(Item, OrderId),
    GetSalesRecords,
    Commit,
    CloseConnection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailOn {
    OrderInsert,
    /// Zero-based index of the item whose insert fails.
    ItemInsert(usize),
    Commit,
    Close,
    SalesRecords,
}

#[derive(Debug, Default)]
pub struct RecordingDaoManager {
    pub calls: Vec<Call>,
    pub order_id: OrderId,
    pub records: Vec<ReportRecord>,
    pub fail_on: Option<FailOn>,
    items_inserted: usize,
}

impl RecordingDaoManager {
    pub fn with_order_id(order_id: OrderId) -> Self {
        Self {
            order_id,
            ..Self::default()
        }
    }

    pub fn with_records(records: Vec<ReportRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

pub struct RecordingOrderDao<'a>(&'a mut RecordingDaoManager);
pub struct RecordingItemDao<'a>(&'a mut RecordingDaoManager);
pub struct RecordingReportDao<'a>(&'a mut RecordingDaoManager);

impl OrderDao for RecordingOrderDao<'_> {
    async fn insert(&mut self, order: &Order) -> anyhow::Result<OrderId> {
        self.0.calls.push(Call::InsertOrder(order.clone()));
        if self.0.fail_on == Some(FailOn::OrderInsert) {
            bail!("order insert failed");
        }
        Ok(self.0.order_id)
    }
}

impl ItemDao for RecordingItemDao<'_> {
    async fn insert(&mut self, item: &Item, order_id: OrderId) -> anyhow::Result<()> {
        self.0.calls.push(Call::InsertItem(item.clone(), order_id));
        let index = self.0.items_inserted;
        self.0.items_inserted += 1;
        if self.0.fail_on == Some(FailOn::ItemInsert(index)) {
            bail!("item insert failed");
        }
        Ok(())
    }
}

impl ReportDao for RecordingReportDao<'_> {
    async fn get_sales_records(&mut self) -> anyhow::Result<Vec<ReportRecord>> {
        self.0.calls.push(Call::GetSalesRecords);
        if self.0.fail_on == Some(FailOn::SalesRecords) {
            bail!("sales query failed");
        }
        Ok(self.0.records.clone())
    }
}

impl DaoManager for RecordingDaoManager {
    type Orders<'a> = RecordingOrderDao<'a>;
    type Items<'a> = RecordingItemDao<'a>;
    type Reports<'a> = RecordingReportDao<'a>;

    fn order_dao(&mut self) -> Self::Orders<'_> {
        RecordingOrderDao(self)
    }

    fn item_dao(&mut self) -> Self::Items<'_> {
        RecordingItemDao(self)
    }

    fn report_dao(&mut self) -> Self::Reports<'_> {
        RecordingReportDao(self)
    }

    async fn commit(&mut self) -> anyhow::Result<()> {
        self.calls.push(Call::Commit);
        if self.fail_on == Some(FailOn::Commit) {
            bail!("commit failed");
        }
        Ok(())
    }

    async fn close_connection(&mut self) -> anyhow::Result<()> {
        self.calls.push(Call::CloseConnection);
        if self.fail_on == Some(FailOn::Close) {
            bail!("close failed");
        }
        Ok(())
    }
}

/// Captures every `export` invocation.
#[derive(Debug, Default)]
pub struct RecordingExporter {
    pub exports: Vec<(Vec<ExportRow>, String, String)>,
    pub fail: bool,
}

impl Exporter for RecordingExporter {
    fn export(
        &mut self,
        rows: &[ExportRow],
        total_count: &str,
        total_value: &str,
    ) -> anyhow::Result<()> {
        self.exports
            .push((rows.to_vec(), total_count.to_string(), total_value.to_string()));
        if self.fail {
            bail!("exporter unavailable");
        }
        Ok(())
    }
}
