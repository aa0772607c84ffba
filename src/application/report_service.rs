use tracing::{debug, info};

use crate::domain::{format_decimal, sum_decimals, ReportRecord};

use super::{DaoManager, ExportRow, Exporter, ReportDao, ServiceError};

/// Rendered report data handed to an exporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesSummary {
    pub rows: Vec<ExportRow>,
    pub total_count: String,
    pub total_value: String,
}

/// Turn sales records into export rows plus the two totals.
/// Row order follows the input; an empty input is an error.
pub fn summarize(records: &[ReportRecord]) -> Result<SalesSummary, ServiceError> {
    if records.is_empty() {
        return Err(ServiceError::NoData(
            "no sales records for the reporting period".to_string(),
        ));
    }

    let rows = records
        .iter()
        .map(|record| {
            (
                record.full_name.clone(),
                record.sales_number.to_string(),
                format_decimal(&record.sales_value),
            )
        })
        .collect();

    // Widened so the count total cannot overflow.
    let total_count: i128 = records
        .iter()
        .map(|record| i128::from(record.sales_number))
        .sum();
    let total_value = sum_decimals(records.iter().map(|record| &record.sales_value));

    Ok(SalesSummary {
        rows,
        total_count: total_count.to_string(),
        total_value: format_decimal(&total_value),
    })
}

/// Aggregates sales records and dispatches them to an exporter.
pub struct ReportService<D> {
    dao: D,
}

impl<D: DaoManager> ReportService<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    pub fn into_inner(self) -> D {
        self.dao
    }

    /// Build the sales report and hand it to `exporter` exactly once.
    pub async fn report<E: Exporter>(&mut self, exporter: &mut E) -> Result<(), ServiceError> {
        let records = self.dao.report_dao().get_sales_records().await?;
        debug!(records = records.len(), "Fetched sales records");

        let summary = summarize(&records)?;
        exporter.export(&summary.rows, &summary.total_count, &summary.total_value)?;

        info!(
            rows = summary.rows.len(),
            total_count = %summary.total_count,
            total_value = %summary.total_value,
            "Sales report exported"
        );
        Ok(())
    }
}
