use serde::{Deserialize, Serialize};

use super::Price;

/// One grouped sales line as produced by the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub full_name: String,
    pub sales_number: i64,
    pub sales_value: Price,
}

impl ReportRecord {
    pub fn new(full_name: impl Into<String>, sales_number: i64, sales_value: Price) -> Self {
        Self {
            full_name: full_name.into(),
            sales_number,
            sales_value,
        }
    }
}
