use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::columns::{ColumnValue, COLUMN_COUNT};
use crate::types::InvoiceId;

/// Represents a single line item from the input CSV file.
///
/// Field names follow the database columns, the serde renames follow the
/// canonical headers of the Online Retail II dataset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionRow {
    #[serde(rename = "Invoice")]
    pub invoice: InvoiceId,
    #[serde(rename = "StockCode")]
    pub stock_code: String,
    #[serde(rename = "Description")]
    pub description: String,
    /// Negative for returns and cancellations.
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    /// Kept verbatim, the dataset format is `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "InvoiceDate")]
    pub invoice_date: String,
    #[serde(rename = "Price")]
    pub price: Decimal,
    #[serde(rename = "Customer ID")]
    pub customer_id: Option<Decimal>,
    #[serde(rename = "Country")]
    pub country: String
}

impl TransactionRow {
    /// Returns the row fields in the same order as [`COLUMNS`](crate::models::COLUMNS).
    pub fn column_values(&self) -> [ColumnValue<'_>; COLUMN_COUNT] {
        [
            ColumnValue::Text(&self.invoice),
            ColumnValue::Text(&self.stock_code),
            ColumnValue::Text(&self.description),
            ColumnValue::Integer(self.quantity),
            ColumnValue::Text(&self.invoice_date),
            ColumnValue::Decimal(self.price),
            ColumnValue::NullableDecimal(self.customer_id),
            ColumnValue::Text(&self.country)
        ]
    }
}
