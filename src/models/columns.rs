use rust_decimal::Decimal;

/// Storage class of a target table column.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ColumnKind {
    Text,
    Integer,
    Real
}

/// Maps one canonical CSV header onto its database column.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub name: &'static str,
    pub kind: ColumnKind
}

pub const INVOICE_COLUMN: &str = "invoice";
pub const COLUMN_COUNT: usize = 8;

/// The fixed CSV to database column mapping, in insertion order.
pub const COLUMNS: [Column; COLUMN_COUNT] = [
    Column { header: "Invoice", name: INVOICE_COLUMN, kind: ColumnKind::Text },
    Column { header: "StockCode", name: "stock_code", kind: ColumnKind::Text },
    Column { header: "Description", name: "description", kind: ColumnKind::Text },
    Column { header: "Quantity", name: "quantity", kind: ColumnKind::Integer },
    Column { header: "InvoiceDate", name: "invoice_date", kind: ColumnKind::Text },
    Column { header: "Price", name: "price", kind: ColumnKind::Real },
    Column { header: "Customer ID", name: "customer_id", kind: ColumnKind::Real },
    Column { header: "Country", name: "country", kind: ColumnKind::Text }
];

/// A single row field as handed over to a sink.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue<'a> {
    Text(&'a str),
    Integer(i64),
    Decimal(Decimal),
    NullableDecimal(Option<Decimal>)
}
