use std::collections::HashSet;

use rust_decimal::prelude::ToPrimitive;
use sqlx::any::{install_default_drivers, Any, AnyArguments};
use sqlx::query::Query;
use sqlx::{AnyConnection, Connection};
use tracing::{debug, info};

use crate::models::{ColumnValue, TransactionBatch, COLUMNS};
use crate::storage::dialect::Dialect;
use crate::storage::{DeletePredicate, Sink, SinkError, TableStructure};

/// Relational sink holding a single connection for the whole run.
pub struct SqlSink {
    connection: AnyConnection,
    dialect: Dialect,
    prepared_tables: HashSet<String>
}

impl SqlSink {
    /// Opens the connection described by `db_conn`.
    pub async fn connect(db_conn: &str) -> Result<Self, SinkError> {
        install_default_drivers();

        let (dialect, url) = Dialect::parse_connection(db_conn)?;

        info!("Connecting to the {dialect} database...");

        let connection = AnyConnection::connect(&url).await?;

        Ok(Self {
            connection,
            dialect,
            prepared_tables: HashSet::new()
        })
    }

    pub async fn close(self) -> Result<(), SinkError> {
        self.connection.close().await?;

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn connection(&mut self) -> &mut AnyConnection {
        &mut self.connection
    }

    //NOTE: Appending to an absent table creates it, the delete path never does.
    async fn ensure_table(&mut self, table: &str) -> Result<(), SinkError> {
        if self.prepared_tables.contains(table) {
            return Ok(())
        }

        let definitions = COLUMNS.iter()
            .map(|column| format!("{} {}", self.dialect.quote(column.name), self.dialect.column_type(column.kind)))
            .collect::<Vec<_>>()
            .join(", ");

        let statement = format!("CREATE TABLE IF NOT EXISTS {} ({definitions})", self.dialect.quote_table(table)?);

        debug!("{statement}");

        sqlx::query::<Any>(&statement).execute(&mut self.connection).await?;
        self.prepared_tables.insert(table.to_string());

        Ok(())
    }
}

fn insert_statement(dialect: Dialect, table: &str, rows: usize) -> Result<String, SinkError> {
    let columns = COLUMNS.iter()
        .map(|column| dialect.quote(column.name))
        .collect::<Vec<_>>()
        .join(", ");

    let tuples = (0..rows)
        .map(|row| {
            let placeholders = (1..=COLUMNS.len())
                .map(|column| dialect.placeholder(row * COLUMNS.len() + column))
                .collect::<Vec<_>>()
                .join(", ");

            format!("({placeholders})")
        })
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("INSERT INTO {} ({columns}) VALUES {tuples}", dialect.quote_table(table)?))
}

impl Sink for SqlSink {
    async fn insert(&mut self, table: &str, batch: &TransactionBatch) -> Result<u64, SinkError> {
        self.ensure_table(table).await?;

        let dialect = self.dialect;
        let chunk_size = dialect.rows_per_statement(COLUMNS.len());

        //NOTE: Large batches span several statements, the transaction keeps the batch atomic.
        let mut transaction = self.connection.begin().await?;
        let mut affected = 0;

        for rows in batch.rows().chunks(chunk_size) {
            let statement = insert_statement(dialect, table, rows.len())?;
            let mut query = sqlx::query::<Any>(&statement);

            for row in rows {
                for value in row.column_values() {
                    query = bind_value(query, value);
                }
            }

            affected += query.execute(&mut *transaction).await?.rows_affected();
        }

        transaction.commit().await?;

        Ok(affected)
    }

    async fn delete(&mut self, table: &str, predicate: &DeletePredicate) -> Result<u64, SinkError> {
        let statement = format!(
            "DELETE FROM {} WHERE {} = {}",
            self.dialect.quote_table(table)?,
            self.dialect.quote(predicate.column),
            self.dialect.placeholder(1)
        );

        let result = sqlx::query::<Any>(&statement)
            .bind(predicate.invoice.clone())
            .execute(&mut self.connection)
            .await?;

        Ok(result.rows_affected())
    }

    async fn lookup_table(&mut self, table: &str) -> Result<Option<TableStructure>, SinkError> {
        let columns = sqlx::query_scalar::<Any, String>(self.dialect.table_columns_query())
            .bind(table.to_string())
            .fetch_all(&mut self.connection)
            .await?;

        if columns.is_empty() {
            return Ok(None)
        }

        Ok(Some(TableStructure {
            name: table.to_string(),
            columns
        }))
    }
}

fn bind_value<'q>(query: Query<'q, Any, AnyArguments<'q>>, value: ColumnValue<'_>) -> Query<'q, Any, AnyArguments<'q>> {
    match value {
        ColumnValue::Text(text) => query.bind(text.to_string()),
        ColumnValue::Integer(integer) => query.bind(integer),
        ColumnValue::Decimal(decimal) => query.bind(decimal.to_f64()),
        ColumnValue::NullableDecimal(decimal) => query.bind(decimal.and_then(|decimal| decimal.to_f64()))
    }
}
