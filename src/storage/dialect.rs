use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::ColumnKind;
use crate::storage::SinkError;

/// SQL flavour of the backend behind a connection string.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Dialect {
    Sqlite,
    Postgres,
    MySql
}

impl Dialect {
    /// Detects the backend of a connection string and returns it together with
    /// the URL sqlx expects. SQLAlchemy driver suffixes such as
    /// `postgresql+psycopg2://` are dropped, and SQLite files are created when
    /// absent.
    pub fn parse_connection(db_conn: &str) -> Result<(Self, String), SinkError> {
        let Some((scheme, rest)) = db_conn.split_once(':') else {
            return Err(SinkError::UnsupportedBackend(db_conn.to_string()))
        };

        let backend = scheme.split('+').next().unwrap_or(scheme).to_lowercase();

        let dialect = match backend.as_str() {
            "sqlite" => Dialect::Sqlite,
            "postgres" | "postgresql" => Dialect::Postgres,
            "mysql" | "mariadb" => Dialect::MySql,
            _ => return Err(SinkError::UnsupportedBackend(scheme.to_string()))
        };

        let url = match dialect {
            Dialect::Sqlite => sqlite_url(rest),
            Dialect::Postgres | Dialect::MySql => format!("{}:{rest}", dialect.scheme())
        };

        Ok((dialect, url))
    }

    /// Upper bound on bind parameters in a single statement.
    pub fn max_bind_parameters(&self) -> usize {
        match self {
            Dialect::Sqlite => 32_766,
            Dialect::Postgres | Dialect::MySql => 65_535
        }
    }

    /// Rows that fit in one multi-row insert of `columns` values each.
    pub fn rows_per_statement(&self, columns: usize) -> usize {
        (self.max_bind_parameters() / columns.max(1)).max(1)
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "sqlite",
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql"
        }
    }

    /// Bind parameter marker for the 1-based `position`.
    pub fn placeholder(&self, position: usize) -> String {
        match self {
            Dialect::Postgres => format!("${position}"),
            Dialect::Sqlite | Dialect::MySql => "?".to_string()
        }
    }

    pub fn quote(&self, identifier: &str) -> String {
        match self {
            Dialect::MySql => format!("`{identifier}`"),
            Dialect::Sqlite | Dialect::Postgres => format!("\"{identifier}\"")
        }
    }

    pub fn quote_table(&self, table: &str) -> Result<String, SinkError> {
        validate_table_name(table)?;

        Ok(self.quote(table))
    }

    pub fn column_type(&self, kind: ColumnKind) -> &'static str {
        match (self, kind) {
            (_, ColumnKind::Text) => "TEXT",
            (Dialect::Sqlite, ColumnKind::Integer) => "INTEGER",
            (_, ColumnKind::Integer) => "BIGINT",
            (Dialect::Sqlite, ColumnKind::Real) => "REAL",
            (Dialect::Postgres, ColumnKind::Real) => "DOUBLE PRECISION",
            (Dialect::MySql, ColumnKind::Real) => "DOUBLE"
        }
    }

    /// Query returning the column names of the table bound as its only parameter.
    /// An absent table yields no rows.
    pub fn table_columns_query(&self) -> &'static str {
        match self {
            Dialect::Sqlite => "SELECT name FROM pragma_table_info(?) ORDER BY cid",
            Dialect::Postgres => "SELECT CAST(column_name AS TEXT) FROM information_schema.columns \
                                  WHERE table_schema = current_schema() AND table_name = $1 \
                                  ORDER BY ordinal_position",
            Dialect::MySql => "SELECT CAST(column_name AS CHAR) FROM information_schema.columns \
                               WHERE table_schema = DATABASE() AND table_name = ? \
                               ORDER BY ordinal_position"
        }
    }
}

impl Display for Dialect {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Sqlite => write!(formatter, "SQLite"),
            Dialect::Postgres => write!(formatter, "PostgreSQL"),
            Dialect::MySql => write!(formatter, "MySQL")
        }
    }
}

/// `sqlite:///relative.db` and `sqlite:////absolute.db` follow SQLAlchemy and
/// become `sqlite:<path>`. Files open read-write-create unless a `mode` is given.
fn sqlite_url(rest: &str) -> String {
    let location = rest.strip_prefix("///").unwrap_or(rest);

    let (path, params) = match location.split_once('?') {
        Some((path, params)) => (path, Some(params)),
        None => (location, None)
    };

    let in_memory = path.trim_start_matches('/').is_empty() || path.ends_with(":memory:");
    let has_mode = params.is_some_and(|params| params.split('&').any(|param| param.starts_with("mode=")));

    match (in_memory || has_mode, params) {
        (true, _) => format!("sqlite:{location}"),
        (false, Some(_)) => format!("sqlite:{location}&mode=rwc"),
        (false, None) => format!("sqlite:{location}?mode=rwc")
    }
}

/// Table names are interpolated into statements, so only plain identifiers pass.
pub fn validate_table_name(table: &str) -> Result<(), SinkError> {
    let mut characters = table.chars();

    let valid = match characters.next() {
        Some(first) => (first.is_ascii_alphabetic() || first == '_')
            && characters.all(|character| character.is_ascii_alphanumeric() || character == '_'),
        None => false
    };

    if !valid {
        return Err(SinkError::InvalidTableName(table.to_string()))
    }

    Ok(())
}
