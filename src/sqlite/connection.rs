use std::fmt;

use rusqlite::Connection;

use crate::config::ConnectionConfig;
use crate::driver::{Driver, placeholders};
use crate::error::SqlAdapterError;
use crate::results::ResultSet;
use crate::translation::PlaceholderStyle;
use crate::types::{DatabaseType, RowValues};

use super::config::open_connection;
use super::params::Params;
use super::query::build_result_set;

/// [`Driver`] over one rusqlite connection.
pub struct SqliteDriver {
    conn: Connection,
}

impl SqliteDriver {
    /// Open a session for `config`.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConnectionError` or `SqlAdapterError::ConfigError`, see
    /// [`open_connection`].
    pub fn open(config: &ConnectionConfig) -> Result<Self, SqlAdapterError> {
        Ok(Self {
            conn: open_connection(config)?,
        })
    }

    /// Wrap a connection opened elsewhere.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrow the native connection.
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl fmt::Debug for SqliteDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteDriver")
            .field("path", &self.conn.path())
            .field("autocommit", &self.conn.is_autocommit())
            .finish()
    }
}

impl Driver for SqliteDriver {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Sqlite
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Sqlite
    }

    fn select(&mut self, sql: &str, params: &[RowValues]) -> Result<ResultSet, SqlAdapterError> {
        let converted = Params::convert(params);
        let mut stmt = self.conn.prepare_cached(sql)?;
        build_result_set(&mut stmt, converted.as_values())
    }

    fn execute(&mut self, sql: &str, params: &[RowValues]) -> Result<usize, SqlAdapterError> {
        let converted = Params::convert(params);
        let mut stmt = self.conn.prepare_cached(sql)?;
        Ok(stmt.execute(&converted.as_refs()[..])?)
    }

    fn begin(&mut self) -> Result<(), SqlAdapterError> {
        Ok(self.conn.execute_batch("BEGIN")?)
    }

    fn commit(&mut self) -> Result<(), SqlAdapterError> {
        Ok(self.conn.execute_batch("COMMIT")?)
    }

    fn rollback(&mut self) -> Result<(), SqlAdapterError> {
        Ok(self.conn.execute_batch("ROLLBACK")?)
    }

    fn describe_table(
        &mut self,
        table: &str,
        columns: &[&str],
    ) -> Result<ResultSet, SqlAdapterError> {
        let mut sql = String::from(
            "SELECT name, type, \"notnull\" = 0 AS nullable, dflt_value AS default_value, \
             pk > 0 AS primary_key FROM pragma_table_info(?)",
        );
        if !columns.is_empty() {
            sql.push_str(&format!(" WHERE name IN ({})", placeholders(columns.len())));
        }
        sql.push_str(" ORDER BY cid");

        let mut params = Vec::with_capacity(columns.len() + 1);
        params.push(RowValues::Text(table.to_string()));
        params.extend(columns.iter().map(|c| RowValues::Text((*c).to_string())));
        self.select(&sql, &params)
    }

    fn last_insert_id(&mut self, _sequence: Option<&str>) -> Result<i64, SqlAdapterError> {
        Ok(self.conn.last_insert_rowid())
    }
}
