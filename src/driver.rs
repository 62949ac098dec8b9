//! The per-backend capability an [`Adapter`](crate::Adapter) drives.
//!
//! A driver is a live native session. It executes already-rendered SQL with already-ordered
//! parameters; statement generation, state checks and result projections live in the adapter.

use crate::config::ConnectionConfig;
use crate::error::SqlAdapterError;
use crate::results::ResultSet;
use crate::translation::PlaceholderStyle;
use crate::types::{DatabaseType, RowValues};

pub trait Driver: Send {
    fn database_type(&self) -> DatabaseType;

    /// Placeholder syntax the native driver expects.
    fn placeholder_style(&self) -> PlaceholderStyle;

    /// Prepare and run a statement, collecting every row.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::DriverExecution` on prepare/execute failure.
    fn select(&mut self, sql: &str, params: &[RowValues]) -> Result<ResultSet, SqlAdapterError>;

    /// Prepare and run a statement, returning rows affected.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::DriverExecution` on prepare/execute failure.
    fn execute(&mut self, sql: &str, params: &[RowValues]) -> Result<usize, SqlAdapterError>;

    /// # Errors
    /// Returns `SqlAdapterError::DriverExecution` if the driver cannot open a transaction.
    fn begin(&mut self) -> Result<(), SqlAdapterError>;

    /// # Errors
    /// Returns `SqlAdapterError::DriverExecution` if the commit fails.
    fn commit(&mut self) -> Result<(), SqlAdapterError>;

    /// # Errors
    /// Returns `SqlAdapterError::DriverExecution` if the rollback fails.
    fn rollback(&mut self) -> Result<(), SqlAdapterError>;

    /// Column metadata for `table`: one row per column with at least `name`, `type`,
    /// `nullable` and `default_value`, limited to `columns` when non-empty.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::DriverExecution` if the catalog query fails.
    fn describe_table(
        &mut self,
        table: &str,
        columns: &[&str],
    ) -> Result<ResultSet, SqlAdapterError>;

    /// Id generated by the last insert, or the current value of `sequence`.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::DriverExecution` if the driver cannot report one.
    fn last_insert_id(&mut self, sequence: Option<&str>) -> Result<i64, SqlAdapterError>;
}

/// Open the driver selected by `config.driver_type`.
///
/// # Errors
/// Returns `SqlAdapterError::ConfigError` for an invalid config and
/// `SqlAdapterError::ConnectionError` carrying the native message if the session cannot be
/// opened.
pub fn open(config: &ConnectionConfig) -> Result<Box<dyn Driver>, SqlAdapterError> {
    config.validate()?;
    match config.driver_type {
        #[cfg(feature = "sqlite")]
        DatabaseType::Sqlite => Ok(Box::new(crate::sqlite::SqliteDriver::open(config)?)),
        #[cfg(feature = "postgres")]
        DatabaseType::Postgres => Ok(Box::new(crate::postgres::PostgresDriver::open(config)?)),
    }
}

/// `?,?,?` with one placeholder per value.
pub(crate) fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}
