//! The connection adapter: one owned driver session plus statement generation.
//!
//! ```rust,no_run
//! use sql_adapter::prelude::*;
//!
//! # fn demo() -> Result<(), SqlAdapterError> {
//! let mut adapter = ConnectionConfig::builder(DatabaseType::Sqlite, "shop.db").build()?;
//! adapter.connect()?;
//! adapter.insert(&InsertSpec::new("users", &["name"], vec!["ann".into()]))?;
//! let rows = adapter.fetch_all("SELECT * FROM users WHERE name = ?", &["ann".into()])?;
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::fmt;

use tracing::{debug, info};

use crate::config::ConnectionConfig;
use crate::driver::{self, Driver};
use crate::error::SqlAdapterError;
use crate::query_builder::{QueryBuilder, Statement};
use crate::results::ResultSet;
use crate::translation::{TranslationMode, translate_placeholders};
use crate::types::RowValues;

mod crud;
mod fetch;
mod tx;

pub use crud::{InsertSpec, delete_statement, insert_statement, update_statement};

/// Owns a [`ConnectionConfig`] and, once connected, exactly one driver session.
///
/// Every operation takes `&mut self`: one adapter serves one caller at a time. Callers that
/// need concurrency open one adapter per worker.
pub struct Adapter {
    config: ConnectionConfig,
    connection: Option<Box<dyn Driver>>,
    in_transaction: bool,
}

impl Adapter {
    /// A disconnected adapter for `config`.
    #[must_use]
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config,
            connection: None,
            in_transaction: false,
        }
    }

    /// Open the driver selected by the config. An existing session is closed first.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConnectionError` with the native message when the driver
    /// cannot connect, or `SqlAdapterError::ConfigError` for an invalid config. The adapter is
    /// left disconnected.
    pub fn connect(&mut self) -> Result<(), SqlAdapterError> {
        self.close_connection();
        let driver = driver::open(&self.config)?;
        info!(dsn = %self.config.dsn(), "connected");
        self.connection = Some(driver);
        Ok(())
    }

    /// Adopt a live session opened by the caller.
    pub fn connect_with(&mut self, driver: Box<dyn Driver>) {
        self.close_connection();
        info!(driver = ?driver.database_type(), "adopted connection");
        self.connection = Some(driver);
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Borrow the live session, if connected.
    #[must_use]
    pub fn get_connection(&mut self) -> Option<&mut (dyn Driver + 'static)> {
        self.connection.as_deref_mut()
    }

    /// Drop the session. An open transaction is abandoned and the driver discards it.
    pub fn close_connection(&mut self) {
        if self.connection.take().is_some() {
            info!(in_transaction = self.in_transaction, "connection closed");
        }
        self.in_transaction = false;
    }

    #[must_use]
    pub fn get_config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Id generated by the last insert, or the current value of `sequence` (Postgres).
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn last_insert_id(&mut self, sequence: Option<&str>) -> Result<i64, SqlAdapterError> {
        self.driver_mut()?.last_insert_id(sequence)
    }

    /// Run a non-parametrized statement and return every row.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn query(&mut self, sql: &str) -> Result<ResultSet, SqlAdapterError> {
        self.run_select(sql, &[], TranslationMode::ForceOff)
    }

    /// Run a rendered [`Statement`], e.g. from [`Select::build`](crate::Select::build).
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn execute(&mut self, statement: &Statement) -> Result<ResultSet, SqlAdapterError> {
        self.run_select(
            &statement.sql,
            &statement.params,
            TranslationMode::AdapterDefault,
        )
    }

    /// Fluent executor for an ad-hoc statement.
    pub fn query_builder<'a, 'q>(&'a mut self, sql: &'q str) -> QueryBuilder<'a, 'q> {
        QueryBuilder::new(self, sql)
    }

    /// Column metadata, one row per column, optionally limited to `columns`.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn describe_table(
        &mut self,
        table: &str,
        columns: &[&str],
    ) -> Result<ResultSet, SqlAdapterError> {
        debug!(table, columns = columns.len(), "describe table");
        self.driver_mut()?.describe_table(table, columns)
    }

    fn driver_mut(&mut self) -> Result<&mut (dyn Driver + 'static), SqlAdapterError> {
        self.connection
            .as_deref_mut()
            .ok_or(SqlAdapterError::NotConnected)
    }

    pub(crate) fn run_select(
        &mut self,
        sql: &str,
        params: &[RowValues],
        translation: TranslationMode,
    ) -> Result<ResultSet, SqlAdapterError> {
        let enabled = translation.resolve(self.config.translate_placeholders);
        let driver = self.driver_mut()?;
        let sql = translate_for(driver, sql, params, enabled);
        debug!(sql = %sql, params = params.len(), "select");
        driver.select(&sql, params)
    }

    pub(crate) fn run_dml(
        &mut self,
        sql: &str,
        params: &[RowValues],
        translation: TranslationMode,
    ) -> Result<usize, SqlAdapterError> {
        let enabled = translation.resolve(self.config.translate_placeholders);
        let driver = self.driver_mut()?;
        let sql = translate_for(driver, sql, params, enabled);
        debug!(sql = %sql, params = params.len(), "execute");
        driver.execute(&sql, params)
    }
}

fn translate_for<'s>(
    driver: &dyn Driver,
    sql: &'s str,
    params: &[RowValues],
    enabled: bool,
) -> Cow<'s, str> {
    if params.is_empty() {
        return Cow::Borrowed(sql);
    }
    translate_placeholders(sql, driver.placeholder_style(), enabled)
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("dsn", &self.config.dsn())
            .field("connected", &self.connection.is_some())
            .field("in_transaction", &self.in_transaction)
            .finish()
    }
}
