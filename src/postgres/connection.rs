use std::fmt;

use tokio::runtime::{Builder, Runtime};
use tokio_postgres::{Client, NoTls};

use crate::config::ConnectionConfig;
use crate::driver::{Driver, placeholders};
use crate::error::SqlAdapterError;
use crate::results::ResultSet;
use crate::translation::PlaceholderStyle;
use crate::types::{DatabaseType, RowValues};

use super::config::pg_config;
use super::params::Params;
use super::query::build_result_set_from_statement;

/// [`Driver`] over one `tokio_postgres` client.
///
/// The client is async; this driver owns a current-thread runtime and blocks on it for every
/// call. The connection task only makes progress inside those `block_on` calls, which is all
/// a single blocking caller needs.
pub struct PostgresDriver {
    runtime: Runtime,
    client: Client,
}

impl PostgresDriver {
    /// Connect using `config`.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConfigError` for missing fields and
    /// `SqlAdapterError::ConnectionError` with the server's message if the connection fails.
    pub fn open(config: &ConnectionConfig) -> Result<Self, SqlAdapterError> {
        let pg = pg_config(config)?;
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                SqlAdapterError::ConnectionError(format!("Failed to start Postgres runtime: {e}"))
            })?;

        let (client, connection) = runtime.block_on(pg.connect(NoTls)).map_err(|e| {
            SqlAdapterError::ConnectionError(format!(
                "Failed to connect to Postgres at {}: {e}",
                config.host
            ))
        })?;
        runtime.spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "postgres connection closed with error");
            }
        });

        Ok(Self { runtime, client })
    }

    /// Borrow the native client.
    #[must_use]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl fmt::Debug for PostgresDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDriver")
            .field("closed", &self.client.is_closed())
            .finish_non_exhaustive()
    }
}

impl Driver for PostgresDriver {
    fn database_type(&self) -> DatabaseType {
        DatabaseType::Postgres
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Postgres
    }

    fn select(&mut self, sql: &str, params: &[RowValues]) -> Result<ResultSet, SqlAdapterError> {
        let converted = Params::convert(params);
        let client = &self.client;
        self.runtime.block_on(async {
            let stmt = client.prepare(sql).await?;
            let rows = client.query(&stmt, converted.as_refs()).await?;
            build_result_set_from_statement(&stmt, &rows)
        })
    }

    fn execute(&mut self, sql: &str, params: &[RowValues]) -> Result<usize, SqlAdapterError> {
        let converted = Params::convert(params);
        let affected = self
            .runtime
            .block_on(self.client.execute(sql, converted.as_refs()))?;
        usize::try_from(affected).map_err(|e| SqlAdapterError::DriverExecution(e.to_string()))
    }

    fn begin(&mut self) -> Result<(), SqlAdapterError> {
        Ok(self.runtime.block_on(self.client.batch_execute("BEGIN"))?)
    }

    fn commit(&mut self) -> Result<(), SqlAdapterError> {
        Ok(self.runtime.block_on(self.client.batch_execute("COMMIT"))?)
    }

    fn rollback(&mut self) -> Result<(), SqlAdapterError> {
        Ok(self.runtime.block_on(self.client.batch_execute("ROLLBACK"))?)
    }

    fn describe_table(
        &mut self,
        table: &str,
        columns: &[&str],
    ) -> Result<ResultSet, SqlAdapterError> {
        let (schema, table) = match table.split_once('.') {
            Some((schema, table)) => (Some(schema), table),
            None => (None, table),
        };

        let mut sql = String::from(
            "SELECT column_name::text AS name, data_type::text AS type, \
             (is_nullable = 'YES') AS nullable, column_default::text AS default_value \
             FROM information_schema.columns WHERE table_name::text = ?",
        );
        let mut params = vec![RowValues::Text(table.to_string())];
        match schema {
            Some(schema) => {
                sql.push_str(" AND table_schema::text = ?");
                params.push(RowValues::Text(schema.to_string()));
            }
            None => sql.push_str(" AND table_schema = current_schema()"),
        }
        if !columns.is_empty() {
            sql.push_str(&format!(
                " AND column_name::text IN ({})",
                placeholders(columns.len())
            ));
            params.extend(columns.iter().map(|c| RowValues::Text((*c).to_string())));
        }
        sql.push_str(" ORDER BY ordinal_position");

        let sql = crate::translation::translate_placeholders(
            &sql,
            PlaceholderStyle::Postgres,
            true,
        );
        self.select(&sql, &params)
    }

    fn last_insert_id(&mut self, sequence: Option<&str>) -> Result<i64, SqlAdapterError> {
        let rs = match sequence {
            Some(seq) => self.select(
                "SELECT currval($1::text::regclass)",
                &[RowValues::Text(seq.to_string())],
            )?,
            None => self.select("SELECT lastval()", &[])?,
        };
        rs.first()
            .and_then(|row| row.get_by_index(0))
            .and_then(|v| v.as_int().copied())
            .ok_or_else(|| {
                SqlAdapterError::DriverExecution("no id generated in this session".into())
            })
    }
}
