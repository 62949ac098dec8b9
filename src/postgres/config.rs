use std::time::Duration;

use crate::config::ConnectionConfig;
use crate::error::SqlAdapterError;

const DEFAULT_PORT: u16 = 5432;

/// Translate a [`ConnectionConfig`] into a `tokio_postgres::Config`.
///
/// `charset` becomes the session `client_encoding`. Recognised options:
/// `application_name` and `connect_timeout_secs`.
///
/// # Errors
/// Returns `SqlAdapterError::ConfigError` if required fields are missing or an option value is
/// invalid.
pub fn pg_config(config: &ConnectionConfig) -> Result<tokio_postgres::Config, SqlAdapterError> {
    config.validate()?;

    let mut pg = tokio_postgres::Config::new();
    pg.host(&config.host)
        .port(config.port.unwrap_or(DEFAULT_PORT))
        .dbname(&config.database_name)
        .user(&config.user);
    if !config.password.is_empty() {
        pg.password(&config.password);
    }
    if !config.charset.trim().is_empty() {
        pg.options(&format!("-c client_encoding={}", config.charset.trim()));
    }
    if let Some(name) = config.option("application_name") {
        pg.application_name(name);
    }
    if let Some(secs) = config.option("connect_timeout_secs") {
        let secs = secs.parse::<u64>().map_err(|e| {
            SqlAdapterError::ConfigError(format!("connect_timeout_secs must be an integer: {e}"))
        })?;
        pg.connect_timeout(Duration::from_secs(secs));
    }
    Ok(pg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DatabaseType;

    #[test]
    fn maps_fields_and_defaults_port() {
        let cfg = ConnectionConfig::builder(DatabaseType::Postgres, "shop")
            .host("db.internal")
            .credentials("app", "secret")
            .option("application_name", "sql-adapter-tests")
            .finish();
        let pg = pg_config(&cfg).unwrap();
        assert_eq!(pg.get_dbname(), Some("shop"));
        assert_eq!(pg.get_user(), Some("app"));
        assert_eq!(pg.get_ports(), &[DEFAULT_PORT]);
        assert_eq!(pg.get_application_name(), Some("sql-adapter-tests"));
    }

    #[test]
    fn missing_host_is_a_config_error() {
        let cfg = ConnectionConfig::builder(DatabaseType::Postgres, "shop")
            .credentials("app", "")
            .finish();
        assert!(matches!(pg_config(&cfg), Err(SqlAdapterError::ConfigError(_))));
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let cfg = ConnectionConfig::builder(DatabaseType::Postgres, "shop")
            .host("localhost")
            .credentials("app", "")
            .option("connect_timeout_secs", "soon")
            .finish();
        assert!(matches!(pg_config(&cfg), Err(SqlAdapterError::ConfigError(_))));
    }
}
