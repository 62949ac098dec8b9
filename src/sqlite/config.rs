use std::time::Duration;

use rusqlite::Connection;

use crate::config::ConnectionConfig;
use crate::error::SqlAdapterError;

const JOURNAL_MODES: &[&str] = &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];

/// Open a `SQLite` session for `config`.
///
/// `database_name` is the file path or `:memory:`. Recognised options:
/// `busy_timeout_ms`, `journal_mode` and `foreign_keys` (`on`/`off`).
///
/// # Errors
/// Returns `SqlAdapterError::ConnectionError` if the file cannot be opened and
/// `SqlAdapterError::ConfigError` for an invalid option value.
pub fn open_connection(config: &ConnectionConfig) -> Result<Connection, SqlAdapterError> {
    let conn = Connection::open(&config.database_name).map_err(|e| {
        SqlAdapterError::ConnectionError(format!(
            "Failed to open SQLite database {}: {e}",
            config.database_name
        ))
    })?;
    apply_options(&conn, config)?;
    Ok(conn)
}

fn apply_options(conn: &Connection, config: &ConnectionConfig) -> Result<(), SqlAdapterError> {
    if let Some(ms) = config.option("busy_timeout_ms") {
        let ms = ms.parse::<u64>().map_err(|e| {
            SqlAdapterError::ConfigError(format!("busy_timeout_ms must be an integer: {e}"))
        })?;
        conn.busy_timeout(Duration::from_millis(ms))
            .map_err(|e| SqlAdapterError::ConnectionError(e.to_string()))?;
    }

    if let Some(mode) = config.option("journal_mode") {
        let mode = mode.to_ascii_uppercase();
        if !JOURNAL_MODES.contains(&mode.as_str()) {
            return Err(SqlAdapterError::ConfigError(format!(
                "unsupported journal_mode: {mode}"
            )));
        }
        conn.execute_batch(&format!("PRAGMA journal_mode = {mode};"))
            .map_err(|e| SqlAdapterError::ConnectionError(e.to_string()))?;
    }

    if let Some(flag) = config.option("foreign_keys") {
        let flag = match flag.to_ascii_lowercase().as_str() {
            "on" | "true" | "1" => "ON",
            "off" | "false" | "0" => "OFF",
            other => {
                return Err(SqlAdapterError::ConfigError(format!(
                    "foreign_keys must be on or off, got {other}"
                )));
            }
        };
        conn.execute_batch(&format!("PRAGMA foreign_keys = {flag};"))
            .map_err(|e| SqlAdapterError::ConnectionError(e.to_string()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DatabaseType;

    #[test]
    fn rejects_unknown_journal_mode() {
        let cfg = ConnectionConfig::builder(DatabaseType::Sqlite, ":memory:")
            .option("journal_mode", "sideways")
            .finish();
        assert!(matches!(
            open_connection(&cfg),
            Err(SqlAdapterError::ConfigError(_))
        ));
    }

    #[test]
    fn applies_foreign_keys() {
        let cfg = ConnectionConfig::builder(DatabaseType::Sqlite, ":memory:")
            .option("foreign_keys", "on")
            .option("busy_timeout_ms", "250")
            .finish();
        let conn = open_connection(&cfg).unwrap();
        let on: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(on, 1);
    }

    #[test]
    fn unopenable_path_is_a_connection_error() {
        let cfg = ConnectionConfig::new(DatabaseType::Sqlite, "/nonexistent-dir/sub/x.db");
        assert!(matches!(
            open_connection(&cfg),
            Err(SqlAdapterError::ConnectionError(_))
        ));
    }
}
