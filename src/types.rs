use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Values bound as statement parameters or read back from result cells.
///
/// The same enum is used by every driver, so helper code never branches on native types:
/// ```rust
/// use sql_adapter::prelude::*;
///
/// let params = vec![
///     RowValues::Int(1),
///     RowValues::Text("alice".into()),
///     RowValues::Bool(true),
/// ];
/// # let _ = params;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum RowValues {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
    /// JSON value
    JSON(JsonValue),
    /// Binary data
    Blob(Vec<u8>),
}

impl RowValues {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValues::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValues::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Booleans come back from `SQLite` as integers; `0`/`1` are accepted here.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RowValues::Bool(value) => Some(*value),
            RowValues::Int(1) => Some(true),
            RowValues::Int(0) => Some(false),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let RowValues::Timestamp(value) = self {
            return Some(*value);
        } else if let Some(s) = self.as_text() {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
                return Some(dt);
            }
        }
        None
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValues::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValues::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

impl From<i64> for RowValues {
    fn from(value: i64) -> Self {
        RowValues::Int(value)
    }
}

impl From<i32> for RowValues {
    fn from(value: i32) -> Self {
        RowValues::Int(i64::from(value))
    }
}

impl From<f64> for RowValues {
    fn from(value: f64) -> Self {
        RowValues::Float(value)
    }
}

impl From<bool> for RowValues {
    fn from(value: bool) -> Self {
        RowValues::Bool(value)
    }
}

impl From<&str> for RowValues {
    fn from(value: &str) -> Self {
        RowValues::Text(value.to_string())
    }
}

impl From<String> for RowValues {
    fn from(value: String) -> Self {
        RowValues::Text(value)
    }
}

impl From<NaiveDateTime> for RowValues {
    fn from(value: NaiveDateTime) -> Self {
        RowValues::Timestamp(value)
    }
}

impl From<JsonValue> for RowValues {
    fn from(value: JsonValue) -> Self {
        RowValues::JSON(value)
    }
}

impl From<Vec<u8>> for RowValues {
    fn from(value: Vec<u8>) -> Self {
        RowValues::Blob(value)
    }
}

impl<T: Into<RowValues>> From<Option<T>> for RowValues {
    fn from(value: Option<T>) -> Self {
        value.map_or(RowValues::Null, Into::into)
    }
}

/// The database backends an [`Adapter`](crate::Adapter) can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// `PostgreSQL` database
    #[cfg(feature = "postgres")]
    #[value(alias = "pgsql")]
    #[serde(alias = "pgsql")]
    Postgres,
    /// `SQLite` database
    #[cfg(feature = "sqlite")]
    Sqlite,
}

impl DatabaseType {
    /// Prefix used in DSN strings (`sqlite:...`, `pgsql:...`).
    #[must_use]
    pub fn dsn_prefix(self) -> &'static str {
        match self {
            #[cfg(feature = "postgres")]
            DatabaseType::Postgres => "pgsql",
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => "sqlite",
        }
    }

    /// Parse a DSN prefix back into a backend.
    #[must_use]
    pub fn from_dsn_prefix(prefix: &str) -> Option<Self> {
        match prefix.to_ascii_lowercase().as_str() {
            #[cfg(feature = "postgres")]
            "pgsql" | "postgres" | "postgresql" => Some(DatabaseType::Postgres),
            #[cfg(feature = "sqlite")]
            "sqlite" => Some(DatabaseType::Sqlite),
            _ => None,
        }
    }
}

/// Fetch style for [`Adapter::fetch_row`](crate::Adapter::fetch_row) and
/// [`Adapter::fetch_all_with_mode`](crate::Adapter::fetch_all_with_mode).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Values keyed by column name.
    #[default]
    Assoc,
    /// Values keyed by zero-based position.
    Num,
    /// Both: every value appears under its column name and under its position.
    Both,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_accepts_sqlite_integers() {
        assert_eq!(RowValues::Int(1).as_bool(), Some(true));
        assert_eq!(RowValues::Int(0).as_bool(), Some(false));
        assert_eq!(RowValues::Int(2).as_bool(), None);
        assert_eq!(RowValues::Bool(true).as_bool(), Some(true));
    }

    #[test]
    fn timestamp_parses_text_cells() {
        let v = RowValues::Text("2024-01-01 08:00:01".into());
        assert!(v.as_timestamp().is_some());
        let v = RowValues::Text("2024-01-01 08:00:01.250".into());
        assert!(v.as_timestamp().is_some());
        assert!(RowValues::Text("yesterday".into()).as_timestamp().is_none());
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(RowValues::from(None::<i64>), RowValues::Null);
        assert_eq!(RowValues::from(Some("x")), RowValues::Text("x".into()));
    }

    #[cfg(feature = "sqlite")]
    #[test]
    fn dsn_prefix_round_trips() {
        assert_eq!(
            DatabaseType::from_dsn_prefix(DatabaseType::Sqlite.dsn_prefix()),
            Some(DatabaseType::Sqlite)
        );
        assert_eq!(DatabaseType::from_dsn_prefix("oracle"), None);
    }
}
