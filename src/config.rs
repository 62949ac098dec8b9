use std::collections::BTreeMap;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::adapter::Adapter;
use crate::error::SqlAdapterError;
use crate::types::DatabaseType;

const DEFAULT_CHARSET: &str = "utf8";

/// Everything needed to open a driver session.
///
/// The adapter takes ownership of this value and never mutates it. For `SQLite`,
/// `database_name` is the file path (or `:memory:`) and `host` is ignored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub driver_type: DatabaseType,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    pub database_name: String,
    #[serde(default = "default_charset")]
    pub charset: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    /// Driver options, e.g. `busy_timeout_ms` for `SQLite` or `sslmode` for Postgres.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
    /// Rewrite `?` placeholders into the driver's native style before execution.
    #[serde(default = "default_translate")]
    pub translate_placeholders: bool,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("ConnectionConfig")
            .field("driver_type", &self.driver_type)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_name", &self.database_name)
            .field("charset", &self.charset)
            .field("user", &self.user)
            .field("password", &password)
            .field("options", &self.options)
            .field("translate_placeholders", &self.translate_placeholders)
            .finish()
    }
}

fn default_charset() -> String {
    DEFAULT_CHARSET.to_string()
}

fn default_translate() -> bool {
    true
}

impl ConnectionConfig {
    #[must_use]
    pub fn new(driver_type: DatabaseType, database_name: impl Into<String>) -> Self {
        Self {
            driver_type,
            host: String::new(),
            port: None,
            database_name: database_name.into(),
            charset: default_charset(),
            user: String::new(),
            password: String::new(),
            options: BTreeMap::new(),
            translate_placeholders: true,
        }
    }

    #[must_use]
    pub fn builder(
        driver_type: DatabaseType,
        database_name: impl Into<String>,
    ) -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::new(driver_type, database_name)
    }

    /// Deserialize a config from JSON.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConfigError` if the document is malformed or names an
    /// unknown driver.
    pub fn from_json(json: &str) -> Result<Self, SqlAdapterError> {
        serde_json::from_str(json)
            .map_err(|e| SqlAdapterError::ConfigError(format!("invalid config json: {e}")))
    }

    /// Render the DSN, e.g. `pgsql:host=localhost;dbname=shop;charset=utf8`.
    #[must_use]
    pub fn dsn(&self) -> String {
        let mut dsn = format!(
            "{}:host={};dbname={};charset={}",
            self.driver_type.dsn_prefix(),
            self.host,
            self.database_name,
            self.charset
        );
        if let Some(port) = self.port {
            dsn.push_str(&format!(";port={port}"));
        }
        dsn
    }

    /// Parse a DSN of the form `driver:key=value;key=value`.
    ///
    /// Recognised keys are `host`, `port`, `dbname` and `charset`; any other key is kept in
    /// `options`. Credentials are not part of a DSN and stay empty.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConfigError` for an unknown driver prefix, a malformed DSN, or
    /// a non-numeric port.
    pub fn from_dsn(dsn: &str) -> Result<Self, SqlAdapterError> {
        let shape = Regex::new(r"^(?P<driver>[A-Za-z0-9_]+):(?P<rest>.*)$")
            .map_err(|e| SqlAdapterError::ConfigError(e.to_string()))?;
        let pair = Regex::new(r"(?:^|;)\s*(?P<key>[A-Za-z_]+)\s*=\s*(?P<value>[^;]*)")
            .map_err(|e| SqlAdapterError::ConfigError(e.to_string()))?;

        let caps = shape
            .captures(dsn.trim())
            .ok_or_else(|| SqlAdapterError::ConfigError(format!("malformed dsn: {dsn}")))?;
        let driver = &caps["driver"];
        let driver_type = DatabaseType::from_dsn_prefix(driver).ok_or_else(|| {
            SqlAdapterError::ConfigError(format!("unsupported driver in dsn: {driver}"))
        })?;

        let mut config = ConnectionConfig::new(driver_type, String::new());
        for kv in pair.captures_iter(&caps["rest"]) {
            let value = kv["value"].trim().to_string();
            match &kv["key"] {
                "host" => config.host = value,
                "dbname" => config.database_name = value,
                "charset" => config.charset = value,
                "port" => {
                    let port = value.parse::<u16>().map_err(|e| {
                        SqlAdapterError::ConfigError(format!("invalid port {value}: {e}"))
                    })?;
                    config.port = Some(port);
                }
                other => {
                    config.options.insert(other.to_string(), value);
                }
            }
        }
        Ok(config)
    }

    /// Check that the fields the selected driver needs are present.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConfigError` naming the first missing field.
    pub fn validate(&self) -> Result<(), SqlAdapterError> {
        if self.database_name.trim().is_empty() {
            return Err(SqlAdapterError::ConfigError(
                "dbname is required".to_string(),
            ));
        }
        match self.driver_type {
            #[cfg(feature = "postgres")]
            DatabaseType::Postgres => {
                if self.host.trim().is_empty() {
                    return Err(SqlAdapterError::ConfigError(
                        "host is required".to_string(),
                    ));
                }
                if self.user.trim().is_empty() {
                    return Err(SqlAdapterError::ConfigError(
                        "user is required".to_string(),
                    ));
                }
                Ok(())
            }
            #[cfg(feature = "sqlite")]
            DatabaseType::Sqlite => Ok(()),
        }
    }

    #[must_use]
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// Fluent builder for [`ConnectionConfig`].
#[derive(Debug, Clone)]
pub struct ConnectionConfigBuilder {
    config: ConnectionConfig,
}

impl ConnectionConfigBuilder {
    #[must_use]
    pub fn new(driver_type: DatabaseType, database_name: impl Into<String>) -> Self {
        Self {
            config: ConnectionConfig::new(driver_type, database_name),
        }
    }

    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = Some(port);
        self
    }

    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.config.charset = charset.into();
        self
    }

    #[must_use]
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.user = user.into();
        self.config.password = password.into();
        self
    }

    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.options.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn translation(mut self, translate_placeholders: bool) -> Self {
        self.config.translate_placeholders = translate_placeholders;
        self
    }

    #[must_use]
    pub fn finish(self) -> ConnectionConfig {
        self.config
    }

    /// Build a disconnected [`Adapter`] owning this config.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ConfigError` if a required field is missing.
    pub fn build(self) -> Result<Adapter, SqlAdapterError> {
        let config = self.finish();
        config.validate()?;
        Ok(Adapter::new(config))
    }
}
