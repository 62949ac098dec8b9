use thiserror::Error;

#[derive(Debug, Error)]
pub enum SqlAdapterError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The driver refused to open a session. Carries the native message.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Adapter is not connected; call connect() first")]
    NotConnected,

    #[error("Bind mismatch: {columns} column(s) but {values} value(s)")]
    BindMismatch { columns: usize, values: usize },

    #[error("Transaction state error: {0}")]
    TransactionState(String),

    /// Native prepare/execute failure.
    #[error("Driver execution error: {0}")]
    DriverExecution(String),

    /// The rows came back but cannot be projected into the requested fetch shape.
    #[error("Result shape error: {0}")]
    ShapeError(String),
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for SqlAdapterError {
    fn from(err: rusqlite::Error) -> Self {
        SqlAdapterError::DriverExecution(err.to_string())
    }
}

#[cfg(feature = "postgres")]
impl From<tokio_postgres::Error> for SqlAdapterError {
    fn from(err: tokio_postgres::Error) -> Self {
        SqlAdapterError::DriverExecution(err.to_string())
    }
}
