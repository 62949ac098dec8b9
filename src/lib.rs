//! A small relational access layer: one owned connection, parametrized CRUD, and a fluent
//! SELECT builder.
//!
//! ```rust,no_run
//! use sql_adapter::prelude::*;
//!
//! # fn demo() -> Result<(), SqlAdapterError> {
//! let mut adapter = Adapter::new(ConnectionConfig::new(DatabaseType::Sqlite, ":memory:"));
//! adapter.connect()?;
//!
//! let stmt = Select::new()
//!     .from_columns("users", &["id", "name"])
//!     .where_bound("users.id > ?", vec![RowValues::Int(10)])
//!     .order("users.name", false, None)
//!     .limit(Some(20))
//!     .build();
//! let rows = adapter.execute(&stmt)?;
//! # let _ = rows;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod condition;
pub mod config;
pub mod driver;
pub mod error;
pub mod prelude;
pub mod query_builder;
pub mod results;
pub mod table;
pub mod translation;
pub mod types;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use adapter::{Adapter, InsertSpec};
pub use condition::{Condition, ConditionPart};
pub use config::{ConnectionConfig, ConnectionConfigBuilder};
pub use driver::Driver;
pub use error::SqlAdapterError;
pub use query_builder::{JoinSpec, JoinType, QueryBuilder, Select, Statement, TableSource};
pub use results::{FetchedRow, ResultSet, Row, RowKey};
pub use table::Table;
pub use types::{DatabaseType, FetchMode, RowValues};
