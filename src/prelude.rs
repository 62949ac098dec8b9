//! Convenient imports for common functionality.

pub use crate::adapter::{Adapter, InsertSpec};
pub use crate::condition::{Condition, ConditionPart};
pub use crate::config::{ConnectionConfig, ConnectionConfigBuilder};
pub use crate::driver::Driver;
pub use crate::error::SqlAdapterError;
pub use crate::query_builder::{
    JoinSpec, JoinType, QueryBuilder, SQL_STAR, Select, Statement, TableSource,
};
pub use crate::results::{FetchedRow, ResultSet, Row, RowKey};
pub use crate::table::Table;
pub use crate::translation::{PlaceholderStyle, TranslationMode, translate_placeholders};
pub use crate::types::{DatabaseType, FetchMode, RowValues};

#[cfg(feature = "postgres")]
pub use crate::postgres::PostgresDriver;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteDriver;
