// Postgres backend, split by concern:
// - config: ConnectionConfig -> tokio_postgres::Config
// - params: ToSql for RowValues
// - query: result extraction
// - connection: the Driver implementation, blocking on a private runtime

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use connection::PostgresDriver;
pub use params::Params as PostgresParams;
pub use query::build_result_set_from_statement as build_result_set;
