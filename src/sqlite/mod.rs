// SQLite backend, split by concern:
// - config: opening a session from a ConnectionConfig
// - params: RowValues -> rusqlite values
// - query: result extraction
// - connection: the Driver implementation

pub mod config;
pub mod connection;
pub mod params;
pub mod query;

pub use connection::SqliteDriver;
pub use params::Params as SqliteParams;
pub use query::build_result_set;
