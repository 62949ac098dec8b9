use crate::error::SqlAdapterError;
use crate::results::ResultSet;

use super::QueryBuilder;

impl QueryBuilder<'_, '_> {
    /// Execute a SELECT and return the result set.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn select(self) -> Result<ResultSet, SqlAdapterError> {
        self.adapter
            .run_select(self.sql.as_ref(), self.params.as_ref(), self.translation)
    }
}
