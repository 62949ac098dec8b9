use crate::error::SqlAdapterError;

use super::QueryBuilder;

impl QueryBuilder<'_, '_> {
    /// Execute a DML statement and return rows affected.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn dml(self) -> Result<usize, SqlAdapterError> {
        self.adapter
            .run_dml(self.sql.as_ref(), self.params.as_ref(), self.translation)
    }
}
