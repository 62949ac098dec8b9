use tracing::debug;

use crate::error::SqlAdapterError;

use super::Adapter;

impl Adapter {
    /// Open a transaction on the current session.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::TransactionState` when one is already open (the open one is
    /// left untouched), `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn begin_transaction(&mut self) -> Result<(), SqlAdapterError> {
        if self.in_transaction {
            return Err(SqlAdapterError::TransactionState(
                "a transaction is already open".into(),
            ));
        }
        self.driver_mut()?.begin()?;
        self.in_transaction = true;
        debug!("transaction started");
        Ok(())
    }

    /// Commit the open transaction.
    ///
    /// A failed driver commit leaves the transaction open so the caller can still roll back.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::TransactionState` when no transaction is open,
    /// `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn commit(&mut self) -> Result<(), SqlAdapterError> {
        self.require_transaction("commit")?;
        self.driver_mut()?.commit()?;
        self.in_transaction = false;
        debug!("transaction committed");
        Ok(())
    }

    /// Roll back the open transaction.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::TransactionState` when no transaction is open,
    /// `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn roll_back(&mut self) -> Result<(), SqlAdapterError> {
        self.require_transaction("roll back")?;
        let result = self.driver_mut()?.rollback();
        self.in_transaction = false;
        debug!(ok = result.is_ok(), "transaction rolled back");
        result
    }

    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.in_transaction
    }

    fn require_transaction(&self, action: &str) -> Result<(), SqlAdapterError> {
        if !self.is_connected() {
            return Err(SqlAdapterError::NotConnected);
        }
        if !self.in_transaction {
            return Err(SqlAdapterError::TransactionState(format!(
                "cannot {action}: no transaction is open"
            )));
        }
        Ok(())
    }
}
