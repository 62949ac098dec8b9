use tracing::warn;

use crate::condition::{Condition, encode};
use crate::driver::placeholders;
use crate::error::SqlAdapterError;
use crate::translation::TranslationMode;
use crate::types::RowValues;

use super::Adapter;

/// One row to insert: `columns[i]` receives `values[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertSpec {
    pub table: String,
    pub columns: Vec<String>,
    pub values: Vec<RowValues>,
}

impl InsertSpec {
    #[must_use]
    pub fn new(table: impl Into<String>, columns: &[&str], values: Vec<RowValues>) -> Self {
        Self {
            table: table.into(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            values,
        }
    }

    fn check_arity(&self) -> Result<(), SqlAdapterError> {
        if self.columns.len() != self.values.len() || self.columns.is_empty() {
            return Err(SqlAdapterError::BindMismatch {
                columns: self.columns.len(),
                values: self.values.len(),
            });
        }
        Ok(())
    }
}

/// `INSERT INTO {table} ({columns}) VALUES (?,...)`.
#[must_use]
pub fn insert_statement(table: &str, columns: &[String]) -> String {
    format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(","),
        placeholders(columns.len())
    )
}

/// `UPDATE {table} SET {assignments}`, plus ` WHERE {body}` for a non-empty condition.
#[must_use]
pub fn update_statement(table: &str, assignments: &[&str], condition: &Condition) -> String {
    let body = encode(Some(condition), "");
    let mut sql = format!("UPDATE {table} SET {}", assignments.join(","));
    if !body.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&body);
    }
    sql
}

/// `DELETE FROM {table}`, plus the encoded WHERE clause when a condition is given.
#[must_use]
pub fn delete_statement(table: &str, condition: Option<&Condition>) -> String {
    format!("DELETE FROM {table}{}", encode(condition, "WHERE"))
}

impl Adapter {
    /// Insert one row.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::BindMismatch` when the column and value counts differ (or
    /// both are zero), before the driver is touched; `SqlAdapterError::NotConnected` before
    /// `connect`; otherwise the driver's error.
    pub fn insert(&mut self, spec: &InsertSpec) -> Result<usize, SqlAdapterError> {
        spec.check_arity()?;
        let sql = insert_statement(&spec.table, &spec.columns);
        self.run_dml(&sql, &spec.values, TranslationMode::AdapterDefault)
    }

    /// Insert every spec in order inside one transaction.
    ///
    /// Every spec is checked before `BEGIN`. When any insert or the final commit fails the
    /// transaction is rolled back and that error is returned.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::BindMismatch` for a malformed spec,
    /// `SqlAdapterError::TransactionState` when a transaction is already open, or the first
    /// driver error.
    pub fn multi_insert(&mut self, specs: &[InsertSpec]) -> Result<usize, SqlAdapterError> {
        for spec in specs {
            spec.check_arity()?;
        }
        self.begin_transaction()?;

        let mut inserted = 0;
        for (idx, spec) in specs.iter().enumerate() {
            match self.insert(spec) {
                Ok(n) => inserted += n,
                Err(err) => {
                    warn!(
                        error = %err,
                        index = idx,
                        table = %spec.table,
                        "multi_insert rolling back"
                    );
                    return Err(self.abandon_transaction(err));
                }
            }
        }

        if let Err(err) = self.commit() {
            warn!(error = %err, "multi_insert commit failed, rolling back");
            return Err(self.abandon_transaction(err));
        }
        Ok(inserted)
    }

    /// Roll back after `err` and hand `err` back; a rollback failure is only logged.
    fn abandon_transaction(&mut self, err: SqlAdapterError) -> SqlAdapterError {
        if let Err(rollback_err) = self.roll_back() {
            warn!(error = %rollback_err, "rollback after failed multi_insert failed");
        }
        err
    }

    /// `UPDATE {table} SET {assignments} WHERE {condition}`.
    ///
    /// Assignments are fragments such as `"name = ?"`; `bind` supplies the SET values followed
    /// by the condition's values. An empty condition updates every row.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn update(
        &mut self,
        table: &str,
        assignments: &[&str],
        condition: impl Into<Condition>,
        bind: &[RowValues],
    ) -> Result<usize, SqlAdapterError> {
        let sql = update_statement(table, assignments, &condition.into());
        self.run_dml(&sql, bind, TranslationMode::AdapterDefault)
    }

    /// `DELETE FROM {table}` filtered by `condition`. `None` deletes every row.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn delete(
        &mut self,
        table: &str,
        bind: &[RowValues],
        condition: Option<&Condition>,
    ) -> Result<usize, SqlAdapterError> {
        let sql = delete_statement(table, condition);
        self.run_dml(&sql, bind, TranslationMode::AdapterDefault)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_renders_one_placeholder_per_column() {
        let spec = InsertSpec::new(
            "users",
            &["name", "age"],
            vec!["ann".into(), RowValues::Int(3)],
        );
        assert_eq!(
            insert_statement(&spec.table, &spec.columns),
            "INSERT INTO users (name,age) VALUES (?,?)"
        );
    }

    #[test]
    fn arity_check_rejects_mismatch_and_empty() {
        let short = InsertSpec::new("t", &["a", "b"], vec![RowValues::Int(1)]);
        assert!(matches!(
            short.check_arity(),
            Err(SqlAdapterError::BindMismatch {
                columns: 2,
                values: 1
            })
        ));
        let empty = InsertSpec::new("t", &[], vec![]);
        assert!(matches!(
            empty.check_arity(),
            Err(SqlAdapterError::BindMismatch { .. })
        ));
    }

    #[test]
    fn update_with_condition_and_without() {
        assert_eq!(
            update_statement("t", &["a = ?", "b = ?"], &Condition::raw("id = ?")),
            "UPDATE t SET a = ?,b = ? WHERE id = ?"
        );
        assert_eq!(
            update_statement("t", &["a = ?"], &Condition::raw("")),
            "UPDATE t SET a = ?"
        );
        let list = Condition::first("a = 1").or("b = 2");
        assert_eq!(
            update_statement("t", &["c = 0"], &list),
            "UPDATE t SET c = 0 WHERE a = 1 OR b = 2"
        );
    }

    #[test]
    fn delete_without_condition_clears_table() {
        assert_eq!(delete_statement("t", None), "DELETE FROM t");
        assert_eq!(
            delete_statement("t", Some(&Condition::raw("id = ?"))),
            "DELETE FROM t WHERE id = ?"
        );
    }
}
