use crate::error::SqlAdapterError;
use crate::results::{FetchedRow, ResultSet, Row};
use crate::translation::TranslationMode;
use crate::types::{FetchMode, RowValues};

use super::Adapter;

impl Adapter {
    /// Every row of a parametrized statement.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn fetch_all(
        &mut self,
        sql: &str,
        bind: &[RowValues],
    ) -> Result<ResultSet, SqlAdapterError> {
        self.run_select(sql, bind, TranslationMode::AdapterDefault)
    }

    /// Every row re-keyed by `mode`.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn fetch_all_with_mode(
        &mut self,
        sql: &str,
        bind: &[RowValues],
        mode: FetchMode,
    ) -> Result<Vec<FetchedRow>, SqlAdapterError> {
        let rs = self.fetch_all(sql, bind)?;
        Ok(rs.results.iter().map(|row| row.fetch(mode)).collect())
    }

    /// First row, addressable by column name and position; `None` for an empty result.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn fetch_row(
        &mut self,
        sql: &str,
        bind: &[RowValues],
    ) -> Result<Option<Row>, SqlAdapterError> {
        let rs = self.fetch_all(sql, bind)?;
        Ok(rs.into_iter().next())
    }

    /// First row re-keyed by `mode`.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn fetch_row_with_mode(
        &mut self,
        sql: &str,
        bind: &[RowValues],
        mode: FetchMode,
    ) -> Result<Option<FetchedRow>, SqlAdapterError> {
        Ok(self.fetch_row(sql, bind)?.map(|row| row.fetch(mode)))
    }

    /// First row as positional values.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn fetch_one(
        &mut self,
        sql: &str,
        bind: &[RowValues],
    ) -> Result<Option<Vec<RowValues>>, SqlAdapterError> {
        Ok(self.fetch_row(sql, bind)?.map(Row::into_values))
    }

    /// Every row keyed by column name.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn fetch_assoc(
        &mut self,
        sql: &str,
        bind: &[RowValues],
    ) -> Result<Vec<FetchedRow>, SqlAdapterError> {
        self.fetch_all_with_mode(sql, bind, FetchMode::Assoc)
    }

    /// Two-column rows as `(key, value)` pairs, in row order.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ShapeError` unless the result has exactly two columns,
    /// `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn fetch_pairs(
        &mut self,
        sql: &str,
        bind: &[RowValues],
    ) -> Result<Vec<(RowValues, RowValues)>, SqlAdapterError> {
        let rs = self.fetch_all(sql, bind)?;
        let width = rs.get_column_names().map_or(0, |names| names.len());
        if width != 2 {
            return Err(SqlAdapterError::ShapeError(format!(
                "fetch_pairs needs exactly 2 columns, statement returned {width}"
            )));
        }
        Ok(rs
            .into_iter()
            .map(|row| {
                let mut values = row.into_values().into_iter();
                let key = values.next().unwrap_or(RowValues::Null);
                let value = values.next().unwrap_or(RowValues::Null);
                (key, value)
            })
            .collect())
    }

    /// First column of the row at `row_number` (zero-based); `None` past the last row.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::ShapeError` when the statement returns no columns,
    /// `SqlAdapterError::NotConnected` before `connect`, or the driver's error.
    pub fn fetch_col(
        &mut self,
        sql: &str,
        row_number: usize,
        bind: &[RowValues],
    ) -> Result<Option<RowValues>, SqlAdapterError> {
        let rs = self.fetch_all(sql, bind)?;
        if rs.get_column_names().is_none_or(|names| names.is_empty()) {
            return Err(SqlAdapterError::ShapeError(
                "fetch_col needs at least one column".into(),
            ));
        }
        Ok(rs
            .into_iter()
            .nth(row_number)
            .and_then(|row| row.into_values().into_iter().next()))
    }
}
