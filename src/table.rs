//! A table name bound to an [`Adapter`].

use crate::adapter::{Adapter, InsertSpec};
use crate::condition::Condition;
use crate::error::SqlAdapterError;
use crate::query_builder::Select;
use crate::results::{ResultSet, Row};
use crate::translation::TranslationMode;
use crate::types::{DatabaseType, RowValues};

/// Thin facade over one table; every method delegates to the adapter.
#[derive(Debug)]
pub struct Table<'a> {
    name: String,
    adapter: &'a mut Adapter,
}

impl<'a> Table<'a> {
    /// Bind `name` to `adapter`, connecting it first if needed.
    ///
    /// # Errors
    /// Returns the adapter's connect error.
    pub fn new(name: impl Into<String>, adapter: &'a mut Adapter) -> Result<Self, SqlAdapterError> {
        if !adapter.is_connected() {
            adapter.connect()?;
        }
        Ok(Self {
            name: name.into(),
            adapter,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn adapter(&mut self) -> &mut Adapter {
        &mut *self.adapter
    }

    /// A fresh builder seeded with `from(name)`.
    #[must_use]
    pub fn select(&self) -> Select {
        Select::new().from(self.name.as_str())
    }

    /// # Errors
    /// See [`Adapter::insert`].
    pub fn insert(
        &mut self,
        columns: &[&str],
        values: Vec<RowValues>,
    ) -> Result<usize, SqlAdapterError> {
        self.adapter
            .insert(&InsertSpec::new(self.name.as_str(), columns, values))
    }

    /// # Errors
    /// See [`Adapter::update`].
    pub fn update(
        &mut self,
        assignments: &[&str],
        condition: impl Into<Condition>,
        bind: &[RowValues],
    ) -> Result<usize, SqlAdapterError> {
        self.adapter.update(&self.name, assignments, condition, bind)
    }

    /// # Errors
    /// See [`Adapter::delete`].
    pub fn delete(
        &mut self,
        condition: Option<&Condition>,
        bind: &[RowValues],
    ) -> Result<usize, SqlAdapterError> {
        self.adapter.delete(&self.name, bind, condition)
    }

    /// Rows matching `condition`, ordered by `order`, at most `count` starting at `offset`.
    ///
    /// On Postgres the builder's `ORDER BY .. OFFSET n LIMIT m` form is sent as is. `SQLite`
    /// only parses `LIMIT m OFFSET n`, so an offset there is rendered in that order, with
    /// `LIMIT -1` when no count is given.
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` after the adapter was closed, or the driver's
    /// error.
    pub fn fetch_all(
        &mut self,
        condition: Option<&Condition>,
        order: Option<&str>,
        count: Option<u64>,
        offset: Option<u64>,
        bind: &[RowValues],
    ) -> Result<ResultSet, SqlAdapterError> {
        let sql = self.fetch_sql(condition, order, count, offset);
        self.adapter
            .run_select(&sql, bind, TranslationMode::AdapterDefault)
    }

    fn is_sqlite(&self) -> bool {
        #[cfg(feature = "sqlite")]
        if self.adapter.get_config().driver_type == DatabaseType::Sqlite {
            return true;
        }
        false
    }

    fn fetch_sql(
        &self,
        condition: Option<&Condition>,
        order: Option<&str>,
        count: Option<u64>,
        offset: Option<u64>,
    ) -> String {
        let select = self.select().where_opt(condition);
        match offset.filter(|n| *n != 0) {
            Some(offset) if self.is_sqlite() => {
                let mut sql = select.order(order, false, None).get_request();
                let count = count
                    .filter(|n| *n != 0)
                    .map_or_else(|| "-1".to_string(), |n| n.to_string());
                sql.push_str(&format!(" LIMIT {count} OFFSET {offset}"));
                sql
            }
            _ => select.order(order, false, offset).limit(count).get_request(),
        }
    }

    /// First row matching `condition`, skipping `offset` rows; see [`Table::fetch_all`].
    ///
    /// # Errors
    /// Returns `SqlAdapterError::NotConnected` after the adapter was closed, or the driver's
    /// error.
    pub fn fetch_row(
        &mut self,
        condition: Option<&Condition>,
        order: Option<&str>,
        offset: Option<u64>,
        bind: &[RowValues],
    ) -> Result<Option<Row>, SqlAdapterError> {
        let rs = self.fetch_all(condition, order, Some(1), offset, bind)?;
        Ok(rs.into_iter().next())
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::config::ConnectionConfig;

    fn sql_for(driver_type: DatabaseType, count: Option<u64>, offset: Option<u64>) -> String {
        let mut adapter = Adapter::new(ConnectionConfig::new(driver_type, "shop"));
        let table = Table {
            name: "books".into(),
            adapter: &mut adapter,
        };
        table.fetch_sql(None, Some("year"), count, offset)
    }

    #[test]
    fn offset_clause_order_follows_the_backend() {
        #[cfg(feature = "postgres")]
        assert_eq!(
            sql_for(DatabaseType::Postgres, Some(1), Some(2)),
            "SELECT books.* FROM books ORDER BY year OFFSET 2 LIMIT 1"
        );
        assert_eq!(
            sql_for(DatabaseType::Sqlite, Some(1), Some(2)),
            "SELECT books.* FROM books ORDER BY year LIMIT 1 OFFSET 2"
        );
        assert_eq!(
            sql_for(DatabaseType::Sqlite, None, Some(2)),
            "SELECT books.* FROM books ORDER BY year LIMIT -1 OFFSET 2"
        );
        assert_eq!(
            sql_for(DatabaseType::Sqlite, Some(3), None),
            "SELECT books.* FROM books ORDER BY year LIMIT 3"
        );
    }
}
