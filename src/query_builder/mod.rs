use std::borrow::Cow;

use crate::adapter::Adapter;
use crate::translation::TranslationMode;
use crate::types::RowValues;

mod dml;
mod fetch;
mod join;
mod select;

pub use join::{JoinSpec, JoinType};
pub use select::{SQL_STAR, Select, TableSource};

/// Rendered SQL plus the parameters to bind, in placeholder order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<RowValues>,
}

impl Statement {
    #[must_use]
    pub fn new(sql: impl Into<String>, params: Vec<RowValues>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

impl From<Select> for Statement {
    fn from(select: Select) -> Self {
        select.build()
    }
}

/// Fluent executor for one ad-hoc statement on an [`Adapter`].
///
/// ```rust,no_run
/// # use sql_adapter::prelude::*;
/// # fn demo(adapter: &mut Adapter) -> Result<(), SqlAdapterError> {
/// let params = [RowValues::Int(1)];
/// let rows = adapter
///     .query_builder("SELECT name FROM users WHERE id = ?")
///     .params(&params)
///     .select()?;
/// # let _ = rows;
/// # Ok(())
/// # }
/// ```
pub struct QueryBuilder<'a, 'q> {
    pub(crate) adapter: &'a mut Adapter,
    pub(crate) sql: Cow<'q, str>,
    pub(crate) params: Cow<'q, [RowValues]>,
    pub(crate) translation: TranslationMode,
}

impl<'a, 'q> QueryBuilder<'a, 'q> {
    pub(crate) fn new(adapter: &'a mut Adapter, sql: &'q str) -> Self {
        Self {
            adapter,
            sql: Cow::Borrowed(sql),
            params: Cow::Borrowed(&[]),
            translation: TranslationMode::default(),
        }
    }

    /// Provide parameters for this statement.
    #[must_use]
    pub fn params(mut self, params: &'q [RowValues]) -> Self {
        self.params = Cow::Borrowed(params);
        self
    }

    /// Take ownership of parameters, e.g. from [`Select::params`].
    #[must_use]
    pub fn owned_params(mut self, params: Vec<RowValues>) -> Self {
        self.params = Cow::Owned(params);
        self
    }

    /// Override placeholder translation for this call.
    #[must_use]
    pub fn translation(mut self, translation: TranslationMode) -> Self {
        self.translation = translation;
        self
    }
}
