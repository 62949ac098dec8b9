use crate::condition::{Condition, encode};
use crate::types::RowValues;

use super::Statement;
use super::join::JoinSpec;

/// Column wildcard used when no columns are requested.
pub const SQL_STAR: &str = "*";

/// Source of a SELECT: one table, or an ordered list of `(alias, table)` pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Single(String),
    Aliased(Vec<(String, String)>),
}

impl From<&str> for TableSource {
    fn from(table: &str) -> Self {
        TableSource::Single(table.to_string())
    }
}

impl From<String> for TableSource {
    fn from(table: String) -> Self {
        TableSource::Single(table)
    }
}

impl From<Vec<(&str, &str)>> for TableSource {
    fn from(pairs: Vec<(&str, &str)>) -> Self {
        TableSource::Aliased(
            pairs
                .into_iter()
                .map(|(alias, table)| (alias.to_string(), table.to_string()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for TableSource {
    fn from(pairs: [(&str, &str); N]) -> Self {
        TableSource::from(pairs.to_vec())
    }
}

/// Clause-by-clause SELECT builder.
///
/// Every call consumes and returns the builder, and the statement is rendered by
/// [`get_request`](Self::get_request) in a fixed clause order regardless of call order:
///
/// ```rust
/// use sql_adapter::prelude::*;
///
/// let sql = Select::new()
///     .from_columns("users", &["id", "name"])
///     .where_("active = 1")
///     .order("name", false, None)
///     .limit(Some(10))
///     .get_request();
/// assert_eq!(
///     sql,
///     "SELECT users.id, users.name FROM users WHERE active = 1 ORDER BY name LIMIT 10"
/// );
/// ```
///
/// Fragments are spliced into the SQL as written. Only the parameters passed to
/// [`where_bound`](Self::where_bound) and [`having_bound`](Self::having_bound) are bound by the
/// driver.
#[derive(Debug, Clone, Default)]
pub struct Select {
    tables: Option<TableSource>,
    columns: Vec<String>,
    join: Option<String>,
    where_clause: Option<String>,
    group: Option<String>,
    having: Option<String>,
    order: Option<String>,
    limit: Option<String>,
    where_params: Vec<RowValues>,
    having_params: Vec<RowValues>,
}

impl Select {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `from_columns(source, &["*"])`.
    #[must_use]
    pub fn from<S: Into<TableSource>>(self, source: S) -> Self {
        self.from_columns(source, &[SQL_STAR])
    }

    /// Set the table source and add columns.
    ///
    /// A single table qualifies each column as `table.column`. An aliased source renders
    /// `table AS alias` entries and takes the columns verbatim, so they must already be
    /// qualified with an alias.
    #[must_use]
    pub fn from_columns<S: Into<TableSource>>(mut self, source: S, columns: &[&str]) -> Self {
        match source.into() {
            TableSource::Single(table) => {
                self.columns
                    .extend(columns.iter().map(|column| format!("{table}.{column}")));
                self.tables = Some(TableSource::Single(table));
            }
            TableSource::Aliased(pairs) => {
                self.columns
                    .extend(columns.iter().map(|column| (*column).to_string()));
                match &mut self.tables {
                    Some(TableSource::Aliased(existing)) => existing.extend(pairs),
                    _ => self.tables = Some(TableSource::Aliased(pairs)),
                }
            }
        }
        self
    }

    /// Join one table, adding `alias.column` for each column, or `alias.*` when `columns` is empty.
    ///
    /// Without an explicit alias, the alias is the first FROM alias mapped to the joined table,
    /// falling back to the table name. Two aliases for the same table make this lookup
    /// ambiguous; pass the alias explicitly then. Only one JOIN clause is kept: a second call
    /// replaces the clause, while the columns it added stay selected.
    #[must_use]
    pub fn join(mut self, spec: JoinSpec, columns: &[&str]) -> Self {
        let alias = spec
            .alias
            .clone()
            .or_else(|| self.alias_for(&spec.table))
            .unwrap_or_else(|| spec.table.clone());

        if columns.is_empty() {
            self.columns.push(format!("{alias}.{SQL_STAR}"));
        } else {
            self.columns
                .extend(columns.iter().map(|column| format!("{alias}.{column}")));
        }

        self.join = Some(format!(
            " {} JOIN {} AS {alias} ON {}",
            spec.join_type, spec.table, spec.on
        ));
        self
    }

    fn alias_for(&self, table: &str) -> Option<String> {
        match &self.tables {
            Some(TableSource::Aliased(pairs)) => pairs
                .iter()
                .find(|(_, t)| t == table)
                .map(|(alias, _)| alias.clone()),
            _ => None,
        }
    }

    /// Set the WHERE clause. An empty condition removes it.
    #[must_use]
    pub fn where_<C: Into<Condition>>(mut self, condition: C) -> Self {
        self.set_where(Some(&condition.into()));
        self.where_params.clear();
        self
    }

    /// Set the WHERE clause from an optional condition; `None` leaves no clause.
    #[must_use]
    pub fn where_opt(mut self, condition: Option<&Condition>) -> Self {
        self.set_where(condition);
        self.where_params.clear();
        self
    }

    /// WHERE clause with `?` placeholders bound to `params`.
    #[must_use]
    pub fn where_bound<C: Into<Condition>>(mut self, condition: C, params: Vec<RowValues>) -> Self {
        self.set_where(Some(&condition.into()));
        self.where_params = params;
        self
    }

    fn set_where(&mut self, condition: Option<&Condition>) {
        let rendered = encode(condition, "WHERE");
        self.where_clause = (!rendered.is_empty()).then_some(rendered);
    }

    #[must_use]
    pub fn group(mut self, column: &str) -> Self {
        self.group = Some(format!(" GROUP BY {column}"));
        self
    }

    /// Set the HAVING clause, textually replacing every `?` with `replacement` when given.
    ///
    /// This is string substitution, not binding: the replacement is not escaped and must
    /// never carry untrusted input. Prefer [`having_bound`](Self::having_bound).
    #[must_use]
    pub fn having(mut self, fragment: &str, replacement: Option<&str>) -> Self {
        let condition = match replacement {
            Some(value) if !value.is_empty() => fragment.replace('?', value),
            _ => fragment.to_string(),
        };
        self.having = Some(format!(" HAVING {condition}"));
        self.having_params.clear();
        self
    }

    /// HAVING clause with `?` placeholders bound to `params`.
    #[must_use]
    pub fn having_bound(mut self, fragment: &str, params: Vec<RowValues>) -> Self {
        self.having = Some(format!(" HAVING {fragment}"));
        self.having_params = params;
        self
    }

    /// Set ORDER BY, with an optional OFFSET rendered before any DESC suffix.
    ///
    /// `descending` appends ` DESC` to the order clause already present, so calling this twice
    /// with `descending` set yields `DESC DESC`. A zero offset is ignored.
    #[must_use]
    pub fn order<'a>(
        mut self,
        column: impl Into<Option<&'a str>>,
        descending: bool,
        offset: Option<u64>,
    ) -> Self {
        let offset = offset.filter(|n| *n != 0);
        match (column.into(), offset) {
            (Some(column), Some(offset)) => {
                self.order = Some(format!(" ORDER BY {column} OFFSET {offset}"));
            }
            (Some(column), None) => self.order = Some(format!(" ORDER BY {column}")),
            (None, Some(offset)) => self.order = Some(format!(" OFFSET {offset}")),
            (None, None) => {}
        }

        if descending && let Some(order) = self.order.as_mut() {
            order.push_str(" DESC");
        }
        self
    }

    /// Set LIMIT; `None` and `0` leave the clause out.
    #[must_use]
    pub fn limit(mut self, count: Option<u64>) -> Self {
        if let Some(count) = count.filter(|n| *n != 0) {
            self.limit = Some(format!(" LIMIT {count}"));
        }
        self
    }

    /// Render the statement. Pure; may be called any number of times.
    #[must_use]
    pub fn get_request(&self) -> String {
        let columns = self.columns.join(", ");
        let tables = match &self.tables {
            Some(TableSource::Single(table)) => table.clone(),
            Some(TableSource::Aliased(pairs)) => pairs
                .iter()
                .map(|(alias, table)| format!("{table} AS {alias}"))
                .collect::<Vec<_>>()
                .join(","),
            None => String::new(),
        };

        let mut sql = format!("SELECT {columns} FROM {tables}");
        for clause in [
            &self.join,
            &self.where_clause,
            &self.group,
            &self.having,
            &self.order,
            &self.limit,
        ]
        .into_iter()
        .flatten()
        {
            sql.push_str(clause);
        }
        sql
    }

    /// Parameters bound by WHERE then HAVING, in placeholder order.
    #[must_use]
    pub fn params(&self) -> Vec<RowValues> {
        self.where_params
            .iter()
            .chain(self.having_params.iter())
            .cloned()
            .collect()
    }

    /// Render into a [`Statement`] carrying the bound parameters.
    #[must_use]
    pub fn build(&self) -> Statement {
        Statement {
            sql: self.get_request(),
            params: self.params(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::JoinType;

    #[test]
    fn single_table_qualifies_every_column() {
        let sql = Select::new()
            .from_columns("users", &["id", "name", "email"])
            .get_request();
        assert_eq!(sql, "SELECT users.id, users.name, users.email FROM users");
        assert_eq!(Select::new().from("users").get_request(), "SELECT users.* FROM users");
    }

    #[test]
    fn aliased_tables_keep_order_and_verbatim_columns() {
        let sql = Select::new()
            .from_columns([("u", "users"), ("o", "orders")], &["u.id", "o.total"])
            .get_request();
        assert_eq!(sql, "SELECT u.id, o.total FROM users AS u,orders AS o");
    }

    #[test]
    fn join_resolves_alias_from_from_map() {
        let sql = Select::new()
            .from_columns([("u", "users"), ("o", "orders")], &["u.id"])
            .join(JoinSpec::new("orders", "o.user_id = u.id"), &["total"])
            .get_request();
        assert_eq!(
            sql,
            "SELECT u.id, o.total FROM users AS u,orders AS o INNER JOIN orders AS o ON o.user_id = u.id"
        );
    }

    #[test]
    fn join_without_columns_selects_alias_star_and_overwrites() {
        let sql = Select::new()
            .from("users")
            .join(
                JoinSpec::new("orders", "orders.user_id = users.id").alias("o"),
                &[],
            )
            .join(
                JoinSpec::new("roles", "r.id = users.role_id")
                    .alias("r")
                    .join_type(JoinType::Left),
                &["name"],
            )
            .get_request();
        assert_eq!(
            sql,
            "SELECT users.*, o.*, r.name FROM users LEFT JOIN roles AS r ON r.id = users.role_id"
        );
    }

    #[test]
    fn join_falls_back_to_table_name() {
        let sql = Select::new()
            .from("users")
            .join(JoinSpec::new("roles", "roles.id = users.role_id"), &[])
            .get_request();
        assert!(sql.ends_with("INNER JOIN roles AS roles ON roles.id = users.role_id"));
        assert!(sql.starts_with("SELECT users.*, roles.* FROM users"));
    }

    #[test]
    fn where_variants() {
        let sql = Select::new().from("t").where_("x=1").get_request();
        assert!(sql.ends_with("WHERE x=1"));

        let cond = Condition::from(vec![(None, "x=1"), (Some("AND"), "y=2")]);
        let sql = Select::new().from("t").where_(cond).get_request();
        assert!(sql.ends_with("WHERE x=1 AND y=2"));

        let sql = Select::new()
            .from("t")
            .where_(Condition::List(Vec::new()))
            .get_request();
        assert_eq!(sql, "SELECT t.* FROM t");
    }

    #[test]
    fn clauses_render_in_fixed_order() {
        let sql = Select::new()
            .from_columns("sales", &["region"])
            .limit(Some(3))
            .order("region", false, None)
            .having("SUM(amount) > 100", None)
            .group("region")
            .where_("year = 2024")
            .get_request();
        assert_eq!(
            sql,
            "SELECT sales.region FROM sales WHERE year = 2024 GROUP BY region HAVING SUM(amount) > 100 ORDER BY region LIMIT 3"
        );
    }

    #[test]
    fn having_substitutes_every_placeholder_textually() {
        let sql = Select::new()
            .from("t")
            .having("COUNT(?) > ? ", Some("5"))
            .get_request();
        assert!(sql.ends_with(" HAVING COUNT(5) > 5 "));
    }

    #[test]
    fn order_offset_and_desc() {
        let sql = Select::new().from("t").order("name", true, None).get_request();
        assert!(sql.ends_with("ORDER BY name DESC"));

        let sql = Select::new()
            .from("t")
            .order("name", false, Some(10))
            .get_request();
        assert!(sql.ends_with("ORDER BY name OFFSET 10"));

        let sql = Select::new()
            .from("t")
            .order("name", true, Some(10))
            .get_request();
        assert!(sql.ends_with("ORDER BY name OFFSET 10 DESC"));
    }

    #[test]
    fn repeated_desc_compounds() {
        let sql = Select::new()
            .from("t")
            .order("name", true, None)
            .order(None::<&str>, true, None)
            .get_request();
        assert!(sql.ends_with("ORDER BY name DESC DESC"));
    }

    #[test]
    fn limit_zero_and_none_are_omitted() {
        assert_eq!(Select::new().from("t").limit(Some(0)).get_request(), "SELECT t.* FROM t");
        assert_eq!(
            Select::new().from("t").limit(None).get_request(),
            "SELECT t.* FROM t"
        );
        assert!(Select::new().from("t").limit(Some(5)).get_request().ends_with(" LIMIT 5"));
    }

    #[test]
    fn build_orders_where_params_before_having_params() {
        let select = Select::new()
            .from_columns("t", &["k"])
            .having_bound("COUNT(*) > ?", vec![RowValues::Int(2)])
            .where_bound("k <> ?", vec![RowValues::Text("skip".into())]);
        let stmt = select.build();
        assert_eq!(
            stmt.sql,
            "SELECT t.k FROM t WHERE k <> ? HAVING COUNT(*) > ?"
        );
        assert_eq!(
            stmt.params,
            vec![RowValues::Text("skip".into()), RowValues::Int(2)]
        );
    }

    #[test]
    fn get_request_is_idempotent() {
        let select = Select::new().from("t").where_("a = 1").limit(Some(2));
        assert_eq!(select.get_request(), select.get_request());
    }
}
