use std::collections::HashMap;
use std::sync::Arc;

use crate::types::{FetchMode, RowValues};

/// A row from a query result.
///
/// Column names are shared by every row of the same [`ResultSet`](super::ResultSet); the values
/// keep the column order the driver reported.
#[derive(Debug, Clone)]
pub struct Row {
    column_names: Arc<Vec<String>>,
    values: Vec<RowValues>,
    column_index: Arc<HashMap<String, usize>>,
}

impl Row {
    /// Create a row, building its own name index.
    #[must_use]
    pub fn new(column_names: Arc<Vec<String>>, values: Vec<RowValues>) -> Self {
        let column_index = Arc::new(build_index(&column_names));
        Self {
            column_names,
            values,
            column_index,
        }
    }

    pub(crate) fn with_index(
        column_names: Arc<Vec<String>>,
        column_index: Arc<HashMap<String, usize>>,
        values: Vec<RowValues>,
    ) -> Self {
        Self {
            column_names,
            values,
            column_index,
        }
    }

    /// Index of a column by name. Duplicate names resolve to the first occurrence.
    #[must_use]
    pub fn get_column_index(&self, column_name: &str) -> Option<usize> {
        self.column_index.get(column_name).copied()
    }

    /// Value of a column by name
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.get_column_index(column_name)
            .and_then(|idx| self.values.get(idx))
    }

    /// Value of a column by position
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    #[must_use]
    pub fn values(&self) -> &[RowValues] {
        &self.values
    }

    #[must_use]
    pub fn into_values(self) -> Vec<RowValues> {
        self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(column, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.column_names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Re-key the row according to a fetch style.
    #[must_use]
    pub fn fetch(&self, mode: FetchMode) -> FetchedRow {
        let mut entries = Vec::with_capacity(match mode {
            FetchMode::Both => self.values.len() * 2,
            FetchMode::Assoc | FetchMode::Num => self.values.len(),
        });
        for (idx, (name, value)) in self.iter().enumerate() {
            if matches!(mode, FetchMode::Assoc | FetchMode::Both) {
                entries.push((RowKey::Name(name.to_string()), value.clone()));
            }
            if matches!(mode, FetchMode::Num | FetchMode::Both) {
                entries.push((RowKey::Index(idx), value.clone()));
            }
        }
        FetchedRow { entries }
    }
}

pub(crate) fn build_index(column_names: &[String]) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(column_names.len());
    for (i, name) in column_names.iter().enumerate() {
        index.entry(name.clone()).or_insert(i);
    }
    index
}

/// Key of a [`FetchedRow`] entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Name(String),
    Index(usize),
}

/// A row re-keyed by [`FetchMode`]; entries keep column order.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedRow {
    pub entries: Vec<(RowKey, RowValues)>,
}

impl FetchedRow {
    #[must_use]
    pub fn get(&self, column_name: &str) -> Option<&RowValues> {
        self.entries.iter().find_map(|(key, value)| match key {
            RowKey::Name(name) if name == column_name => Some(value),
            _ => None,
        })
    }

    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.entries.iter().find_map(|(key, value)| match key {
            RowKey::Index(i) if *i == index => Some(value),
            _ => None,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        Row::new(
            Arc::new(vec!["id".to_string(), "name".to_string()]),
            vec![RowValues::Int(7), RowValues::Text("ann".into())],
        )
    }

    #[test]
    fn lookup_by_name_and_position() {
        let row = sample();
        assert_eq!(row.get("name"), Some(&RowValues::Text("ann".into())));
        assert_eq!(row.get_by_index(0), Some(&RowValues::Int(7)));
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn fetch_modes_key_entries() {
        let row = sample();
        let assoc = row.fetch(FetchMode::Assoc);
        assert_eq!(assoc.len(), 2);
        assert!(assoc.get_by_index(0).is_none());

        let num = row.fetch(FetchMode::Num);
        assert_eq!(num.get_by_index(1), Some(&RowValues::Text("ann".into())));
        assert!(num.get("id").is_none());

        let both = row.fetch(FetchMode::Both);
        assert_eq!(both.len(), 4);
        assert_eq!(both.get("id"), both.get_by_index(0));
    }

    #[test]
    fn duplicate_column_names_resolve_to_first() {
        let row = Row::new(
            Arc::new(vec!["a".to_string(), "a".to_string()]),
            vec![RowValues::Int(1), RowValues::Int(2)],
        );
        assert_eq!(row.get("a"), Some(&RowValues::Int(1)));
    }
}
