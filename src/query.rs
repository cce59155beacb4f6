//! Dictionary-style query parameters
//!
//! Selections and mutations are expressed as ordered column→value
//! mappings, validated against the table's declared labels before any
//! row is touched.

use indexmap::IndexMap;

use crate::error::{Result, TableError};
use crate::model::{CellValue, Column};

/// A column→value mapping used to filter rows.
///
/// A row matches when every pair matches (logical AND). The empty
/// selector matches all rows.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    pairs: IndexMap<String, CellValue>,
}

impl Selector {
    /// Create an empty selector (matches every row)
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `column` to equal `value`
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.pairs.insert(column.into(), value.into());
        self
    }

    /// Whether no pairs are set
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate the column/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve column names to indices against the declared columns
    pub(crate) fn resolve<'a>(&'a self, columns: &[Column]) -> Result<Vec<(usize, &'a CellValue)>> {
        resolve_pairs(&self.pairs, columns)
    }
}

impl<K, V> FromIterator<(K, V)> for Selector
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A column→value mapping used to build or patch a row.
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: IndexMap<String, CellValue>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `column` to `value`
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.fields.insert(column.into(), value.into());
        self
    }

    /// Whether no fields are set
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate the column/value pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve column names to indices against the declared columns
    pub(crate) fn resolve<'a>(&'a self, columns: &[Column]) -> Result<Vec<(usize, &'a CellValue)>> {
        resolve_pairs(&self.fields, columns)
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn resolve_pairs<'a>(
    pairs: &'a IndexMap<String, CellValue>,
    columns: &[Column],
) -> Result<Vec<(usize, &'a CellValue)>> {
    pairs
        .iter()
        .map(|(name, value)| {
            columns
                .iter()
                .position(|c| &c.name == name)
                .map(|idx| (idx, value))
                .ok_or_else(|| TableError::column_not_found(name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![Column::new("name", 0), Column::new("age", 1)]
    }

    #[test]
    fn test_resolve_in_order() {
        let sel = Selector::new().with("age", 25).with("name", "Bo");
        let resolved = sel.resolve(&columns()).unwrap();
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].0, 1);
        assert_eq!(resolved[1].0, 0);
    }

    #[test]
    fn test_resolve_unknown_column() {
        let sel = Selector::new().with("color", "red");
        let err = sel.resolve(&columns()).unwrap_err();
        assert!(matches!(
            err,
            TableError::ColumnNotFound { ref column } if column == "color"
        ));
    }

    #[test]
    fn test_duplicate_column_keeps_last() {
        let rec = Record::new().with("age", 25).with("age", 30);
        let resolved = rec.resolve(&columns()).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(*resolved[0].1, CellValue::Int(30));
    }

    #[test]
    fn test_from_iter() {
        let sel: Selector = [("name", "Al")].into_iter().collect();
        assert!(!sel.is_empty());
        assert_eq!(sel.iter().count(), 1);
    }
}
