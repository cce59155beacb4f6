//! The DataTable facade
//!
//! One in-memory table, queried and mutated through column→value
//! dictionaries. All filtering is a linear scan over the row sequence.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::config::CsvOptions;
use crate::error::{Result, TableError};
use crate::io;
use crate::model::{CellValue, Column};
use crate::query::{Record, Selector};

/// A row in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
}

impl Row {
    /// Create a row from cells in column order
    pub fn new(cells: Vec<CellValue>) -> Self {
        Self { cells }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// An in-memory table backed by a CSV file or built from columns.
///
/// Every record holds a value (or an explicit null) for every declared
/// column label. Row order is insertion order. The table is exclusively
/// owned and does no internal locking; callers serialize their own
/// access.
#[derive(Debug, Clone)]
pub struct DataTable {
    columns: Vec<Column>,
    rows: Vec<Row>,
    path: Option<PathBuf>,
    options: CsvOptions,
}

impl DataTable {
    /// Read a table from a CSV file with default options.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with(path, CsvOptions::default())
    }

    /// Read a table from a CSV file.
    ///
    /// The path becomes the backing file for [`save`](Self::save).
    pub fn from_path_with(path: impl AsRef<Path>, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let (columns, rows) = io::read_path(path, &options)?;
        Ok(Self {
            columns,
            rows,
            path: Some(path.to_path_buf()),
            options,
        })
    }

    /// Parse a table from CSV text with default options.
    pub fn from_csv_str(text: &str) -> Result<Self> {
        Self::from_csv_str_with(text, CsvOptions::default())
    }

    /// Parse a table from CSV text.
    pub fn from_csv_str_with(text: &str, options: CsvOptions) -> Result<Self> {
        let (columns, rows) = io::read_reader(text.as_bytes(), &options)?;
        Ok(Self {
            columns,
            rows,
            path: None,
            options,
        })
    }

    /// Build a table from an ordered mapping of label → values.
    ///
    /// All value sequences must share the same length.
    pub fn from_columns(mapping: IndexMap<String, Vec<CellValue>>) -> Result<Self> {
        let mut expected: Option<usize> = None;
        for (name, values) in &mapping {
            match expected {
                None => expected = Some(values.len()),
                Some(len) if values.len() != len => {
                    return Err(TableError::Shape {
                        column: name.clone(),
                        expected: len,
                        actual: values.len(),
                    });
                }
                Some(_) => {}
            }
        }
        let row_count = expected.unwrap_or(0);

        let mut columns: Vec<Column> = mapping
            .keys()
            .enumerate()
            .map(|(i, name)| Column::new(name.clone(), i))
            .collect();

        let mut rows: Vec<Row> = (0..row_count)
            .map(|_| Row::new(Vec::with_capacity(mapping.len())))
            .collect();
        for values in mapping.values() {
            for (row, value) in rows.iter_mut().zip(values) {
                row.cells.push(value.clone());
            }
        }

        io::infer_column_types(&mut columns, &rows);

        Ok(Self {
            columns,
            rows,
            path: None,
            options: CsvOptions::default(),
        })
    }

    /// The declared columns, in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The ordered column labels
    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The rows, in current order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell by row index and column label
    pub fn get(&self, row: usize, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// Get column index by label
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Return a new table holding every row that matches the selector.
    ///
    /// A row matches when every selector column equals the given value;
    /// the empty selector matches all rows. No match yields an empty
    /// table, not an error.
    pub fn select(&self, selector: &Selector) -> Result<DataTable> {
        let resolved = selector.resolve(&self.columns)?;
        let rows: Vec<Row> = self
            .rows
            .iter()
            .filter(|row| row_matches(row, &resolved))
            .cloned()
            .collect();

        let mut columns = self.columns.clone();
        io::infer_column_types(&mut columns, &rows);

        Ok(DataTable {
            columns,
            rows,
            path: None,
            options: self.options.clone(),
        })
    }

    /// Select matching rows, projected onto the named columns in the
    /// order given.
    pub fn select_columns(&self, selector: &Selector, labels: &[&str]) -> Result<DataTable> {
        let indices: Vec<usize> = labels
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| TableError::column_not_found(*name))
            })
            .collect::<Result<_>>()?;

        let selected = self.select(selector)?;
        let rows: Vec<Row> = selected
            .rows
            .iter()
            .map(|row| Row::new(indices.iter().map(|&i| row.cells[i].clone()).collect()))
            .collect();
        let mut columns: Vec<Column> = labels
            .iter()
            .enumerate()
            .map(|(i, name)| Column::new(*name, i))
            .collect();
        io::infer_column_types(&mut columns, &rows);

        Ok(DataTable {
            columns,
            rows,
            path: None,
            options: self.options.clone(),
        })
    }

    /// Append one row built from the record.
    ///
    /// Record keys must be declared columns; absent columns are filled
    /// with null.
    pub fn insert(&mut self, record: &Record) -> Result<()> {
        let resolved = record.resolve(&self.columns)?;
        let mut cells = vec![CellValue::Null; self.columns.len()];
        for (idx, value) in resolved {
            cells[idx] = value.clone();
        }
        for (column, cell) in self.columns.iter_mut().zip(&cells) {
            column.inferred_type = column.inferred_type.widen(cell.cell_type());
        }
        self.rows.push(Row::new(cells));
        Ok(())
    }

    /// Remove every row matching the selector; returns the count removed.
    pub fn delete(&mut self, selector: &Selector) -> Result<usize> {
        let resolved = selector.resolve(&self.columns)?;
        let before = self.rows.len();
        self.rows.retain(|row| !row_matches(row, &resolved));
        let removed = before - self.rows.len();
        if removed > 0 {
            io::infer_column_types(&mut self.columns, &self.rows);
        }
        Ok(removed)
    }

    /// Set the record's columns on every row matching the selector;
    /// returns the count updated.
    ///
    /// Matches are collected against pre-update state, then each row is
    /// patched independently, so overlap between selector and record
    /// columns has no cross-row effect.
    pub fn update(&mut self, selector: &Selector, values: &Record) -> Result<usize> {
        let matched: Vec<usize> = {
            let resolved = selector.resolve(&self.columns)?;
            self.rows
                .iter()
                .enumerate()
                .filter(|(_, row)| row_matches(row, &resolved))
                .map(|(i, _)| i)
                .collect()
        };
        let patch = values.resolve(&self.columns)?;

        for &row_idx in &matched {
            for &(col_idx, value) in &patch {
                self.rows[row_idx].cells[col_idx] = value.clone();
            }
        }
        if !matched.is_empty() {
            io::infer_column_types(&mut self.columns, &self.rows);
        }
        Ok(matched.len())
    }

    /// Maximum of a numeric column, compared numerically across Int and
    /// Float. Nulls are skipped; a non-numeric value fails the call; a
    /// column with no non-null values is an error, not a sentinel.
    pub fn max(&self, column: &str) -> Result<CellValue> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| TableError::column_not_found(column))?;

        let mut best: Option<(f64, CellValue)> = None;
        for row in &self.rows {
            let cell = match row.get(idx) {
                Some(cell) if !cell.is_null() => cell,
                _ => continue,
            };
            let n = cell.as_f64().ok_or_else(|| TableError::NonNumeric {
                column: column.to_string(),
                ty: self.columns[idx].inferred_type,
            })?;
            let better = match best {
                None => true,
                Some((current, _)) => n > current,
            };
            if better {
                best = Some((n, cell.clone()));
            }
        }

        best.map(|(_, value)| value).ok_or_else(|| TableError::EmptyColumn {
            column: column.to_string(),
        })
    }

    /// Serialize the table to CSV text, header row included, without a
    /// trailing newline.
    pub fn to_csv_string(&self) -> Result<String> {
        let mut text = io::write_string(&self.columns, &self.rows, &self.options)?;
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }

    /// Write the table back to its backing file.
    pub fn save(&self) -> Result<()> {
        let path = self.path.as_ref().ok_or(TableError::NoBackingFile)?;
        io::write_path(path, &self.columns, &self.rows, &self.options)
    }

    /// Write the table to `path` without retargeting the backing file.
    pub fn save_as(&self, path: impl AsRef<Path>) -> Result<()> {
        io::write_path(path.as_ref(), &self.columns, &self.rows, &self.options)
    }
}

fn row_matches(row: &Row, resolved: &[(usize, &CellValue)]) -> bool {
    resolved
        .iter()
        .all(|&(idx, value)| row.get(idx) == Some(value))
}
