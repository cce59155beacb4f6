//! CSV reading and writing
//!
//! Parsing and serialization mechanics are delegated to the `csv` crate;
//! this module owns per-cell type inference and the mapping of csv-crate
//! failures onto the table error contract.

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use rustc_hash::FxHashSet;

use crate::config::CsvOptions;
use crate::error::{Result, TableError};
use crate::model::{CellValue, Column};
use crate::table::Row;

/// Read a CSV file into columns and rows.
///
/// A missing file is reported as `FileNotFound`; every other failure of
/// the underlying reader surfaces as `Parse` or `Io`.
pub(crate) fn read_path(path: &Path, options: &CsvOptions) -> Result<(Vec<Column>, Vec<Row>)> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TableError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            TableError::Io(e)
        }
    })?;
    read_reader(BufReader::new(file), options)
}

/// Read CSV content from any reader into columns and rows.
pub(crate) fn read_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<(Vec<Column>, Vec<Row>)> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(from_csv)?.clone();
    if headers.is_empty() {
        return Err(TableError::parse("missing header row"));
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for name in headers.iter() {
        if !seen.insert(name) {
            return Err(TableError::parse(format!(
                "duplicate column label `{}`",
                name
            )));
        }
    }

    let mut columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name, i))
        .collect();

    let mut rows = Vec::new();
    for result in csv_reader.records() {
        // Records with a field count different from the header are
        // rejected by the reader (non-flexible) and surface here.
        let record = result.map_err(from_csv)?;
        let cells: Vec<CellValue> = record.iter().map(|s| parse_cell_value(s, options)).collect();
        rows.push(Row::new(cells));
    }

    infer_column_types(&mut columns, &rows);

    Ok((columns, rows))
}

/// Serialize columns and rows to CSV text with a header row.
pub(crate) fn write_string(
    columns: &[Column],
    rows: &[Row],
    options: &CsvOptions,
) -> Result<String> {
    let mut buf = Vec::new();
    write_writer(&mut buf, columns, rows, options)?;
    String::from_utf8(buf).map_err(|e| TableError::parse(e.to_string()))
}

/// Serialize columns and rows to a CSV file at `path`.
pub(crate) fn write_path(
    path: &Path,
    columns: &[Column],
    rows: &[Row],
    options: &CsvOptions,
) -> Result<()> {
    let file = File::create(path)?;
    write_writer(file, columns, rows, options)
}

fn write_writer<W: Write>(
    writer: W,
    columns: &[Column],
    rows: &[Row],
    options: &CsvOptions,
) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    csv_writer
        .write_record(columns.iter().map(|c| c.name.as_str()))
        .map_err(from_csv)?;

    for row in rows {
        csv_writer
            .write_record(row.cells.iter().map(|c| c.to_field()))
            .map_err(from_csv)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Parse a string field into a CellValue with type inference
pub(crate) fn parse_cell_value(s: &str, options: &CsvOptions) -> CellValue {
    let trimmed = s.trim();

    // Check for empty/null
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
        return match options.replace_missing {
            Some(ref replacement) => CellValue::String(replacement.clone()),
            None => CellValue::Null,
        };
    }

    // Try parsing as boolean
    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    // Try parsing as integer
    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }

    // Try parsing as float
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }

    // Try parsing as date
    if let Ok(date) = chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(date);
    }

    // Try parsing as datetime (ISO 8601)
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return CellValue::DateTime(dt);
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return CellValue::DateTime(dt);
    }

    // Default to string
    CellValue::String(trimmed.to_string())
}

/// Recompute every column's inferred type by widening over its cells
pub(crate) fn infer_column_types(columns: &mut [Column], rows: &[Row]) {
    for (col_idx, column) in columns.iter_mut().enumerate() {
        let mut inferred = crate::model::CellType::Null;
        for row in rows {
            if let Some(cell) = row.cells.get(col_idx) {
                inferred = inferred.widen(cell.cell_type());
            }
        }
        column.inferred_type = inferred;
    }
}

fn from_csv(err: csv::Error) -> TableError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => TableError::Io(e),
        _ => TableError::Parse { reason },
    }
}
