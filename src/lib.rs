//! datatable - Dictionary-driven queries over CSV-backed tables
//!
//! A thin facade over one in-memory table, loaded from a CSV file or
//! built from columns, with selection, insertion, deletion, update, and
//! numeric aggregation expressed as column→value mappings.
//!
//! ```no_run
//! use datatable::{DataTable, Record, Selector};
//!
//! # fn main() -> datatable::Result<()> {
//! let mut table = DataTable::from_path("people.csv")?;
//! let bos = table.select(&Selector::new().with("age", 25))?;
//! table.insert(&Record::new().with("name", "Cy").with("age", 41))?;
//! let oldest = table.max("age")?;
//! # let _ = (bos, oldest);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
mod io;
pub mod model;
pub mod query;
pub mod table;

pub use config::CsvOptions;
pub use error::{Result, TableError};
pub use model::{CellType, CellValue, Column};
pub use query::{Record, Selector};
pub use table::{DataTable, Row};
