//! Data model for tabular data representation

mod schema;
mod value;

pub use schema::{CellType, Column};
pub use value::CellValue;
