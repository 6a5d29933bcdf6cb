//! Storage module for CSV export.

mod csv;

pub use csv::{CsvOptions, CsvWriter, write_csv, write_csv_to, write_csv_with};
