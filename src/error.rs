//! Error types for gridsheet.

use thiserror::Error;

/// Errors that can occur while exporting a sheet.
///
/// Sheet operations themselves are total and return no errors; breaking a
/// span's window invariant is a bug in the caller and panics instead.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
