//! CSV export functionality.
//!
//! Serializes any [`Sheet`] through its read contract: iterate `bounds()`
//! row-major and emit one delimited line per row, with empty cells as empty
//! fields. Output is always UTF-8.

use crate::error::Result;
use crate::sheet::Sheet;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Options for file export.
#[derive(Clone, Debug, Default)]
pub struct CsvOptions {
    /// Column names written as the first record, but only when the target
    /// file is empty (so appending runs don't repeat the header).
    pub headers: Option<Vec<String>>,
    /// Append to an existing file instead of truncating it.
    pub append: bool,
}

/// Streaming CSV writer over any byte sink.
///
/// One line buffer is reused across records instead of allocating per row.
pub struct CsvWriter<W: Write> {
    out: W,
    line: String,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W) -> CsvWriter<W> {
        CsvWriter {
            out,
            line: String::with_capacity(2048),
        }
    }

    /// Write one record from explicit fields (e.g. a header row).
    pub fn write_record<I, S>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.line.clear();
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.line.push(',');
            }
            self.line.push_str(&escape_csv_field(field.as_ref()));
        }
        self.line.push('\n');
        self.out.write_all(self.line.as_bytes())?;
        Ok(())
    }

    /// Write every row of `sheet` in bounds order. An empty sheet writes
    /// nothing.
    pub fn write_sheet<S: Sheet + ?Sized>(&mut self, sheet: &S) -> Result<()> {
        let bounds = sheet.bounds();
        for y in bounds.min.y..bounds.max.y {
            self.line.clear();
            for x in bounds.min.x..bounds.max.x {
                if x > bounds.min.x {
                    self.line.push(',');
                }
                let value = sheet.get(x, y);
                if !value.is_empty() {
                    self.line.push_str(&escape_csv_field(&value.to_string()));
                }
            }
            self.line.push('\n');
            self.out.write_all(self.line.as_bytes())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    /// Unwrap the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Export a sheet to a CSV file, truncating any existing content.
pub fn write_csv<S: Sheet + ?Sized>(path: &Path, sheet: &S) -> Result<()> {
    write_csv_with(path, sheet, CsvOptions::default())
}

/// Export a sheet to a CSV file with explicit options.
pub fn write_csv_with<S: Sheet + ?Sized>(path: &Path, sheet: &S, options: CsvOptions) -> Result<()> {
    let mut open = OpenOptions::new();
    open.write(true).create(true);
    if options.append {
        open.append(true);
    } else {
        open.truncate(true);
    }
    let file = open.open(path)?;

    let write_header = match &options.headers {
        Some(_) => is_empty_file(&file)?,
        None => false,
    };

    let mut writer = CsvWriter::new(BufWriter::new(file));
    if write_header {
        if let Some(headers) = &options.headers {
            writer.write_record(headers)?;
        }
    }
    writer.write_sheet(sheet)?;
    writer.flush()
}

/// Export a sheet to any byte sink.
pub fn write_csv_to<W: Write, S: Sheet + ?Sized>(out: W, sheet: &S) -> Result<()> {
    let mut writer = CsvWriter::new(out);
    writer.write_sheet(sheet)?;
    writer.flush()
}

fn is_empty_file(file: &File) -> Result<bool> {
    Ok(file.metadata()?.len() == 0)
}

/// Escape a field for CSV output
fn escape_csv_field(field: &str) -> String {
    // Guard against CSV formula injection in spreadsheet apps.
    let first_non_space = field.trim_start_matches([' ', '\t']).chars().next();
    let safe_field = if matches!(first_non_space, Some('=' | '+' | '-' | '@')) {
        format!("'{}", field)
    } else {
        field.to_string()
    };

    if safe_field.contains(',')
        || safe_field.contains('"')
        || safe_field.contains('\n')
        || safe_field.contains('\r')
    {
        format!("\"{}\"", safe_field.replace('"', "\"\""))
    } else {
        safe_field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{FixedSheet, GrowableSheet, Rect, Value};
    use std::path::PathBuf;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "gridsheet_{}_{}_{}_{:?}.csv",
            tag,
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos(),
            std::thread::current().id(),
        ))
    }

    struct Cleanup(PathBuf);
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn export_to_string(sheet: &impl Sheet) -> String {
        let mut out = Vec::new();
        write_csv_to(&mut out, sheet).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_escape_csv_field() {
        assert_eq!(escape_csv_field("simple"), "simple");
        assert_eq!(escape_csv_field("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv_field("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(escape_csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn test_escape_csv_field_formula_injection() {
        assert_eq!(escape_csv_field("=1+1"), "'=1+1");
        assert_eq!(escape_csv_field(" =1+1"), "' =1+1");
        assert_eq!(escape_csv_field("\t-2+3"), "'\t-2+3");
        assert_eq!(escape_csv_field("@cmd"), "'@cmd");
    }

    #[test]
    fn test_empty_cells_become_empty_fields() {
        let mut sheet = GrowableSheet::new();
        sheet.set(0, 0, Value::Int(1));
        sheet.set(2, 0, Value::Int(2));
        sheet.set(0, 2, Value::Int(3));
        assert_eq!(export_to_string(&sheet), "1,,2\n,,\n3,,\n");
    }

    #[test]
    fn test_rows_emitted_in_bounds_order() {
        let mut sheet = GrowableSheet::new();
        sheet.set(-1, -1, Value::from("a"));
        sheet.set(0, -1, Value::from("b"));
        sheet.set(-1, 0, Value::from("c"));
        sheet.set(0, 0, Value::from("d"));
        assert_eq!(export_to_string(&sheet), "a,b\nc,d\n");
    }

    #[test]
    fn test_value_formatting_in_export() {
        let mut sheet = GrowableSheet::new();
        sheet.set(0, 0, Value::Float(3.0));
        sheet.set(1, 0, Value::Float(1.5));
        sheet.set(2, 0, Value::from("with,comma"));
        sheet.set(3, 0, Value::Bytes(b"raw".to_vec()));
        assert_eq!(export_to_string(&sheet), "3,1.5,\"with,comma\",raw\n");
    }

    #[test]
    fn test_empty_sheet_writes_nothing() {
        let sheet = GrowableSheet::new();
        assert_eq!(export_to_string(&sheet), "");
    }

    #[test]
    fn test_fixed_sheet_exports_declared_rectangle() {
        let mut sheet = FixedSheet::new(Rect::new(0, 0, 3, 2));
        sheet.set(1, 0, Value::Int(5));
        assert_eq!(export_to_string(&sheet), ",5,\n,,\n");
    }

    #[test]
    fn test_write_csv_truncates_existing_file() {
        let path = temp_path("truncate");
        let _cleanup = Cleanup(path.clone());

        let mut sheet = GrowableSheet::new();
        sheet.set(0, 0, Value::from("old"));
        write_csv(&path, &sheet).unwrap();

        sheet.set(0, 0, Value::from("new"));
        write_csv(&path, &sheet).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_header_written_only_into_empty_file() {
        let path = temp_path("header");
        let _cleanup = Cleanup(path.clone());

        let options = CsvOptions {
            headers: Some(vec!["id".to_string(), "name".to_string()]),
            append: true,
        };

        let mut sheet = GrowableSheet::new();
        sheet.set(0, 0, Value::Int(1));
        sheet.set(1, 0, Value::from("ada"));
        write_csv_with(&path, &sheet, options.clone()).unwrap();

        let mut second = GrowableSheet::new();
        second.set(0, 0, Value::Int(2));
        second.set(1, 0, Value::from("grace"));
        write_csv_with(&path, &second, options).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "id,name\n1,ada\n2,grace\n"
        );
    }
}
