//! The growable sheet: a span of rows, each row a span of cells.

use super::rect::Rect;
use super::span::Span;
use super::value::{EMPTY, Value};
use super::Sheet;

/// One row of cells, indexed by column.
///
/// The column window is trimmed after every write so it never starts or ends
/// on an empty cell. Interior empty cells are kept.
#[derive(Default)]
struct Row {
    cells: Span<Value>,
}

impl Row {
    /// Read the cell at column `x`. Columns outside the window are empty.
    fn at(&self, x: i64) -> &Value {
        if x < self.cells.lo() || x >= self.cells.hi() {
            return &EMPTY;
        }
        self.cells.get(x)
    }

    /// Write the cell at column `x`, growing and re-trimming the window.
    fn set(&mut self, x: i64, value: Value) {
        self.cells.grow_to_include(x);
        self.cells.set(x, value);
        self.trim();
    }

    /// Drop empty cells from both ends of the column window.
    fn trim(&mut self) {
        let mut i = self.cells.lo();
        let mut j = self.cells.hi();
        while i < j && self.cells.get(i).is_empty() {
            i += 1;
        }
        while i < j && self.cells.get(j - 1).is_empty() {
            j -= 1;
        }
        self.cells.narrow(i, j);
    }

    /// The tight column window `(lo, hi)`.
    fn col_range(&self) -> (i64, i64) {
        (self.cells.lo(), self.cells.hi())
    }

    /// True if no cell in the window holds a value.
    fn is_empty(&self) -> bool {
        self.cells.iter().all(Value::is_empty)
    }
}

/// A sheet whose bounding rectangle follows the cells that were written.
///
/// Rows are created lazily on first write and dropped again once trimming
/// pushes them out of the row window. After every write the reported bounds
/// are the minimal rectangle containing every non-empty cell.
#[derive(Default)]
pub struct GrowableSheet {
    rows: Span<Option<Row>>,
}

impl GrowableSheet {
    /// Create an empty sheet with degenerate bounds.
    pub fn new() -> GrowableSheet {
        GrowableSheet::default()
    }

    /// The row at `y`, created on first use. `y` must be inside the row window.
    fn row_mut(&mut self, y: i64) -> &mut Row {
        self.rows.get_mut(y).get_or_insert_default()
    }

    /// Drop empty rows from both ends of the row window.
    fn trim_rows(&mut self) {
        let mut i = self.rows.lo();
        let mut j = self.rows.hi();
        while i < j && row_is_empty(self.rows.get(i)) {
            i += 1;
        }
        while i < j && row_is_empty(self.rows.get(j - 1)) {
            j -= 1;
        }
        self.rows.narrow(i, j);
    }
}

fn row_is_empty(slot: &Option<Row>) -> bool {
    slot.as_ref().is_none_or(Row::is_empty)
}

impl Sheet for GrowableSheet {
    fn bounds(&self) -> Rect {
        let mut cols: Option<(i64, i64)> = None;
        for slot in self.rows.iter() {
            let Some(row) = slot else { continue };
            let (lo, hi) = row.col_range();
            if lo == hi {
                continue;
            }
            cols = Some(match cols {
                Some((min_x, max_x)) => (min_x.min(lo), max_x.max(hi)),
                None => (lo, hi),
            });
        }
        match cols {
            Some((min_x, max_x)) => Rect::new(min_x, self.rows.lo(), max_x, self.rows.hi()),
            None => Rect::ZERO,
        }
    }

    fn get(&self, x: i64, y: i64) -> &Value {
        if y < self.rows.lo() || y >= self.rows.hi() {
            return &EMPTY;
        }
        match self.rows.get(y) {
            Some(row) => row.at(x),
            None => &EMPTY,
        }
    }

    fn set(&mut self, x: i64, y: i64, value: Value) {
        self.rows.grow_to_include(y);
        self.row_mut(y).set(x, value);
        self.trim_rows();
    }
}
