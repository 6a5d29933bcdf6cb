//! Double-ended growable storage over signed logical indices.
//!
//! [`Span`] is the primitive under both levels of the growable sheet: the
//! sheet is a span of rows and each row is a span of cells. The window of
//! valid indices `[lo, hi)` can extend in either direction without shifting
//! the slots already written; slack capacity held on both sides lets the
//! window move over released positions without reallocating.

/// A growable array addressed by logical indices in `[lo, hi)`.
///
/// Indices may be negative. Slots inside the window hold live values; every
/// slot outside the window holds `T::default()`, which is what newly grown
/// slots read as.
pub struct Span<T> {
    /// Backing buffer, fully initialized across its whole length.
    buf: Vec<T>,
    /// Buffer offset of the first window slot. Slots before it are left slack.
    start: usize,
    /// Window length. Buffer slots past `start + len` are right slack.
    len: usize,
    /// Logical index of the first window slot.
    lo: i64,
}

/// Extra capacity to allocate when growing by `n` exhausts the slack.
///
/// Hybrid rule: power-of-two rounding, capped at 1.5x the requested amount.
/// Always at least `n`.
pub(crate) fn next_capacity(n: usize) -> usize {
    n.next_power_of_two().min(n + n / 2)
}

impl<T> Default for Span<T> {
    fn default() -> Span<T> {
        Span {
            buf: Vec::new(),
            start: 0,
            len: 0,
            lo: 0,
        }
    }
}

impl<T: Default> Span<T> {
    /// Create a span with an empty window at index 0.
    pub fn new() -> Span<T> {
        Span::default()
    }

    /// Lower bound of the logical window (inclusive).
    pub const fn lo(&self) -> i64 {
        self.lo
    }

    /// Upper bound of the logical window (exclusive).
    pub const fn hi(&self) -> i64 {
        self.lo + self.len as i64
    }

    /// Number of slots in the window.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if the window holds no slots.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The live window as a slice, lowest logical index first.
    pub fn as_slice(&self) -> &[T] {
        &self.buf[self.start..self.start + self.len]
    }

    /// Iterate the live window, lowest logical index first.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Buffer position of logical index `i`.
    ///
    /// Panics if `i` is outside the window: an out-of-window access means the
    /// owner's growth logic is broken, not that the input was bad.
    fn slot(&self, i: i64) -> usize {
        assert!(
            self.lo <= i && i < self.hi(),
            "span index {} out of window [{}, {})",
            i,
            self.lo,
            self.hi()
        );
        self.start + (i - self.lo) as usize
    }

    /// Read the slot at logical index `i`. Panics outside the window.
    pub fn get(&self, i: i64) -> &T {
        &self.buf[self.slot(i)]
    }

    /// Mutable access to the slot at logical index `i`. Panics outside the window.
    pub fn get_mut(&mut self, i: i64) -> &mut T {
        let slot = self.slot(i);
        &mut self.buf[slot]
    }

    /// Write the slot at logical index `i`. Panics outside the window.
    pub fn set(&mut self, i: i64, value: T) {
        let slot = self.slot(i);
        self.buf[slot] = value;
    }

    /// Shrink the window to `[new_lo, new_hi)` without reallocating.
    ///
    /// The new range must lie within the current window. Released slots are
    /// reset to `T::default()` immediately (dropping their values) and become
    /// slack on the side they border.
    pub fn narrow(&mut self, new_lo: i64, new_hi: i64) {
        assert!(
            new_lo <= new_hi,
            "narrow bounds out of order: [{}, {})",
            new_lo,
            new_hi
        );
        assert!(
            self.lo <= new_lo && new_hi <= self.hi(),
            "narrow to [{}, {}) outside window [{}, {})",
            new_lo,
            new_hi,
            self.lo,
            self.hi()
        );
        let cut_left = (new_lo - self.lo) as usize;
        let cut_right = (self.hi() - new_hi) as usize;
        let end = self.start + self.len;
        for slot in &mut self.buf[self.start..self.start + cut_left] {
            *slot = T::default();
        }
        for slot in &mut self.buf[end - cut_right..end] {
            *slot = T::default();
        }
        self.start += cut_left;
        self.len -= cut_left + cut_right;
        self.lo = new_lo;
    }

    /// Extend the window by `n` slots on the low side.
    pub fn grow_left(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        if n <= self.start {
            self.start -= n;
        } else {
            let extra = next_capacity(n);
            let right_slack = self.buf.len() - self.start - self.len;
            let mut buf: Vec<T> = Vec::new();
            buf.resize_with(extra + self.len + right_slack, T::default);
            let live = std::mem::take(&mut self.buf)
                .into_iter()
                .skip(self.start)
                .take(self.len);
            for (dst, src) in buf[extra..extra + self.len].iter_mut().zip(live) {
                *dst = src;
            }
            self.buf = buf;
            self.start = extra - n;
        }
        self.len += n;
        self.lo -= n as i64;
    }

    /// Extend the window by `n` slots on the high side.
    pub fn grow_right(&mut self, n: usize) {
        if n == 0 {
            return;
        }
        let right_slack = self.buf.len() - self.start - self.len;
        if n > right_slack {
            let extra = next_capacity(n);
            let mut buf: Vec<T> = Vec::new();
            buf.resize_with(self.start + self.len + extra, T::default);
            let live = std::mem::take(&mut self.buf)
                .into_iter()
                .skip(self.start)
                .take(self.len);
            for (dst, src) in buf[self.start..self.start + self.len].iter_mut().zip(live) {
                *dst = src;
            }
            self.buf = buf;
        }
        self.len += n;
    }

    /// Grow the window by the minimum amount needed so `i` falls inside it.
    /// No-op if `i` is already in the window.
    pub fn grow_to_include(&mut self, i: i64) {
        if i < self.lo {
            self.grow_left((self.lo - i) as usize);
        } else if i >= self.hi() {
            self.grow_right((i - self.hi() + 1) as usize);
        }
    }
}
