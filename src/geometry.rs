//! Cell coordinates, spans and cell rectangles on the collage grid.
//!
//! Integer lattice geometry only. Ordering is row-major throughout: a
//! [`Cell`] sorts by row, then by column, which is also the order placements
//! are exported in.
//!
//! # Example
//!
//! ```
//! use zencollage::{Cell, CellRect, GridDims, Span};
//!
//! let rect = CellRect::new(Cell::new(1, 0), Span::new(2, 2));
//! assert!(rect.contains(Cell::new(2, 1)));
//! assert!(rect.fits_within(GridDims::new(2, 3).unwrap()));
//! assert!(!rect.fits_within(GridDims::new(2, 2).unwrap()));
//! assert_eq!(rect.cells().count(), 4);
//! ```

use core::fmt;

use crate::grid::GridDims;

/// A single grid cell, 0-indexed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    /// Row index, counted from the top.
    pub row: u32,
    /// Column index, counted from the left.
    pub col: u32,
}

impl Cell {
    /// Create a cell at `(row, col)`.
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Extent of a placement in cells.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    /// Number of columns covered.
    pub cols: u32,
    /// Number of rows covered.
    pub rows: u32,
}

impl Span {
    /// A single cell.
    pub const ONE: Self = Self { cols: 1, rows: 1 };

    /// Create a span of `cols` × `rows` cells.
    pub const fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Whether the span covers no cells at all.
    pub const fn is_empty(self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Number of cells covered.
    pub const fn area(self) -> u64 {
        self.cols as u64 * self.rows as u64
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.cols, self.rows)
    }
}

/// Axis-aligned rectangle of cells: an anchor (top-left cell) plus a span.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CellRect {
    /// Top-left cell.
    pub anchor: Cell,
    /// Extent from the anchor.
    pub span: Span,
}

impl CellRect {
    /// Create a rect from its anchor and span.
    pub const fn new(anchor: Cell, span: Span) -> Self {
        Self { anchor, span }
    }

    /// A 1×1 rect covering `cell`.
    pub const fn single(cell: Cell) -> Self {
        Self {
            anchor: cell,
            span: Span::ONE,
        }
    }

    /// Smallest rect containing both corner cells (inclusive).
    pub fn from_corners(a: Cell, b: Cell) -> Self {
        let anchor = Cell::new(a.row.min(b.row), a.col.min(b.col));
        let span = Span::new(
            a.col.max(b.col) - anchor.col + 1,
            a.row.max(b.row) - anchor.row + 1,
        );
        Self { anchor, span }
    }

    /// One past the last covered row.
    pub const fn end_row(&self) -> u64 {
        self.anchor.row as u64 + self.span.rows as u64
    }

    /// One past the last covered column.
    pub const fn end_col(&self) -> u64 {
        self.anchor.col as u64 + self.span.cols as u64
    }

    /// Whether `cell` lies inside this rect.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row >= self.anchor.row
            && cell.col >= self.anchor.col
            && (cell.row as u64) < self.end_row()
            && (cell.col as u64) < self.end_col()
    }

    /// Whether the rect is non-empty and lies entirely inside a grid of `dims`.
    pub fn fits_within(&self, dims: GridDims) -> bool {
        !self.span.is_empty()
            && self.end_col() <= dims.cols() as u64
            && self.end_row() <= dims.rows() as u64
    }

    /// Covered cells in row-major order.
    ///
    /// Rows or columns past `u32::MAX` are never yielded.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let Self { anchor, span } = *self;
        let row_end = anchor.row.saturating_add(span.rows);
        let col_end = anchor.col.saturating_add(span.cols);
        (anchor.row..row_end)
            .flat_map(move |row| (anchor.col..col_end).map(move |col| Cell::new(row, col)))
    }
}

impl fmt::Display for CellRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.span, self.anchor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn dims(cols: u32, rows: u32) -> GridDims {
        GridDims::new(cols, rows).unwrap()
    }

    // ── Ordering ────────────────────────────────────────────────────────

    #[test]
    fn cells_sort_row_major() {
        let mut cells = [Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, [Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    // ── Rect arithmetic ─────────────────────────────────────────────────

    #[test]
    fn from_corners_is_order_independent() {
        let a = CellRect::from_corners(Cell::new(2, 3), Cell::new(0, 1));
        let b = CellRect::from_corners(Cell::new(0, 1), Cell::new(2, 3));
        assert_eq!(a, b);
        assert_eq!(a.anchor, Cell::new(0, 1));
        assert_eq!(a.span, Span::new(3, 3));
    }

    #[test]
    fn contains_is_half_open() {
        let r = CellRect::new(Cell::new(1, 1), Span::new(2, 1));
        assert!(r.contains(Cell::new(1, 1)));
        assert!(r.contains(Cell::new(1, 2)));
        assert!(!r.contains(Cell::new(1, 3)));
        assert!(!r.contains(Cell::new(2, 1)));
        assert!(!r.contains(Cell::new(0, 1)));
    }

    #[test]
    fn cells_are_row_major() {
        let r = CellRect::new(Cell::new(0, 0), Span::new(2, 2));
        let cells: Vec<Cell> = r.cells().collect();
        assert_eq!(
            cells,
            [Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }

    #[test]
    fn fits_within_checks_both_axes() {
        let r = CellRect::new(Cell::new(0, 1), Span::new(2, 1));
        assert!(r.fits_within(dims(3, 1)));
        assert!(!r.fits_within(dims(2, 1)));
        assert!(!CellRect::new(Cell::new(1, 0), Span::ONE).fits_within(dims(3, 1)));
    }

    #[test]
    fn empty_span_never_fits() {
        let r = CellRect::new(Cell::new(0, 0), Span::new(0, 1));
        assert!(!r.fits_within(dims(4, 4)));
        assert_eq!(r.cells().count(), 0);
    }

    #[test]
    fn huge_anchor_does_not_overflow() {
        let r = CellRect::new(Cell::new(u32::MAX, u32::MAX), Span::new(2, 2));
        assert!(!r.fits_within(dims(u32::MAX, u32::MAX)));
        assert!(r.contains(Cell::new(u32::MAX, u32::MAX)));
    }

    #[test]
    fn display_is_readable() {
        let r = CellRect::new(Cell::new(1, 2), Span::new(3, 1));
        assert_eq!(alloc::format!("{r}"), "3×1 at (1, 2)");
    }
}
