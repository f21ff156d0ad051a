//! Grid model: lattice dimensions, dimension input parsing and auto-layout.
//!
//! # Example
//!
//! ```
//! use zencollage::grid::{GridDims, auto_layout};
//! use zencollage::PageSize;
//!
//! let dims = GridDims::parse(" 4 ", "3").unwrap();
//! assert_eq!((dims.cols(), dims.rows()), (4, 3));
//!
//! // Six images on an A4 portrait page: two columns, three rows.
//! let best = auto_layout(6, PageSize::A4.aspect_ratio()).unwrap();
//! assert_eq!((best.cols(), best.rows()), (2, 3));
//! ```

use alloc::string::ToString;
use core::fmt;

use num_traits::Float;

use crate::error::{EditorError, Result};
use crate::geometry::Cell;

/// Column and row count of the grid. Both are at least 1.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DimsRepr", into = "DimsRepr"))]
pub struct GridDims {
    cols: u32,
    rows: u32,
}

impl GridDims {
    /// 3×3, the grid a fresh editor starts with.
    pub const DEFAULT: Self = Self { cols: 3, rows: 3 };

    /// Validate and create grid dimensions.
    ///
    /// Fails with [`EditorError::InvalidDimension`] if either count is zero.
    pub fn new(cols: u32, rows: u32) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(EditorError::InvalidDimension {
                cols: cols.to_string(),
                rows: rows.to_string(),
            });
        }
        Ok(Self { cols, rows })
    }

    /// Parse the column and row inputs as typed by a user.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a whole
    /// number of at least 1 is rejected with [`EditorError::InvalidDimension`].
    pub fn parse(cols: &str, rows: &str) -> Result<Self> {
        let invalid = || EditorError::InvalidDimension {
            cols: cols.to_string(),
            rows: rows.to_string(),
        };
        let c = cols.trim().parse::<u32>().map_err(|_| invalid())?;
        let r = rows.trim().parse::<u32>().map_err(|_| invalid())?;
        if c == 0 || r == 0 {
            return Err(invalid());
        }
        Ok(Self { cols: c, rows: r })
    }

    /// Number of columns.
    pub const fn cols(self) -> u32 {
        self.cols
    }

    /// Number of rows.
    pub const fn rows(self) -> u32 {
        self.rows
    }

    /// Total number of cells.
    pub const fn cell_count(self) -> u64 {
        self.cols as u64 * self.rows as u64
    }

    /// Whether `cell` exists in a grid of these dimensions.
    pub const fn contains(self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Columns divided by rows.
    pub fn aspect_ratio(self) -> f64 {
        self.cols as f64 / self.rows as f64
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}×{}", self.cols, self.rows)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct DimsRepr {
    cols: u32,
    rows: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<DimsRepr> for GridDims {
    type Error = EditorError;

    fn try_from(repr: DimsRepr) -> Result<Self> {
        Self::new(repr.cols, repr.rows)
    }
}

#[cfg(feature = "serde")]
impl From<GridDims> for DimsRepr {
    fn from(dims: GridDims) -> Self {
        Self {
            cols: dims.cols,
            rows: dims.rows,
        }
    }
}

/// Pick grid dimensions for `count` images whose shape best matches `target_ratio`.
///
/// Tries every column count from 1 to `count`, with just enough rows to
/// hold all images, and keeps the candidate whose cols/rows ratio is
/// closest to `target_ratio`. The comparison is strict, so on an exact tie
/// the smaller column count wins.
///
/// Returns `None` when there is nothing to lay out.
pub fn auto_layout(count: usize, target_ratio: f64) -> Option<GridDims> {
    let n = u32::try_from(count).ok().filter(|&n| n > 0)?;
    let mut best = GridDims { cols: 1, rows: n };
    let mut best_diff = f64::INFINITY;
    for cols in 1..=n {
        let rows = n.div_ceil(cols);
        let diff = Float::abs(cols as f64 / rows as f64 - target_ratio);
        if diff < best_diff {
            best_diff = diff;
            best = GridDims { cols, rows };
        }
    }
    Some(best)
}

/// The cell lattice. Owns the authoritative dimensions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridModel {
    dims: GridDims,
}

impl GridModel {
    /// Create a grid of the given dimensions.
    pub const fn new(dims: GridDims) -> Self {
        Self { dims }
    }

    /// Current dimensions.
    pub const fn dims(&self) -> GridDims {
        self.dims
    }

    /// Whether `cell` exists in the current lattice.
    pub const fn contains(&self, cell: Cell) -> bool {
        self.dims.contains(cell)
    }

    /// All cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let GridDims { cols, rows } = self.dims;
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    /// Replace the lattice, returning the previous dimensions.
    pub(crate) fn set_dims(&mut self, dims: GridDims) -> GridDims {
        core::mem::replace(&mut self.dims, dims)
    }
}
