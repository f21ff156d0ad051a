//! Editor errors.
//!
//! Every failure is local and recoverable: an operation that returns one of
//! these has not written anything to the placement registry.

use alloc::string::String;

use thiserror::Error;

use crate::catalog::ImageId;
use crate::geometry::{Cell, CellRect};
use crate::grid::GridDims;

/// Failure of an editor operation.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum EditorError {
    /// Column or row count is not an integer of at least 1.
    #[error("columns and rows must be whole numbers of at least 1 (got {cols:?} × {rows:?})")]
    InvalidDimension {
        /// Column input as given.
        cols: String,
        /// Row input as given.
        rows: String,
    },

    /// The selected cells do not form a solid rectangle.
    #[error("selected cells do not form a rectangle")]
    NonRectangularSelection,

    /// The cell is already covered by a placed image and cannot be selected.
    #[error("cell {cell} already holds an image")]
    OccupiedCellSelection {
        /// The covered cell.
        cell: Cell,
    },

    /// The target rectangle overlaps a different placement.
    #[error("cell {cell} is already covered by another image")]
    PlacementConflict {
        /// First conflicting cell in row-major order.
        cell: Cell,
    },

    /// The target rectangle does not fit inside the grid.
    #[error("{rect} does not fit inside the {dims} grid")]
    OutOfBounds {
        /// Rectangle that was requested.
        rect: CellRect,
        /// Grid dimensions at the time of the request.
        dims: GridDims,
    },

    /// The referenced image or placement no longer exists.
    #[error("image or placement not found")]
    NotFound,

    /// An image with this id is already in the catalog.
    #[error("image {id} is already in the catalog")]
    DuplicateImage {
        /// The duplicated id.
        id: ImageId,
    },

    /// Export was asked to scale from a viewport with no finite, positive area.
    #[error("viewport width and height must be finite and positive")]
    EmptyViewport,

    /// A resize would drop placements and the shrink policy forbids it.
    #[error("resize would drop {dropped} placed image(s)")]
    ShrinkRejected {
        /// Number of placements that would not fit.
        dropped: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, EditorError>;
