//! User gestures and the events they produce.
//!
//! A [`Gesture`] is one user action. [`Editor::apply`](crate::Editor::apply)
//! runs it as a single atomic step and returns the [`Event`]s a renderer
//! needs to bring its view up to date, in the order they happened.

use alloc::string::String;
use alloc::vec::Vec;

use crate::catalog::ImageId;
use crate::geometry::{Cell, Span};
use crate::grid::GridDims;
use crate::registry::{Placement, PlacementChange};

/// A single user action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Gesture {
    /// A batch of decoded uploads, in picker order.
    Upload(Vec<Vec<u8>>),
    /// The column/row inputs changed. Raw text, validated on apply.
    SetDimensions {
        /// Column input.
        cols: String,
        /// Row input.
        rows: String,
    },
    /// Resize to already-validated dimensions.
    Resize(GridDims),
    /// Re-pick grid dimensions for the current catalog size.
    AutoLayout,
    /// Click on a cell.
    ToggleCell(Cell),
    /// Rubber-band selection of a block of cells.
    SelectCells(Vec<Cell>),
    /// Escape key or explicit clear.
    ClearSelection,
    /// A palette thumbnail was dropped on a cell.
    DropFromPalette {
        /// Dragged image.
        image: ImageId,
        /// Cell under the pointer.
        target: Cell,
    },
    /// A placed image was dragged to another cell.
    DropPlaced {
        /// Dragged image.
        image: ImageId,
        /// Cell the drag started from (need not be the anchor).
        from: Cell,
        /// Cell under the pointer.
        target: Cell,
    },
    /// The remove button on a placed image.
    Remove {
        /// Image to remove.
        image: ImageId,
        /// Anchor of the placement.
        anchor: Cell,
    },
}

/// A change the rendering side should reflect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// New images are in the catalog.
    ImagesAdded(Vec<ImageId>),
    /// The lattice was rebuilt. Surviving placements keep their coordinates.
    GridResized {
        /// Previous dimensions.
        from: GridDims,
        /// New dimensions.
        to: GridDims,
    },
    /// Draw this placement (replacing any element with the same image and anchor).
    Placed(Placement),
    /// Remove the element for this placement.
    Removed(Placement),
    /// Highlight a cell.
    CellSelected(Cell),
    /// Un-highlight a cell.
    CellDeselected(Cell),
    /// Un-highlight every cell.
    SelectionCleared,
    /// Something the user should be told about; the gesture still went ahead.
    Notice(Notice),
}

impl From<PlacementChange> for Event {
    fn from(change: PlacementChange) -> Self {
        match change {
            PlacementChange::Added(p) => Self::Placed(p),
            PlacementChange::Removed(p) => Self::Removed(p),
        }
    }
}

/// Non-fatal warnings attached to a successful gesture.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// A placed image was dropped onto a selection of a different shape.
    /// The selection was discarded and the image kept its span, anchored
    /// at the drop cell.
    SelectionSpanMismatch {
        /// Span of the discarded selection.
        selection: Span,
        /// Span the placement kept.
        placement: Span,
    },
    /// Auto-layout wanted a smaller grid but the shrink policy refused it.
    AutoLayoutRejected {
        /// Dimensions auto-layout picked.
        wanted: GridDims,
        /// Placements that would have been dropped.
        dropped: usize,
    },
}
