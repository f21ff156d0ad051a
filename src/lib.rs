//! Grid placement core for photo collages.
//!
//! Images are uploaded into a catalog, dropped onto a rectangular grid of
//! cells, optionally merged across a selected block of cells, moved,
//! removed, and finally laid out onto a fixed-size printable page.
//!
//! No pixel operations: image bytes are carried through opaque. `no_std`
//! compatible with `alloc`.
//!
//! # Modules
//!
//! - [`geometry`]: cells, spans and cell rectangles
//! - [`grid`]: grid dimensions, input parsing and auto-layout
//! - [`selection`]: rectangular cell selection
//! - [`registry`]: which image covers which cells
//! - [`catalog`]: uploaded images
//! - [`export`]: page layout of the finished collage
//! - [`editor`]: one editing session tying the above together
//! - [`command`]: gestures in, events out
//!
//! # Example
//!
//! ```
//! use zencollage::{Cell, Editor, EditorConfig, Gesture, Viewport};
//!
//! let mut editor = Editor::new(EditorConfig::new().auto_layout(false));
//! editor.apply(Gesture::Upload(vec![vec![1, 2, 3]])).unwrap();
//!
//! // Merge the top row and fill it.
//! editor.apply(Gesture::SelectCells(vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)]))
//!     .unwrap();
//! editor.apply(Gesture::DropFromPalette { image: "img-1".into(), target: Cell::new(0, 0) })
//!     .unwrap();
//!
//! let page = editor.export(Viewport::new(210.0, 297.0)).unwrap();
//! assert_eq!(page.items.len(), 1);
//! assert_eq!(page.items[0].rect.width, 210.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod catalog;
pub mod command;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod grid;
pub mod registry;
pub mod selection;

#[cfg(feature = "svg")]
pub mod svg;

pub use catalog::{ImageCatalog, ImageId, ImageRecord};
pub use command::{Event, Gesture, Notice};
pub use config::{EditorConfig, ShrinkPolicy};
pub use editor::Editor;
pub use error::{EditorError, Result};
pub use export::{ExportItem, ExportedPage, PageRect, PageSize, Viewport};
pub use geometry::{Cell, CellRect, Span};
pub use grid::{GridDims, GridModel, auto_layout};
pub use registry::{Placement, PlacementChange, PlacementRegistry};
pub use selection::{Selection, Toggle};
