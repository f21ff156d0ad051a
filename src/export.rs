//! Layout export: placements mapped onto a fixed-size printable page.
//!
//! The rendered grid is measured in screen pixels; each placement's pixel
//! rectangle is scaled per axis onto the page, whose size is in millimetres.
//! A merged placement produces exactly one output rectangle.
//!
//! # Example
//!
//! ```
//! use zencollage::{Cell, CellRect, GridDims, ImageCatalog, PageSize, PlacementRegistry};
//! use zencollage::{Span, Viewport};
//! use zencollage::export::export;
//!
//! let dims = GridDims::new(2, 2).unwrap();
//! let mut catalog = ImageCatalog::new();
//! let id = catalog.add(vec![0xFF, 0xD8]);
//! let mut reg = PlacementRegistry::new();
//! reg.place(id, CellRect::new(Cell::new(0, 0), Span::new(2, 1)), dims).unwrap();
//!
//! let page = export(dims, &reg, &catalog, Viewport::new(840.0, 594.0), PageSize::A4).unwrap();
//! assert_eq!(page.items.len(), 1);
//! let r = page.items[0].rect;
//! assert_eq!((r.x, r.y, r.width, r.height), (0.0, 0.0, 210.0, 148.5));
//! ```

use alloc::vec::Vec;

use tracing::warn;

use crate::catalog::{ImageCatalog, ImageId};
use crate::error::{EditorError, Result};
use crate::geometry::CellRect;
use crate::grid::GridDims;
use crate::registry::PlacementRegistry;

/// Output page size in millimetres.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    /// Page width in mm.
    pub width_mm: f64,
    /// Page height in mm.
    pub height_mm: f64,
}

impl PageSize {
    /// ISO A4 portrait, 210 × 297 mm.
    pub const A4: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    /// Create a page size.
    pub const fn new(width_mm: f64, height_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
        }
    }

    /// Width divided by height. Auto-layout aims for this grid shape.
    pub fn aspect_ratio(self) -> f64 {
        self.width_mm / self.height_mm
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// On-screen pixel size of the rendered grid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width_px: f64,
    /// Height in pixels.
    pub height_px: f64,
}

impl Viewport {
    /// Create a viewport.
    pub const fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px,
            height_px,
        }
    }

    /// No usable area: zero, negative, NaN or infinite on either axis.
    fn is_empty(self) -> bool {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        !(usable(self.width_px) && usable(self.height_px))
    }
}

/// Rectangle on the page, in millimetres from the top-left corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PageRect {
    /// Left edge in mm, measured from the page's left side.
    pub x: f64,
    /// Top edge in mm, measured from the page's top side.
    pub y: f64,
    /// Width in mm.
    pub width: f64,
    /// Height in mm.
    pub height: f64,
}

/// One image to draw on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportItem<'a> {
    /// Which image.
    pub image: &'a ImageId,
    /// Its bytes, borrowed from the catalog.
    pub data: &'a [u8],
    /// Where it goes.
    pub rect: PageRect,
}

/// Everything a document writer needs for the single output page.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedPage<'a> {
    /// Page size.
    pub page: PageSize,
    /// Images in row-major anchor order.
    pub items: Vec<ExportItem<'a>>,
}

/// Map every placement onto `page`.
///
/// Cell size is the viewport divided by the grid dimensions; the pixel to
/// millimetre scale is computed separately for each axis. Placements whose
/// image is missing from the catalog are skipped.
pub fn export<'a>(
    dims: GridDims,
    registry: &PlacementRegistry,
    catalog: &'a ImageCatalog,
    viewport: Viewport,
    page: PageSize,
) -> Result<ExportedPage<'a>> {
    if viewport.is_empty() {
        return Err(EditorError::EmptyViewport);
    }

    let cell_w = viewport.width_px / dims.cols() as f64;
    let cell_h = viewport.height_px / dims.rows() as f64;
    let scale_x = page.width_mm / viewport.width_px;
    let scale_y = page.height_mm / viewport.height_px;

    let mut items = Vec::with_capacity(registry.len());
    for placement in registry.placements() {
        let Some(record) = catalog.get(&placement.image) else {
            warn!("export: skipping {}, image not in catalog", placement);
            continue;
        };
        let CellRect { anchor, span } = placement.rect;
        items.push(ExportItem {
            image: &record.id,
            data: &record.data,
            rect: PageRect {
                x: anchor.col as f64 * cell_w * scale_x,
                y: anchor.row as f64 * cell_h * scale_y,
                width: span.cols as f64 * cell_w * scale_x,
                height: span.rows as f64 * cell_h * scale_y,
            },
        });
    }
    Ok(ExportedPage { page, items })
}
