//! Editor session: grid, catalog, registry and selection for one document.
//!
//! Every method is one user gesture. It reads the grid dimensions once at
//! the start and uses that snapshot throughout, and it either commits fully
//! or returns an error with the registry untouched.
//!
//! Errors that clear the selection as a side effect (occupied or
//! non-rectangular selections, refused drops) leave it empty when they
//! return; no [`Event::SelectionCleared`] is reported for them. Stale
//! references (unknown image, vanished placement) are not errors at all:
//! the gesture returns no events.
//!
//! # Example
//!
//! ```
//! use zencollage::{Cell, Editor, EditorConfig, Event, Viewport};
//!
//! let mut editor = Editor::new(EditorConfig::default());
//! let events = editor.upload(vec![vec![1], vec![2]]).unwrap();
//! assert!(matches!(events[0], Event::ImagesAdded(_)));
//! // Two images on A4: one column, two rows.
//! assert_eq!((editor.grid().dims().cols(), editor.grid().dims().rows()), (1, 2));
//!
//! let id = editor.catalog().iter().next().unwrap().id.clone();
//! editor.drop_from_palette(id, Cell::new(1, 0)).unwrap();
//!
//! let page = editor.export(Viewport::new(210.0, 297.0)).unwrap();
//! assert_eq!(page.items.len(), 1);
//! assert_eq!(page.items[0].rect.y, 148.5);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use tracing::{debug, warn};

use crate::catalog::{ImageCatalog, ImageId};
use crate::command::{Event, Gesture, Notice};
use crate::config::{EditorConfig, ShrinkPolicy};
use crate::error::{EditorError, Result};
use crate::export::{self, ExportedPage, Viewport};
use crate::geometry::Cell;
use crate::grid::{self, GridDims, GridModel};
use crate::registry::{PlacementChange, PlacementRegistry};
use crate::selection::{Selection, Toggle};

/// One collage document and its editing state.
#[derive(Clone, Debug)]
pub struct Editor {
    config: EditorConfig,
    grid: GridModel,
    catalog: ImageCatalog,
    registry: PlacementRegistry,
    selection: Selection,
}

impl Editor {
    /// Start an empty document.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            grid: GridModel::new(config.initial_grid),
            config,
            catalog: ImageCatalog::new(),
            registry: PlacementRegistry::new(),
            selection: Selection::new(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// The lattice.
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    /// Uploaded images.
    pub fn catalog(&self) -> &ImageCatalog {
        &self.catalog
    }

    /// Placed images.
    pub fn registry(&self) -> &PlacementRegistry {
        &self.registry
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Run one gesture.
    pub fn apply(&mut self, gesture: Gesture) -> Result<Vec<Event>> {
        match gesture {
            Gesture::Upload(batch) => self.upload(batch),
            Gesture::SetDimensions { cols, rows } => self.resize_from_input(&cols, &rows),
            Gesture::Resize(dims) => self.resize_to(dims),
            Gesture::AutoLayout => self.auto_layout(),
            Gesture::ToggleCell(cell) => self.toggle_cell(cell),
            Gesture::SelectCells(cells) => self.select_cells(cells),
            Gesture::ClearSelection => Ok(self.clear_selection()),
            Gesture::DropFromPalette { image, target } => self.drop_from_palette(image, target),
            Gesture::DropPlaced {
                image,
                from,
                target,
            } => self.drop_placed(image, from, target),
            Gesture::Remove { image, anchor } => Ok(self.remove(&image, anchor)),
        }
    }

    // ── Uploads ─────────────────────────────────────────────────────────

    /// Add a batch of images under generated ids, then auto-layout once.
    pub fn upload(&mut self, batch: Vec<Vec<u8>>) -> Result<Vec<Event>> {
        let ids: Vec<ImageId> = batch.into_iter().map(|data| self.catalog.add(data)).collect();
        self.after_upload(ids)
    }

    /// Add a batch of images under caller-chosen ids, then auto-layout once.
    ///
    /// Fails with [`EditorError::DuplicateImage`], adding nothing, if any id
    /// is taken.
    pub fn upload_with_ids(&mut self, batch: Vec<(ImageId, Vec<u8>)>) -> Result<Vec<Event>> {
        let ids = self.catalog.insert_batch(batch)?;
        self.after_upload(ids)
    }

    fn after_upload(&mut self, ids: Vec<ImageId>) -> Result<Vec<Event>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("uploaded {} image(s), catalog now {}", ids.len(), self.catalog.len());
        let mut events = vec![Event::ImagesAdded(ids)];
        if self.config.auto_layout {
            events.extend(self.auto_layout()?);
        }
        Ok(events)
    }

    /// Resize the grid to suit the number of uploaded images.
    ///
    /// Does nothing while the catalog is empty. Under
    /// [`ShrinkPolicy::Reject`], a layout that would drop placements is
    /// skipped and reported as [`Notice::AutoLayoutRejected`].
    pub fn auto_layout(&mut self) -> Result<Vec<Event>> {
        let Some(dims) = grid::auto_layout(self.catalog.len(), self.config.page.aspect_ratio())
        else {
            return Ok(Vec::new());
        };
        match self.resize_to(dims) {
            Err(EditorError::ShrinkRejected { dropped }) => Ok(vec![Event::Notice(
                Notice::AutoLayoutRejected {
                    wanted: dims,
                    dropped,
                },
            )]),
            other => other,
        }
    }

    // ── Grid ────────────────────────────────────────────────────────────

    /// Resize to `cols` × `rows`.
    pub fn resize(&mut self, cols: u32, rows: u32) -> Result<Vec<Event>> {
        self.resize_to(GridDims::new(cols, rows)?)
    }

    /// Resize from the raw column and row inputs.
    pub fn resize_from_input(&mut self, cols: &str, rows: &str) -> Result<Vec<Event>> {
        let dims = GridDims::parse(cols, rows).inspect_err(|e| warn!("resize refused: {}", e))?;
        self.resize_to(dims)
    }

    /// Rebuild the lattice at `dims` and replay every placement onto it.
    ///
    /// Placements that no longer fit are dropped and reported as
    /// [`Event::Removed`], after [`Event::GridResized`]. The selection is
    /// cleared since its cells may be gone.
    pub fn resize_to(&mut self, dims: GridDims) -> Result<Vec<Event>> {
        if self.config.shrink_policy == ShrinkPolicy::Reject {
            let dropped = self.registry.outside(dims).count();
            if dropped > 0 {
                warn!("resize to {} refused: would drop {} placement(s)", dims, dropped);
                return Err(EditorError::ShrinkRejected { dropped });
            }
        }

        let from = self.grid.set_dims(dims);
        let mut events = vec![Event::GridResized { from, to: dims }];
        let dropped = self.registry.retain_within(dims);
        if !dropped.is_empty() {
            debug!("resize {} -> {} dropped {} placement(s)", from, dims, dropped.len());
        }
        events.extend(dropped.into_iter().map(Event::Removed));
        if self.selection.clear() {
            events.push(Event::SelectionCleared);
        }
        Ok(events)
    }

    // ── Selection ───────────────────────────────────────────────────────

    /// Click on a cell.
    pub fn toggle_cell(&mut self, cell: Cell) -> Result<Vec<Event>> {
        let dims = self.grid.dims();
        let toggled = self
            .selection
            .toggle(cell, dims, &self.registry)
            .inspect_err(|e| warn!("selection refused: {}", e))?;
        Ok(vec![match toggled {
            Toggle::Selected(c) => Event::CellSelected(c),
            Toggle::Deselected(c) => Event::CellDeselected(c),
        }])
    }

    /// Replace the selection with a block of cells.
    pub fn select_cells(&mut self, cells: Vec<Cell>) -> Result<Vec<Event>> {
        let dims = self.grid.dims();
        self.selection
            .replace(cells, dims, &self.registry)
            .inspect_err(|e| warn!("selection refused: {}", e))?;
        let mut events = vec![Event::SelectionCleared];
        events.extend(self.selection.cells().map(Event::CellSelected));
        Ok(events)
    }

    /// Escape key.
    pub fn clear_selection(&mut self) -> Vec<Event> {
        if self.selection.clear() {
            vec![Event::SelectionCleared]
        } else {
            Vec::new()
        }
    }

    // ── Placement ───────────────────────────────────────────────────────

    /// Drop a palette image onto `target`.
    ///
    /// With an active selection the image fills the selection's rectangle;
    /// otherwise it takes the single cell, evicting whatever covered it.
    pub fn drop_from_palette(&mut self, image: ImageId, target: Cell) -> Result<Vec<Event>> {
        let dims = self.grid.dims();
        if !self.catalog.contains(&image) {
            debug!("drop of unknown image {} ignored", image);
            return Ok(Vec::new());
        }
        let result = match self.selection.bounds() {
            Some(rect) => self.registry.place(image, rect, dims),
            None => self.registry.replace_at(image, target, dims),
        };
        self.finish_drop(Vec::new(), result)
    }

    /// Move a placed image, dragged from `from`, so it anchors at `target`.
    ///
    /// The placement keeps its span. A selection with the same span
    /// supplies the anchor instead of `target`; one with a different span
    /// is discarded with [`Notice::SelectionSpanMismatch`].
    pub fn drop_placed(&mut self, image: ImageId, from: Cell, target: Cell) -> Result<Vec<Event>> {
        let dims = self.grid.dims();
        if !self.catalog.contains(&image) {
            debug!("move of unknown image {} ignored", image);
            return Ok(Vec::new());
        }
        let Some(source) = self.registry.find_source(&image, from) else {
            debug!("move of {} from {}: no such placement", image, from);
            return Ok(Vec::new());
        };
        let (source_anchor, source_span) = (source.anchor(), source.span());

        let mut events = Vec::new();
        let anchor = match self.selection.bounds() {
            Some(sel) if sel.span == source_span => sel.anchor,
            Some(sel) => {
                warn!(
                    "selection {} differs from {} span {}; moving at original size",
                    sel.span, image, source_span
                );
                events.push(Event::Notice(Notice::SelectionSpanMismatch {
                    selection: sel.span,
                    placement: source_span,
                }));
                target
            }
            None => target,
        };
        let result = self.registry.move_placement(&image, source_anchor, anchor, dims);
        self.finish_drop(events, result)
    }

    /// Remove the placement of `image` anchored at `anchor`.
    pub fn remove(&mut self, image: &ImageId, anchor: Cell) -> Vec<Event> {
        match self.registry.remove(image, anchor) {
            Some(p) => vec![Event::Removed(p)],
            None => {
                debug!("remove of {} at {}: no such placement", image, anchor);
                Vec::new()
            }
        }
    }

    fn finish_drop(
        &mut self,
        mut events: Vec<Event>,
        result: Result<Vec<PlacementChange>>,
    ) -> Result<Vec<Event>> {
        match result {
            Ok(changes) => {
                events.extend(changes.into_iter().map(Event::from));
                if self.selection.clear() {
                    events.push(Event::SelectionCleared);
                }
                Ok(events)
            }
            Err(EditorError::NotFound) => Ok(Vec::new()),
            Err(e) => {
                warn!("drop refused: {}", e);
                self.selection.clear();
                Err(e)
            }
        }
    }

    // ── Export ──────────────────────────────────────────────────────────

    /// Lay every placement out on the configured page.
    ///
    /// `viewport` is the on-screen pixel size of the rendered grid.
    pub fn export(&self, viewport: Viewport) -> Result<ExportedPage<'_>> {
        export::export(
            self.grid.dims(),
            &self.registry,
            &self.catalog,
            viewport,
            self.config.page,
        )
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}
