//! Placement registry: the authoritative map from grid cells to placed images.
//!
//! Every covered cell maps to an equal [`Placement`] value, and the cells
//! mapping to a placement are exactly its rectangle. A secondary index from
//! image id to anchors is kept in step with every mutation, so resolving a
//! placement never scans the grid.
//!
//! Mutations validate the whole target rectangle before the first write;
//! an `Err` means the registry is unchanged.
//!
//! # Example
//!
//! ```
//! use zencollage::{Cell, CellRect, GridDims, ImageId, PlacementRegistry, Span};
//!
//! let dims = GridDims::new(3, 3).unwrap();
//! let mut reg = PlacementRegistry::new();
//! let rect = CellRect::new(Cell::new(0, 0), Span::new(2, 2));
//! reg.place(ImageId::new("a"), rect, dims).unwrap();
//!
//! // One placement, four covered cells.
//! assert_eq!(reg.len(), 1);
//! assert_eq!(reg.get(Cell::new(1, 1)).unwrap().rect, rect);
//!
//! // A second image may not overlap it.
//! let clash = CellRect::new(Cell::new(1, 1), Span::new(2, 1));
//! assert!(reg.place(ImageId::new("b"), clash, dims).is_err());
//! ```

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;
use core::fmt;

use tracing::debug;

use crate::catalog::ImageId;
use crate::error::{EditorError, Result};
use crate::geometry::{Cell, CellRect, Span};
use crate::grid::GridDims;

/// An image occupying a rectangle of cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// The placed image.
    pub image: ImageId,
    /// Covered cells.
    pub rect: CellRect,
}

impl Placement {
    /// Create a placement.
    pub fn new(image: ImageId, rect: CellRect) -> Self {
        Self { image, rect }
    }

    /// Top-left cell.
    pub fn anchor(&self) -> Cell {
        self.rect.anchor
    }

    /// Extent in cells.
    pub fn span(&self) -> Span {
        self.rect.span
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.image, self.rect)
    }
}

/// A committed change to the registry, in the order it was applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlacementChange {
    /// A placement was written across its rectangle.
    Added(Placement),
    /// A placement was cleared from its rectangle.
    Removed(Placement),
}

/// Map from covered cell to placement, plus an image → anchors index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementRegistry {
    cells: BTreeMap<Cell, Placement>,
    anchors: BTreeMap<ImageId, BTreeSet<Cell>>,
}

impl PlacementRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placement covering `cell`, if any.
    pub fn get(&self, cell: Cell) -> Option<&Placement> {
        self.cells.get(&cell)
    }

    /// Whether any placement covers `cell`.
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.cells.contains_key(&cell)
    }

    /// Placement of `image` anchored exactly at `anchor`.
    pub fn placement_at(&self, image: &ImageId, anchor: Cell) -> Option<&Placement> {
        self.cells
            .get(&anchor)
            .filter(|p| p.image == *image && p.rect.anchor == anchor)
    }

    /// Anchors of every placement of `image`, row-major.
    pub fn anchors_of<'a>(&'a self, image: &ImageId) -> impl Iterator<Item = Cell> + use<'a> {
        self.anchors.get(image).into_iter().flatten().copied()
    }

    /// Each placement once, ordered by anchor (row-major).
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.cells
            .iter()
            .filter(|(cell, p)| **cell == p.rect.anchor)
            .map(|(_, p)| p)
    }

    /// Number of distinct placements.
    pub fn len(&self) -> usize {
        self.anchors.values().map(BTreeSet::len).sum()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of covered cells.
    pub fn covered_cells(&self) -> usize {
        self.cells.len()
    }

    /// Write `image` across `rect`.
    ///
    /// Any cell of `rect` covered by a placement anchored elsewhere is a
    /// [`EditorError::PlacementConflict`]. A placement already anchored at
    /// `rect.anchor` is replaced whole, so repeating an identical call is a
    /// no-op in effect.
    pub fn place(
        &mut self,
        image: ImageId,
        rect: CellRect,
        dims: GridDims,
    ) -> Result<Vec<PlacementChange>> {
        if !rect.fits_within(dims) {
            return Err(EditorError::OutOfBounds { rect, dims });
        }
        if let Some(cell) = self.first_conflict(rect, rect.anchor) {
            return Err(EditorError::PlacementConflict { cell });
        }

        let mut changes = Vec::with_capacity(2);
        if let Some(old) = self.anchored_at(rect.anchor).cloned() {
            changes.push(PlacementChange::Removed(self.detach(old)));
        }
        let placed = self.attach(Placement::new(image, rect));
        debug!("placed {}", placed);
        changes.push(PlacementChange::Added(placed));
        Ok(changes)
    }

    /// Drop `image` onto a single cell, evicting whatever covers it.
    ///
    /// The occupant is removed whole, including any merged span, wherever
    /// its anchor is. The new placement is 1×1.
    pub fn replace_at(
        &mut self,
        image: ImageId,
        cell: Cell,
        dims: GridDims,
    ) -> Result<Vec<PlacementChange>> {
        let rect = CellRect::single(cell);
        if !dims.contains(cell) {
            return Err(EditorError::OutOfBounds { rect, dims });
        }

        let mut changes = Vec::with_capacity(2);
        if let Some(old) = self.cells.get(&cell).cloned() {
            changes.push(PlacementChange::Removed(self.detach(old)));
        }
        let placed = self.attach(Placement::new(image, rect));
        debug!("placed {} (single cell)", placed);
        changes.push(PlacementChange::Added(placed));
        Ok(changes)
    }

    /// Move a placement of `image` so that its anchor lands on `target`.
    ///
    /// The source is the placement anchored at `from`; failing that, the
    /// placement of `image` covering `from`; failing that, the first
    /// placement of `image` in row-major order. The span never changes.
    /// Cells of the source rectangle may be reused by the destination.
    pub fn move_placement(
        &mut self,
        image: &ImageId,
        from: Cell,
        target: Cell,
        dims: GridDims,
    ) -> Result<Vec<PlacementChange>> {
        let source = self.find_source(image, from).ok_or(EditorError::NotFound)?.clone();
        let rect = CellRect::new(target, source.rect.span);
        if !rect.fits_within(dims) {
            return Err(EditorError::OutOfBounds { rect, dims });
        }
        if let Some(cell) = self.first_conflict(rect, source.rect.anchor) {
            return Err(EditorError::PlacementConflict { cell });
        }

        let removed = self.detach(source);
        let placed = self.attach(Placement::new(removed.image.clone(), rect));
        debug!("moved {} -> {}", removed, placed.rect);
        Ok(alloc::vec![
            PlacementChange::Removed(removed),
            PlacementChange::Added(placed),
        ])
    }

    /// Remove the placement of `image` anchored at `anchor`.
    ///
    /// Returns `None`, changing nothing, if there is no such placement.
    pub fn remove(&mut self, image: &ImageId, anchor: Cell) -> Option<Placement> {
        let found = self.placement_at(image, anchor)?.clone();
        let removed = self.detach(found);
        debug!("removed {}", removed);
        Some(removed)
    }

    /// Placements that would not survive a resize to `dims`.
    pub fn outside(&self, dims: GridDims) -> impl Iterator<Item = &Placement> {
        self.placements().filter(move |p| !p.rect.fits_within(dims))
    }

    /// Drop every placement that does not fit `dims`, returning them in
    /// row-major anchor order. Survivors keep their coordinates.
    pub fn retain_within(&mut self, dims: GridDims) -> Vec<Placement> {
        let doomed: Vec<Placement> = self.outside(dims).cloned().collect();
        doomed
            .into_iter()
            .map(|p| {
                let removed = self.detach(p);
                debug!("dropped {} on resize to {}", removed, dims);
                removed
            })
            .collect()
    }

    /// Full invariant scan: every placement covers exactly its rectangle,
    /// no two placements share a cell, and the anchor index agrees.
    pub fn is_consistent(&self) -> bool {
        let mut area = 0u64;
        for (image, anchors) in &self.anchors {
            if anchors.is_empty() {
                return false;
            }
            for &anchor in anchors {
                let Some(p) = self.cells.get(&anchor) else {
                    return false;
                };
                if p.image != *image || p.rect.anchor != anchor || p.rect.span.is_empty() {
                    return false;
                }
                if p.rect.cells().any(|c| self.cells.get(&c) != Some(p)) {
                    return false;
                }
                area += p.rect.span.area();
            }
        }
        // Every covered cell belongs to an indexed placement and nothing overlaps.
        area == self.cells.len() as u64
            && self.cells.iter().all(|(cell, p)| {
                p.rect.contains(*cell)
                    && self
                        .anchors
                        .get(&p.image)
                        .is_some_and(|a| a.contains(&p.rect.anchor))
            })
    }

    fn anchored_at(&self, anchor: Cell) -> Option<&Placement> {
        self.cells.get(&anchor).filter(|p| p.rect.anchor == anchor)
    }

    /// Placement a drag of `image` starting at `from` refers to.
    ///
    /// Same lookup order as [`move_placement`](Self::move_placement).
    pub fn find_source(&self, image: &ImageId, from: Cell) -> Option<&Placement> {
        self.placement_at(image, from)
            .or_else(|| self.cells.get(&from).filter(|p| p.image == *image))
            .or_else(|| {
                let anchor = self.anchors_of(image).next()?;
                self.cells.get(&anchor)
            })
    }

    /// First cell of `rect` covered by a placement not anchored at `exempt`.
    fn first_conflict(&self, rect: CellRect, exempt: Cell) -> Option<Cell> {
        rect.cells().find(|c| {
            self.cells
                .get(c)
                .is_some_and(|p| p.rect.anchor != exempt)
        })
    }

    fn attach(&mut self, placement: Placement) -> Placement {
        for cell in placement.rect.cells() {
            self.cells.insert(cell, placement.clone());
        }
        self.anchors
            .entry(placement.image.clone())
            .or_default()
            .insert(placement.rect.anchor);
        placement
    }

    fn detach(&mut self, placement: Placement) -> Placement {
        for cell in placement.rect.cells() {
            self.cells.remove(&cell);
        }
        if let Some(set) = self.anchors.get_mut(&placement.image) {
            set.remove(&placement.rect.anchor);
            if set.is_empty() {
                self.anchors.remove(&placement.image);
            }
        }
        placement
    }
}
