//! Selection tracker: cells picked one click at a time, merged into a rectangle.
//!
//! While it holds more than one cell the selection is always a solid
//! rectangle. A toggle that would break that clears the whole selection
//! and reports [`EditorError::NonRectangularSelection`].
//!
//! # Example
//!
//! ```
//! use zencollage::{Cell, EditorError, GridDims, PlacementRegistry, Selection};
//!
//! let dims = GridDims::new(3, 3).unwrap();
//! let reg = PlacementRegistry::new();
//! let mut sel = Selection::new();
//!
//! sel.toggle(Cell::new(0, 0), dims, &reg).unwrap();
//! sel.toggle(Cell::new(0, 1), dims, &reg).unwrap();
//! // An L-shape is refused and the selection starts over.
//! assert_eq!(
//!     sel.toggle(Cell::new(1, 0), dims, &reg),
//!     Err(EditorError::NonRectangularSelection)
//! );
//! assert!(sel.is_empty());
//! ```

use alloc::collections::BTreeSet;

use crate::error::{EditorError, Result};
use crate::geometry::{Cell, CellRect};
use crate::grid::GridDims;
use crate::registry::PlacementRegistry;

/// Outcome of a successful toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Toggle {
    /// The cell joined the selection.
    Selected(Cell),
    /// The cell left the selection.
    Deselected(Cell),
}

/// Set of selected cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    cells: BTreeSet<Cell>,
}

impl Selection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of `cell`.
    ///
    /// - A cell outside `dims` is [`EditorError::OutOfBounds`]; the
    ///   selection is left as it was.
    /// - A cell covered by a placement is never selectable: the selection
    ///   is cleared and [`EditorError::OccupiedCellSelection`] returned.
    /// - If the result is not a solid rectangle the selection is cleared
    ///   and [`EditorError::NonRectangularSelection`] returned.
    pub fn toggle(
        &mut self,
        cell: Cell,
        dims: GridDims,
        registry: &PlacementRegistry,
    ) -> Result<Toggle> {
        if !dims.contains(cell) {
            return Err(EditorError::OutOfBounds {
                rect: CellRect::single(cell),
                dims,
            });
        }
        if registry.is_occupied(cell) {
            self.clear();
            return Err(EditorError::OccupiedCellSelection { cell });
        }

        let toggled = if self.cells.remove(&cell) {
            Toggle::Deselected(cell)
        } else {
            self.cells.insert(cell);
            Toggle::Selected(cell)
        };

        if !self.is_rectangle() {
            self.clear();
            return Err(EditorError::NonRectangularSelection);
        }
        Ok(toggled)
    }

    /// Replace the whole selection with `cells` in one step.
    ///
    /// Used for rubber-band selection, where the user picks a block rather
    /// than clicking cell by cell. Validation matches [`toggle`](Self::toggle):
    /// a cell outside `dims` leaves the selection as it was; a covered cell
    /// or a non-rectangular set clears it.
    pub fn replace<I>(
        &mut self,
        cells: I,
        dims: GridDims,
        registry: &PlacementRegistry,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        if let Some(&cell) = cells.iter().find(|c| !dims.contains(**c)) {
            return Err(EditorError::OutOfBounds {
                rect: CellRect::single(cell),
                dims,
            });
        }
        if let Some(&cell) = cells.iter().find(|c| registry.is_occupied(**c)) {
            self.clear();
            return Err(EditorError::OccupiedCellSelection { cell });
        }
        let candidate = Self { cells };
        if !candidate.is_rectangle() {
            self.clear();
            return Err(EditorError::NonRectangularSelection);
        }
        *self = candidate;
        Ok(())
    }

    /// Whether the selected cells form a solid axis-aligned rectangle.
    ///
    /// Zero or one cell is trivially rectangular.
    pub fn is_rectangle(&self) -> bool {
        if self.cells.len() <= 1 {
            return true;
        }
        let Some(bounds) = self.bounds() else {
            return true;
        };
        bounds.span.area() == self.cells.len() as u64
            && bounds.cells().all(|c| self.cells.contains(&c))
    }

    /// Bounding rectangle of the selection, `None` when empty.
    pub fn bounds(&self) -> Option<CellRect> {
        let first = self.cells.first()?;
        let last = self.cells.last()?;
        let (min_col, max_col) = self
            .cells
            .iter()
            .fold((u32::MAX, 0), |(lo, hi), c| (lo.min(c.col), hi.max(c.col)));
        Some(CellRect::from_corners(
            Cell::new(first.row, min_col),
            Cell::new(last.row, max_col),
        ))
    }

    /// Empty the selection. Returns whether anything was selected.
    pub fn clear(&mut self) -> bool {
        let had_cells = !self.cells.is_empty();
        self.cells.clear();
        had_cells
    }

    /// Whether `cell` is selected.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of selected cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Selected cells, row-major.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ImageId;
    use crate::geometry::Span;
    use alloc::vec::Vec;

    fn dims() -> GridDims {
        GridDims::new(4, 4).unwrap()
    }

    fn cells(list: &[(u32, u32)]) -> Vec<Cell> {
        list.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    fn select_all(sel: &mut Selection, reg: &PlacementRegistry, list: &[(u32, u32)]) -> Result<()> {
        for &(r, c) in list {
            sel.toggle(Cell::new(r, c), dims(), reg)?;
        }
        Ok(())
    }

    // ── Rectangle validation ────────────────────────────────────────────

    #[test]
    fn l_shape_rejected_square_accepted() {
        let reg = PlacementRegistry::new();
        let mut sel = Selection::new();
        assert_eq!(
            sel.replace(cells(&[(0, 0), (0, 1), (1, 0)]), dims(), &reg),
            Err(EditorError::NonRectangularSelection)
        );
        assert!(sel.is_empty());

        sel.replace(cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]), dims(), &reg)
            .unwrap();
        assert_eq!(sel.len(), 4);
        assert_eq!(
            sel.bounds(),
            Some(CellRect::new(Cell::new(0, 0), Span::new(2, 2)))
        );
    }

    #[test]
    fn clicking_towards_a_block_passes_through_an_l() {
        let reg = PlacementRegistry::new();
        let mut sel = Selection::new();
        assert_eq!(
            select_all(&mut sel, &reg, &[(0, 0), (0, 1), (1, 0), (1, 1)]),
            Err(EditorError::NonRectangularSelection)
        );
        assert!(sel.is_empty());
    }

    #[test]
    fn replace_with_occupied_cell_clears() {
        let mut reg = PlacementRegistry::new();
        reg.place(ImageId::new("a"), CellRect::single(Cell::new(1, 1)), dims())
            .unwrap();
        let mut sel = Selection::new();
        sel.toggle(Cell::new(3, 3), dims(), &reg).unwrap();
        assert_eq!(
            sel.replace(cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]), dims(), &reg),
            Err(EditorError::OccupiedCellSelection {
                cell: Cell::new(1, 1)
            })
        );
        assert!(sel.is_empty());
    }

    #[test]
    fn row_then_row_builds_block() {
        let reg = PlacementRegistry::new();
        let mut sel = Selection::new();
        select_all(&mut sel, &reg, &[(1, 1), (1, 2), (1, 3)]).unwrap();
        assert_eq!(
            sel.bounds(),
            Some(CellRect::new(Cell::new(1, 1), Span::new(3, 1)))
        );
    }

    #[test]
    fn gap_in_line_rejected() {
        let reg = PlacementRegistry::new();
        let mut sel = Selection::new();
        assert_eq!(
            select_all(&mut sel, &reg, &[(0, 0), (0, 2)]),
            Err(EditorError::NonRectangularSelection)
        );
    }

    #[test]
    fn toggling_twice_deselects() {
        let reg = PlacementRegistry::new();
        let mut sel = Selection::new();
        let c = Cell::new(2, 2);
        assert_eq!(sel.toggle(c, dims(), &reg), Ok(Toggle::Selected(c)));
        assert_eq!(sel.toggle(c, dims(), &reg), Ok(Toggle::Deselected(c)));
        assert!(sel.is_empty());
        assert_eq!(sel.bounds(), None);
    }

    #[test]
    fn deselecting_a_corner_of_a_block_breaks_it() {
        let reg = PlacementRegistry::new();
        let mut sel = Selection::new();
        sel.replace(cells(&[(0, 0), (0, 1), (1, 0), (1, 1)]), dims(), &reg)
            .unwrap();
        assert_eq!(
            sel.toggle(Cell::new(1, 1), dims(), &reg),
            Err(EditorError::NonRectangularSelection)
        );
        assert!(sel.is_empty());
    }

    // ── Occupied and outside cells ──────────────────────────────────────

    #[test]
    fn occupied_cell_clears_selection() {
        let mut reg = PlacementRegistry::new();
        reg.place(
            ImageId::new("a"),
            CellRect::new(Cell::new(2, 2), Span::new(2, 2)),
            dims(),
        )
        .unwrap();
        let mut sel = Selection::new();
        sel.toggle(Cell::new(0, 0), dims(), &reg).unwrap();
        assert_eq!(
            sel.toggle(Cell::new(3, 3), dims(), &reg),
            Err(EditorError::OccupiedCellSelection {
                cell: Cell::new(3, 3)
            })
        );
        assert!(sel.is_empty());
    }

    #[test]
    fn outside_cell_keeps_selection() {
        let reg = PlacementRegistry::new();
        let mut sel = Selection::new();
        sel.toggle(Cell::new(0, 0), dims(), &reg).unwrap();
        assert!(matches!(
            sel.toggle(Cell::new(4, 0), dims(), &reg),
            Err(EditorError::OutOfBounds { .. })
        ));
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn clear_reports_prior_state() {
        let reg = PlacementRegistry::new();
        let mut sel = Selection::new();
        assert!(!sel.clear());
        sel.toggle(Cell::new(0, 0), dims(), &reg).unwrap();
        assert!(sel.clear());
    }
}
