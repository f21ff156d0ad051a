//! End-to-end editing sessions driven through the public API.
//!
//! Each test replays a short user session and checks the registry, the
//! selection and the exported page afterwards.

use zencollage::*;

fn editor(n: usize) -> (Editor, Vec<ImageId>) {
    let mut e = Editor::new(EditorConfig::new().auto_layout(false));
    e.upload((0..n).map(|i| vec![i as u8; 4]).collect()).unwrap();
    let ids = e.catalog().iter().map(|r| r.id.clone()).collect();
    (e, ids)
}

fn block(r0: u32, c0: u32, cols: u32, rows: u32) -> Vec<Cell> {
    CellRect::new(Cell::new(r0, c0), Span::new(cols, rows))
        .cells()
        .collect()
}

fn occupied(e: &Editor) -> Vec<Cell> {
    e.grid()
        .cells()
        .filter(|&c| e.registry().is_occupied(c))
        .collect()
}

// ── Selection ───────────────────────────────────────────────────────────

#[test]
fn l_shaped_selection_rejected_square_accepted() {
    let (mut e, _) = editor(0);
    e.toggle_cell(Cell::new(0, 0)).unwrap();
    e.toggle_cell(Cell::new(0, 1)).unwrap();
    assert_eq!(
        e.toggle_cell(Cell::new(1, 0)),
        Err(EditorError::NonRectangularSelection)
    );
    assert!(e.selection().is_empty());

    e.select_cells(block(0, 0, 2, 2)).unwrap();
    assert_eq!(e.selection().len(), 4);
    assert_eq!(
        e.selection().bounds(),
        Some(CellRect::new(Cell::new(0, 0), Span::new(2, 2)))
    );
}

#[test]
fn selecting_occupied_cell_clears_selection() {
    let (mut e, ids) = editor(1);
    e.drop_from_palette(ids[0].clone(), Cell::new(1, 1)).unwrap();
    e.toggle_cell(Cell::new(0, 0)).unwrap();
    assert_eq!(
        e.toggle_cell(Cell::new(1, 1)),
        Err(EditorError::OccupiedCellSelection {
            cell: Cell::new(1, 1)
        })
    );
    assert!(e.selection().is_empty());
}

#[test]
fn toggling_back_shrinks_selection() {
    let (mut e, _) = editor(0);
    e.select_cells(block(0, 0, 3, 1)).unwrap();
    // Removing an end cell keeps a rectangle, removing the middle does not.
    assert_eq!(
        e.toggle_cell(Cell::new(0, 2)).unwrap(),
        [Event::CellDeselected(Cell::new(0, 2))]
    );
    e.toggle_cell(Cell::new(0, 2)).unwrap();
    assert_eq!(
        e.toggle_cell(Cell::new(0, 1)),
        Err(EditorError::NonRectangularSelection)
    );
}

// ── Placement ───────────────────────────────────────────────────────────

#[test]
fn merged_drop_covers_exactly_its_rectangle() {
    let (mut e, ids) = editor(1);
    e.select_cells(block(1, 1, 2, 2)).unwrap();
    e.drop_from_palette(ids[0].clone(), Cell::new(0, 0)).unwrap();

    assert_eq!(occupied(&e), block(1, 1, 2, 2));
    let p = e.registry().get(Cell::new(2, 2)).unwrap();
    assert_eq!(p.anchor(), Cell::new(1, 1));
    assert_eq!(p.span(), Span::new(2, 2));
    assert!(e.registry().is_consistent());
}

#[test]
fn repeated_place_is_idempotent() {
    let (mut e, ids) = editor(1);
    let rect = CellRect::new(Cell::new(0, 0), Span::new(2, 1));
    e.select_cells(rect.cells().collect()).unwrap();
    e.drop_from_palette(ids[0].clone(), Cell::new(0, 0)).unwrap();
    let once = e.registry().clone();

    let mut reg = e.registry().clone();
    reg.place(ids[0].clone(), rect, e.grid().dims()).unwrap();
    assert_eq!(reg, once);
}

#[test]
fn place_then_remove_restores_registry() {
    let (mut e, ids) = editor(2);
    e.drop_from_palette(ids[1].clone(), Cell::new(2, 2)).unwrap();
    let before = e.registry().clone();

    e.select_cells(block(0, 0, 3, 2)).unwrap();
    e.drop_from_palette(ids[0].clone(), Cell::new(0, 0)).unwrap();
    assert_eq!(e.registry().covered_cells(), 7);
    e.remove(&ids[0], Cell::new(0, 0));
    assert_eq!(e.registry(), &before);
}

#[test]
fn single_cell_drop_replaces_merged_occupant_entirely() {
    let (mut e, ids) = editor(2);
    e.select_cells(block(0, 0, 2, 2)).unwrap();
    e.drop_from_palette(ids[0].clone(), Cell::new(0, 0)).unwrap();

    let events = e.drop_from_palette(ids[1].clone(), Cell::new(1, 1)).unwrap();
    assert!(matches!(&events[0], Event::Removed(p) if p.image == ids[0]));
    assert_eq!(occupied(&e), [Cell::new(1, 1)]);
    assert_eq!(e.registry().get(Cell::new(1, 1)).unwrap().image, ids[1]);
}

#[test]
fn same_image_can_be_placed_twice() {
    let (mut e, ids) = editor(1);
    e.drop_from_palette(ids[0].clone(), Cell::new(0, 0)).unwrap();
    e.drop_from_palette(ids[0].clone(), Cell::new(2, 2)).unwrap();
    assert_eq!(e.registry().len(), 2);
    let anchors: Vec<Cell> = e.registry().anchors_of(&ids[0]).collect();
    assert_eq!(anchors, [Cell::new(0, 0), Cell::new(2, 2)]);

    // Dragging the second copy moves that copy, not the first.
    e.drop_placed(ids[0].clone(), Cell::new(2, 2), Cell::new(1, 1))
        .unwrap();
    let anchors: Vec<Cell> = e.registry().anchors_of(&ids[0]).collect();
    assert_eq!(anchors, [Cell::new(0, 0), Cell::new(1, 1)]);
}

#[test]
fn move_preserves_span_whatever_the_selection() {
    let (mut e, ids) = editor(1);
    e.resize(4, 4).unwrap();
    e.select_cells(block(0, 0, 2, 2)).unwrap();
    e.drop_from_palette(ids[0].clone(), Cell::new(0, 0)).unwrap();

    // Overlapping its own old rectangle is fine.
    e.drop_placed(ids[0].clone(), Cell::new(1, 1), Cell::new(1, 1))
        .unwrap();
    assert_eq!(occupied(&e), block(1, 1, 2, 2));

    e.select_cells(vec![Cell::new(0, 3)]).unwrap();
    let events = e
        .drop_placed(ids[0].clone(), Cell::new(1, 1), Cell::new(0, 0))
        .unwrap();
    assert!(events.iter().any(|ev| matches!(
        ev,
        Event::Notice(Notice::SelectionSpanMismatch { .. })
    )));
    assert_eq!(occupied(&e), block(0, 0, 2, 2));
    assert!(e.selection().is_empty());
}

#[test]
fn drag_of_removed_placement_does_nothing() {
    let (mut e, ids) = editor(1);
    e.drop_from_palette(ids[0].clone(), Cell::new(0, 0)).unwrap();
    e.remove(&ids[0], Cell::new(0, 0));
    assert_eq!(
        e.drop_placed(ids[0].clone(), Cell::new(0, 0), Cell::new(1, 1)),
        Ok(Vec::new())
    );
    assert!(e.registry().is_empty());
}

// ── Resize ──────────────────────────────────────────────────────────────

#[test]
fn shrink_loses_placements_for_good() {
    let (mut e, ids) = editor(2);
    e.select_cells(block(0, 1, 2, 1)).unwrap();
    e.drop_from_palette(ids[0].clone(), Cell::new(0, 0)).unwrap();
    e.drop_from_palette(ids[1].clone(), Cell::new(0, 0)).unwrap();

    let events = e.resize_from_input("2", "3").unwrap();
    assert_eq!(
        events[0],
        Event::GridResized {
            from: GridDims::DEFAULT,
            to: GridDims::new(2, 3).unwrap()
        }
    );
    assert!(matches!(&events[1], Event::Removed(p) if p.image == ids[0]));
    assert_eq!(occupied(&e), [Cell::new(0, 0)]);

    e.resize(3, 3).unwrap();
    assert_eq!(occupied(&e), [Cell::new(0, 0)]);
}

#[test]
fn resize_keeps_surviving_coordinates() {
    let (mut e, ids) = editor(1);
    e.select_cells(block(1, 0, 2, 2)).unwrap();
    e.drop_from_palette(ids[0].clone(), Cell::new(0, 0)).unwrap();
    e.resize(5, 5).unwrap();
    assert_eq!(occupied(&e), block(1, 0, 2, 2));
}

#[test]
fn auto_layout_after_upload_follows_page_shape() {
    let mut e = Editor::default();
    for (n, (cols, rows)) in [(1, (1, 1)), (1, (1, 2)), (1, (2, 2)), (1, (2, 2)), (2, (2, 3))] {
        e.upload(vec![vec![0]; n]).unwrap();
        assert_eq!((e.grid().dims().cols(), e.grid().dims().rows()), (cols, rows));
    }
    e.upload(vec![vec![0]; 3]).unwrap();
    assert_eq!(e.grid().dims(), GridDims::new(3, 3).unwrap());

    // A square page wants a square-ish grid.
    let mut sq = Editor::new(EditorConfig::new().page(PageSize::new(100.0, 100.0)));
    sq.upload(vec![vec![0]; 6]).unwrap();
    assert_eq!(sq.grid().dims(), GridDims::new(2, 3).unwrap());
}

#[test]
fn duplicate_ids_rejected_whole_batch() {
    let mut e = Editor::new(EditorConfig::new().auto_layout(false));
    e.upload_with_ids(vec![("cat".into(), vec![1])]).unwrap();
    assert_eq!(
        e.upload_with_ids(vec![("dog".into(), vec![2]), ("cat".into(), vec![3])]),
        Err(EditorError::DuplicateImage { id: "cat".into() })
    );
    assert_eq!(e.catalog().len(), 1);
}

// ── Export ──────────────────────────────────────────────────────────────

#[test]
fn export_scales_to_a4_and_emits_merged_once() {
    let (mut e, ids) = editor(2);
    e.select_cells(block(0, 0, 3, 1)).unwrap();
    e.drop_from_palette(ids[0].clone(), Cell::new(0, 0)).unwrap();
    e.drop_from_palette(ids[1].clone(), Cell::new(2, 1)).unwrap();

    // Pixel size of the grid on screen matches the page, 1 px = 1 mm.
    let page = e.export(Viewport::new(210.0, 297.0)).unwrap();
    assert_eq!(page.page, PageSize::A4);
    assert_eq!(page.items.len(), 2);

    let top = &page.items[0];
    assert_eq!(top.image, &ids[0]);
    assert_eq!(top.data, &[0u8; 4][..]);
    assert_eq!(
        top.rect,
        PageRect {
            x: 0.0,
            y: 0.0,
            width: 210.0,
            height: 99.0
        }
    );
    let bottom = page.items[1].rect;
    assert_eq!((bottom.x, bottom.y), (70.0, 198.0));
}

#[test]
fn export_with_collapsed_viewport_fails() {
    let (e, _) = editor(0);
    assert_eq!(
        e.export(Viewport::new(0.0, 0.0)),
        Err(EditorError::EmptyViewport)
    );
}

#[test]
fn export_of_empty_collage_is_blank_page() {
    let (e, _) = editor(3);
    let page = e.export(Viewport::new(800.0, 600.0)).unwrap();
    assert!(page.items.is_empty());
}
