//! SVG previews of a collage.
//!
//! [`render_page_svg`] draws an exported page at a fixed scale, one labelled
//! box per image. [`render_grid_svg`] draws the editing lattice itself:
//! empty cells, merged placements and the current selection.
//!
//! # Example
//!
//! ```
//! use zencollage::{Cell, Editor, EditorConfig, Viewport, svg::render_page_svg};
//!
//! let mut editor = Editor::new(EditorConfig::default());
//! editor.upload(vec![vec![0xFF, 0xD8]]).unwrap();
//! let id = editor.catalog().iter().next().unwrap().id.clone();
//! editor.drop_from_palette(id, Cell::new(0, 0)).unwrap();
//!
//! let page = editor.export(Viewport::new(600.0, 800.0)).unwrap();
//! let svg = render_page_svg(&page);
//! assert!(svg.contains("img-1"));
//! ```

use alloc::format;
use alloc::string::String;

use crate::export::ExportedPage;
use crate::geometry::Cell;
use crate::grid::GridDims;
use crate::registry::PlacementRegistry;
use crate::selection::Selection;

/// Largest drawn width of the page or grid, in SVG units.
const MAX_PANEL_W: f64 = 300.0;
/// Largest drawn height of the page or grid, in SVG units.
const MAX_PANEL_H: f64 = 400.0;
/// Margin around the panel.
const MARGIN: f64 = 30.0;
/// Height of the caption above the panel.
const LABEL_H: f64 = 22.0;

const STYLE: &str = r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #666; }
  .outer { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .cell { fill: none; stroke: #bbb; stroke-width: 0.5; stroke-dasharray: 3,2; }
  .inner { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  .selected { fill: #f2c36b; fill-opacity: 0.6; stroke: #c8912c; stroke-width: 1; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #aaa; }
    .outer { fill: #2d2d2d; stroke: #555; }
    .cell { stroke: #555; }
    .inner { fill: #3a72a4; stroke: #5a9fd4; }
    .selected { fill: #8a6a2a; stroke: #d4a24a; }
  }
</style>
"##;

/// Render an exported page as a standalone SVG document.
///
/// The page keeps its aspect ratio and is scaled to fit the preview panel.
/// Each image is drawn as a box labelled with its id.
pub fn render_page_svg(page: &ExportedPage<'_>) -> String {
    let size = page.page;
    let scale = fit_scale(size.width_mm, size.height_mm);
    let (pw, ph) = (size.width_mm * scale, size.height_mm * scale);
    let mut svg = open_document(pw, ph);

    push_label(
        &mut svg,
        pw,
        &format!("Page  {}×{} mm", size.width_mm, size.height_mm),
    );
    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="outer" rx="2"/>"#,
        MARGIN,
        MARGIN + LABEL_H,
        pw,
        ph
    ));
    svg.push('\n');

    for item in &page.items {
        let r = item.rect;
        let x = MARGIN + r.x * scale;
        let y = MARGIN + LABEL_H + r.y * scale;
        let (w, h) = (r.width * scale, r.height * scale);
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="inner" rx="1"/>"#,
            x, y, w, h
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="annotation" text-anchor="middle">{}</text>"#,
            x + w / 2.0,
            y + h / 2.0,
            escape_xml(item.image.as_str())
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Render the editing lattice as a standalone SVG document.
///
/// Empty cells are dashed outlines, each placement is one box across its
/// whole span, and selected cells are highlighted.
pub fn render_grid_svg(
    dims: GridDims,
    registry: &PlacementRegistry,
    selection: &Selection,
) -> String {
    let scale = fit_scale(dims.cols() as f64, dims.rows() as f64);
    let (gw, gh) = (dims.cols() as f64 * scale, dims.rows() as f64 * scale);
    let mut svg = open_document(gw, gh);
    push_label(&mut svg, gw, &format!("Grid  {}", dims));

    let origin_y = MARGIN + LABEL_H;
    let cell_rect = |cell: Cell, cols: u32, rows: u32| {
        (
            MARGIN + cell.col as f64 * scale,
            origin_y + cell.row as f64 * scale,
            cols as f64 * scale,
            rows as f64 * scale,
        )
    };

    svg.push_str(&format!(
        r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="outer" rx="2"/>"#,
        MARGIN, origin_y, gw, gh
    ));
    svg.push('\n');

    for row in 0..dims.rows() {
        for col in 0..dims.cols() {
            let cell = Cell::new(row, col);
            let class = if selection.contains(cell) {
                "selected"
            } else if registry.is_occupied(cell) {
                continue;
            } else {
                "cell"
            };
            let (x, y, w, h) = cell_rect(cell, 1, 1);
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="{}"/>"#,
                x, y, w, h, class
            ));
            svg.push('\n');
        }
    }

    for p in registry.placements() {
        let span = p.span();
        let (x, y, w, h) = cell_rect(p.anchor(), span.cols, span.rows);
        svg.push_str(&format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" class="inner" rx="1"/>"#,
            x, y, w, h
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" class="annotation" text-anchor="middle">{} {}</text>"#,
            x + w / 2.0,
            y + h / 2.0,
            escape_xml(p.image.as_str()),
            span
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    svg
}

/// Uniform scale that fits `w` × `h` inside the preview panel.
fn fit_scale(w: f64, h: f64) -> f64 {
    if !(w > 0.0 && h > 0.0) {
        return 1.0;
    }
    (MAX_PANEL_W / w).min(MAX_PANEL_H / h)
}

fn open_document(panel_w: f64, panel_h: f64) -> String {
    let total_w = panel_w + 2.0 * MARGIN;
    let total_h = panel_h + LABEL_H + 2.0 * MARGIN;
    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        total_w as u32, total_h as u32, total_w, total_h
    ));
    svg.push('\n');
    svg.push_str(STYLE);
    svg
}

fn push_label(svg: &mut String, panel_w: f64, text: &str) {
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="label" text-anchor="middle">{}</text>"#,
        MARGIN + panel_w / 2.0,
        MARGIN + 14.0,
        escape_xml(text)
    ));
    svg.push('\n');
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
