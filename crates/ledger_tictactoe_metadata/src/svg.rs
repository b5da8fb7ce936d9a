//! SVG board image.

use ledger_tictactoe::{Cell, Game, Mark, Position};
use tracing::{debug, instrument};

/// Canvas edge length in SVG units.
pub const CANVAS: u32 = 300;

/// Edge length of one cell.
const CELL: u32 = CANVAS / 3;

/// Half-length of an X arm and radius of an O, measured from the cell center.
const GLYPH: u32 = 28;

/// Grid line thickness.
const GRID_WIDTH: u32 = 4;

const STYLE: &str = "<style>\
.cell{fill:none;stroke-width:10}\
.x{stroke:#dc2626;stroke-width:10;stroke-linecap:round}\
.o{stroke:#2563eb}\
</style>";

/// Renders the board of `game` as a standalone SVG document.
///
/// The grid is static; each X adds two `line` elements with class `x` and
/// each O one `circle` with classes `cell o`.
#[instrument(skip(game), fields(game_id = game.id()))]
pub fn render_svg(game: &Game) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">"#,
        CANVAS
    );
    svg.push_str(STYLE);
    svg.push_str(&format!(
        r##"<rect width="{0}" height="{0}" fill="#ffffff"/>"##,
        CANVAS
    ));
    push_grid(&mut svg);

    for (pos, cell) in game.board().iter() {
        match cell {
            Cell::Empty => {}
            Cell::Occupied(Mark::X) => push_x(&mut svg, pos),
            Cell::Occupied(Mark::O) => push_o(&mut svg, pos),
        }
    }

    svg.push_str("</svg>");
    debug!(bytes = svg.len(), "SVG rendered");
    svg
}

fn push_grid(svg: &mut String) {
    for i in 1..3 {
        let offset = i * CELL - GRID_WIDTH / 2;
        // Vertical, then horizontal.
        svg.push_str(&format!(
            r##"<rect x="{}" y="0" width="{}" height="{}" fill="#111827"/>"##,
            offset, GRID_WIDTH, CANVAS
        ));
        svg.push_str(&format!(
            r##"<rect x="0" y="{}" width="{}" height="{}" fill="#111827"/>"##,
            offset, CANVAS, GRID_WIDTH
        ));
    }
}

fn center(pos: Position) -> (u32, u32) {
    (
        u32::from(pos.col()) * CELL + CELL / 2,
        u32::from(pos.row()) * CELL + CELL / 2,
    )
}

fn push_x(svg: &mut String, pos: Position) {
    let (cx, cy) = center(pos);
    svg.push_str(&format!(
        r#"<line class="x" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
        cx - GLYPH,
        cy - GLYPH,
        cx + GLYPH,
        cy + GLYPH
    ));
    svg.push_str(&format!(
        r#"<line class="x" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
        cx + GLYPH,
        cy - GLYPH,
        cx - GLYPH,
        cy + GLYPH
    ));
}

fn push_o(svg: &mut String, pos: Position) {
    let (cx, cy) = center(pos);
    svg.push_str(&format!(
        r#"<circle class="cell o" cx="{}" cy="{}" r="{}"/>"#,
        cx, cy, GLYPH
    ));
}
