//! GameView: maps a [`GameState`] snapshot into a framebuffer.
//!
//! Pure, no I/O. The board's y axis grows upward while terminal rows grow
//! downward, so board row 0 lands on the last row inside the frame.

use crate::core::GameState;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::{Cell, PIECE_FRAME, BOARD_HEIGHT, BOARD_WIDTH};

const BLOCK: char = '█';
const EMPTY_DOT: char = '·';
const PANEL_MIN_WIDTH: u16 = 10;
/// Widest board cell in terminal columns; keeps frame arithmetic in `u16`
const MAX_CELL_W: u16 = 8;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Renders the well, the active piece, the next piece and the counters
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Terminal columns per board cell
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell roughly squares the cells in most fonts
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(1, MAX_CELL_W),
        }
    }

    /// Outer size of the bordered well in terminal cells
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Draw `state` into `fb`, resizing it to the viewport first
    pub fn render_into(&self, state: &GameState, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let (frame_w, frame_h) = self.frame_size();
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(fb, origin_x, origin_y, frame_w, frame_h);

        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                match state.board.get(x, y) {
                    Some(cell) if !cell.is_empty() => {
                        self.draw_block(fb, origin_x, origin_y, x, y, cell);
                    }
                    _ => self.draw_empty(fb, origin_x, origin_y, x, y),
                }
            }
        }

        if !state.game_over {
            let active = state.active;
            for (x, y) in active.board_cells() {
                if (0..BOARD_HEIGHT as i8).contains(&y) && (0..BOARD_WIDTH as i8).contains(&x) {
                    self.draw_block(fb, origin_x, origin_y, x, y, active.block);
                }
            }
        }

        self.draw_panel(fb, state, viewport, origin_x + frame_w + 2, origin_y);

        let banner = if state.game_over {
            Some("GAME OVER")
        } else if state.paused {
            Some("PAUSED")
        } else {
            None
        };
        if let Some(text) = banner {
            let text_w = text.chars().count() as u16;
            let x = origin_x + frame_w.saturating_sub(text_w) / 2;
            let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            fb.put_str(x, origin_y + frame_h / 2, text, style);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let (right, bottom) = (x + w - 1, y + h - 1);

        fb.put(x, y, '┌', style);
        fb.put(right, y, '┐', style);
        fb.put(x, bottom, '└', style);
        fb.put(right, bottom, '┘', style);
        for cx in x + 1..right {
            fb.put(cx, y, '─', style);
            fb.put(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom {
            fb.put(x, cy, '│', style);
            fb.put(right, cy, '│', style);
        }
    }

    /// Screen position of the top-left column of board cell `(x, y)`
    fn cell_origin(&self, origin_x: u16, origin_y: u16, x: i8, y: i8) -> (u16, u16) {
        let col = origin_x + 1 + x as u16 * self.cell_w;
        let row = origin_y + 1 + (BOARD_HEIGHT as i8 - 1 - y) as u16;
        (col, row)
    }

    fn draw_block(&self, fb: &mut FrameBuffer, ox: u16, oy: u16, x: i8, y: i8, cell: Cell) {
        let (col, row) = self.cell_origin(ox, oy, x, y);
        let style = Style::new(palette(cell.color), WELL_BG);
        fb.fill_rect(col, row, self.cell_w, 1, BLOCK, style);
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, ox: u16, oy: u16, x: i8, y: i8) {
        let (col, row) = self.cell_origin(ox, oy, x, y);
        let style = Style::new(Rgb::new(90, 90, 100), WELL_BG);
        fb.fill_rect(col, row, self.cell_w, 1, ' ', style);
        fb.put(col, row, EMPTY_DOT, style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, state: &GameState, viewport: Viewport, x: u16, y: u16) {
        if x >= viewport.width || viewport.width - x < PANEL_MIN_WIDTH {
            return;
        }

        let label = Style::default().bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        let counters = [
            ("SCORE", state.score),
            ("LEVEL", state.level),
            ("LINES", state.lines_cleared),
        ];
        let mut row = y;
        for (name, n) in counters {
            fb.put_str(x, row, name, label);
            fb.put_str(x, row + 1, &n.to_string(), value);
            row += 3;
        }

        fb.put_str(x, row, "NEXT", label);
        row += 1;
        let next = state.next.at(0, 0);
        let style = Style::new(palette(next.block.color), Rgb::new(0, 0, 0));
        for (px, py) in next.board_cells() {
            let col = x + px as u16 * self.cell_w;
            let line = row + (PIECE_FRAME as i8 - 1 - py) as u16;
            fb.fill_rect(col, line, self.cell_w, 1, BLOCK, style);
        }
    }
}

/// Foreground color for a block color index in 1..=7
pub fn palette(color: u8) -> Rgb {
    match color {
        1 => Rgb::new(80, 220, 220),
        2 => Rgb::new(200, 120, 220),
        3 => Rgb::new(240, 220, 80),
        4 => Rgb::new(255, 165, 0),
        5 => Rgb::new(80, 120, 220),
        6 => Rgb::new(220, 80, 80),
        7 => Rgb::new(100, 220, 120),
        _ => Rgb::new(140, 140, 140),
    }
}
