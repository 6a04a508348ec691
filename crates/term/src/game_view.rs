//! GameView: maps a [`GameSnapshot`] (or a playback [`BoardFrame`]) into a terminal
//! framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::frame::{BoardFrame, Tally};
use crate::types::{Outcome, Position, Tile, EMPTY_TILE};

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

/// Interaction state drawn on top of the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marks<'a> {
    pub cursor: Option<Position>,
    pub selected: Option<Position>,
    /// One-line status under the side panel
    pub message: Option<&'a str>,
}

/// Where the board frame sits inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const HELP_LINES: [&str; 6] = [
    "arrows  move",
    "space   select",
    "x       cancel",
    "?       hint",
    "r       restart",
    "q       quit",
];

/// A lightweight terminal renderer for the puzzle board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Four columns fit a two-digit tile with a marker on each side.
        Self {
            cell_w: 4,
            cell_h: 1,
        }
    }
}

impl GameView {
    fn layout(&self, viewport: Viewport, rows: usize, cols: usize) -> Layout {
        let frame_w = (cols as u16).saturating_mul(self.cell_w).saturating_add(2);
        let frame_h = (rows as u16).saturating_mul(self.cell_h).saturating_add(2);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;
        Layout {
            start_x,
            start_y,
            frame_w,
            frame_h,
        }
    }

    /// Board cell under terminal coordinate `(x, y)`, if any.
    ///
    /// `dims` is `(rows, cols)` of the board being shown.
    pub fn cell_at(&self, viewport: Viewport, dims: (usize, usize), x: u16, y: u16) -> Option<Position> {
        let (rows, cols) = dims;
        let layout = self.layout(viewport, rows, cols);
        let inner_x = x.checked_sub(layout.start_x + 1)?;
        let inner_y = y.checked_sub(layout.start_y + 1)?;
        let col = (inner_x / self.cell_w) as usize;
        let row = (inner_y / self.cell_h) as usize;
        (row < rows && col < cols).then(|| Position::new(row, col))
    }

    /// Render into an existing framebuffer.
    ///
    /// `playback` replaces the snapshot's board while a turn is animating; the
    /// end-of-game overlays only show once it is `None`.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        playback: Option<&BoardFrame>,
        marks: &Marks<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let owned;
        let frame = match playback {
            Some(frame) => frame,
            None => {
                owned = BoardFrame::from_board(&snap.board);
                &owned
            }
        };

        let layout = self.layout(viewport, frame.rows(), frame.cols());
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            layout.frame_w.saturating_sub(2),
            layout.frame_h.saturating_sub(2),
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        self.draw_border(fb, layout, border);

        let animating = playback.is_some();
        for row in 0..frame.rows() {
            for col in 0..frame.cols() {
                let pos = Position::new(row, col);
                let tile = frame.tile(pos);
                let highlight = if frame.is_flashing(pos) {
                    Highlight::Flash
                } else if frame.is_swapping(pos) {
                    Highlight::Selected
                } else if animating {
                    Highlight::None
                } else if marks.selected == Some(pos) {
                    Highlight::Selected
                } else if marks.cursor == Some(pos) {
                    Highlight::Cursor
                } else if matches!(snap.hint, Some((a, b)) if a == pos || b == pos) {
                    Highlight::Hint
                } else {
                    Highlight::None
                };
                self.draw_tile(fb, layout, pos, tile, highlight);
            }
        }

        // Mid-turn frames carry the score as it accrues pass by pass.
        let tally = frame.tally().unwrap_or(Tally {
            score: snap.score,
            combo: snap.last_combo,
        });
        self.draw_side_panel(fb, snap, tally, marks, viewport, layout);

        if !animating {
            let overlay = match snap.outcome {
                Some(Outcome::Won) => Some("YOU WIN!"),
                Some(Outcome::Lost) => Some("GAME OVER"),
                None if snap.deadlocked => Some("NO MOVES"),
                None => None,
            };
            if let Some(text) = overlay {
                self.draw_overlay_text(fb, layout, text);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, marks: &Marks<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, None, marks, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: Layout, style: CellStyle) {
        let Layout {
            start_x: x,
            start_y: y,
            frame_w: w,
            frame_h: h,
        } = layout;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, layout: Layout, pos: Position, tile: Tile, highlight: Highlight) {
        let px = layout.start_x + 1 + pos.col as u16 * self.cell_w;
        let py = layout.start_y + 1 + pos.row as u16 * self.cell_h;

        if tile == EMPTY_TILE {
            let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);
            fb.put_char(px + self.cell_w / 2, py + self.cell_h / 2, '·', style);
            return;
        }

        let base = tile_color(tile);
        let mut style = CellStyle::new(Rgb::new(10, 10, 10), base);
        match highlight {
            Highlight::Flash => style = CellStyle::new(Rgb::new(0, 0, 0), Rgb::new(250, 250, 250)).bold(),
            Highlight::Selected => style = CellStyle::new(Rgb::new(0, 0, 0), base.lighten(140)).bold(),
            Highlight::Cursor | Highlight::Hint => style = style.bold(),
            Highlight::None => {}
        }
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', style);

        let mid_y = py + self.cell_h / 2;
        let digits = digit_count(tile);
        let text_x = px + self.cell_w.saturating_sub(digits) / 2 + self.cell_w.saturating_sub(digits) % 2;
        fb.put_u32(text_x, mid_y, tile, style);

        let markers = match highlight {
            Highlight::Cursor | Highlight::Selected => Some(('[', ']')),
            Highlight::Hint => Some(('<', '>')),
            _ => None,
        };
        if let Some((left, right)) = markers {
            fb.put_char(px, mid_y, left, style);
            fb.put_char(px + self.cell_w - 1, mid_y, right, style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        tally: Tally,
        marks: &Marks<'_>,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout.start_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();

        let mut y = layout.start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        let used = fb.put_u32(panel_x, y, tally.score, value);
        fb.put_str(panel_x + used, y, " / ", dim);
        fb.put_u32(panel_x + used + 3, y, snap.target_score, dim);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves_left, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "COMBO", label);
        y = y.saturating_add(1);
        if tally.combo > 1 {
            fb.put_char(panel_x, y, 'x', value);
            fb.put_u32(panel_x + 1, y, tally.combo as u32, value);
        } else {
            fb.put_str(panel_x, y, "-", value);
        }
        y = y.saturating_add(2);

        if let Some(message) = marks.message {
            fb.put_str(panel_x, y, message, label);
        }
        y = y.saturating_add(2);

        if panel_w >= 16 {
            for line in HELP_LINES {
                if y >= viewport.height {
                    break;
                }
                fb.put_str(panel_x, y, line, dim);
                y = y.saturating_add(1);
            }
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, layout: Layout, text: &str) {
        let mid_y = layout.start_y.saturating_add(layout.frame_h / 2);
        let text_w = text.chars().count() as u16;
        let x = layout.start_x.saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Highlight {
    None,
    Cursor,
    Selected,
    Hint,
    Flash,
}

/// Tile colour by value bucket.
pub fn tile_color(tile: Tile) -> Rgb {
    match tile {
        1..=3 => Rgb::new(100, 200, 120),
        4..=6 => Rgb::new(80, 180, 220),
        7..=9 => Rgb::new(240, 200, 80),
        _ => Rgb::new(220, 120, 200),
    }
}

fn digit_count(n: u32) -> u16 {
    let mut count = 1;
    let mut rest = n / 10;
    while rest > 0 {
        count += 1;
        rest /= 10;
    }
    count
}
