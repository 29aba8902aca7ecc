//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{Cell, PieceKind, GRID_HEIGHT, GRID_WIDTH};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Draws the bordered grid, the side panel and the game-over screen.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the drawn grid in terminal cells, border included.
    pub fn grid_size(&self) -> (u16, u16) {
        (
            GRID_WIDTH as u16 * self.cell_w,
            GRID_HEIGHT as u16 * self.cell_h,
        )
    }

    /// Top-left corner of the grid within `viewport`.
    pub fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let (w, h) = self.grid_size();
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        (x, y)
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// The framebuffer is resized to the viewport and fully repainted.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (start_x, start_y) = self.origin(viewport);

        if snap.game_over() {
            self.draw_game_over(fb, snap, start_x, start_y);
        } else {
            for (row, cells) in snap.cells.iter().enumerate() {
                for (col, &cell) in cells.iter().enumerate() {
                    self.draw_grid_cell(fb, start_x, start_y, row as u16, col as u16, cell);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, start_x, start_y);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_grid_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        cell: Cell,
    ) {
        let (ch, style) = match cell {
            Cell::Empty => ('·', CellStyle::fg(Rgb::new(90, 90, 100)).on(PLAY_BG).dim()),
            Cell::Border => ('▒', CellStyle::fg(Rgb::new(150, 150, 160)).on(SCREEN_BG)),
            Cell::Locked(kind) => ('█', CellStyle::fg(piece_color(kind)).on(PLAY_BG).bold()),
        };
        let px = start_x + col * self.cell_w;
        let py = start_y + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// The play surface is replaced by a framed prompt.
    fn draw_game_over(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        start_y: u16,
    ) {
        let (w, h) = self.grid_size();
        let frame = CellStyle::fg(Rgb::new(200, 200, 200));
        draw_frame(fb, start_x, start_y, w, h, frame);

        let title = CellStyle::fg(Rgb::new(255, 255, 255)).bold();
        let text = CellStyle::fg(Rgb::new(200, 200, 200));
        let mid_y = start_y + h / 2;

        put_centered(fb, start_x, w, mid_y.saturating_sub(2), "GAME OVER", title);

        let label = "SCORE ";
        let digits = digit_count(snap.score);
        let line_w = label.len() as u16 + digits;
        let x = start_x + w.saturating_sub(line_w) / 2;
        fb.put_str(x, mid_y, label, text);
        fb.put_u32(x + label.len() as u16, mid_y, snap.score, title);

        put_centered(fb, start_x, w, mid_y + 2, "ENTER: restart", text);
        put_centered(fb, start_x, w, mid_y + 3, "Q: quit", text.dim());
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
    ) {
        let (grid_w, _) = self.grid_size();
        let panel_x = start_x.saturating_add(grid_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 8 {
            return;
        }

        let label = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
        let value = CellStyle::fg(Rgb::new(200, 200, 200));

        let mut y = start_y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LINES", snap.lines),
            ("SPEED", snap.speed_ms),
        ] {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u32(panel_x, y, v, value);
            if name == "SPEED" {
                let x = panel_x + digit_count(v);
                fb.put_str(x, y, "ms", value.dim());
            }
            y = y.saturating_add(2);
        }
    }
}

pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

fn draw_frame(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

fn put_centered(fb: &mut FrameBuffer, x: u16, w: u16, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    fb.put_str(x + w.saturating_sub(text_w) / 2, y, text, style);
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
