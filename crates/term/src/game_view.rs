//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{ActiveSnapshot, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(0x05, 0x20, 0x29);
const PANEL_BG: Rgb = Rgb::new(0x02, 0x12, 0x18);

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

/// Text drawn over the middle of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Between rounds; `remaining_ms` until the board resets.
    RoundOver { remaining_ms: u64 },
}

/// A lightweight terminal renderer for the board and side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        overlay: Overlay,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle::new(Rgb::new(40, 90, 100), PLAY_BG);
        let border = CellStyle::new(Rgb::new(0x7e, 0xf3, 0xff), PANEL_BG);

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (y, row) in snap.board.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => {
                        self.draw_board_cell(fb, start_x, start_y, x as i8, y as i8, *kind)
                    }
                    None => self.fill_cell_rect(
                        fb,
                        start_x,
                        start_y,
                        x as u16,
                        y as u16,
                        '·',
                        bg.dim(),
                    ),
                }
            }
        }

        if snap.playable() && snap.ghost_y != snap.active.y {
            let ghost = CellStyle::new(Rgb::of_kind(snap.active.kind), PLAY_BG).dim();
            let mut at = snap.active;
            at.y = snap.ghost_y;
            self.draw_piece_cells(fb, &at, |view, fb, x, y| {
                view.fill_cell_rect(fb, start_x, start_y, x, y, '░', ghost);
            });
        }

        // The terminal piece stays visible; cells above row 0 are clipped.
        let active = snap.active;
        self.draw_piece_cells(fb, &active, |view, fb, x, y| {
            view.draw_board_cell(fb, start_x, start_y, x as i8, y as i8, active.kind);
        });

        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if let Overlay::RoundOver { remaining_ms } = overlay {
            self.draw_round_over(fb, start_x, start_y, frame_w, frame_h, remaining_ms);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, overlay: Overlay, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, overlay, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
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

    /// Call `draw` for each on-board cell of `piece`.
    fn draw_piece_cells<F>(&self, fb: &mut FrameBuffer, piece: &ActiveSnapshot, mut draw: F)
    where
        F: FnMut(&Self, &mut FrameBuffer, u16, u16),
    {
        for (x, y) in piece.cells() {
            if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
                draw(self, fb, x as u16, y as u16);
            }
        }
    }

    fn draw_board_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: i8,
        y: i8,
        kind: PieceKind,
    ) {
        let style = CellStyle::new(Rgb::of_kind(kind), PLAY_BG).bold();
        self.fill_cell_rect(fb, start_x, start_y, x as u16, y as u16, '█', style);
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + cell_x * self.cell_w;
        let py = start_y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(0x9f, 0xef, 0xff), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(220, 240, 245), PANEL_BG);
        let hint = value.dim();

        let mut y = start_y;
        let rows: [(&str, u64); 4] = [
            ("ROUND", snap.round_id as u64),
            ("LINES", snap.lines_cleared as u64),
            ("PIECES", snap.pieces_locked as u64),
            ("GRAVITY MS", snap.gravity_interval_ms as u64),
        ];
        for (name, v) in rows {
            fb.put_str(panel_x, y, name, label);
            y = y.saturating_add(1);
            fb.put_u64(panel_x, y, v, value);
            y = y.saturating_add(2);
        }

        fb.put_str(panel_x, y, "NOW", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, snap.active.kind.as_str(), value);
        y = y.saturating_add(2);

        for line in [
            "←/→ move",
            "↑ rotate",
            "↓ soft drop",
            "space drop",
            "q quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_round_over(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        remaining_ms: u64,
    ) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = start_y.saturating_add(frame_h / 2);

        let title = "ROUND OVER";
        let w = title.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(w) / 2);
        fb.put_str(x, mid_y.saturating_sub(1), title, style);

        // Whole seconds left, rounded up so the count never shows 0 early.
        let secs = remaining_ms.div_ceil(1000);
        let digits = if secs >= 10 { 2 } else { 1 };
        let w = 4 + digits;
        let x = start_x.saturating_add(frame_w.saturating_sub(w) / 2);
        let end = fb.put_str(x, mid_y.saturating_add(1), "in ", style);
        let end = fb.put_u64(end, mid_y.saturating_add(1), secs, style);
        fb.put_char(end, mid_y.saturating_add(1), 's', style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use crate::types::GameAction;

    fn find(fb: &FrameBuffer, needle: &str) -> bool {
        (0..fb.height()).any(|y| fb.row_text(y).contains(needle))
    }

    #[test]
    fn renders_border_and_panel() {
        let game = GameState::new(7, 0);
        let fb = GameView::default().render(&game.snapshot(), Overlay::None, Viewport::new(60, 24));

        assert_eq!(fb.width(), 60);
        assert_eq!(fb.height(), 24);
        assert!(find(&fb, "┌"));
        assert!(find(&fb, "ROUND"));
        assert!(find(&fb, "LINES"));
        assert!(!find(&fb, "ROUND OVER"));
    }

    #[test]
    fn locked_cells_use_piece_color() {
        let mut game = GameState::new(3, 0);
        let kind = game.active().kind;
        game.apply_action(GameAction::HardDrop);

        let fb = GameView::default().render(&game.snapshot(), Overlay::None, Viewport::new(60, 24));
        let want = Rgb::of_kind(kind);
        let found = (0..fb.height()).any(|y| {
            (0..fb.width()).any(|x| {
                fb.get(x, y)
                    .is_some_and(|c| c.ch == '█' && c.style.fg == want)
            })
        });
        assert!(found);
    }

    #[test]
    fn round_over_overlay_shows_countdown() {
        let game = GameState::new(1, 0);
        let fb = GameView::default().render(
            &game.snapshot(),
            Overlay::RoundOver { remaining_ms: 4200 },
            Viewport::new(60, 24),
        );
        assert!(find(&fb, "ROUND OVER"));
        assert!(find(&fb, "in 5s"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let game = GameState::new(1, 0);
        let fb = GameView::default().render(&game.snapshot(), Overlay::None, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
