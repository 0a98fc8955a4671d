//! MatchView: maps a [`MatchFrame`] into a terminal framebuffer.
//!
//! Pure (no I/O), so layouts can be unit-tested. Seats are laid out side by
//! side, each as a bordered board followed by a small info panel.

use crate::core::{ActiveSnapshot, Piece, SessionSnapshot};
use crate::engine::{MatchFrame, MatchOutcome};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{MatchMode, PieceKind, PlayerSlot, SessionPhase, BOARD_HEIGHT, BOARD_WIDTH};

const PANEL_W: u16 = 14;
const SEAT_GAP: u16 = 3;

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

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

/// Board cell colour for a piece kind.
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::Z => Rgb::new(220, 80, 80),
    }
}

/// Overlay caption for one seat, if any.
pub fn seat_banner(outcome: MatchOutcome, snap: &SessionSnapshot) -> Option<&'static str> {
    if outcome == (MatchOutcome::Finished { winner: Some(snap.slot) }) {
        return Some("WINNER");
    }
    match snap.phase {
        SessionPhase::Terminal => Some("GAME OVER"),
        SessionPhase::Paused => Some("PAUSED"),
        SessionPhase::Ready => Some("PRESS G"),
        SessionPhase::Running => None,
    }
}

fn seat_title(mode: MatchMode, snap: &SessionSnapshot) -> &'static str {
    match (mode, snap.slot, snap.automated) {
        (MatchMode::Solo, _, true) => "AUTOPLAY",
        (MatchMode::Solo, _, false) => "PLAYER",
        (_, _, true) => "BOT",
        (_, PlayerSlot::One, false) => "PLAYER 1",
        (_, PlayerSlot::Two, false) => "PLAYER 2",
    }
}

fn help_line(mode: MatchMode) -> &'static str {
    match mode {
        MatchMode::Solo => "WASD/arrows move  SPACE drop  G start  P pause  R reset  B autoplay  Q quit",
        MatchMode::HumanVsBot => "WASD/arrows move  SPACE drop  G start  P pause  R reset  Q quit",
        MatchMode::HumanVsHuman => "P1 WASD+SPACE  P2 arrows+ENTER  G start  P pause  R reset  Q quit",
    }
}

/// Terminal layout for a whole match.
pub struct MatchView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for MatchView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self { cell_w: 2, cell_h: 1 }
    }
}

impl MatchView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Outer size of one board including its border.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 * self.cell_h + 2,
        )
    }

    /// Width of one seat (board plus panel).
    pub fn seat_width(&self) -> u16 {
        self.frame_size().0 + 1 + PANEL_W
    }

    /// Smallest viewport that shows every seat completely.
    pub fn required_size(&self, seats: usize) -> Viewport {
        let seats = seats.max(1) as u16;
        let (_, frame_h) = self.frame_size();
        Viewport::new(
            seats * self.seat_width() + (seats - 1) * SEAT_GAP,
            frame_h + 2,
        )
    }

    /// Top-left corner of seat `index`'s board frame.
    pub fn board_origin(&self, frame: &MatchFrame, viewport: Viewport, index: usize) -> (u16, u16) {
        let needed = self.required_size(frame.seats.len());
        let left = viewport.width.saturating_sub(needed.width) / 2;
        let top = viewport.height.saturating_sub(needed.height) / 2;
        let x = left + index as u16 * (self.seat_width() + SEAT_GAP);
        (x, top + 1)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, frame: &MatchFrame, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let needed = self.required_size(frame.seats.len());
        let top = viewport.height.saturating_sub(needed.height) / 2;
        let title = CellStyle::default().bold();
        fb.put_str_centered(0, top, viewport.width, frame.mode.as_str(), title);

        for (index, snap) in frame.seats.iter().enumerate() {
            let (x, y) = self.board_origin(frame, viewport, index);
            self.draw_board(fb, x, y, snap);
            self.draw_panel(fb, x + self.frame_size().0 + 1, y, frame.mode, snap);
            if let Some(text) = seat_banner(frame.outcome, snap) {
                let (w, h) = self.frame_size();
                let style = CellStyle::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
                fb.put_str_centered(x, y + h / 2, w, text, style);
            }
        }

        let footer_y = top + needed.height - 1;
        let dim = CellStyle::default().dim();
        fb.put_str_centered(0, footer_y, viewport.width, help_line(frame.mode), dim);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, frame: &MatchFrame, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(frame, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, x: u16, y: u16, snap: &SessionSnapshot) {
        let (w, h) = self.frame_size();
        fb.fill_rect(x + 1, y + 1, w - 2, h - 2, ' ', CellStyle::plain(WELL_BG, WELL_BG));
        fb.draw_box(x, y, w, h, CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG));

        let empty = CellStyle::plain(Rgb::new(90, 90, 100), WELL_BG).dim();
        for (row, cells) in snap.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let (ch, style) = match cell {
                    Some(kind) => ('█', CellStyle::plain(piece_color(*kind), WELL_BG).bold()),
                    None => ('·', empty),
                };
                self.fill_cell(fb, x, y, col as i8, row as i8, ch, style);
            }
        }

        if snap.phase == SessionPhase::Running || snap.phase == SessionPhase::Paused {
            let ghost = ActiveSnapshot {
                position: crate::core::Position::new(snap.active.position.x, snap.ghost_y),
                ..snap.active
            };
            let style = CellStyle::plain(Rgb::new(140, 140, 140), WELL_BG).dim();
            for (cx, cy) in ghost.visible_cells() {
                self.fill_cell(fb, x, y, cx, cy, '░', style);
            }
        }

        let style = CellStyle::plain(piece_color(snap.active.kind), WELL_BG).bold();
        for (cx, cy) in snap.active.visible_cells() {
            self.fill_cell(fb, x, y, cx, cy, '█', style);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn fill_cell(&self, fb: &mut FrameBuffer, x: u16, y: u16, col: i8, row: i8, ch: char, style: CellStyle) {
        let px = x + 1 + col as u16 * self.cell_w;
        let py = y + 1 + row as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, x: u16, y: u16, mode: MatchMode, snap: &SessionSnapshot) {
        let label = CellStyle::default().bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.put_str(x, y, seat_title(mode, snap), label);

        let mut row = y + 2;
        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, row, name, label);
            fb.put_u32(x, row + 1, n, value);
            row += 3;
        }

        fb.put_str(x, row, "NEXT", label);
        self.draw_preview(fb, x, row + 1, snap.next);
        row += 6;

        fb.put_str(x, row, "SPEED", label);
        let end = fb.put_u32(x, row + 1, snap.drop_interval_ms, value);
        fb.put_str(end, row + 1, "ms", value);
    }

    /// Next-piece preview, always at 2 columns per cell.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: Piece) {
        let style = CellStyle::plain(piece_color(piece.kind), SCREEN_BG).bold();
        for (cx, cy) in piece.shape.filled_cells() {
            fb.fill_rect(x + cx as u16 * 2, y + cy as u16, 2, 1, '█', style);
        }
    }
}
