//! GameView: maps a `core::GameSnapshot` plus transient feedback into a terminal
//! framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{template, ActiveSnapshot, GameSnapshot, Highlight, PreviewEntry};
use crate::fb::{text_width, CellStyle, FrameBuffer, Rgb};
use crate::feedback::Feedback;
use crate::types::{
    Archetype, Phase, ScoreSource, BOARD_HEIGHT, BOARD_WIDTH, DROP_BONUS_CAP, PREVIEW_COUNT,
};

/// Columns reserved for the side panel.
const PANEL_W: u16 = 30;
/// Gap between the board frame and the panel.
const PANEL_GAP: u16 = 2;
/// Columns per preview slot.
const SLOT_W: u16 = 15;
/// Rows reserved for a preview shape; templates are at most three tall.
const SLOT_SHAPE_ROWS: u16 = 3;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);
const TYPED_FG: Rgb = Rgb::new(255, 140, 0);

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

/// A lightweight terminal renderer for the typing game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
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

/// Board origin (top-left of the frame) and frame size.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
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

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the terminal
    /// size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        feedback: &Feedback,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        // Shift the board left only when the panel fits beside it.
        let total_w = frame_w + PANEL_GAP + PANEL_W;
        let with_panel = viewport.width >= total_w;
        let start_x = if with_panel {
            (viewport.width - total_w) / 2
        } else {
            viewport.width.saturating_sub(frame_w) / 2
        };
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        let frame = Frame {
            x: start_x,
            y: start_y,
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame.x, frame.y, frame.w, frame.h, border);

        // Locked cells keep the colour of the archetype that placed them.
        for y in 0..BOARD_HEIGHT as u16 {
            for x in 0..BOARD_WIDTH as u16 {
                match snap.board[y as usize][x as usize] {
                    Some(kind) => self.draw_board_cell(fb, frame, x, y, kind),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        if let Some(active) = &snap.active {
            self.draw_active(fb, frame, active);
        }

        if with_panel {
            let panel_x = frame.x + frame.w + PANEL_GAP;
            self.draw_side_panel(fb, snap, feedback, viewport, panel_x, frame.y);
        }

        if let Some(message) = snap.message.as_deref() {
            self.draw_overlay_text(fb, frame, message);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        feedback: &Feedback,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, feedback, viewport, &mut fb);
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

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: Archetype) {
        let style = CellStyle::new(archetype_rgb(kind), BOARD_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    /// Cells above the top edge are clipped; the piece spawns at y = -1.
    fn draw_active(&self, fb: &mut FrameBuffer, frame: Frame, active: &ActiveSnapshot) {
        let style = CellStyle::new(css_rgb(active.color), BOARD_BG).bold();
        for (x, y) in active.cells() {
            if (0..BOARD_WIDTH as i32).contains(&x) && (0..BOARD_HEIGHT as i32).contains(&y) {
                self.fill_cell_rect(fb, frame, x as u16, y as u16, '█', style);
            }
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        feedback: &Feedback,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let dim = value.dim();
        let value_x = panel_x + 7;

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        let end = fb.put_u32(value_x, y, snap.score, value);
        if let Some(delta) = feedback.delta() {
            let style = CellStyle::new(source_rgb(delta.source), PANEL_BG).bold();
            let x = fb.put_char_then(end + 1, y, '+', style);
            fb.put_u32(x, y, delta.amount, style);
        }
        y += 1;

        fb.put_str(panel_x, y, "TIME", label);
        let end = fb.put_u32(value_x, y, snap.time_left, value);
        fb.put_char(end, y, 's', value);
        y += 1;

        fb.put_str(panel_x, y, "DROP", label);
        let end = fb.put_u32(value_x, y, snap.drop_bonus, value);
        fb.put_char(end, y, '/', dim);
        fb.put_u32(end + 1, y, DROP_BONUS_CAP, dim);
        y += 1;

        fb.put_str(panel_x, y, "SET", label);
        let mut x = value_x;
        if snap.phase == Phase::StartScreen {
            x = fb.put_str(x, y, "< ", dim);
        }
        x = fb.put_str(x, y, &snap.word_set_label, value);
        if !snap.difficulty.is_empty() {
            let stars = CellStyle::new(Rgb::new(255, 215, 0), PANEL_BG);
            x = fb.put_str(x + 1, y, snap.difficulty, stars);
        }
        if snap.phase == Phase::StartScreen {
            fb.put_str(x, y, " >", dim);
        }
        y += 2;

        fb.put_str(panel_x, y, "NEXT", label);
        y += 1;
        for (slot, entry) in snap.preview.iter().enumerate().take(PREVIEW_COUNT) {
            let slot_x = panel_x + (slot as u16) * SLOT_W;
            self.draw_preview(fb, slot_x, y, slot, entry, snap.highlight);
        }
        y += SLOT_SHAPE_ROWS + 3;

        fb.put_char(panel_x, y, '>', label);
        fb.put_str(panel_x + 2, y, &snap.buffer, CellStyle::new(TYPED_FG, PANEL_BG).bold());
        y += 2;

        for entry in feedback.bonuses() {
            if y >= viewport.height {
                break;
            }
            let mut style = CellStyle::new(source_rgb(entry.variant), PANEL_BG).bold();
            if entry.is_fading() {
                style = CellStyle::new(source_rgb(entry.variant).dimmed(50), PANEL_BG).dim();
            }
            fb.put_str(panel_x, y, &entry.text, style);
            y += 1;
        }
    }

    fn draw_preview(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        slot: usize,
        entry: &PreviewEntry,
        highlight: Option<Highlight>,
    ) {
        let tpl = template(entry.kind);
        let (min_x, _, min_y, _) = tpl.shape().bounds();
        let style = CellStyle::new(css_rgb(tpl.color), PANEL_BG);
        for &(cx, cy) in tpl.cells {
            let px = x + ((cx - min_x) as u16) * 2;
            let py = y + (cy - min_y) as u16;
            fb.fill_rect(px, py, 2, 1, '█', style);
        }

        let typed_len = match highlight {
            Some(h) if h.match_index == slot => h.typed_len,
            _ => 0,
        };
        let text_y = y + SLOT_SHAPE_ROWS;
        let limit = x + SLOT_W - 1;
        let plain = CellStyle::new(Rgb::new(230, 230, 230), PANEL_BG);
        let typed = CellStyle::new(TYPED_FG, PANEL_BG).bold();

        // The look-ahead slot only reveals what has been typed, at least one letter.
        let word = entry.word.text();
        let total = word.chars().count();
        let visible = if slot == 0 {
            total
        } else {
            typed_len.max(1).min(total)
        };

        let mut cx = x;
        let chars = word.chars().take(visible);
        for (i, ch) in chars.enumerate() {
            if cx >= limit {
                break;
            }
            let ch = if slot == 0 {
                ch
            } else {
                ch.to_lowercase().next().unwrap_or(ch)
            };
            let style = if i < typed_len { typed } else { plain };
            cx = fb.put_char_then(cx, text_y, ch, style);
        }

        let translation = entry.word.translation();
        if !translation.is_empty() && text_width(translation) < SLOT_W {
            let style = CellStyle::new(Rgb::new(150, 150, 150), PANEL_BG);
            fb.put_str(x, text_y + 1, translation, style);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: Frame, text: &str) {
        let lines = text.lines().count() as u16;
        let top = (frame.y + frame.h / 2).saturating_sub(lines / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        for (i, line) in text.lines().enumerate() {
            let text_w = text_width(line);
            let x = frame.x + frame.w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, line, style);
        }
    }
}

/// RGB for an archetype's colour.
pub fn archetype_rgb(kind: Archetype) -> Rgb {
    css_rgb(template(kind).color)
}

/// RGB for the CSS colour names used by the archetype templates.
pub fn css_rgb(name: &str) -> Rgb {
    match name {
        "beige" => Rgb::new(245, 245, 220),
        "greenyellow" => Rgb::new(173, 255, 47),
        "hotpink" => Rgb::new(255, 105, 180),
        "darkmagenta" => Rgb::new(139, 0, 139),
        "red" => Rgb::new(255, 0, 0),
        "forestgreen" => Rgb::new(34, 139, 34),
        "yellow" => Rgb::new(255, 255, 0),
        "cyan" => Rgb::new(0, 255, 255),
        "dodgerblue" => Rgb::new(30, 144, 255),
        "orange" => Rgb::new(255, 165, 0),
        "slategray" => Rgb::new(112, 128, 144),
        "chocolate" => Rgb::new(210, 105, 30),
        _ => Rgb::new(128, 128, 128),
    }
}

fn source_rgb(source: ScoreSource) -> Rgb {
    match source {
        ScoreSource::Line => Rgb::new(255, 215, 0),
        ScoreSource::Drop => Rgb::new(135, 206, 250),
        ScoreSource::Type => Rgb::new(120, 220, 120),
        ScoreSource::Memory => Rgb::new(255, 105, 180),
    }
}
