//! Terminal output: turns framebuffers into crossterm command bytes.
//!
//! Only spans that changed since the last presented frame are printed. A span never
//! begins on the right half of a wide glyph (the Japanese translations), and the tail
//! cell itself is never printed: the terminal covers that column when it draws the glyph.

use std::io::{self, Write};
use std::mem;

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer};

/// Columns `x..x + len` of row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub len: u16,
}

/// Row-major iterator over the spans where two same-sized frames differ.
pub struct ChangedSpans<'a> {
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
    x: u16,
    y: u16,
}

impl<'a> ChangedSpans<'a> {
    pub fn new(prev: &'a FrameBuffer, next: &'a FrameBuffer) -> Self {
        Self {
            prev,
            next,
            x: 0,
            y: 0,
        }
    }

    fn differs(&self, x: u16) -> bool {
        self.prev.get(x, self.y) != self.next.get(x, self.y)
    }
}

impl Iterator for ChangedSpans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        let width = self.next.width();
        while self.y < self.next.height() {
            while self.x < width && !self.differs(self.x) {
                self.x += 1;
            }
            if self.x < width {
                let mut start = self.x;
                let on_tail = self
                    .next
                    .get(start, self.y)
                    .is_some_and(|cell| cell.is_wide_tail());
                if on_tail && start > 0 {
                    start -= 1;
                }
                while self.x < width && self.differs(self.x) {
                    self.x += 1;
                }
                return Some(Span {
                    x: start,
                    y: self.y,
                    len: self.x - start,
                });
            }
            self.x = 0;
            self.y += 1;
        }
        None
    }
}

/// Tracks the last style sent so SGR sequences go out only on change.
#[derive(Default)]
struct Pen {
    style: Option<CellStyle>,
}

impl Pen {
    fn print(&mut self, out: &mut Vec<u8>, cell: Cell) -> io::Result<()> {
        if cell.is_wide_tail() {
            return Ok(());
        }
        if self.style != Some(cell.style) {
            let CellStyle { fg, bg, bold, dim } = cell.style;
            out.queue(SetAttribute(Attribute::Reset))?
                .queue(SetForegroundColor(Color::Rgb {
                    r: fg.r,
                    g: fg.g,
                    b: fg.b,
                }))?
                .queue(SetBackgroundColor(Color::Rgb {
                    r: bg.r,
                    g: bg.g,
                    b: bg.b,
                }))?;
            if bold {
                out.queue(SetAttribute(Attribute::Bold))?;
            }
            if dim {
                out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn print_row(&mut self, out: &mut Vec<u8>, fb: &FrameBuffer, span: Span) -> io::Result<()> {
        out.queue(cursor::MoveTo(span.x, span.y))?;
        for x in span.x..span.x.saturating_add(span.len) {
            self.print(out, fb.get(x, span.y).unwrap_or_default())?;
        }
        Ok(())
    }
}

/// Encode `next` into `out`.
///
/// With a same-sized `prev` only the changed spans are written; otherwise the screen is
/// cleared and every row is written.
pub fn encode_frame(
    prev: Option<&FrameBuffer>,
    next: &FrameBuffer,
    out: &mut Vec<u8>,
) -> io::Result<()> {
    let mut pen = Pen::default();
    let comparable =
        prev.filter(|p| p.width() == next.width() && p.height() == next.height());

    match comparable {
        Some(prev) => {
            for span in ChangedSpans::new(prev, next) {
                pen.print_row(out, next, span)?;
            }
        }
        None => {
            out.queue(terminal::Clear(terminal::ClearType::All))?;
            for y in 0..next.height() {
                let row = Span {
                    x: 0,
                    y,
                    len: next.width(),
                };
                pen.print_row(out, next, row)?;
            }
        }
    }

    if pen.style.is_some() {
        out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// Owns the real terminal: raw mode, the alternate screen and the last shown frame.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            bytes: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.bytes.clear();
        self.bytes
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        self.bytes
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// The next `present` repaints the whole screen.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Print `fb` and keep it as the frame to compare against next time.
    ///
    /// `fb` comes back holding the previously shown buffer, sized like the new frame,
    /// so the host loop never allocates per frame.
    pub fn present(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.bytes.clear();
        encode_frame(self.shown.as_ref(), fb, &mut self.bytes)?;
        self.flush()?;

        let (width, height) = (fb.width(), fb.height());
        let mut spare = self
            .shown
            .take()
            .unwrap_or_else(|| FrameBuffer::new(width, height));
        mem::swap(&mut spare, fb);
        fb.resize(width, height);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout
            .write_all(&self.bytes)
            .and_then(|()| self.stdout.flush())
            .context("write frame to terminal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::{Rgb, WIDE_TAIL};

    fn spans(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        ChangedSpans::new(prev, next)
            .map(|s| (s.x, s.y, s.len))
            .collect()
    }

    fn encoded(prev: Option<&FrameBuffer>, next: &FrameBuffer) -> String {
        let mut out = Vec::new();
        encode_frame(prev, next, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn adjacent_changes_form_one_span_per_row() {
        let prev = FrameBuffer::new(6, 2);
        let mut next = prev.clone();
        next.put_str(1, 0, "abc", CellStyle::default());
        next.put_str(5, 1, "z", CellStyle::default());

        assert_eq!(spans(&prev, &next), [(1, 0, 3), (5, 1, 1)]);
    }

    #[test]
    fn span_on_a_tail_starts_at_its_glyph() {
        let style = CellStyle::default();
        let mut prev = FrameBuffer::new(4, 1);
        prev.put_str(0, 0, "語", style);
        let mut next = prev.clone();
        next.set(0, 0, style.bold().into_cell('語'));
        next.set(1, 0, style.bold().into_cell(WIDE_TAIL));
        prev.set(0, 0, next.get(0, 0).unwrap());

        assert_eq!(spans(&prev, &next), [(0, 0, 2)]);
    }

    #[test]
    fn translation_glyph_printed_once_without_tail() {
        let prev = FrameBuffer::new(5, 1);
        let mut next = prev.clone();
        next.put_str(0, 0, "猫 a", CellStyle::default());

        for text in [encoded(Some(&prev), &next), encoded(None, &next)] {
            assert_eq!(text.matches('猫').count(), 1);
            assert!(!text.contains(WIDE_TAIL));
        }
    }

    #[test]
    fn unchanged_frame_encodes_nothing() {
        let mut fb = FrameBuffer::new(8, 3);
        fb.put_str(0, 1, "SCORE", CellStyle::default());
        assert!(encoded(Some(&fb), &fb).is_empty());
    }

    #[test]
    fn missing_or_resized_previous_frame_repaints_everything() {
        let next = FrameBuffer::new(4, 2);
        let smaller = FrameBuffer::new(3, 2);

        for prev in [None, Some(&smaller)] {
            let text = encoded(prev, &next);
            assert!(text.contains("\x1b[2J"));
            assert_eq!(text.matches(' ').count(), 8);
        }
    }

    #[test]
    fn style_sent_only_when_it_changes() {
        let red = CellStyle::new(Rgb::new(200, 0, 0), Rgb::default());
        let prev = FrameBuffer::new(4, 1);
        let mut next = prev.clone();
        next.put_str(0, 0, "abcd", red);

        let text = encoded(Some(&prev), &next);
        assert_eq!(text.matches("38;2;200;0;0").count(), 1);
    }
}
