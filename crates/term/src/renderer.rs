//! TerminalRenderer: flushes a framebuffer to the real terminal.
//!
//! Frames are encoded into an in-memory buffer first and written with a
//! single `write_all`. After the first frame only glyphs that changed since
//! the previous one are re-sent.

use std::io::{self, Write};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{FrameBuffer, Rgb, Style};

pub struct TerminalRenderer {
    out: io::Stdout,
    prev: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush()
    }

    /// Undo [`enter`](Self::enter). Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        Ok(())
    }

    /// Force a full redraw on the next frame, e.g. after a resize
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame(self.prev.as_ref(), fb, &mut self.buf)?;
        self.flush()?;

        match &mut self.prev {
            Some(prev) => prev.clone_from(fb),
            None => self.prev = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode `next` as terminal commands into `out`.
///
/// With no previous frame, or one of a different size, the screen is cleared
/// and redrawn in full. Otherwise only runs of changed glyphs are emitted.
pub fn encode_frame(prev: Option<&FrameBuffer>, next: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    if prev.is_none() {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let mut style: Option<Style> = None;
    for y in 0..next.height() {
        let mut x = 0;
        while x < next.width() {
            if unchanged(prev, next, x, y) {
                x += 1;
                continue;
            }
            out.queue(cursor::MoveTo(x, y))?;
            while x < next.width() && !unchanged(prev, next, x, y) {
                let glyph = next.get(x, y).unwrap_or_default();
                if style != Some(glyph.style) {
                    queue_style(out, glyph.style)?;
                    style = Some(glyph.style);
                }
                out.queue(Print(glyph.ch))?;
                x += 1;
            }
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn unchanged(prev: Option<&FrameBuffer>, next: &FrameBuffer, x: u16, y: u16) -> bool {
    prev.is_some_and(|p| p.get(x, y) == next.get(x, y))
}

fn queue_style(out: &mut Vec<u8>, style: Style) -> io::Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(to_color(style.fg)))?;
    out.queue(SetBackgroundColor(to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn first_frame_clears_and_prints_everything() {
        let mut fb = FrameBuffer::new(3, 1);
        fb.put_str(0, 0, "abc", Style::default());

        let mut out = Vec::new();
        encode_frame(None, &fb, &mut out).unwrap();
        let text = printed(&out);
        assert!(text.contains("\x1b[2J"));
        assert!(text.contains('a') && text.contains('c'));
    }

    #[test]
    fn identical_frame_prints_no_glyphs() {
        let mut fb = FrameBuffer::new(4, 2);
        fb.put_str(0, 1, "zzzz", Style::default());

        let mut out = Vec::new();
        encode_frame(Some(&fb.clone()), &fb, &mut out).unwrap();
        let text = printed(&out);
        assert!(!text.contains('z'));
        assert!(!text.contains("\x1b[2J"));
    }

    #[test]
    fn only_changed_run_is_sent() {
        let prev = FrameBuffer::new(6, 1);
        let mut next = prev.clone();
        next.put_str(2, 0, "QQ", Style::default());

        let mut out = Vec::new();
        encode_frame(Some(&prev), &next, &mut out).unwrap();
        let text = printed(&out);
        assert_eq!(text.matches('Q').count(), 2);
        // MoveTo is 1-based on the wire: column 3, row 1
        assert!(text.contains("\x1b[1;3H"));
    }

    #[test]
    fn size_change_forces_full_redraw() {
        let prev = FrameBuffer::new(2, 2);
        let next = FrameBuffer::new(3, 2);
        let mut out = Vec::new();
        encode_frame(Some(&prev), &next, &mut out).unwrap();
        assert!(printed(&out).contains("\x1b[2J"));
    }
}
