//! Terminal output for the game screen.
//!
//! Each frame is compared row by row with the one on screen. Changed cells are
//! grouped into [`Span`]s of one style, so a span costs a cursor move, at most one
//! style change and a single print. A first frame or a resize redraws everything.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    queue,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal::{self, ClearType},
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// A horizontal stretch of cells sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub x: u16,
    pub y: u16,
    pub style: CellStyle,
    pub text: String,
}

/// Spans that turn `shown` into `next`.
///
/// With nothing shown, or a differently sized frame, every cell is included.
pub fn changed_spans(shown: Option<&FrameBuffer>, next: &FrameBuffer) -> Vec<Span> {
    let shown = shown.filter(|s| s.width() == next.width() && s.height() == next.height());
    let mut spans = Vec::new();

    for y in 0..next.height() {
        let row = next.row(y);
        let old = shown.map(|s| s.row(y));
        if old == Some(row) {
            continue;
        }
        let dirty = |x: usize| old.map_or(true, |old: &[Cell]| old[x] != row[x]);

        let mut x = 0;
        while x < row.len() {
            if !dirty(x) {
                x += 1;
                continue;
            }
            let start = x;
            let style = row[x].style;
            let mut text = String::new();
            while x < row.len() && row[x].style == style && dirty(x) {
                text.push(row[x].ch);
                x += 1;
            }
            spans.push(Span {
                x: start as u16,
                y,
                style,
                text,
            });
        }
    }
    spans
}

/// Queue `spans` as terminal commands into `out`; `clear` wipes the screen first.
pub fn encode_spans(spans: &[Span], clear: bool, out: &mut Vec<u8>) -> Result<()> {
    if clear {
        queue!(out, terminal::Clear(ClearType::All))?;
    }
    let mut style = None;
    for span in spans {
        queue!(out, cursor::MoveTo(span.x, span.y))?;
        if style != Some(span.style) {
            set_style(out, span.style)?;
            style = Some(span.style);
        }
        queue!(out, Print(&span.text))?;
    }
    if style.is_some() {
        queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    // Attribute reset clears colours too, so it goes first.
    queue!(
        out,
        SetAttribute(Attribute::Reset),
        SetColors(Colors::new(style.fg.into(), style.bg.into()))
    )?;
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        queue!(out, SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

/// Owns the terminal while the game runs: raw mode, alternate screen and mouse
/// capture, plus the last frame presented.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
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
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        queue!(
            self.buf,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
            EnableMouseCapture
        )?;
        self.flush()
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        queue!(
            self.buf,
            DisableMouseCapture,
            ResetColor,
            SetAttribute(Attribute::Reset),
            terminal::EnableLineWrap,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget what is on screen; the next frame is drawn in full.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Bring the screen up to date with `fb`.
    pub fn present(&mut self, fb: &FrameBuffer) -> Result<()> {
        let full = !matches!(
            &self.shown,
            Some(s) if s.width() == fb.width() && s.height() == fb.height()
        );
        let spans = changed_spans(self.shown.as_ref(), fb);
        if spans.is_empty() && !full {
            return Ok(());
        }

        self.buf.clear();
        encode_spans(&spans, full, &mut self.buf)?;
        self.flush()?;

        match &mut self.shown {
            Some(shown) => shown.clone_from(fb),
            None => self.shown = Some(fb.clone()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> CellStyle {
        CellStyle::new(Rgb::new(255, 0, 0), Rgb::new(0, 0, 0))
    }

    #[test]
    fn first_frame_covers_every_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "ab", CellStyle::default());
        let spans = changed_spans(None, &fb);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "ab ");
        assert_eq!((spans[1].x, spans[1].y), (0, 1));
    }

    #[test]
    fn unchanged_frame_has_no_spans() {
        let fb = FrameBuffer::new(4, 2);
        assert!(changed_spans(Some(&fb), &fb).is_empty());
    }

    #[test]
    fn changes_split_on_style_and_gaps() {
        let shown = FrameBuffer::new(8, 1);
        let mut next = shown.clone();
        next.put_str(1, 0, "12", CellStyle::default());
        next.put_str(3, 0, "x", red());
        next.put_str(6, 0, "9", CellStyle::default());

        let spans = changed_spans(Some(&shown), &next);
        let layout: Vec<_> = spans.iter().map(|s| (s.x, s.text.as_str())).collect();
        assert_eq!(layout, vec![(1, "12"), (3, "x"), (6, "9")]);
        assert_eq!(spans[1].style, red());
    }

    #[test]
    fn resized_frame_is_redrawn_in_full() {
        let shown = FrameBuffer::new(4, 1);
        let next = FrameBuffer::new(5, 2);
        let spans = changed_spans(Some(&shown), &next);
        assert_eq!(spans.iter().map(|s| s.text.len()).sum::<usize>(), 10);
    }

    #[test]
    fn encoding_prints_span_text() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_str(0, 0, "AB", CellStyle::default());
        fb.put_str(0, 1, "CD", CellStyle::default());
        let mut out = Vec::new();
        encode_spans(&changed_spans(None, &fb), true, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("AB"));
        assert!(text.contains("CD"));
    }
}
