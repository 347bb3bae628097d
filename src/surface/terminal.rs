use std::io::Write;

use blake3::Hash;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use unicode_width::UnicodeWidthChar;

use crate::error::Result;
use crate::screen::{Transition, View};

use super::HostSurface;
use super::width::display_width;

/// Terminal surface parameters.
#[derive(Debug, Clone)]
pub struct TerminalSettings {
    /// Columns every line is padded or truncated to. Zero leaves lines as-is.
    pub width: u16,
    /// Character repeated under the title.
    pub rule: char,
    pub restore_cursor: Option<(u16, u16)>,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            width: 80,
            rule: '─',
            restore_cursor: None,
        }
    }
}

/// Full-screen surface writing crossterm commands to any [`Write`] handle.
///
/// Terminals cut between views, so the transition hint is ignored. Showing
/// the same frame twice in a row does not repaint.
pub struct TerminalSurface<W: Write> {
    writer: W,
    settings: TerminalSettings,
    last_frame: Option<Hash>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(writer: W, settings: TerminalSettings) -> Self {
        Self {
            writer,
            settings,
            last_frame: None,
        }
    }

    pub fn with_default(writer: W) -> Self {
        Self::new(writer, TerminalSettings::default())
    }

    pub fn settings_mut(&mut self) -> &mut TerminalSettings {
        &mut self.settings
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn frame_lines(&self, view: &View) -> Vec<String> {
        let width = self.settings.width;
        let rule_len = if width == 0 {
            display_width(&view.title)
        } else {
            width as usize
        };

        let mut lines = Vec::with_capacity(view.body.lines().count() + 2);
        lines.push(view.title.clone());
        lines.push(self.settings.rule.to_string().repeat(rule_len));
        lines.extend(view.body.lines().map(str::to_string));

        if width > 0 {
            for line in lines.iter_mut() {
                fit_line(line, width);
            }
        }
        lines
    }
}

impl<W: Write> HostSurface for TerminalSurface<W> {
    fn show(&mut self, view: &View, _transition: Transition) -> Result<()> {
        let lines = self.frame_lines(view);
        let frame = blake3::hash(lines.join("\n").as_bytes());
        if self.last_frame == Some(frame) {
            return Ok(());
        }

        queue!(self.writer, Clear(ClearType::All))?;
        for (row, line) in lines.iter().enumerate() {
            let row = u16::try_from(row).unwrap_or(u16::MAX);
            queue!(self.writer, MoveTo(0, row), Print(line))?;
        }
        if let Some((row, col)) = self.settings.restore_cursor {
            queue!(self.writer, MoveTo(col, row))?;
        }
        self.writer.flush()?;
        self.last_frame = Some(frame);
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        self.writer.flush()?;
        self.last_frame = None;
        Ok(())
    }
}

const SGR_RESET: &str = "\u{1b}[0m";

/// Pad or cut `line` to exactly `width` cells in a single pass. Escape
/// sequences take no cells; a cut line that carried any gets a style reset so
/// attributes do not leak into the next row.
fn fit_line(line: &mut String, width: u16) {
    let width = width as usize;
    let mut used = 0;
    let mut styled = false;
    let mut cut = None;

    let mut chars = line.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if ch == '\u{1b}' {
            styled = true;
            skip_escape(&mut chars);
            continue;
        }
        let cells = ch.width().unwrap_or(0);
        if used + cells > width {
            cut = Some(index);
            break;
        }
        used += cells;
    }

    if let Some(index) = cut {
        line.truncate(index);
        if styled {
            line.push_str(SGR_RESET);
        }
    }
    if used < width {
        line.push_str(&" ".repeat(width - used));
    }
}

/// Consume the rest of an escape sequence whose ESC was just read.
fn skip_escape<I>(chars: &mut std::iter::Peekable<I>)
where
    I: Iterator<Item = (usize, char)>,
{
    match chars.peek().map(|&(_, ch)| ch) {
        // CSI: parameters until a final byte in `@`..=`~`.
        Some('[') => {
            chars.next();
            for (_, ch) in chars.by_ref() {
                if ('@'..='~').contains(&ch) {
                    break;
                }
            }
        }
        // OSC: until BEL or ST.
        Some(']') => {
            chars.next();
            while let Some((_, ch)) = chars.next() {
                if ch == '\u{7}' {
                    break;
                }
                if ch == '\u{1b}' {
                    if chars.peek().map(|&(_, next)| next) == Some('\\') {
                        chars.next();
                    }
                    break;
                }
            }
        }
        Some(_) => {
            chars.next();
        }
        None => {}
    }
}
