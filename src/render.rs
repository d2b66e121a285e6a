use std::io::Write;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::ansi::{self, Color};
use crate::menu::MenuItem;

fn default_bold_heading() -> bool {
    true
}

fn default_marker() -> String {
    "> ".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Theme {
    #[serde(default)]
    pub color: Color,

    #[serde(default = "default_bold_heading")]
    pub bold_heading: bool,

    /// Printed in front of the highlighted item. Other items get the same number of spaces.
    #[serde(default = "default_marker")]
    pub marker: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            color: Color::default(),
            bold_heading: default_bold_heading(),
            marker: default_marker(),
        }
    }
}

/// Writes menu frames to a terminal-like sink.
pub struct Renderer<W> {
    out: W,
    theme: Theme,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, theme: Theme) -> Self {
        Self { out, theme }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn heading(&mut self, prompt: &str) -> Result<()> {
        let title = if self.theme.bold_heading {
            ansi::bold(prompt)
        } else {
            prompt.to_string()
        };
        let line = ansi::colored(&format!("{title}:"), self.theme.color);
        writeln!(self.out, "{line}").context("write heading")?;
        self.flush()
    }

    /// Prints one line per item. With `redraw` the cursor is first moved back up over
    /// the previous list so it is overwritten in place.
    pub fn items(&mut self, items: &[MenuItem], cursor: usize, redraw: bool) -> Result<()> {
        if redraw {
            // The last line has no trailing newline, so the list spans n-1 line breaks.
            let up = ansi::cursor_up(items.len().saturating_sub(1));
            write!(self.out, "{up}").context("move cursor up")?;
        }

        let blank = " ".repeat(self.theme.marker.chars().count());
        let last = items.len().saturating_sub(1);
        for (index, item) in items.iter().enumerate() {
            let newline = if index == last { "" } else { "\n" };
            let (marker, text) = if index == cursor {
                (
                    ansi::colored(&self.theme.marker, self.theme.color),
                    ansi::colored(item.text(), self.theme.color),
                )
            } else {
                (blank.clone(), item.text().to_string())
            };
            write!(self.out, "\r{marker} {text}{newline}").context("write menu item")?;
        }
        self.flush()
    }

    /// Erases a menu of `item_count` items and its heading, leaving the cursor where
    /// the heading started.
    pub fn clear_menu(&mut self, item_count: usize) -> Result<()> {
        write!(
            self.out,
            "{}{}{}",
            ansi::cursor_up(item_count + 1),
            ansi::COLUMN_START,
            ansi::ERASE_TO_END_OF_SCREEN
        )
        .context("clear menu")?;
        self.flush()
    }

    pub fn line_break(&mut self) -> Result<()> {
        write!(self.out, "\r\n").context("write line break")?;
        self.flush()
    }

    pub fn blank_line(&mut self) -> Result<()> {
        writeln!(self.out).context("write blank line")?;
        self.flush()
    }

    pub fn notice(&mut self, message: &str) -> Result<()> {
        write!(self.out, "{message}").context("write notice")?;
        self.flush()
    }

    pub fn hide_cursor(&mut self) -> Result<()> {
        write!(self.out, "{}", ansi::HIDE_CURSOR).context("hide cursor")?;
        self.flush()
    }

    pub fn show_cursor(&mut self) -> Result<()> {
        write!(self.out, "{}", ansi::SHOW_CURSOR).context("show cursor")?;
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush().context("flush terminal output")
    }
}
