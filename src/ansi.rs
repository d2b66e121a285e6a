//! VT100/ANSI control sequences for drawing menus.
//!
//! @see http://www.climagic.org/mirrors/VT100_Escape_Codes.html

use serde::Deserialize;

pub const ERASE_LINE: &str = "\x1b[2K";
pub const COLUMN_START: &str = "\x1b[1G";
pub const ERASE_TO_END_OF_SCREEN: &str = "\x1b[0J";
pub const HIDE_CURSOR: &str = "\x1b[?25l";
pub const SHOW_CURSOR: &str = "\x1b[?25h";
pub const RESET: &str = "\x1b[0m";

/// Moves the cursor up `rows` lines.
///
/// Terminals treat `ESC [ 0 A` as a move of one row, so nothing is emitted for zero.
pub fn cursor_up(rows: usize) -> String {
    if rows == 0 {
        return String::new();
    }
    format!("\x1b[{rows}A")
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    #[default]
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::White => 7,
        }
    }
}

pub fn colored(text: &str, color: Color) -> String {
    format!("\x1b[3{}m{text}{RESET}", color.code())
}

pub fn bold(text: &str) -> String {
    format!("\x1b[1m{text}{RESET}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_up_skips_zero_rows() {
        assert_eq!(cursor_up(0), "");
        assert_eq!(cursor_up(1), "\x1b[1A");
        assert_eq!(cursor_up(12), "\x1b[12A");
    }

    #[test]
    fn control_codes_are_vt100() {
        assert_eq!(ERASE_LINE, "\x1b[2K");
        assert_eq!(COLUMN_START, "\x1b[1G");
        assert_eq!(ERASE_TO_END_OF_SCREEN, "\x1b[0J");
        assert_eq!(HIDE_CURSOR, "\x1b[?25l");
        assert_eq!(SHOW_CURSOR, "\x1b[?25h");
    }

    #[test]
    fn styles_wrap_with_reset() {
        assert_eq!(colored("> ", Color::Green), "\x1b[32m> \x1b[0m");
        assert_eq!(colored("x", Color::White), "\x1b[37mx\x1b[0m");
        assert_eq!(bold("Pick"), "\x1b[1mPick\x1b[0m");
    }
}
