use std::{
    fs::{File, OpenOptions},
    io::Read,
    path::PathBuf,
};

use anyhow::{Context, Result};
use nix::sys::termios::{cfmakeraw, tcgetattr, tcsetattr, SetArg, SpecialCharacterIndices, Termios};

use super::RawInput;

const TTY_PATH: &str = "/dev/tty";

/// Terminal device, opened and put into raw mode for each read only.
pub struct TtyInput {
    path: PathBuf,
}

impl Default for TtyInput {
    fn default() -> Self {
        Self {
            path: PathBuf::from(TTY_PATH),
        }
    }
}

impl TtyInput {
    #[cfg(test)]
    fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RawInput for TtyInput {
    fn read_raw(&mut self, buf: &mut [u8]) -> Result<usize> {
        let tty = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.path)
            .with_context(|| format!("opening {}", self.path.display()))?;

        let read = {
            let _raw = RawMode::enter(&tty)
                .with_context(|| format!("enable raw mode on {}", self.path.display()))?;
            (&tty).read(buf)
        };

        read.with_context(|| format!("reading from {}", self.path.display()))
    }
}

/// Restores the saved terminal attributes when dropped.
struct RawMode<'a> {
    tty: &'a File,
    saved: Termios,
}

impl<'a> RawMode<'a> {
    fn enter(tty: &'a File) -> nix::Result<Self> {
        let saved = tcgetattr(tty)?;

        let mut raw = saved.clone();
        cfmakeraw(&mut raw);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        tcsetattr(tty, SetArg::TCSANOW, &raw)?;

        Ok(Self { tty, saved })
    }
}

impl Drop for RawMode<'_> {
    fn drop(&mut self) {
        let _ = tcsetattr(self.tty, SetArg::TCSANOW, &self.saved);
    }
}
