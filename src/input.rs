use anyhow::Result;
use tracing::debug;

use crate::keys::{Key, KeyCodes};

/// One unbuffered read from the terminal.
pub trait RawInput {
    /// Reads a single key press worth of bytes (at most `buf.len()`) and returns how
    /// many were read.
    fn read_raw(&mut self, buf: &mut [u8]) -> Result<usize>;
}

/// Source of decoded key presses for the menu loop.
pub trait KeyInput {
    fn next_key(&mut self) -> Result<Key>;
}

/// Turns raw terminal reads into [`Key`]s using a [`KeyCodes`] table.
pub struct KeyReader<R> {
    raw: R,
    codes: KeyCodes,
}

impl<R: RawInput> KeyReader<R> {
    pub fn new(raw: R, codes: KeyCodes) -> Self {
        Self { raw, codes }
    }

    #[cfg(test)]
    pub(crate) fn into_raw(self) -> R {
        self.raw
    }
}

impl<R: RawInput> KeyInput for KeyReader<R> {
    fn next_key(&mut self) -> Result<Key> {
        let mut buf = [0u8; 3];
        let read = self.raw.read_raw(&mut buf)?;
        let code = self.codes.decode(&buf, read);
        debug!(?buf, read, code, "decoded key");
        Ok(self.codes.classify(code))
    }
}

#[cfg(unix)]
mod unix_tty;

/// Reader bound to the controlling terminal.
pub fn tty(codes: KeyCodes) -> Result<KeyReader<Box<dyn RawInput>>> {
    #[cfg(unix)]
    {
        let raw: Box<dyn RawInput> = Box::new(unix_tty::TtyInput::default());
        return Ok(KeyReader::new(raw, codes));
    }

    #[cfg(not(unix))]
    {
        let _ = codes;
        use anyhow::bail;
        bail!("Unsupported OS (raw terminal input needs a Unix /dev/tty).");
    }
}

impl RawInput for Box<dyn RawInput> {
    fn read_raw(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read_raw(buf)
    }
}
