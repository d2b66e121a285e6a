use serde::Deserialize;

/// Raw byte codes the menu reacts to.
///
/// `up`/`down` are the final byte of the `ESC [ A` / `ESC [ B` arrow sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCodes {
    pub up: u8,
    pub down: u8,
    pub vim_up: u8,
    pub vim_down: u8,
    pub enter: u8,
    pub escape: u8,
}

impl Default for KeyCodes {
    fn default() -> Self {
        Self {
            up: 65,
            down: 66,
            vim_up: 107,
            vim_down: 106,
            enter: 13,
            escape: 27,
        }
    }
}

/// Partial override of [`KeyCodes`], as read from the config file.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct KeyOverrides {
    #[serde(default)]
    pub up: Option<u8>,
    #[serde(default)]
    pub down: Option<u8>,
    #[serde(default)]
    pub vim_up: Option<u8>,
    #[serde(default)]
    pub vim_down: Option<u8>,
    #[serde(default)]
    pub enter: Option<u8>,
    #[serde(default)]
    pub escape: Option<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
    Other(u8),
}

impl KeyCodes {
    pub fn with_overrides(mut self, overrides: &KeyOverrides) -> Self {
        let fields = [
            (&mut self.up, overrides.up),
            (&mut self.down, overrides.down),
            (&mut self.vim_up, overrides.vim_up),
            (&mut self.vim_down, overrides.vim_down),
            (&mut self.enter, overrides.enter),
            (&mut self.escape, overrides.escape),
        ];
        for (slot, value) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
        self
    }

    fn is_navigation(&self, code: u8) -> bool {
        code == self.up || code == self.down
    }

    /// Reduces the bytes of one terminal read to a single key code.
    ///
    /// A 3-byte read is an escape sequence and only its last byte matters, and only
    /// when it is an arrow. Anything shorter yields its first byte. This cannot tell
    /// `A` apart from `ESC [ A`.
    pub fn decode(&self, buf: &[u8], read: usize) -> u8 {
        if read == 3 {
            return buf
                .get(2)
                .copied()
                .filter(|last| self.is_navigation(*last))
                .unwrap_or(0);
        }
        buf.first().copied().unwrap_or(0)
    }

    pub fn classify(&self, code: u8) -> Key {
        if code == self.escape {
            Key::Escape
        } else if code == self.enter {
            Key::Enter
        } else if code == self.up || code == self.vim_up {
            Key::Up
        } else if code == self.down || code == self.vim_down {
            Key::Down
        } else {
            Key::Other(code)
        }
    }
}
