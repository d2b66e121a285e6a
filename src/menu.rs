use std::io::{self, Write};

use anyhow::Result;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::MenuError;
use crate::input::{self, KeyInput};
use crate::keys::Key;
use crate::render::Renderer;

const EMPTY_MENU_NOTICE: &str = "No items added to menu. Add items.";

/// A single-selection list of items shown under a heading.
#[derive(Debug, Clone)]
pub struct Menu {
    prompt: String,
    cursor: usize,
    items: Vec<MenuItem>,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    text: String,
    id: String,
    submenu: Option<Menu>,
}

impl MenuItem {
    #[cfg(test)]
    pub(crate) fn leaf(text: &str, id: &str) -> Self {
        Self {
            text: text.to_string(),
            id: id.to_string(),
            submenu: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn submenu(&self) -> Option<&Menu> {
        self.submenu.as_ref()
    }
}

impl Menu {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            cursor: 0,
            items: Vec::new(),
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the highlighted item.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Appends a selectable option. Rejected, leaving the menu unchanged, when `id` is empty.
    pub fn add_item(
        &mut self,
        text: impl Into<String>,
        id: impl Into<String>,
    ) -> Result<(), MenuError> {
        self.push(text.into(), id.into(), None)
    }

    /// Appends an option that opens `submenu` when chosen.
    pub fn add_submenu_item(
        &mut self,
        text: impl Into<String>,
        id: impl Into<String>,
        submenu: Menu,
    ) -> Result<(), MenuError> {
        self.push(text.into(), id.into(), Some(submenu))
    }

    fn push(&mut self, text: String, id: String, submenu: Option<Menu>) -> Result<(), MenuError> {
        if id.is_empty() {
            warn!(label = %text, "ID must not be empty.");
            return Err(MenuError::EmptyId { label: text });
        }
        self.items.push(MenuItem { text, id, submenu });
        Ok(())
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.cursor = (self.cursor + 1) % self.items.len();
        }
    }

    pub fn select_previous(&mut self) {
        let n = self.items.len();
        if n > 0 {
            self.cursor = (self.cursor + n - 1) % n;
        }
    }

    /// Shows the menu on the controlling terminal and blocks until the user picks a
    /// leaf item or cancels.
    ///
    /// Returns the ids from this menu down to the chosen leaf, or an empty vector
    /// when the user pressed Escape.
    pub fn display(&mut self) -> Result<Vec<String>> {
        self.display_configured(&Config::default())
    }

    /// Like [`Menu::display`] with key codes and styling taken from `config`.
    pub fn display_configured(&mut self, config: &Config) -> Result<Vec<String>> {
        let mut keys = input::tty(config.key_codes())?;
        let mut renderer = Renderer::new(io::stdout().lock(), config.theme.clone());
        self.display_with(&mut keys, &mut renderer)
    }

    /// Runs the selection loop against an arbitrary key source and output sink.
    ///
    /// The cursor is made visible again on every exit path.
    pub fn display_with<W: Write>(
        &mut self,
        keys: &mut dyn KeyInput,
        renderer: &mut Renderer<W>,
    ) -> Result<Vec<String>> {
        if self.items.is_empty() {
            warn!(prompt = %self.prompt, "menu has no items");
            renderer.notice(EMPTY_MENU_NOTICE)?;
            return Ok(Vec::new());
        }

        let result = self.select(keys, renderer);
        let restored = renderer.show_cursor();
        let path = result?;
        restored?;
        Ok(path)
    }

    fn draw<W: Write>(&self, renderer: &mut Renderer<W>) -> Result<()> {
        renderer.heading(&self.prompt)?;
        renderer.items(&self.items, self.cursor, false)?;
        renderer.hide_cursor()
    }

    fn select<W: Write>(
        &mut self,
        keys: &mut dyn KeyInput,
        renderer: &mut Renderer<W>,
    ) -> Result<Vec<String>> {
        self.draw(renderer)?;

        loop {
            match keys.next_key()? {
                Key::Escape => return Ok(Vec::new()),
                Key::Enter => {
                    renderer.line_break()?;

                    let item_count = self.items.len();
                    let cursor = self.cursor;
                    let item = &mut self.items[cursor];
                    let Some(submenu) = item.submenu.as_mut() else {
                        return Ok(vec![item.id.clone()]);
                    };

                    renderer.clear_menu(item_count)?;
                    debug!(id = %item.id, "entering submenu");
                    let sub_path = submenu.display_with(keys, renderer)?;
                    if !sub_path.is_empty() {
                        let mut path = Vec::with_capacity(sub_path.len() + 1);
                        path.push(item.id.clone());
                        path.extend(sub_path);
                        return Ok(path);
                    }

                    debug!(id = %item.id, "submenu cancelled");
                    let sub_count = submenu.len();
                    renderer.blank_line()?;
                    renderer.clear_menu(sub_count)?;
                    self.draw(renderer)?;
                }
                Key::Up => {
                    self.select_previous();
                    renderer.items(&self.items, self.cursor, true)?;
                }
                Key::Down => {
                    self.select_next();
                    renderer.items(&self.items, self.cursor, true)?;
                }
                Key::Other(_) => {}
            }
        }
    }
}
