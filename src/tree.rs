//! Menus described as JSON documents.
//!
//! ```json
//! {
//!   "prompt": "Choose a colour",
//!   "items": [
//!     { "label": "Red", "id": "red" },
//!     { "label": "More", "id": "more", "submenu": { "prompt": "More colours", "items": [] } }
//!   ]
//! }
//! ```

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::warn;

use crate::menu::Menu;

#[derive(Debug, Clone, Deserialize)]
pub struct MenuSpec {
    pub prompt: String,

    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemSpec {
    pub label: String,

    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub submenu: Option<MenuSpec>,
}

impl MenuSpec {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).context("parsing menu definition")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading menu {}", path.display()))?;
        let spec: MenuSpec =
            serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
        Ok(spec)
    }

    /// Builds the menu tree. Entries without an id are skipped.
    pub fn build(&self) -> Menu {
        let mut menu = Menu::new(self.prompt.clone());
        for item in &self.items {
            let added = match &item.submenu {
                Some(sub) => {
                    menu.add_submenu_item(item.label.clone(), item.id.clone(), sub.build())
                }
                None => menu.add_item(item.label.clone(), item.id.clone()),
            };
            if let Err(err) = added {
                warn!(menu = %self.prompt, %err, "skipping menu entry");
            }
        }
        menu
    }
}
