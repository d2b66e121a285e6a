pub mod ansi;
pub mod config;
pub mod error;
pub mod input;
pub mod keys;
pub mod menu;
pub mod render;
pub mod tree;

pub use error::MenuError;
pub use menu::{Menu, MenuItem};
