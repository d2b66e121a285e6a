use std::{env, fs, path::Path, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

use crate::keys::{KeyCodes, KeyOverrides};
use crate::render::Theme;

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Config {
    /// Replacement byte codes for navigation/confirm/cancel keys.
    #[serde(default)]
    pub keys: KeyOverrides,

    #[serde(default)]
    pub theme: Theme,
}

impl Config {
    pub fn key_codes(&self) -> KeyCodes {
        KeyCodes::default().with_overrides(&self.keys)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).context("parsing config")
    }
}

pub fn load_optional() -> Result<Option<Config>> {
    let Some(path) = resolve_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load_from(&path).map(Some)
}

pub fn load_from(path: &Path) -> Result<Config> {
    let bytes = fs::read(path).with_context(|| format!("reading config {}", path.display()))?;
    Config::from_json_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub const CONFIG_ENV: &str = "CLIMENU_CONFIG";
const LOCAL_CONFIG: &str = "climenu.json";

/// Places a config file may come from, highest priority first.
#[derive(Debug, Default, Clone)]
struct ConfigSources {
    explicit: Option<PathBuf>,
    local: Option<PathBuf>,
    user_dir: Option<PathBuf>,
}

impl ConfigSources {
    fn from_env() -> Self {
        let local = PathBuf::from(LOCAL_CONFIG);
        Self {
            explicit: non_blank_var(CONFIG_ENV).map(PathBuf::from),
            local: local.exists().then_some(local),
            user_dir: non_blank_var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|| non_blank_var("APPDATA").map(PathBuf::from))
                .or_else(|| non_blank_var("HOME").map(|home| PathBuf::from(home).join(".config"))),
        }
    }

    fn pick(self) -> Option<PathBuf> {
        self.explicit
            .or(self.local)
            .or_else(|| self.user_dir.map(|dir| dir.join("climenu").join("config.json")))
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub fn resolve_config_path() -> Option<PathBuf> {
    ConfigSources::from_env().pick()
}

pub fn ensure_config_file_exists() -> Result<PathBuf> {
    let path = resolve_config_path().ok_or_else(|| {
        anyhow!("no config location: set {CONFIG_ENV} or one of XDG_CONFIG_HOME, APPDATA, HOME")
    })?;
    write_template(&path)?;
    Ok(path)
}

/// Writes the default config to `path` unless a file is already there.
pub fn write_template(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
    }

    if path.exists() {
        return Ok(());
    }

    let codes = KeyCodes::default();
    let template = serde_json::json!({
        "keys": {
            "up": codes.up,
            "down": codes.down,
            "vim_up": codes.vim_up,
            "vim_down": codes.vim_down,
            "enter": codes.enter,
            "escape": codes.escape
        },
        "theme": {
            "color": "green",
            "bold_heading": true,
            "marker": "> "
        }
    });
    let mut s = serde_json::to_string_pretty(&template).context("serialize config template")?;
    s.push('\n');
    fs::write(path, s.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::Color;
    use crate::keys::Key;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = Config::from_json_slice(b"{}").unwrap();
        assert_eq!(cfg.key_codes(), KeyCodes::default());
        assert_eq!(cfg.theme, Theme::default());
    }

    #[test]
    fn partial_theme_and_keys() {
        let cfg = Config::from_json_slice(
            br#"{ "keys": { "vim_up": 119 }, "theme": { "color": "magenta" } }"#,
        )
        .unwrap();
        let codes = cfg.key_codes();
        assert_eq!(codes.classify(b'w'), Key::Up);
        assert_eq!(codes.classify(b'j'), Key::Down);
        assert_eq!(cfg.theme.color, Color::Magenta);
        assert!(cfg.theme.bold_heading);
        assert_eq!(cfg.theme.marker, "> ");
    }

    #[test]
    fn rejects_unknown_color() {
        let err = Config::from_json_slice(br#"{ "theme": { "color": "orange" } }"#).unwrap_err();
        assert!(err.to_string().contains("parsing config"));
    }

    #[test]
    fn template_round_trips_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        write_template(&path).unwrap();

        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.key_codes(), KeyCodes::default());
        assert_eq!(cfg.theme, Theme::default());
    }

    #[test]
    fn template_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "theme": { "marker": "* " } }"#).unwrap();
        write_template(&path).unwrap();

        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.theme.marker, "* ");
    }

    #[test]
    fn explicit_path_wins_over_everything() {
        let sources = ConfigSources {
            explicit: Some(PathBuf::from("/etc/menus.json")),
            local: Some(PathBuf::from(LOCAL_CONFIG)),
            user_dir: Some(PathBuf::from("/home/me/.config")),
        };
        assert_eq!(sources.pick(), Some(PathBuf::from("/etc/menus.json")));
    }

    #[test]
    fn local_file_wins_over_user_dir() {
        let sources = ConfigSources {
            local: Some(PathBuf::from(LOCAL_CONFIG)),
            user_dir: Some(PathBuf::from("/home/me/.config")),
            ..Default::default()
        };
        assert_eq!(sources.pick(), Some(PathBuf::from("climenu.json")));
    }

    #[test]
    fn user_dir_gets_app_subdirectory() {
        let sources = ConfigSources {
            user_dir: Some(PathBuf::from("/home/me/.config")),
            ..Default::default()
        };
        assert_eq!(
            sources.pick(),
            Some(PathBuf::from("/home/me/.config/climenu/config.json"))
        );
        assert_eq!(ConfigSources::default().pick(), None);
    }

    #[test]
    fn load_reports_path_on_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        let err = load_from(&path).unwrap_err();
        assert!(err.to_string().starts_with("parsing "));
    }
}
