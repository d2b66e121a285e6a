use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use climenu::{config, tree::MenuSpec, Menu};

#[derive(Parser, Debug)]
#[command(name = "climenu", version, about = "Interactive single-selection terminal menus")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shows a menu defined in a JSON file and prints the selected ids.
    Run {
        /// Menu definition: {"prompt": ..., "items": [{"label", "id", "submenu"?}]}.
        file: PathBuf,
        /// Print the selection path as a JSON array instead of one id per line.
        #[arg(long)]
        json: bool,
    },
    /// Shows a built-in colour menu with a nested submenu.
    Demo,
    /// Prints the config path that would be used (if any).
    ConfigPath,
    /// Writes a config template if none exists and prints its path.
    InitConfig,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run { file, json } => {
            let cfg = config::load_optional()?.unwrap_or_default();
            let mut menu = MenuSpec::load(&file)?.build();
            let path = menu
                .display_configured(&cfg)
                .with_context(|| format!("display menu from {}", file.display()))?;
            if path.is_empty() {
                bail!("selection cancelled");
            }
            if json {
                println!("{}", serde_json::to_string(&path).context("serialize selection")?);
            } else {
                for id in path {
                    println!("{id}");
                }
            }
        }
        Command::Demo => {
            let cfg = config::load_optional()?.unwrap_or_default();
            let mut menu = demo_menu()?;
            let choice = menu.display_configured(&cfg).context("display demo menu")?;
            println!("Choice: {choice:?}");
        }
        Command::ConfigPath => {
            if let Some(path) = config::resolve_config_path() {
                println!("{}", path.display());
            }
        }
        Command::InitConfig => {
            let path = config::ensure_config_file_exists()?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

const DEFAULT_LOG_FILTER: &str = "climenu=warn";

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn demo_menu() -> Result<Menu> {
    let mut more = Menu::new("More colours");
    more.add_item("Cyan", "cyan")?;
    more.add_item("Magenta", "magenta")?;

    let mut menu = Menu::new("Choose a colour");
    menu.add_item("Red", "red")?;
    menu.add_item("Blue", "blue")?;
    menu.add_item("Green", "green")?;
    menu.add_item("Yellow", "yellow")?;
    menu.add_submenu_item("More...", "more", more)?;
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use std::{
        env,
        io::{self, Write},
        sync::{Arc, Mutex},
    };

    use tracing::{debug, warn};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn emit_with(filter: EnvFilter) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .with_env_filter(filter)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            debug!(target: "climenu::input", "decoded key");
            warn!(target: "climenu::menu", "menu has no items");
        });
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    // Only test in this binary touching RUST_LOG.
    #[test]
    fn rust_log_overrides_default_level() {
        env::set_var("RUST_LOG", "climenu=debug");
        let verbose = emit_with(log_filter());
        assert!(verbose.contains("decoded key"));
        assert!(verbose.contains("menu has no items"));

        env::remove_var("RUST_LOG");
        let quiet = emit_with(log_filter());
        assert!(!quiet.contains("decoded key"));
        assert!(quiet.contains("menu has no items"));
    }

    #[test]
    fn demo_menu_has_nested_colours() {
        let menu = demo_menu().unwrap();
        assert_eq!(menu.len(), 5);
        let more = menu.items()[4].submenu().unwrap();
        assert_eq!(more.prompt(), "More colours");
    }
}
