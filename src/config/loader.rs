use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::types::AppConfig;

/// Discover and load the app config.
///
/// Priority:
/// 1. `--config` flag (explicit path)
/// 2. `$PLAYTIME_BOARD_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/playtime-board/config.toml`
/// 4. `~/.config/playtime-board/config.toml`
///
/// When nothing is found the built-in defaults are used.
pub fn load_config(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_global_config(),
    };
    let Some(path) = path else {
        tracing::debug!("config: no file found, using defaults");
        return Ok(AppConfig::default());
    };
    let config = read_config(&path)?;
    tracing::debug!("config: loaded {}", path.display());
    Ok(config)
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parsing TOML from {}", path.display()))
}

fn find_global_config() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("PLAYTIME_BOARD_CONFIG") {
        let p = PathBuf::from(&path);
        if p.is_file() {
            return Some(p);
        }
    }

    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        let p = PathBuf::from(xdg).join("playtime-board/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    if let Some(home) = home_dir() {
        let p = home.join(".config/playtime-board/config.toml");
        if p.is_file() {
            return Some(p);
        }
    }

    None
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
