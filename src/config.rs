//! Configuration and persisted preferences for tabcast.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.tabcast/config.toml`
//! - A small string-keyed settings store for UI preferences (theme and
//!   right-click copy/paste), backed by `~/.tabcast/settings.toml`
//!
//! # Configuration File
//!
//! ```toml
//! # Log filter used when TABCAST_LOG is unset
//! log_level = "info"
//!
//! # Theme used until one is stored in settings.toml: dark or light
//! theme = "dark"
//!
//! [[tabs]]
//! kind = "home"
//! title = "Home"
//!
//! [[tabs]]
//! kind = "terminal"
//! title = "web-1"
//! ```
//!
//! Tab kinds: `home`, `terminal`, `server`, `file_manager`, `ssh_manager`, `admin`.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wm::TabKind;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter used when `TABCAST_LOG` is unset
    pub log_level: String,
    /// Initial theme, until a theme is stored in the settings store
    pub theme: Theme,
    /// Tabs to open at startup
    pub tabs: Vec<TabConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            theme: Theme::default(),
            tabs: vec![
                TabConfig::new(TabKind::Home, "Home"),
                TabConfig::new(TabKind::Terminal, "server-1"),
                TabConfig::new(TabKind::Terminal, "server-2"),
                TabConfig::new(TabKind::Terminal, "server-3"),
            ],
        }
    }
}

/// One startup tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabConfig {
    pub kind: TabKind,
    pub title: String,
}

impl TabConfig {
    pub fn new(kind: TabKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
        }
    }
}

impl Config {
    /// Load `~/.tabcast/config.toml`; a missing file yields the defaults
    pub fn load() -> Result<Self> {
        match config_dir().map(|dir| dir.join("config.toml")) {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Durable string-keyed store for UI preferences
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Store that lives only as long as the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as a flat TOML table, rewritten on every `set`
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        Ok(Self { path, values })
    }

    /// The default store at `~/.tabcast/settings.toml`
    pub fn open_default() -> Result<Self> {
        let dir = config_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::open(dir.join("settings.toml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let content = toml::to_string_pretty(&self.values)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&self.path, content).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

const THEME_KEY: &str = "theme";
const RIGHT_CLICK_COPY_PASTE_KEY: &str = "rightClickCopyPaste";

/// Typed access to the preferences in a [`SettingsStore`]
pub struct Preferences<S: SettingsStore> {
    store: S,
    /// Reported while nothing is stored
    default_theme: Theme,
}

impl<S: SettingsStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            default_theme: Theme::default(),
        }
    }

    /// Use `theme` (usually `Config::theme`) until one is stored
    pub fn with_default_theme(mut self, theme: Theme) -> Self {
        self.default_theme = theme;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored theme, or the default theme when unset or unrecognised
    pub fn theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .and_then(|value| value.parse().ok())
            .unwrap_or(self.default_theme)
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    /// Flip between dark and light. Returns the new theme.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        let theme = self.theme().toggled();
        self.set_theme(theme)?;
        Ok(theme)
    }

    /// Only an exact `"true"` enables it
    pub fn right_click_copy_paste(&self) -> bool {
        self.store.get(RIGHT_CLICK_COPY_PASTE_KEY).as_deref() == Some("true")
    }

    pub fn set_right_click_copy_paste(&mut self, enabled: bool) -> Result<()> {
        self.store
            .set(RIGHT_CLICK_COPY_PASTE_KEY, if enabled { "true" } else { "false" })
    }
}

/// `~/.tabcast`
pub fn config_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".tabcast"))
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
