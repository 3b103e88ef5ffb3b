//! Configuration management for shortreel.
//!
//! Configuration is read from `~/.config/shortreel/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::CatalogConfig;
use crate::domain::UserProfile;
use crate::search::SearchConfig;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    /// Profile shown before the first edit.
    pub profile: UserProfile,
}

impl Config {
    /// Load configuration from the default path, writing a commented
    /// default file first if none exists.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit path. Missing fields use defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `~/.config/shortreel/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("shortreel").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        let io_err = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| ConfigError::Io { path, source }
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        fs::write(path, DEFAULT_CONFIG).map_err(io_err(path))?;

        tracing::info!("Wrote default config to {}", path.display());
        Ok(())
    }
}

const DEFAULT_CONFIG: &str = r##"# shortreel configuration
#
# Colors can be named (Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
# DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
# LightCyan, White, Reset) or hex ("#RRGGBB", "#RGB").
#
# Keys can be single characters ("f", "/"), special keys (Enter, Tab,
# BackTab, Space, Up, Down, Left, Right, Esc, PageUp, PageDown, F1-F12)
# or combinations ("Ctrl+c", "Shift+Tab").

[colors]
active_border = "Magenta"
inactive_border = "DarkGray"
selection_bg = "Magenta"
selection_fg = "Black"
active_tab = "LightMagenta"
liked = "LightRed"
progress = "White"
source_label = "Gray"
link = "Blue"
error = "Red"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_screen = ["Tab"]
prev_screen = ["BackTab", "Shift+Tab"]
select = ["Enter"]
toggle_play = ["Space"]
seek_forward = ["l", "Right"]
seek_backward = ["h", "Left"]
toggle_like = ["f"]
comment = ["c"]
duet = ["d"]
swap = ["w"]
spend_token = ["t"]
search = ["/"]
edit_profile = ["e"]
toggle_uploaded = ["u"]
toggle_liked = ["v"]
open_external = ["o"]
refresh = ["R"]

[catalog]
endpoint = "https://api.pexels.com/videos/search"
query = "nature"
per_page = 10
# api_key = "..."   # or set PEXELS_API_KEY

[search]
# Result order follows this list. Available: app, wikipedia, duckduckgo, google
sources = ["wikipedia", "duckduckgo"]
debounce_ms = 300
# google_api_key = "..."
# google_engine_id = "..."

[profile]
username = "you"
name = "New Creator"
bio = "Sharing what I learn"
skills = ["Cooking", "Guitar", "Yoga", "Coding", "Painting", "Photography"]
"##;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
