use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use spinwheel_core::wheel::WheelConfig;

/// Configurable keybindings. Each field holds a key string like "Space",
/// "Ctrl+c", "q" or "F1".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub spin: String,
    pub quit: String,
    pub force_quit: String,
    pub toggle_log_panel: String,
    pub show_help: String,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            spin: "Space".to_string(),
            quit: "q".to_string(),
            force_quit: "Ctrl+c".to_string(),
            toggle_log_panel: "l".to_string(),
            show_help: "?".to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub keybindings: KeybindingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "dark".to_string()
}
fn default_tick_rate() -> u64 {
    50
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            tick_rate_ms: default_tick_rate(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// `~/.config/spinwheel/config.toml` on Linux, the platform equivalent
    /// elsewhere.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("spinwheel").join("config.toml"))
    }

    /// Read config from `path`, or from the default location when `path` is
    /// `None`. A missing default file is `Ok(None)`. An explicit path that
    /// does not exist, or a file that fails to parse or validate, is an error
    /// naming the file.
    pub fn read(path: Option<&Path>) -> anyhow::Result<Option<Self>> {
        let explicit = path.is_some();
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Ok(None);
        };

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound && !explicit => return Ok(None),
            Err(e) => return Err(e).context(format!("failed to read {}", path.display())),
        };

        Self::from_toml(&content)
            .map(Some)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse config from a TOML string. The `[wheel]` table goes through
    /// [`WheelConfig::from_toml`] so it is validated as a whole.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let mut table: toml::Table = toml::from_str(content)?;
        let wheel = match table.remove("wheel") {
            Some(wheel) => WheelConfig::from_toml(&toml::to_string(&wheel)?)?,
            None => WheelConfig::default(),
        };

        let mut config: Self = toml::Value::Table(table).try_into()?;
        config.wheel = wheel;
        Ok(config)
    }
}
