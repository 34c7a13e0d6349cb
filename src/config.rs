use crate::consts;
use ratatui::style::Style;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Overrides for the display styles
    #[serde(default)]
    pub(crate) theme: Theme,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("ringsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist
    /// and `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

/// The styles used to draw the game, each falling back to a hard-coded
/// default when not set in the `[theme]` table
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(from = "RawTheme")]
pub(crate) struct Theme {
    pub(crate) snake: Style,
    pub(crate) food: Style,
    pub(crate) border: Style,
}

impl Default for Theme {
    fn default() -> Theme {
        Theme {
            snake: consts::SNAKE_STYLE,
            food: consts::FOOD_STYLE,
            border: consts::BORDER_STYLE,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default)]
#[serde(default, rename_all = "kebab-case")]
struct RawTheme {
    snake: Option<parse_style::Style>,
    food: Option<parse_style::Style>,
    border: Option<parse_style::Style>,
}

impl From<RawTheme> for Theme {
    fn from(raw: RawTheme) -> Theme {
        let defaults = Theme::default();
        Theme {
            snake: raw.snake.map_or(defaults.snake, Style::from),
            food: raw.food.map_or(defaults.food, Style::from),
            border: raw.border.map_or(defaults.border, Style::from),
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
