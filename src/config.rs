use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default number of grid columns.
pub const DEFAULT_GRID_WIDTH: u16 = 40;

/// Default number of grid rows.
pub const DEFAULT_GRID_HEIGHT: u16 = 30;

/// Score awarded per food eaten.
pub const FOOD_REWARD: u32 = 10;

/// Delay between movement ticks at the start of a game.
pub const INITIAL_MOVE_DELAY: Duration = Duration::from_millis(120);

/// Lower bound for the movement delay.
pub const MIN_MOVE_DELAY: Duration = Duration::from_millis(30);

/// Multiplier applied to the movement delay after each food.
pub const SPEEDUP_FACTOR: f64 = 0.95;

/// Target interval between rendered frames.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Default highscore file, relative to the working directory.
pub const DEFAULT_HIGH_SCORE_FILE: &str = "highscore.txt";

/// Upper half-block glyph: foreground paints the top cell, background the bottom.
pub const GLYPH_HALF_UPPER: &str = "▀";

/// Half-block border set: solid side faces the board.
///
/// - Top row + top corners: `▄` (solid bottom -> board below)
/// - Bottom row + bottom corners: `▀` (solid top -> board above)
/// - Left and right columns: `█`
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Colors applied to all visual elements.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub board_bg: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub hud_value: Color,
    pub overlay_title: Color,
}

/// Green snake, red food, on a dark board.
pub const THEME_CLASSIC: Theme = Theme {
    snake_head: Color::Rgb(0, 255, 0),
    snake_body: Color::Rgb(0, 180, 0),
    food: Color::Rgb(255, 0, 0),
    board_bg: Color::Rgb(30, 30, 30),
    border_fg: Color::DarkGray,
    hud_text: Color::Gray,
    hud_value: Color::White,
    overlay_title: Color::Red,
};

/// Gameplay tunables, loadable from a JSON file.
///
/// Every field is optional in the file; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    pub food_reward: u32,
    pub initial_move_delay_ms: u64,
    pub min_move_delay_ms: u64,
    pub speedup_factor: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
            food_reward: FOOD_REWARD,
            initial_move_delay_ms: duration_ms(INITIAL_MOVE_DELAY),
            min_move_delay_ms: duration_ms(MIN_MOVE_DELAY),
            speedup_factor: SPEEDUP_FACTOR,
        }
    }
}

/// Failure to load or validate a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(&'static str),
}

impl GameConfig {
    /// Loads the config from `explicit`, or from the per-user config file when
    /// no path is given. A missing per-user file yields the defaults; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_path(path),
            None => match user_config_path() {
                Some(path) if path.is_file() => Self::from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Reads and validates a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid("grid dimensions must be non-zero"));
        }
        if !(self.speedup_factor > 0.0 && self.speedup_factor <= 1.0) {
            return Err(ConfigError::Invalid("speedup_factor must be in (0, 1]"));
        }
        if self.min_move_delay_ms == 0 {
            return Err(ConfigError::Invalid("min_move_delay_ms must be non-zero"));
        }
        if self.min_move_delay_ms > self.initial_move_delay_ms {
            return Err(ConfigError::Invalid(
                "min_move_delay_ms must not exceed initial_move_delay_ms",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        GridSize {
            width: self.width,
            height: self.height,
        }
    }

    #[must_use]
    pub fn initial_move_delay(&self) -> Duration {
        Duration::from_millis(self.initial_move_delay_ms)
    }

    #[must_use]
    pub fn min_move_delay(&self) -> Duration {
        Duration::from_millis(self.min_move_delay_ms)
    }
}

/// Returns the platform-correct per-user config file path.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
