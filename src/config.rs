use std::path::Path;

use crate::error::ConfigError;
use crate::game::{Dimensions, Player, WIN_LENGTH};

/// Largest accepted value for `board.columns` and `board.rows`.
pub const MAX_DIMENSION: usize = 64;

/// Board size and starting player.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub columns: usize,
    pub rows: usize,
    pub first_player: Player,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let Dimensions { columns, rows } = Dimensions::default();
        BoardConfig {
            columns,
            rows,
            first_player: Player::Player1,
        }
    }
}

impl BoardConfig {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.columns, self.rows)
    }
}

/// Glyphs used by the text renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub player1_glyph: char,
    pub player2_glyph: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            player1_glyph: 'X',
            player2_glyph: 'O',
        }
    }
}

impl DisplayConfig {
    pub fn glyph(&self, player: Player) -> char {
        match player {
            Player::Player1 => self.player1_glyph,
            Player::Player2 => self.player2_glyph,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.columns == 0 {
            return Err(ConfigError::Validation(
                "board.columns must be >= 1".into(),
            ));
        }
        if self.board.rows == 0 {
            return Err(ConfigError::Validation(
                "board.rows must be >= 1".into(),
            ));
        }
        if self.board.columns > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.columns must be <= {MAX_DIMENSION}"
            )));
        }
        if self.board.rows > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "board.rows must be <= {MAX_DIMENSION}"
            )));
        }

        let glyphs = [self.display.player1_glyph, self.display.player2_glyph];
        if glyphs.iter().any(|g| g.is_whitespace() || g.is_control()) {
            return Err(ConfigError::Validation(
                "display glyphs must be visible characters".into(),
            ));
        }
        if glyphs[0] == glyphs[1] {
            return Err(ConfigError::Validation(
                "display.player1_glyph and display.player2_glyph must differ".into(),
            ));
        }

        if self.board.columns < WIN_LENGTH && self.board.rows < WIN_LENGTH {
            tracing::warn!(
                columns = self.board.columns,
                rows = self.board.rows,
                "board is too small for anyone to win"
            );
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        // Plain scalars only, serialization cannot fail
        toml::to_string_pretty(&AppConfig::default()).unwrap_or_default()
    }
}
