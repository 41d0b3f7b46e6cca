//! Game configuration types.
//!
//! - `BoardConfig`: board size and the knobs of the snake/ladder generator
//! - `TimingConfig`: the fixed delays that pace a turn
//! - `GameConfig`: combines both, plus an optional RNG seed
//!
//! Everything defaults to the classic 60-square game, and can be loaded from
//! TOML:
//!
//! ```
//! use snakes_ladders::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str(r#"
//!     seed = 7
//!
//!     [board]
//!     size = 100
//!     ladder_count = { min = 4, max = 8 }
//!
//!     [timing]
//!     step_delay_ms = 250
//! "#).unwrap();
//!
//! assert_eq!(config.seed, Some(7));
//! assert_eq!(config.board.size, 100);
//! assert_eq!(config.timing.step_delay_ms, 250);
//! assert_eq!(config.timing.roll_delay_ms, 300);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::ConfigError;
use super::player::Square;

/// Smallest board the generator can work with.
pub const MIN_BOARD_SIZE: Square = 12;

/// Inclusive integer range used for counts, jumps and start bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Smallest value (inclusive).
    pub min: u32,
    /// Largest value (inclusive).
    pub max: u32,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Check if a value falls inside the span.
    #[must_use]
    pub const fn contains(self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }

    /// Whether `min <= max`.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        self.min <= self.max
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// Board size and snake/ladder generation parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of squares. Square `size` is the winning square.
    pub size: Square,

    /// Sampling attempts per feature kind before giving up.
    pub max_attempts: u32,

    /// How many ladders to aim for.
    pub ladder_count: Span,

    /// How many snakes to aim for.
    pub snake_count: Span,

    /// Ladder rise and snake drop.
    pub jump: Span,

    /// Band ladder starts are sampled from. Derived from `size` when unset.
    pub ladder_start: Option<Span>,

    /// Band snake starts are sampled from. Derived from `size` when unset.
    pub snake_start: Option<Span>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::for_size(60)
    }
}

impl BoardConfig {
    /// Classic parameters for a board of `size` squares.
    #[must_use]
    pub fn for_size(size: Square) -> Self {
        Self {
            size,
            max_attempts: 1000,
            ladder_count: Span::new(2, 5),
            snake_count: Span::new(2, 5),
            jump: Span::new(6, 18),
            ladder_start: None,
            snake_start: None,
        }
    }

    /// Set the target count range for ladders.
    #[must_use]
    pub fn with_ladder_count(mut self, count: Span) -> Self {
        self.ladder_count = count;
        self
    }

    /// Set the target count range for snakes.
    #[must_use]
    pub fn with_snake_count(mut self, count: Span) -> Self {
        self.snake_count = count;
        self
    }

    /// Set the jump range.
    #[must_use]
    pub fn with_jump(mut self, jump: Span) -> Self {
        self.jump = jump;
        self
    }

    /// Set the sampling attempt cap.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Ladder starts skip the first square and the last nine.
    #[must_use]
    pub fn ladder_start_band(&self) -> Span {
        self.ladder_start
            .unwrap_or_else(|| Span::new(2, self.size.saturating_sub(9)))
    }

    /// Snake starts skip the first nine squares and the winning square.
    #[must_use]
    pub fn snake_start_band(&self) -> Span {
        self.snake_start
            .unwrap_or_else(|| Span::new(10, self.size.saturating_sub(1)))
    }

    /// Validate the board parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < MIN_BOARD_SIZE {
            return Err(ConfigError::Validation(format!(
                "board.size must be >= {MIN_BOARD_SIZE}"
            )));
        }
        for (name, span) in [
            ("board.ladder_count", self.ladder_count),
            ("board.snake_count", self.snake_count),
            ("board.jump", self.jump),
            ("board.ladder_start", self.ladder_start_band()),
            ("board.snake_start", self.snake_start_band()),
        ] {
            if !span.is_ordered() {
                return Err(ConfigError::Validation(format!(
                    "{name} must have min <= max (got {span})"
                )));
            }
        }
        if self.jump.min == 0 {
            return Err(ConfigError::Validation("board.jump.min must be > 0".into()));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "board.max_attempts must be > 0".into(),
            ));
        }
        let ladders = self.ladder_start_band();
        if ladders.min < 2 || ladders.max > self.size - 2 {
            return Err(ConfigError::Validation(format!(
                "board.ladder_start must lie within 2..={} (got {ladders})",
                self.size - 2
            )));
        }
        let snakes = self.snake_start_band();
        if snakes.min < 3 || snakes.max > self.size - 1 {
            return Err(ConfigError::Validation(format!(
                "board.snake_start must lie within 3..={} (got {snakes})",
                self.size - 1
            )));
        }
        Ok(())
    }
}

/// The fixed delays that pace a turn, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Between the roll announcement and the first step.
    pub roll_delay_ms: u64,
    /// Between two single-square steps.
    pub step_delay_ms: u64,
    /// Pause on a snake head or ladder foot before sliding.
    pub feature_pause_ms: u64,
    /// Duration of the slide animation along a snake or ladder.
    pub slide_duration_ms: u64,
    /// Before the computer takes its turn.
    pub computer_delay_ms: u64,
    /// Before the roll control comes back for the other person.
    pub handoff_delay_ms: u64,
    /// How long the reset control stays locked after a reset.
    pub reset_cooldown_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            roll_delay_ms: 300,
            step_delay_ms: 400,
            feature_pause_ms: 500,
            slide_duration_ms: 1200,
            computer_delay_ms: 1500,
            handoff_delay_ms: 1000,
            reset_cooldown_ms: 3000,
        }
    }
}

impl TimingConfig {
    /// Zero delays everywhere except the reset cooldown.
    ///
    /// Handy for simulations where only the ordering matters.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            roll_delay_ms: 0,
            step_delay_ms: 0,
            feature_pause_ms: 0,
            slide_duration_ms: 0,
            computer_delay_ms: 0,
            handoff_delay_ms: 0,
            ..Self::default()
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed. `None` picks a fresh one per session.
    pub seed: Option<u64>,

    /// Board generation parameters.
    pub board: BoardConfig,

    /// Turn pacing.
    pub timing: TimingConfig,
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replace the board parameters.
    #[must_use]
    pub fn with_board(mut self, board: BoardConfig) -> Self {
        self.board = board;
        self
    }

    /// Replace the turn pacing.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_game() {
        let config = GameConfig::default();

        assert_eq!(config.board.size, 60);
        assert_eq!(config.board.ladder_count, Span::new(2, 5));
        assert_eq!(config.board.snake_count, Span::new(2, 5));
        assert_eq!(config.board.jump, Span::new(6, 18));
        assert_eq!(config.board.max_attempts, 1000);
        assert_eq!(config.board.ladder_start_band(), Span::new(2, 51));
        assert_eq!(config.board.snake_start_band(), Span::new(10, 59));
        assert_eq!(config.timing.reset_cooldown_ms, 3000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_span() {
        let span = Span::new(2, 5);
        assert!(span.contains(2));
        assert!(span.contains(5));
        assert!(!span.contains(6));
        assert!(span.is_ordered());
        assert!(!Span::new(5, 2).is_ordered());
        assert_eq!(format!("{}", span), "2..=5");
    }

    #[test]
    fn test_bands_follow_size() {
        let board = BoardConfig::for_size(100);
        assert_eq!(board.ladder_start_band(), Span::new(2, 91));
        assert_eq!(board.snake_start_band(), Span::new(10, 99));
        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::new()
            .with_seed(9)
            .with_board(
                BoardConfig::default()
                    .with_ladder_count(Span::new(1, 1))
                    .with_snake_count(Span::new(3, 3))
                    .with_jump(Span::new(2, 4))
                    .with_max_attempts(10),
            )
            .with_timing(TimingConfig::instant());

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.board.ladder_count, Span::new(1, 1));
        assert_eq!(config.board.max_attempts, 10);
        assert_eq!(config.timing.step_delay_ms, 0);
        assert_eq!(config.timing.reset_cooldown_ms, 3000);
    }

    #[test]
    fn test_validation_rejects_small_board() {
        let config = GameConfig::new().with_board(BoardConfig::for_size(8));
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_inverted_span() {
        let board = BoardConfig::default().with_jump(Span::new(10, 3));
        let err = board.validate().unwrap_err();
        assert!(err.to_string().contains("board.jump"));
    }

    #[test]
    fn test_validation_rejects_zero_jump_and_attempts() {
        assert!(BoardConfig::default().with_jump(Span::new(0, 3)).validate().is_err());
        assert!(BoardConfig::default().with_max_attempts(0).validate().is_err());
    }

    #[test]
    fn test_validation_rejects_band_touching_ends() {
        let mut board = BoardConfig::default();
        board.ladder_start = Some(Span::new(1, 20));
        assert!(board.validate().is_err());

        let mut board = BoardConfig::default();
        board.snake_start = Some(Span::new(10, 60));
        assert!(board.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GameConfig::new().with_seed(3);
        let text = toml::to_string(&config).unwrap();
        let parsed = GameConfig::from_toml_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_toml_invalid_is_rejected() {
        let err = GameConfig::from_toml_str("[board]\nsize = 5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = GameConfig::from_toml_str("[board\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config =
            GameConfig::load_or_default(Path::new("/definitely/not/here/game.toml")).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = GameConfig::load(Path::new("/definitely/not/here/game.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }
}
