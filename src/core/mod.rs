//! Core engine types: players, state, RNG, configuration, errors.
//!
//! These are the building blocks every other module leans on. Nothing here
//! schedules or renders anything.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{BoardConfig, GameConfig, Span, TimingConfig, MIN_BOARD_SIZE};
pub use error::ConfigError;
pub use player::{GameMode, PlayerId, PlayerMap, Square, PLAYER_COUNT};
pub use rng::{GameRng, GameRngState, RandomSource, DIE_FACES};
pub use state::{GameState, TurnContext, TurnPhase, TurnRecord, TurnState};
