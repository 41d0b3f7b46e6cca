//! # snakes-ladders
//!
//! A two-player Snakes and Ladders engine: random board generation, a turn
//! state machine and cancellable timed sequencing, with rendering left to
//! whoever implements [`Presenter`].
//!
//! ## Design Principles
//!
//! 1. **Engine Owns the Truth**: Positions, turns and the winner live in
//!    [`GameState`]. The view is told what happened and never asked.
//!
//! 2. **Deterministic**: Every random draw goes through a [`RandomSource`].
//!    The same seed gives the same board and the same dice.
//!
//! 3. **Virtual Time**: Every delay is a task on one [`Scheduler`]. Nothing
//!    sleeps; the caller advances the clock.
//!
//! ## Architecture
//!
//! - **Effects, not callbacks**: [`TurnEngine`] transitions return effects
//!   (emit, schedule, animate). [`Session`] applies them, so each transition
//!   is testable without a clock or a view.
//!
//! - **Persistent history**: Completed moves are kept in an `im::Vector`, so
//!   snapshotting the state is cheap.
//!
//! ## Modules
//!
//! - `core`: Players, state, RNG, configuration, errors
//! - `board`: Snakes, ladders and the board generator
//! - `schedule`: Virtual-clock task queue
//! - `engine`: Turn engine, session, events, presenter hooks

pub mod board;
pub mod core;
pub mod engine;
pub mod schedule;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, ConfigError, GameConfig, GameMode, GameRng, GameState, PlayerId, PlayerMap,
    RandomSource, Square, TimingConfig, TurnPhase, TurnRecord,
};

pub use crate::board::{BoardGenerator, ConnectorArt, Feature, FeatureKind, FeatureMap};

pub use crate::schedule::{Scheduler, TaskId};

pub use crate::engine::{
    Effect, GameEvent, HeadlessPresenter, Presenter, Session, SessionTask, TurnEngine, TurnTask,
};
