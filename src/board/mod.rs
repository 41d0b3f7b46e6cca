//! Board features and their generation.
//!
//! - `features`: `Feature`, `FeatureKind`, `FeatureMap` and render hints
//!   (connector artwork, highlight colours)
//! - `generator`: `BoardGenerator`, the best-effort random placer
//!
//! ## Example
//!
//! ```
//! use snakes_ladders::board::BoardGenerator;
//! use snakes_ladders::core::{BoardConfig, GameRng};
//!
//! let generator = BoardGenerator::new(BoardConfig::default());
//! let map = generator.generate(&mut GameRng::new(42));
//!
//! for feature in map.iter() {
//!     assert!(feature.is_valid_on(60));
//! }
//! ```

mod features;
mod generator;

pub use features::{
    ConnectorArt, Feature, FeatureKind, FeatureMap, DESTINATION_HIGHLIGHT,
    LADDER_START_HIGHLIGHT, SNAKE_START_HIGHLIGHT,
};
pub use generator::BoardGenerator;
