//! Snakes, ladders and the map that holds them.
//!
//! ## FeatureMap
//!
//! Two disjoint mappings, `ladders: start → end` with `end > start` and
//! `snakes: start → end` with `end < start`. A square hosts at most one
//! feature endpoint, so landing on a feature's end never chains into another
//! feature. Maps are replaced wholesale between games, never edited during
//! one.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::Square;

/// Light green highlight for a ladder's foot (ARGB).
pub const LADDER_START_HIGHLIGHT: u32 = 0xFFBB_F2C6;

/// Light pink highlight for a snake's head (ARGB).
pub const SNAKE_START_HIGHLIGHT: u32 = 0xFFF8_C6CF;

/// Dark blue at 25% alpha for any destination square (ARGB).
pub const DESTINATION_HIGHLIGHT: u32 = 0x4000_008B;

/// Ladder or snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    /// Carries a player up the board.
    Ladder,
    /// Sends a player back down.
    Snake,
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureKind::Ladder => write!(f, "ladder"),
            FeatureKind::Snake => write!(f, "snake"),
        }
    }
}

/// Interchangeable connector artwork. Purely cosmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorArt {
    BrownLadder,
    RedLadder,
    GreenLadder,
    YellowLadder,
    GreenSnake,
    PinkSnake,
    YellowSnake,
    PurpleSnake,
}

impl ConnectorArt {
    /// Artwork variants for ladders.
    pub const LADDERS: [ConnectorArt; 4] = [
        ConnectorArt::BrownLadder,
        ConnectorArt::RedLadder,
        ConnectorArt::GreenLadder,
        ConnectorArt::YellowLadder,
    ];

    /// Artwork variants for snakes.
    pub const SNAKES: [ConnectorArt; 4] = [
        ConnectorArt::GreenSnake,
        ConnectorArt::PinkSnake,
        ConnectorArt::YellowSnake,
        ConnectorArt::PurpleSnake,
    ];

    /// Variants that may be drawn for `kind`.
    #[must_use]
    pub fn variants(kind: FeatureKind) -> &'static [ConnectorArt] {
        match kind {
            FeatureKind::Ladder => &Self::LADDERS,
            FeatureKind::Snake => &Self::SNAKES,
        }
    }

    /// Default artwork for `kind`.
    #[must_use]
    pub fn default_for(kind: FeatureKind) -> Self {
        Self::variants(kind)[0]
    }
}

/// A single snake or ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    /// Ladder or snake.
    pub kind: FeatureKind,
    /// Square that triggers the feature.
    pub start: Square,
    /// Square the player ends up on.
    pub end: Square,
    /// Render hint.
    pub art: ConnectorArt,
}

impl Feature {
    /// A ladder from `start` up to `end`, with default artwork.
    #[must_use]
    pub fn ladder(start: Square, end: Square) -> Self {
        Self {
            kind: FeatureKind::Ladder,
            start,
            end,
            art: ConnectorArt::default_for(FeatureKind::Ladder),
        }
    }

    /// A snake from `start` down to `end`, with default artwork.
    #[must_use]
    pub fn snake(start: Square, end: Square) -> Self {
        Self {
            kind: FeatureKind::Snake,
            start,
            end,
            art: ConnectorArt::default_for(FeatureKind::Snake),
        }
    }

    /// Set the artwork (builder pattern).
    #[must_use]
    pub fn with_art(mut self, art: ConnectorArt) -> Self {
        self.art = art;
        self
    }

    /// Squares travelled by the slide.
    #[must_use]
    pub fn length(&self) -> u32 {
        self.start.abs_diff(self.end)
    }

    /// Highlight colour for the start square (ARGB).
    #[must_use]
    pub fn start_highlight(&self) -> u32 {
        match self.kind {
            FeatureKind::Ladder => LADDER_START_HIGHLIGHT,
            FeatureKind::Snake => SNAKE_START_HIGHLIGHT,
        }
    }

    /// Highlight colour for the end square (ARGB).
    #[must_use]
    pub fn end_highlight(&self) -> u32 {
        DESTINATION_HIGHLIGHT
    }

    /// Whether the feature points the right way and stays off the first and
    /// last squares of a board of `board_size` squares.
    #[must_use]
    pub fn is_valid_on(&self, board_size: Square) -> bool {
        let inside = |sq: Square| sq > 1 && sq < board_size;
        let oriented = match self.kind {
            FeatureKind::Ladder => self.end > self.start,
            FeatureKind::Snake => self.end < self.start,
        };
        oriented && inside(self.start) && inside(self.end)
    }
}

/// The snakes and ladders of one game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureMap {
    /// Features in insertion order.
    features: Vec<Feature>,
    /// Index into `features` by start square.
    by_start: FxHashMap<Square, usize>,
    /// Every start and end square in use.
    used: FxHashSet<Square>,
}

impl FeatureMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a feature if both of its squares are free.
    ///
    /// Returns false and leaves the map untouched if the feature points the
    /// wrong way, uses the same square twice, or touches a used square.
    /// Board bounds are checked by [`Feature::is_valid_on`].
    pub fn insert(&mut self, feature: Feature) -> bool {
        let oriented = match feature.kind {
            FeatureKind::Ladder => feature.end > feature.start,
            FeatureKind::Snake => feature.end < feature.start,
        };
        if !oriented || self.is_used(feature.start) || self.is_used(feature.end) {
            return false;
        }

        self.by_start.insert(feature.start, self.features.len());
        self.used.insert(feature.start);
        self.used.insert(feature.end);
        self.features.push(feature);
        true
    }

    /// Add a ladder (builder pattern). Conflicting ladders are dropped.
    #[must_use]
    pub fn with_ladder(mut self, start: Square, end: Square) -> Self {
        self.insert(Feature::ladder(start, end));
        self
    }

    /// Add a snake (builder pattern). Conflicting snakes are dropped.
    #[must_use]
    pub fn with_snake(mut self, start: Square, end: Square) -> Self {
        self.insert(Feature::snake(start, end));
        self
    }

    /// Feature triggered by landing on `square`, if any.
    #[must_use]
    pub fn at(&self, square: Square) -> Option<&Feature> {
        self.by_start.get(&square).map(|&i| &self.features[i])
    }

    /// Destination of the ladder starting at `square`.
    #[must_use]
    pub fn ladder_end(&self, square: Square) -> Option<Square> {
        self.at(square)
            .filter(|f| f.kind == FeatureKind::Ladder)
            .map(|f| f.end)
    }

    /// Destination of the snake starting at `square`.
    #[must_use]
    pub fn snake_end(&self, square: Square) -> Option<Square> {
        self.at(square)
            .filter(|f| f.kind == FeatureKind::Snake)
            .map(|f| f.end)
    }

    /// Check if a square is the start or end of any feature.
    #[must_use]
    pub fn is_used(&self, square: Square) -> bool {
        self.used.contains(&square)
    }

    /// All features in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// All ladders in insertion order.
    pub fn ladders(&self) -> impl Iterator<Item = &Feature> {
        self.iter().filter(|f| f.kind == FeatureKind::Ladder)
    }

    /// All snakes in insertion order.
    pub fn snakes(&self) -> impl Iterator<Item = &Feature> {
        self.iter().filter(|f| f.kind == FeatureKind::Snake)
    }

    /// Number of ladders.
    #[must_use]
    pub fn ladder_count(&self) -> usize {
        self.ladders().count()
    }

    /// Number of snakes.
    #[must_use]
    pub fn snake_count(&self) -> usize {
        self.snakes().count()
    }

    /// Total number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check if the board has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
