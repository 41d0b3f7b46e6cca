//! Procedural snake and ladder placement.
//!
//! Best effort by construction: each kind gets a target count and a capped
//! number of reject-and-resample attempts. When the cap runs out the
//! remaining features are simply left off, so a board may carry fewer
//! snakes or ladders than its target.

use tracing::{debug, trace};

use crate::core::{BoardConfig, RandomSource, Span, Square};

use super::features::{ConnectorArt, Feature, FeatureKind, FeatureMap};

/// Builds a fresh [`FeatureMap`] for every game.
#[derive(Clone, Debug)]
pub struct BoardGenerator {
    config: BoardConfig,
}

impl BoardGenerator {
    /// Create a generator for the given board parameters.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self { config }
    }

    /// The board parameters.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Generate ladders first, then snakes, on a fresh map.
    pub fn generate<R: RandomSource>(&self, rng: &mut R) -> FeatureMap {
        let mut map = FeatureMap::new();

        let ladders = self.place(&mut map, rng, FeatureKind::Ladder);
        let snakes = self.place(&mut map, rng, FeatureKind::Snake);

        debug!(
            board_size = self.config.size,
            ladders,
            snakes,
            "generated board features"
        );
        map
    }

    /// Place up to a random target count of one kind; returns how many landed.
    fn place<R: RandomSource>(
        &self,
        map: &mut FeatureMap,
        rng: &mut R,
        kind: FeatureKind,
    ) -> usize {
        let (count, band) = match kind {
            FeatureKind::Ladder => (self.config.ladder_count, self.config.ladder_start_band()),
            FeatureKind::Snake => (self.config.snake_count, self.config.snake_start_band()),
        };
        let target = sample(rng, count) as usize;

        let mut placed = 0;
        let mut attempts = 0;
        while placed < target && attempts < self.config.max_attempts {
            attempts += 1;

            let start = sample(rng, band);
            let jump = sample(rng, self.config.jump);
            let Some(candidate) = self.candidate(kind, start, jump) else {
                continue;
            };
            if map.is_used(candidate.start) || map.is_used(candidate.end) {
                continue;
            }

            let art = pick_art(rng, kind);
            if map.insert(candidate.with_art(art)) {
                trace!(%kind, start = candidate.start, end = candidate.end, "placed feature");
                placed += 1;
            }
        }

        if placed < target {
            debug!(%kind, target, placed, attempts, "attempt cap reached");
        }
        placed
    }

    /// Build the feature for a sampled start and jump, if it fits the board.
    fn candidate(&self, kind: FeatureKind, start: Square, jump: u32) -> Option<Feature> {
        let feature = match kind {
            FeatureKind::Ladder => Feature::ladder(start, start.checked_add(jump)?),
            FeatureKind::Snake => Feature::snake(start, start.checked_sub(jump)?),
        };
        feature.is_valid_on(self.config.size).then_some(feature)
    }
}

fn sample<R: RandomSource>(rng: &mut R, span: Span) -> u32 {
    rng.gen_inclusive(span.min, span.max)
}

fn pick_art<R: RandomSource>(rng: &mut R, kind: FeatureKind) -> ConnectorArt {
    let variants = ConnectorArt::variants(kind);
    let index = rng.gen_inclusive(0, variants.len() as u32 - 1) as usize;
    variants[index]
}
