//! The move/turn state machine.
//!
//! `TurnEngine` is a transition function: given the state and an input (a
//! roll request or a scheduled [`TurnTask`]) it updates the state and
//! returns the side effects to perform. It never touches the clock or the
//! view directly, which keeps every transition testable on its own.
//!
//! ```text
//! Idle ─roll─▶ Rolling ─Step─▶ Stepping ─Step…─▶ (land)
//!   (land) ─feature─▶ ResolvingFeature ─BeginSlide─▶ SlidingFeature ─FinishSlide─▶ (complete)
//!   (land) ─no feature─▶ (complete)
//!   (complete) ─on last square─▶ Won
//!   (complete) ─otherwise─▶ TurnComplete ─Handoff─▶ Idle | computer Rolling
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::board::FeatureKind;
use crate::core::{
    GameMode, GameState, PlayerId, RandomSource, Square, TimingConfig, TurnContext, TurnPhase,
    TurnRecord,
};

use super::event::GameEvent;
use super::messages;

/// Scheduled continuation of a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnTask {
    /// Advance one square, or land when the roll is used up.
    Step,
    /// Pause on a feature is over; start sliding.
    BeginSlide,
    /// Slide animation finished; snap to the feature's end.
    FinishSlide,
    /// Give control to the next actor.
    Handoff,
}

/// Side effect requested by a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Publish an event.
    Emit(GameEvent),

    /// Run `task` after `delay_ms`.
    Schedule { delay_ms: u64, task: TurnTask },

    /// Animate a token, then run `then`. If the animation cannot run, `then`
    /// must run immediately.
    Animate {
        player: PlayerId,
        square: Square,
        duration_ms: u64,
        then: TurnTask,
    },
}

/// Effects of one transition. Most transitions produce at most four.
pub type Effects = SmallVec<[Effect; 4]>;

/// Drives turns: roll → step → resolve feature → hand off → win check.
#[derive(Clone, Debug, Default)]
pub struct TurnEngine {
    timing: TimingConfig,
}

impl TurnEngine {
    /// Create an engine with the given pacing.
    #[must_use]
    pub fn new(timing: TimingConfig) -> Self {
        Self { timing }
    }

    /// The pacing in use.
    #[must_use]
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Roll for the player whose turn it is.
    ///
    /// Returns `None` without touching the state unless the phase is
    /// [`TurnPhase::Idle`].
    pub fn roll<R: RandomSource>(&self, state: &mut GameState, rng: &mut R) -> Option<Effects> {
        if !state.can_roll() {
            return None;
        }

        let player = state.turn.current_player_turn;
        let mut fx = Effects::new();
        fx.push(Effect::Emit(GameEvent::RollControl { enabled: false }));
        self.announce_roll(state, player, rng, &mut fx);
        fx.push(Effect::Schedule {
            delay_ms: self.timing.roll_delay_ms,
            task: TurnTask::Step,
        });
        Some(fx)
    }

    /// Handle a scheduled task.
    ///
    /// Tasks that do not fit the current phase are ignored.
    pub fn handle<R: RandomSource>(
        &self,
        state: &mut GameState,
        task: TurnTask,
        rng: &mut R,
    ) -> Effects {
        let mut fx = Effects::new();
        match task {
            TurnTask::Step => self.step(state, &mut fx),
            TurnTask::BeginSlide => self.begin_slide(state, &mut fx),
            TurnTask::FinishSlide => self.finish_slide(state, &mut fx),
            TurnTask::Handoff => self.handoff(state, rng, &mut fx),
        }
        fx
    }

    fn announce_roll<R: RandomSource>(
        &self,
        state: &mut GameState,
        player: PlayerId,
        rng: &mut R,
        fx: &mut Effects,
    ) {
        let value = rng.roll_die();
        let turn = TurnContext {
            player,
            roll: value,
            from: state.position(player),
        };
        debug!(%player, value, from = turn.from, "rolled");

        state.phase = TurnPhase::Rolling(turn);
        fx.push(Effect::Emit(GameEvent::Rolled {
            player,
            value,
            message: messages::rolled(state.turn.mode, player, value),
        }));
    }

    fn step(&self, state: &mut GameState, fx: &mut Effects) {
        let (turn, remaining) = match state.phase {
            TurnPhase::Rolling(turn) => (turn, turn.roll),
            TurnPhase::Stepping { turn, remaining } => (turn, remaining),
            other => {
                trace!(phase = ?other, "stale step ignored");
                return;
            }
        };

        let position = state.position(turn.player);
        if remaining == 0 || position >= state.board_size() {
            self.land(state, turn, fx);
            return;
        }

        let next = position + 1;
        state.place_player(turn.player, next);
        state.phase = TurnPhase::Stepping {
            turn,
            remaining: remaining - 1,
        };
        fx.push(Effect::Emit(GameEvent::Moved {
            player: turn.player,
            square: next,
        }));
        fx.push(Effect::Schedule {
            delay_ms: self.timing.step_delay_ms,
            task: TurnTask::Step,
        });
    }

    fn land(&self, state: &mut GameState, turn: TurnContext, fx: &mut Effects) {
        let landed = state.position(turn.player);
        match state.features().at(landed).copied() {
            Some(feature) => {
                debug!(player = %turn.player, %feature.kind, from = feature.start, to = feature.end, "landed on feature");
                state.phase = TurnPhase::ResolvingFeature { turn, feature };
                fx.push(Effect::Emit(GameEvent::FeatureReached {
                    player: turn.player,
                    feature,
                }));
                fx.push(Effect::Schedule {
                    delay_ms: self.timing.feature_pause_ms,
                    task: TurnTask::BeginSlide,
                });
            }
            None => self.complete(state, turn, landed, None, fx),
        }
    }

    fn begin_slide(&self, state: &mut GameState, fx: &mut Effects) {
        let TurnPhase::ResolvingFeature { turn, feature } = state.phase else {
            trace!(phase = ?state.phase, "stale slide start ignored");
            return;
        };

        state.phase = TurnPhase::SlidingFeature { turn, feature };
        fx.push(Effect::Emit(GameEvent::Sliding {
            player: turn.player,
            feature,
        }));
        fx.push(Effect::Animate {
            player: turn.player,
            square: feature.end,
            duration_ms: self.timing.slide_duration_ms,
            then: TurnTask::FinishSlide,
        });
    }

    fn finish_slide(&self, state: &mut GameState, fx: &mut Effects) {
        let TurnPhase::SlidingFeature { turn, feature } = state.phase else {
            trace!(phase = ?state.phase, "stale slide finish ignored");
            return;
        };

        // No lookup at the destination: slides never chain.
        state.place_player(turn.player, feature.end);
        fx.push(Effect::Emit(GameEvent::Moved {
            player: turn.player,
            square: feature.end,
        }));
        self.complete(state, turn, feature.start, Some(feature.kind), fx);
    }

    fn complete(
        &self,
        state: &mut GameState,
        turn: TurnContext,
        landed: Square,
        feature: Option<FeatureKind>,
        fx: &mut Effects,
    ) {
        state.record_turn(TurnRecord {
            player: turn.player,
            roll: turn.roll,
            from: turn.from,
            landed,
            finish: state.position(turn.player),
            feature,
        });

        let mode = state.turn.mode;
        if let Some(winner) = state.winner() {
            info!(player = %winner, %mode, "game won");
            state.phase = TurnPhase::Won(winner);
            fx.push(Effect::Emit(GameEvent::Won {
                player: winner,
                message: messages::won(mode, winner),
            }));
            return;
        }

        match mode {
            GameMode::VsComputer if mode.is_computer(turn.player) => {
                state.phase = TurnPhase::Idle;
                fx.push(Effect::Emit(GameEvent::RollControl { enabled: true }));
            }
            GameMode::VsComputer => {
                state.phase = TurnPhase::TurnComplete {
                    next: PlayerId::TWO,
                };
                fx.push(Effect::Schedule {
                    delay_ms: self.timing.computer_delay_ms,
                    task: TurnTask::Handoff,
                });
            }
            GameMode::VsHuman => {
                let next = turn.player.other();
                state.turn.current_player_turn = next;
                state.phase = TurnPhase::TurnComplete { next };
                fx.push(Effect::Emit(GameEvent::TurnPassed { next }));
                fx.push(Effect::Schedule {
                    delay_ms: self.timing.handoff_delay_ms,
                    task: TurnTask::Handoff,
                });
            }
        }
    }

    fn handoff<R: RandomSource>(&self, state: &mut GameState, rng: &mut R, fx: &mut Effects) {
        let TurnPhase::TurnComplete { next } = state.phase else {
            trace!(phase = ?state.phase, "stale handoff ignored");
            return;
        };

        if state.turn.mode.is_computer(next) {
            // The computer skips the roll delay and starts stepping at once.
            self.announce_roll(state, next, rng, fx);
            self.step(state, fx);
        } else {
            state.phase = TurnPhase::Idle;
            fx.push(Effect::Emit(GameEvent::RollControl { enabled: true }));
        }
    }
}
