//! Engine-emitted events.
//!
//! Events describe what happened, in order. The session forwards them to the
//! [`Presenter`](super::Presenter) and keeps them for
//! [`Session::drain_events`](super::Session::drain_events), so a view can
//! either implement the presenter hooks or replay the stream.

use serde::{Deserialize, Serialize};

use crate::board::Feature;
use crate::core::{GameMode, PlayerId, Square};

/// Something the presentation layer may want to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A new game began.
    GameStarted { mode: GameMode },

    /// A board was installed. The features are on the session state.
    BoardGenerated { ladders: usize, snakes: usize },

    /// The status line should be emptied.
    StatusCleared,

    /// A die was rolled.
    Rolled {
        player: PlayerId,
        value: u32,
        message: String,
    },

    /// A token now stands on `square`.
    Moved { player: PlayerId, square: Square },

    /// A token stopped on a snake head or ladder foot.
    FeatureReached { player: PlayerId, feature: Feature },

    /// A token started sliding along a feature.
    Sliding { player: PlayerId, feature: Feature },

    /// Control passes to the other person (vs-human mode).
    TurnPassed { next: PlayerId },

    /// The roll control became enabled or disabled.
    RollControl { enabled: bool },

    /// The reset control became enabled or disabled.
    ResetControl { enabled: bool },

    /// Game over.
    Won { player: PlayerId, message: String },

    /// The pre-game menu appeared.
    MenuShown,

    /// The pre-game menu went away.
    MenuHidden,
}

impl GameEvent {
    /// Player the event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::Rolled { player, .. }
            | GameEvent::Moved { player, .. }
            | GameEvent::FeatureReached { player, .. }
            | GameEvent::Sliding { player, .. }
            | GameEvent::Won { player, .. } => Some(*player),
            GameEvent::TurnPassed { next } => Some(*next),
            _ => None,
        }
    }
}
