//! Game state: players, turn bookkeeping, the board and history.
//!
//! ## TurnState
//!
//! Whose turn it is, who moved last and the game mode.
//!
//! ## TurnPhase
//!
//! Where the turn machine currently is. The roll guard is derived from it:
//! a roll is only accepted in [`TurnPhase::Idle`].
//!
//! ## GameState
//!
//! Complete session state. Positions are clamped to the board; writes with
//! out-of-range squares are ignored.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::player::{GameMode, PlayerId, PlayerMap, Square};
use crate::board::{Feature, FeatureKind, FeatureMap};

/// Bookkeeping for whose turn it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Player who rolls next. Stays on player 1 in vs-computer mode.
    pub current_player_turn: PlayerId,

    /// Player who completed the most recent move. `None` until someone has.
    pub last_moved_player: Option<PlayerId>,

    /// Vs-computer or vs-human.
    pub mode: GameMode,
}

impl TurnState {
    /// Fresh turn state: player 1 to roll, nobody has moved.
    #[must_use]
    pub fn new(mode: GameMode) -> Self {
        Self {
            current_player_turn: PlayerId::ONE,
            last_moved_player: None,
            mode,
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}

/// The move in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnContext {
    /// Player whose token is moving.
    pub player: PlayerId,
    /// Value shown on the die.
    pub roll: u32,
    /// Square the player stood on when the die was rolled.
    pub from: Square,
}

/// Where the turn machine is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Pre-game menu. Nothing moves.
    #[default]
    Menu,

    /// Waiting for a roll.
    Idle,

    /// Die rolled and announced; stepping starts after the roll delay.
    Rolling(TurnContext),

    /// Token advancing one square at a time.
    Stepping {
        turn: TurnContext,
        remaining: u32,
    },

    /// Paused on a snake head or ladder foot.
    ResolvingFeature {
        turn: TurnContext,
        feature: Feature,
    },

    /// Token sliding to the feature's end.
    SlidingFeature {
        turn: TurnContext,
        feature: Feature,
    },

    /// Move finished without a win; waiting to hand control to `next`.
    TurnComplete { next: PlayerId },

    /// Game over. Only a new game leaves this phase.
    Won(PlayerId),
}

impl TurnPhase {
    /// Check if a roll is being played out.
    #[must_use]
    pub fn is_roll_in_flight(&self) -> bool {
        matches!(
            self,
            TurnPhase::Rolling(_)
                | TurnPhase::Stepping { .. }
                | TurnPhase::ResolvingFeature { .. }
                | TurnPhase::SlidingFeature { .. }
                | TurnPhase::TurnComplete { .. }
        )
    }

    /// The move in progress, if any.
    #[must_use]
    pub fn turn(&self) -> Option<TurnContext> {
        match *self {
            TurnPhase::Rolling(turn)
            | TurnPhase::Stepping { turn, .. }
            | TurnPhase::ResolvingFeature { turn, .. }
            | TurnPhase::SlidingFeature { turn, .. } => Some(turn),
            _ => None,
        }
    }
}

/// One completed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Who moved.
    pub player: PlayerId,
    /// Value on the die.
    pub roll: u32,
    /// Square before the roll.
    pub from: Square,
    /// Square reached by stepping.
    pub landed: Square,
    /// Square after any snake or ladder.
    pub finish: Square,
    /// Snake or ladder taken, if any.
    pub feature: Option<FeatureKind>,
}

/// Full session state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board_size: Square,

    /// Square per player; 0 = not placed.
    positions: PlayerMap<Square>,

    /// Whose turn, who moved last, which mode.
    pub turn: TurnState,

    /// Turn machine phase.
    pub phase: TurnPhase,

    /// Snakes and ladders of the current game.
    features: FeatureMap,

    /// Completed moves of the current game.
    history: Vector<TurnRecord>,
}

impl GameState {
    /// Create an empty state in the menu, both tokens off the board.
    #[must_use]
    pub fn new(board_size: Square) -> Self {
        Self {
            board_size,
            positions: PlayerMap::with_value(0),
            turn: TurnState::default(),
            phase: TurnPhase::Menu,
            features: FeatureMap::new(),
            history: Vector::new(),
        }
    }

    /// Number of squares; also the winning square.
    #[must_use]
    pub fn board_size(&self) -> Square {
        self.board_size
    }

    /// Begin a new game: both tokens to square 1, player 1 to roll, fresh
    /// board and history.
    pub fn start(&mut self, mode: GameMode, features: FeatureMap) {
        for (_, pos) in self.positions.iter_mut() {
            *pos = 0;
        }
        for player in PlayerId::all() {
            self.place_player(player, 1);
        }
        self.turn = TurnState::new(mode);
        self.features = features;
        self.history = Vector::new();
        self.phase = TurnPhase::Idle;
    }

    // === Positions ===

    /// Current square of a player (0 if not placed).
    #[must_use]
    pub fn position(&self, player: PlayerId) -> Square {
        self.positions[player]
    }

    /// Put a player on a square. Squares outside `1..=board_size` are ignored.
    ///
    /// Returns whether the position changed.
    pub fn place_player(&mut self, player: PlayerId, square: Square) -> bool {
        if !(1..=self.board_size).contains(&square) {
            return false;
        }
        self.positions[player] = square;
        true
    }

    /// Check if a player stands on the winning square.
    #[must_use]
    pub fn is_on_last_square(&self, player: PlayerId) -> bool {
        self.positions[player] == self.board_size
    }

    // === Board ===

    /// Snakes and ladders of the current game.
    #[must_use]
    pub fn features(&self) -> &FeatureMap {
        &self.features
    }

    /// Replace the board wholesale.
    pub fn replace_features(&mut self, features: FeatureMap) {
        self.features = features;
    }

    // === Turns ===

    /// Check if a roll would be accepted now.
    #[must_use]
    pub fn can_roll(&self) -> bool {
        self.phase == TurnPhase::Idle
    }

    /// Check if a roll is being played out.
    #[must_use]
    pub fn is_roll_in_flight(&self) -> bool {
        self.phase.is_roll_in_flight()
    }

    /// Record a finished move and make its player the last mover.
    pub fn record_turn(&mut self, record: TurnRecord) {
        self.turn.last_moved_player = Some(record.player);
        self.history.push_back(record);
    }

    /// Completed moves of the current game, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// The winner, if the last mover stands on the final square.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.turn
            .last_moved_player
            .filter(|&p| self.is_on_last_square(p))
    }
}
