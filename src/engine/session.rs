//! Game session: lifecycle, timing and presentation.
//!
//! A [`Session`] owns everything one running game needs: the state, the
//! board generator, the turn engine, a virtual-clock [`Scheduler`], the dice
//! and a [`Presenter`]. All transitions run on the caller's thread; time
//! moves only when the caller calls [`Session::advance`] or
//! [`Session::run_until_idle`].
//!
//! ## Example Usage
//!
//! ```
//! use snakes_ladders::core::{GameConfig, GameMode};
//! use snakes_ladders::engine::{HeadlessPresenter, Session};
//!
//! let mut session = Session::new(GameConfig::new().with_seed(7), HeadlessPresenter)?;
//! session.start_game(GameMode::VsComputer);
//!
//! assert!(session.roll_dice());
//! assert!(!session.roll_dice(), "a roll is already in flight");
//!
//! // Play out the move and the computer's reply.
//! assert!(session.run_until_idle(60_000));
//! assert!(session.state().can_roll() || session.state().winner().is_some());
//! # Ok::<(), snakes_ladders::core::ConfigError>(())
//! ```

use tracing::{debug, info, instrument, trace, warn};

use crate::board::{BoardGenerator, FeatureMap};
use crate::core::{
    ConfigError, GameConfig, GameMode, GameRng, GameState, PlayerId, RandomSource, Square,
    TurnPhase,
};
use crate::schedule::Scheduler;

use super::event::GameEvent;
use super::messages::WINNER_TITLE;
use super::presenter::{HeadlessPresenter, Presenter};
use super::turn::{Effect, Effects, TurnEngine, TurnTask};

/// Work queued on the session clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionTask {
    /// Continue the turn in progress.
    Turn(TurnTask),
    /// End of the reset cooldown.
    ReleaseReset,
}

/// One running game and everything attached to it.
pub struct Session<P: Presenter = HeadlessPresenter, R: RandomSource = GameRng> {
    config: GameConfig,
    engine: TurnEngine,
    generator: BoardGenerator,
    state: GameState,
    scheduler: Scheduler<SessionTask>,
    rng: R,
    presenter: P,
    events: Vec<GameEvent>,
    reset_blocked: bool,
}

impl<P: Presenter> Session<P, GameRng> {
    /// Create a session seeded from the config, or from entropy when the
    /// config has no seed.
    pub fn new(config: GameConfig, presenter: P) -> Result<Self, ConfigError> {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        info!(seed = rng.seed(), "session seeded");
        Self::with_rng(config, presenter, rng)
    }
}

impl<P: Presenter, R: RandomSource> Session<P, R> {
    /// Create a session with an explicit random source.
    ///
    /// The session opens in the menu with a generated board on display and
    /// both tokens on square 1.
    pub fn with_rng(config: GameConfig, presenter: P, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut session = Self {
            engine: TurnEngine::new(config.timing.clone()),
            generator: BoardGenerator::new(config.board.clone()),
            state: GameState::new(config.board.size),
            scheduler: Scheduler::new(),
            rng,
            presenter,
            events: Vec::new(),
            reset_blocked: false,
            config,
        };

        let features = session.generator.generate(&mut session.rng);
        session.install_board(features);
        for player in PlayerId::all() {
            session.put_token(player, 1);
        }
        session.emit(GameEvent::MenuShown);
        Ok(session)
    }

    // === Lifecycle ===

    /// Start a new game on a freshly generated board.
    ///
    /// Valid from any phase. Turn work still queued from the previous game is
    /// dropped; a running reset cooldown is left alone.
    #[instrument(skip(self))]
    pub fn start_game(&mut self, mode: GameMode) {
        let features = self.generator.generate(&mut self.rng);
        self.begin(mode, features);
    }

    /// Start a new game on a given board.
    ///
    /// Features that do not fit the board are dropped with a warning.
    #[instrument(skip(self, features), fields(features = features.len()))]
    pub fn start_game_with(&mut self, mode: GameMode, features: FeatureMap) {
        let features = self.fit_to_board(features);
        self.begin(mode, features);
    }

    fn begin(&mut self, mode: GameMode, features: FeatureMap) {
        let dropped = self
            .scheduler
            .cancel_where(|task| matches!(task, SessionTask::Turn(_)));
        self.presenter.cancel_animations();

        self.state.start(mode, FeatureMap::new());
        info!(%mode, dropped, "game started");

        self.emit(GameEvent::GameStarted { mode });
        self.emit(GameEvent::MenuHidden);
        for player in PlayerId::all() {
            self.put_token(player, 1);
        }
        self.emit(GameEvent::StatusCleared);
        self.install_board(features);
        self.emit(GameEvent::RollControl { enabled: true });
    }

    /// Roll for the player whose turn it is.
    ///
    /// Returns false when the roll is not accepted: no game running, a roll
    /// already in flight, or the game is over.
    #[instrument(skip(self))]
    pub fn roll_dice(&mut self) -> bool {
        let Some(effects) = self.engine.roll(&mut self.state, &mut self.rng) else {
            debug!(phase = ?self.state.phase, "roll rejected");
            return false;
        };
        self.apply(effects);
        true
    }

    /// Abandon the current game and return to the menu.
    ///
    /// Ignored while the previous reset's cooldown is running. Returns
    /// whether the reset happened.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> bool {
        if self.reset_blocked {
            debug!("reset rejected during cooldown");
            return false;
        }

        let dropped = self.scheduler.cancel_all();
        self.presenter.cancel_animations();
        self.state.phase = TurnPhase::Menu;
        self.reset_blocked = true;
        info!(dropped, "session reset");

        self.emit(GameEvent::RollControl { enabled: false });
        self.emit(GameEvent::MenuShown);
        self.emit(GameEvent::ResetControl { enabled: false });
        self.scheduler
            .schedule(self.config.timing.reset_cooldown_ms, SessionTask::ReleaseReset);
        true
    }

    /// The game-over dialog was dismissed: show the menu.
    ///
    /// Returns false if no game is over.
    pub fn acknowledge_outcome(&mut self) -> bool {
        if !matches!(self.state.phase, TurnPhase::Won(_)) {
            return false;
        }
        self.state.phase = TurnPhase::Menu;
        self.emit(GameEvent::MenuShown);
        true
    }

    // === Clock ===

    /// Move the clock forward by `ms`, running every task that falls due.
    pub fn advance(&mut self, ms: u64) {
        let deadline = self.scheduler.now().saturating_add(ms);
        while let Some(task) = self.scheduler.pop_due(deadline) {
            self.dispatch(task);
        }
        self.scheduler.advance_to(deadline);
    }

    /// Run queued tasks in order until none are left or `limit_ms` of clock
    /// time has passed.
    ///
    /// Returns true if the queue drained.
    pub fn run_until_idle(&mut self, limit_ms: u64) -> bool {
        let deadline = self.scheduler.now().saturating_add(limit_ms);
        while let Some(task) = self.scheduler.pop_due(deadline) {
            self.dispatch(task);
        }
        self.scheduler.is_idle()
    }

    /// Current clock time in milliseconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        self.scheduler.now()
    }

    /// Tasks waiting on the clock.
    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    fn dispatch(&mut self, task: SessionTask) {
        trace!(?task, now = self.scheduler.now(), "dispatch");
        match task {
            SessionTask::ReleaseReset => {
                self.reset_blocked = false;
                self.emit(GameEvent::ResetControl { enabled: true });
            }
            SessionTask::Turn(task) => {
                let effects = self.engine.handle(&mut self.state, task, &mut self.rng);
                self.apply(effects);
            }
        }
    }

    fn apply(&mut self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::Emit(event) => self.emit(event),
                Effect::Schedule { delay_ms, task } => {
                    self.scheduler.schedule(delay_ms, SessionTask::Turn(task));
                }
                Effect::Animate {
                    player,
                    square,
                    duration_ms,
                    then,
                } => {
                    let started = self.presenter.has_square(square)
                        && self.presenter.animate_token(player, square, duration_ms);
                    if started {
                        self.scheduler.schedule(duration_ms, SessionTask::Turn(then));
                    } else {
                        debug!(%player, square, "animation unavailable, continuing at once");
                        let effects = self.engine.handle(&mut self.state, then, &mut self.rng);
                        self.apply(effects);
                    }
                }
            }
        }
    }

    // === Board and tokens ===

    fn install_board(&mut self, features: FeatureMap) {
        let ladders = features.ladder_count();
        let snakes = features.snake_count();
        self.state.replace_features(features);
        self.emit(GameEvent::BoardGenerated { ladders, snakes });
    }

    fn fit_to_board(&self, features: FeatureMap) -> FeatureMap {
        let size = self.state.board_size();
        if features.iter().all(|f| f.is_valid_on(size)) {
            return features;
        }

        let mut fitted = FeatureMap::new();
        for feature in features.iter() {
            if feature.is_valid_on(size) {
                fitted.insert(*feature);
            } else {
                warn!(%feature.kind, start = feature.start, end = feature.end, size, "feature does not fit the board");
            }
        }
        fitted
    }

    fn put_token(&mut self, player: PlayerId, square: Square) {
        if self.state.place_player(player, square) {
            self.emit(GameEvent::Moved { player, square });
        }
    }

    /// Put player `number` (1 or 2) on `square`.
    ///
    /// Unknown players and squares outside the board are ignored. Meant for
    /// setting up positions between turns.
    pub fn place_player(&mut self, number: u8, square: Square) {
        match PlayerId::new(number) {
            Some(player) => self.put_token(player, square),
            None => debug!(number, "unknown player ignored"),
        }
    }

    /// Square of player `number` (1 or 2); 0 for an unknown player.
    #[must_use]
    pub fn position(&self, number: u8) -> Square {
        PlayerId::new(number).map_or(0, |player| self.state.position(player))
    }

    // === Events and presentation ===

    fn emit(&mut self, event: GameEvent) {
        match &event {
            GameEvent::BoardGenerated { .. } => self.presenter.render_board(self.state.features()),
            GameEvent::StatusCleared => self.presenter.show_status(""),
            GameEvent::Rolled { message, .. } => self.presenter.show_status(message),
            GameEvent::Moved { player, square } => {
                if self.presenter.has_square(*square) {
                    self.presenter.place_token(*player, *square);
                } else {
                    debug!(%player, square, "square not shown, token left in place");
                }
            }
            GameEvent::Won { message, .. } => self.presenter.show_outcome(WINNER_TITLE, message),
            GameEvent::RollControl { enabled } => self.presenter.set_roll_enabled(*enabled),
            GameEvent::ResetControl { enabled } => self.presenter.set_reset_enabled(*enabled),
            GameEvent::MenuShown => self.presenter.show_menu(true),
            GameEvent::MenuHidden => self.presenter.show_menu(false),
            GameEvent::GameStarted { .. }
            | GameEvent::FeatureReached { .. }
            | GameEvent::Sliding { .. }
            | GameEvent::TurnPassed { .. } => {}
        }
        trace!(?event, "event");
        self.events.push(event);
    }

    /// Take every event emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if the reset cooldown is running.
    #[must_use]
    pub fn is_reset_blocked(&self) -> bool {
        self.reset_blocked
    }

    /// Read-only view of the game.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Configuration the session was built with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Dice showing a fixed sequence of faces, then ones. Everything else
    /// draws the low end of its range.
    struct Scripted(VecDeque<u32>);

    impl Scripted {
        fn new(faces: &[u32]) -> Self {
            Self(faces.iter().copied().collect())
        }
    }

    impl RandomSource for Scripted {
        fn gen_inclusive(&mut self, low: u32, _high: u32) -> u32 {
            low
        }

        fn roll_die(&mut self) -> u32 {
            self.0.pop_front().unwrap_or(1)
        }
    }

    #[derive(Default)]
    struct Recorder {
        roll_enabled: Option<bool>,
        reset_enabled: Option<bool>,
        menu_visible: Option<bool>,
        status: String,
        outcome: Option<(String, String)>,
        animations: usize,
        cancels: usize,
        refuse_animation: bool,
    }

    impl Presenter for Recorder {
        fn animate_token(&mut self, _: PlayerId, _: Square, _: u64) -> bool {
            self.animations += 1;
            !self.refuse_animation
        }

        fn cancel_animations(&mut self) {
            self.cancels += 1;
        }

        fn show_status(&mut self, text: &str) {
            self.status = text.to_string();
        }

        fn show_outcome(&mut self, title: &str, message: &str) {
            self.outcome = Some((title.to_string(), message.to_string()));
        }

        fn show_menu(&mut self, visible: bool) {
            self.menu_visible = Some(visible);
        }

        fn set_roll_enabled(&mut self, enabled: bool) {
            self.roll_enabled = Some(enabled);
        }

        fn set_reset_enabled(&mut self, enabled: bool) {
            self.reset_enabled = Some(enabled);
        }
    }

    fn session(faces: &[u32]) -> Session<Recorder, Scripted> {
        Session::with_rng(GameConfig::new(), Recorder::default(), Scripted::new(faces)).unwrap()
    }

    #[test]
    fn test_new_session_opens_in_menu() {
        let mut s = session(&[]);

        assert_eq!(s.state().phase, TurnPhase::Menu);
        assert_eq!(s.position(1), 1);
        assert_eq!(s.position(2), 1);
        assert_eq!(s.presenter().menu_visible, Some(true));
        assert!(!s.roll_dice());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = GameConfig::new();
        config.board.size = 3;
        assert!(Session::with_rng(config, Recorder::default(), Scripted::new(&[])).is_err());
    }

    #[test]
    fn test_start_game_enables_rolling() {
        let mut s = session(&[]);
        s.start_game_with(GameMode::VsHuman, FeatureMap::new());

        assert!(s.state().can_roll());
        assert_eq!(s.presenter().roll_enabled, Some(true));
        assert_eq!(s.presenter().menu_visible, Some(false));
        assert_eq!(s.presenter().status, "");
    }

    #[test]
    fn test_ladder_scenario_timeline() {
        let mut s = session(&[2]);
        s.start_game_with(GameMode::VsHuman, FeatureMap::new().with_ladder(5, 20));
        s.place_player(1, 3);

        assert!(s.roll_dice());
        assert_eq!(s.presenter().status, "Player 1 rolled: 2");
        assert_eq!(s.presenter().roll_enabled, Some(false));

        // Roll delay, two steps, then the landing step.
        s.advance(1100);
        assert_eq!(s.position(1), 5);
        assert!(matches!(s.state().phase, TurnPhase::ResolvingFeature { .. }));

        s.advance(500);
        assert!(matches!(s.state().phase, TurnPhase::SlidingFeature { .. }));
        assert_eq!(s.position(1), 5);
        assert_eq!(s.presenter().animations, 1);

        s.advance(1200);
        assert_eq!(s.position(1), 20);
        assert_eq!(s.state().turn.last_moved_player, Some(PlayerId::ONE));
        assert_eq!(s.state().turn.current_player_turn, PlayerId::TWO);

        s.advance(1000);
        assert!(s.state().can_roll());
        assert_eq!(s.presenter().roll_enabled, Some(true));
    }

    #[test]
    fn test_refused_animation_completes_slide_at_once() {
        let mut s = session(&[2]);
        s.presenter_mut().refuse_animation = true;
        s.start_game_with(GameMode::VsHuman, FeatureMap::new().with_ladder(5, 20));
        s.place_player(1, 3);

        s.roll_dice();
        s.advance(1600);
        assert_eq!(s.position(1), 20);
        assert!(matches!(s.state().phase, TurnPhase::TurnComplete { .. }));
    }

    #[test]
    fn test_roll_rejected_while_in_flight() {
        let mut s = session(&[3, 5]);
        s.start_game_with(GameMode::VsHuman, FeatureMap::new());

        assert!(s.roll_dice());
        s.advance(350);
        assert!(!s.roll_dice());

        s.run_until_idle(10_000);
        assert_eq!(s.position(1), 4, "only the first roll moved");
        assert_eq!(s.state().history().len(), 1);
    }

    #[test]
    fn test_win_blocks_further_rolls() {
        let mut s = session(&[2]);
        s.start_game_with(GameMode::VsComputer, FeatureMap::new());
        s.place_player(1, 58);

        s.roll_dice();
        assert!(s.run_until_idle(10_000));

        assert_eq!(s.state().phase, TurnPhase::Won(PlayerId::ONE));
        assert_eq!(
            s.presenter().outcome,
            Some(("Winner!".to_string(), "You won!".to_string()))
        );
        assert!(!s.roll_dice());

        assert!(s.acknowledge_outcome());
        assert_eq!(s.presenter().menu_visible, Some(true));
        assert!(!s.acknowledge_outcome());
    }

    #[test]
    fn test_reset_cooldown() {
        let mut s = session(&[]);
        s.start_game_with(GameMode::VsHuman, FeatureMap::new());

        assert!(s.reset());
        assert_eq!(s.state().phase, TurnPhase::Menu);
        assert_eq!(s.presenter().reset_enabled, Some(false));

        s.advance(2999);
        assert!(!s.reset());
        assert!(s.is_reset_blocked());

        s.advance(1);
        assert!(!s.is_reset_blocked());
        assert_eq!(s.presenter().reset_enabled, Some(true));
        assert!(s.reset());
    }

    #[test]
    fn test_reset_cancels_turn_in_flight() {
        let mut s = session(&[4]);
        s.start_game_with(GameMode::VsHuman, FeatureMap::new());

        s.roll_dice();
        s.advance(700);
        let frozen = s.position(1);
        assert!(s.reset());
        assert_eq!(s.presenter().cancels, 2, "start and reset");

        s.advance(10_000);
        assert_eq!(s.position(1), frozen);
        assert_eq!(s.state().phase, TurnPhase::Menu);
    }

    #[test]
    fn test_start_game_keeps_reset_cooldown() {
        let mut s = session(&[]);
        s.start_game_with(GameMode::VsHuman, FeatureMap::new());
        s.reset();

        s.start_game_with(GameMode::VsComputer, FeatureMap::new());
        assert!(s.is_reset_blocked());
        assert_eq!(s.pending_tasks(), 1);

        s.advance(3000);
        assert!(!s.is_reset_blocked());
    }

    #[test]
    fn test_start_game_is_idempotent() {
        let mut s = session(&[]);
        let board = FeatureMap::new().with_ladder(4, 30).with_snake(50, 10);

        s.start_game_with(GameMode::VsHuman, board.clone());
        let first = s.state().clone();
        s.start_game_with(GameMode::VsHuman, board);

        assert_eq!(s.state(), &first);
    }

    #[test]
    fn test_start_game_drops_ill_fitting_features() {
        let mut s = session(&[]);
        let board = FeatureMap::new().with_ladder(4, 30).with_ladder(40, 60);

        s.start_game_with(GameMode::VsHuman, board);
        assert_eq!(s.state().features().len(), 1);
        assert_eq!(s.state().features().ladder_end(40), None);
    }

    #[test]
    fn test_place_player_ignores_bad_input() {
        let mut s = session(&[]);
        s.place_player(3, 10);
        s.place_player(1, 61);
        s.place_player(1, 0);

        assert_eq!(s.position(1), 1);
        assert_eq!(s.position(3), 0);
    }

    #[test]
    fn test_event_stream_for_a_plain_move() {
        let mut s = session(&[1]);
        s.start_game_with(GameMode::VsHuman, FeatureMap::new());
        s.drain_events();

        s.roll_dice();
        s.run_until_idle(10_000);

        let events = s.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::RollControl { enabled: false },
                GameEvent::Rolled {
                    player: PlayerId::ONE,
                    value: 1,
                    message: "Player 1 rolled: 1".into(),
                },
                GameEvent::Moved {
                    player: PlayerId::ONE,
                    square: 2,
                },
                GameEvent::TurnPassed { next: PlayerId::TWO },
                GameEvent::RollControl { enabled: true },
            ]
        );
        assert!(s.drain_events().is_empty());
    }
}
