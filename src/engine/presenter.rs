//! Presentation seam.
//!
//! The engine never draws anything. A view implements [`Presenter`] and the
//! session calls it as the game unfolds. Every hook has a default, so a
//! view only overrides what it renders.
//!
//! ## Implementation Notes
//!
//! - `has_square`: return false when a square has no visual counterpart; the
//!   session then skips the visual and keeps the game moving
//! - `animate_token`: return false to refuse an animation; its continuation
//!   then runs at once instead of after the slide duration
//! - `cancel_animations`: called on every reset and new game, before any
//!   state is touched

use crate::board::FeatureMap;
use crate::core::{PlayerId, Square};

/// Hooks into the presentation layer.
pub trait Presenter {
    /// Check if a square can be shown.
    fn has_square(&self, _square: Square) -> bool {
        true
    }

    /// Draw a freshly installed board: highlights and connector art.
    fn render_board(&mut self, _features: &FeatureMap) {}

    /// Put a token on a square instantly.
    fn place_token(&mut self, _player: PlayerId, _square: Square) {}

    /// Start moving a token to a square over `duration_ms`.
    ///
    /// Returns whether the animation started.
    fn animate_token(&mut self, _player: PlayerId, _square: Square, _duration_ms: u64) -> bool {
        true
    }

    /// Stop every running token animation.
    fn cancel_animations(&mut self) {}

    /// Show transient status text. Empty text clears it.
    fn show_status(&mut self, _text: &str) {}

    /// Show the game-over dialog. The view calls
    /// [`Session::acknowledge_outcome`](super::Session::acknowledge_outcome)
    /// when it is dismissed.
    fn show_outcome(&mut self, _title: &str, _message: &str) {}

    /// Show or hide the pre-game menu.
    fn show_menu(&mut self, _visible: bool) {}

    /// Enable or disable the roll control.
    fn set_roll_enabled(&mut self, _enabled: bool) {}

    /// Enable or disable the reset control.
    fn set_reset_enabled(&mut self, _enabled: bool) {}
}

/// Presenter that renders nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeadlessPresenter;

impl Presenter for HeadlessPresenter {}
