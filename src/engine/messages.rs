//! Announcement text.

use crate::core::{GameMode, PlayerId};

/// Title of the game-over dialog.
pub const WINNER_TITLE: &str = "Winner!";

/// Status line after a roll.
#[must_use]
pub fn rolled(mode: GameMode, player: PlayerId, value: u32) -> String {
    match (mode, player) {
        (GameMode::VsComputer, PlayerId::ONE) => format!("You rolled: {value}"),
        (GameMode::VsComputer, _) => format!("Computer rolled: {value}"),
        (GameMode::VsHuman, p) => format!("Player {} rolled: {value}", p.number()),
    }
}

/// Game-over message.
#[must_use]
pub fn won(mode: GameMode, player: PlayerId) -> String {
    match (mode, player) {
        (GameMode::VsComputer, PlayerId::ONE) => "You won!".to_string(),
        (GameMode::VsComputer, _) => "Computer won!".to_string(),
        (GameMode::VsHuman, p) => format!("Player {} won!", p.number()),
    }
}
