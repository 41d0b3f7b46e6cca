//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;

use snakes_ladders::board::FeatureMap;
use snakes_ladders::core::{PlayerId, RandomSource, Square};
use snakes_ladders::engine::Presenter;

/// Dice that show a scripted sequence of faces, then ones. Other draws take
/// the low end of their range.
pub struct ScriptedDice {
    faces: VecDeque<u32>,
}

impl ScriptedDice {
    pub fn new(faces: &[u32]) -> Self {
        Self {
            faces: faces.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl RandomSource for ScriptedDice {
    fn gen_inclusive(&mut self, low: u32, _high: u32) -> u32 {
        low
    }

    fn roll_die(&mut self) -> u32 {
        self.faces.pop_front().unwrap_or(1)
    }
}

/// One presenter hook invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    RenderBoard(usize),
    Place(PlayerId, Square),
    Animate(PlayerId, Square, u64),
    CancelAnimations,
    Status(String),
    Outcome(String, String),
    Menu(bool),
    Roll(bool),
    Reset(bool),
}

/// Presenter that logs every hook call.
#[derive(Default)]
pub struct RecordingPresenter {
    pub calls: Vec<Call>,
    /// Squares the view pretends not to have.
    pub hidden: Vec<Square>,
}

impl RecordingPresenter {
    pub fn with_hidden(hidden: &[Square]) -> Self {
        Self {
            calls: Vec::new(),
            hidden: hidden.to_vec(),
        }
    }

    pub fn placements(&self, player: PlayerId) -> Vec<Square> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Place(p, sq) if *p == player => Some(*sq),
                _ => None,
            })
            .collect()
    }

    pub fn last_roll_control(&self) -> Option<bool> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Roll(enabled) => Some(*enabled),
            _ => None,
        })
    }
}

impl Presenter for RecordingPresenter {
    fn has_square(&self, square: Square) -> bool {
        !self.hidden.contains(&square)
    }

    fn render_board(&mut self, features: &FeatureMap) {
        self.calls.push(Call::RenderBoard(features.len()));
    }

    fn place_token(&mut self, player: PlayerId, square: Square) {
        self.calls.push(Call::Place(player, square));
    }

    fn animate_token(&mut self, player: PlayerId, square: Square, duration_ms: u64) -> bool {
        self.calls.push(Call::Animate(player, square, duration_ms));
        true
    }

    fn cancel_animations(&mut self) {
        self.calls.push(Call::CancelAnimations);
    }

    fn show_status(&mut self, text: &str) {
        self.calls.push(Call::Status(text.to_string()));
    }

    fn show_outcome(&mut self, title: &str, message: &str) {
        self.calls
            .push(Call::Outcome(title.to_string(), message.to_string()));
    }

    fn show_menu(&mut self, visible: bool) {
        self.calls.push(Call::Menu(visible));
    }

    fn set_roll_enabled(&mut self, enabled: bool) {
        self.calls.push(Call::Roll(enabled));
    }

    fn set_reset_enabled(&mut self, enabled: bool) {
        self.calls.push(Call::Reset(enabled));
    }
}
