//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. The game always has exactly two players,
//! numbered 1 and 2 the way they are announced to people.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by a fixed array for O(1) access.
//! Supports iteration and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A square number on the board. `0` means "not placed yet".
pub type Square = u32;

/// Number of players in every session.
pub const PLAYER_COUNT: usize = 2;

/// Player identifier, either player 1 or player 2.
///
/// In [`GameMode::VsComputer`] player 2 is driven by the engine itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(u8);

impl PlayerId {
    /// Player 1, always a human.
    pub const ONE: Self = Self(1);
    /// Player 2, a human or the computer depending on the mode.
    pub const TWO: Self = Self(2);

    /// Create a player ID from its 1-based number.
    ///
    /// Returns `None` for anything other than 1 or 2.
    ///
    /// ```
    /// use snakes_ladders::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::new(2), Some(PlayerId::TWO));
    /// assert_eq!(PlayerId::new(0), None);
    /// assert_eq!(PlayerId::new(3), None);
    /// ```
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        match number {
            1 | 2 => Some(Self(number)),
            _ => None,
        }
    }

    /// The 1-based player number.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// 0-based storage index.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// The opponent.
    #[must_use]
    pub const fn other(self) -> Self {
        match self.0 {
            1 => Self::TWO,
            _ => Self::ONE,
        }
    }

    /// Both players in turn order.
    pub fn all() -> impl Iterator<Item = PlayerId> {
        [Self::ONE, Self::TWO].into_iter()
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("invalid player number {value}"))
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.0
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Who player 2 is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameMode {
    /// Player 2 is the computer.
    #[default]
    VsComputer,
    /// Two people share the roll control.
    VsHuman,
}

impl GameMode {
    /// Whether `player` is driven by the engine in this mode.
    #[must_use]
    pub fn is_computer(self, player: PlayerId) -> bool {
        self == GameMode::VsComputer && player == PlayerId::TWO
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameMode::VsComputer => write!(f, "vs-computer"),
            GameMode::VsHuman => write!(f, "vs-human"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use snakes_ladders::core::{PlayerId, PlayerMap};
///
/// let mut positions: PlayerMap<u32> = PlayerMap::with_value(1);
/// positions[PlayerId::TWO] = 7;
///
/// assert_eq!(positions[PlayerId::ONE], 1);
/// assert_eq!(positions[PlayerId::TWO], 7);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; PLAYER_COUNT],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId::ONE), factory(PlayerId::TWO)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all().zip(self.data.iter())
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all().zip(self.data.iter_mut())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        assert_eq!(PlayerId::ONE.number(), 1);
        assert_eq!(PlayerId::TWO.index(), 1);
        assert_eq!(format!("{}", PlayerId::TWO), "Player 2");
        assert_eq!(PlayerId::ONE.other(), PlayerId::TWO);
        assert_eq!(PlayerId::TWO.other(), PlayerId::ONE);
    }

    #[test]
    fn test_player_id_rejects_out_of_range() {
        assert!(PlayerId::new(0).is_none());
        assert!(PlayerId::new(3).is_none());
        assert!(PlayerId::try_from(255).is_err());
    }

    #[test]
    fn test_player_id_all() {
        let players: Vec<_> = PlayerId::all().collect();
        assert_eq!(players, vec![PlayerId::ONE, PlayerId::TWO]);
    }

    #[test]
    fn test_game_mode_computer() {
        assert!(GameMode::VsComputer.is_computer(PlayerId::TWO));
        assert!(!GameMode::VsComputer.is_computer(PlayerId::ONE));
        assert!(!GameMode::VsHuman.is_computer(PlayerId::TWO));
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<u32> = PlayerMap::new(|p| u32::from(p.number()) * 10);

        assert_eq!(map[PlayerId::ONE], 10);
        assert_eq!(map[PlayerId::TWO], 20);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<u32> = PlayerMap::with_value(0);

        map[PlayerId::ONE] = 10;
        *map.get_mut(PlayerId::TWO) += 3;

        assert_eq!(map[PlayerId::ONE], 10);
        assert_eq!(map[PlayerId::TWO], 3);
    }

    #[test]
    fn test_player_map_iter() {
        let mut map: PlayerMap<u32> = PlayerMap::with_value(1);
        for (_, v) in map.iter_mut() {
            *v += 1;
        }

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::ONE, &2), (PlayerId::TWO, &2)]);
    }

    #[test]
    fn test_serialization() {
        let map: PlayerMap<u32> = PlayerMap::new(|p| u32::from(p.number()));
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);

        assert_eq!(serde_json::to_string(&PlayerId::TWO).unwrap(), "2");
        assert!(serde_json::from_str::<PlayerId>("7").is_err());
        assert_eq!(
            serde_json::to_string(&GameMode::VsHuman).unwrap(),
            "\"vs-human\""
        );
    }
}
