use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Valid skill ratings, from beginner (1) to strongest (5).
pub const SKILL_LEVELS: RangeInclusive<u8> = 1..=5;

/// Valid jersey numbers.
pub const JERSEY_NUMBERS: RangeInclusive<u8> = 1..=99;

/// Identifier of a player, stable across games.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Court position a player prefers.
///
/// [`Position::Any`] is a wildcard: the player can fill any slot, so it never
/// counts as representing a position in a lineup, and never blocks one either.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
)]
pub enum Position {
    Guard,
    Forward,
    Center,
    Any,
}

impl Position {
    /// The concrete positions a balanced lineup should cover.
    pub const SLOTS: [Self; 3] = [Self::Guard, Self::Forward, Self::Center];

    /// Returns the position if it is a concrete slot, `None` for the wildcard.
    #[must_use]
    pub const fn slot(self) -> Option<Self> {
        match self {
            Self::Any => None,
            slot => Some(slot),
        }
    }
}

/// A roster member together with their in-game state.
///
/// `total_playing_time` is in minutes and only grows while a game is active:
/// it is credited when a period the player was on court for completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub jersey_number: u8,
    pub skill_level: u8,
    pub position: Position,
    #[serde(default = "default_present")]
    pub is_present: bool,
    #[serde(default)]
    pub total_playing_time: f32,
}

fn default_present() -> bool {
    true
}

impl Player {
    /// Creates a present player with no playing time yet.
    #[must_use]
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        jersey_number: u8,
        skill_level: u8,
        position: Position,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            jersey_number,
            skill_level,
            position,
            is_present: true,
            total_playing_time: 0.0,
        }
    }

    #[must_use]
    pub fn with_playing_time(mut self, minutes: f32) -> Self {
        self.total_playing_time = minutes;
        self
    }

    #[must_use]
    pub fn with_presence(mut self, is_present: bool) -> Self {
        self.is_present = is_present;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_is_not_a_slot() {
        assert_eq!(Position::Any.slot(), None);
        for position in Position::SLOTS {
            assert_eq!(position.slot(), Some(position));
        }
    }

    #[test]
    fn test_player_deserializes_with_defaults() {
        let json = r#"{
            "id": 7,
            "name": "Riley",
            "jersey_number": 23,
            "skill_level": 4,
            "position": "Forward"
        }"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.id, PlayerId::new(7));
        assert_eq!(player.position, Position::Forward);
        assert!(player.is_present);
        assert_eq!(player.total_playing_time, 0.0);
    }

    #[test]
    fn test_position_from_str() {
        assert_eq!("Center".parse::<Position>().unwrap(), Position::Center);
        assert!("Pitcher".parse::<Position>().is_err());
    }
}
