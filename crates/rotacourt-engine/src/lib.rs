//! Data model and fairness calculations for basketball lineup rotation.
//!
//! This crate holds the plain values every other Rotacourt crate passes around,
//! plus the pure fairness calculations over them:
//!
//! - [`Player`], [`Position`] - roster members with attendance and accrued minutes
//! - [`GameSettings`] - period count, period length, overtime allowance, lineup size
//! - [`Period`] - one committed lineup and its completion state
//! - [`Game`] - the aggregate: settings, working roster and period history
//! - [`LineupSuggestion`] - an advisory lineup produced by a selector
//! - [`fairness`] - target-vs-actual reports and the aggregate balance score
//!
//! Nothing here mutates a game on its own; the session coordinator owns that.
//!
//! # Example
//!
//! ```
//! use rotacourt_engine::{GameSettings, Player, PlayerId, Position, fairness};
//!
//! let settings = GameSettings {
//!     periods_count: 1,
//!     period_duration: 6.0,
//!     overtime_periods: 0,
//!     players_on_court: 3,
//! };
//! let roster = [
//!     Player::new(PlayerId::new(1), "P1", 1, 3, Position::Guard).with_playing_time(4.0),
//!     Player::new(PlayerId::new(2), "P2", 2, 3, Position::Forward).with_playing_time(8.0),
//!     Player::new(PlayerId::new(3), "P3", 3, 3, Position::Center).with_playing_time(2.0),
//! ];
//!
//! let report = fairness::time_report(&roster, &settings).unwrap();
//! let order: Vec<_> = report.iter().map(|e| e.player_id.get()).collect();
//! assert_eq!(order, [3, 1, 2]);
//! ```

pub use self::core::*;

pub mod core;
pub mod fairness;

/// A roster that breaks per-game constraints.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RosterError {
    #[display("jersey number {jersey_number} is used by both player {first} and player {second}")]
    DuplicateJerseyNumber {
        jersey_number: u8,
        first: PlayerId,
        second: PlayerId,
    },
    #[display("player {player_id} appears twice in the roster")]
    DuplicatePlayer { player_id: PlayerId },
    #[display("player {player_id} has jersey number {jersey_number}, expected 1-99")]
    InvalidJerseyNumber { player_id: PlayerId, jersey_number: u8 },
    #[display("player {player_id} has skill level {skill_level}, expected 1-5")]
    InvalidSkillLevel { player_id: PlayerId, skill_level: u8 },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SettingsError {
    #[display("a game needs at least one period")]
    NoPeriods,
    #[display("a lineup needs at least one player on court")]
    EmptyLineup,
    #[display("period duration must be a positive number of minutes, got {minutes}")]
    InvalidPeriodDuration { minutes: f32 },
}

/// A period history that breaks the numbering or lineup invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum HistoryError {
    #[display("period {period_id} is numbered {number}, expected {expected}")]
    NonContiguousNumber {
        period_id: PeriodId,
        number: u32,
        expected: u32,
    },
    #[display("period id {period_id} is used twice")]
    DuplicatePeriodId { period_id: PeriodId },
    #[display("player {player_id} appears twice in the lineup of period {period_id}")]
    DuplicateLineupPlayer {
        period_id: PeriodId,
        player_id: PlayerId,
    },
    #[display("player {player_id} in the lineup of period {period_id} is not on the roster")]
    UnknownLineupPlayer {
        period_id: PeriodId,
        player_id: PlayerId,
    },
}
