//! Game state coordination.
//!
//! [`GameManager`] owns a [`Game`](rotacourt_engine::Game) for the duration of
//! play and is the only writer of it. It validates every mutation, so the
//! invariants the plain data model cannot enforce on its own hold throughout:
//!
//! - periods are numbered from 1 without gaps
//! - a completed period never changes again, and credits its lineup once
//! - committed lineups have exactly `players_on_court` distinct present players
//!
//! A game handed to [`GameManager::new`] is checked against the same
//! invariants first, since stored history arrives as plain data.
//!
//! Every mutation returns a reference to the part it changed, and
//! [`GameManager::game`] exposes the whole aggregate for persistence.

use rotacourt_engine::{
    HistoryError, PeriodId, PlayerId, RosterError, SettingsError, fairness::FairnessError,
};
use rotacourt_selector::SelectionError;
use serde::{Deserialize, Serialize};

pub use self::manager::GameManager;

mod manager;

/// Tunables of the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Share of an average present player's minutes credited to a late arrival.
    pub late_arrival_ratio: f32,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            late_arrival_ratio: 0.7,
        }
    }
}

/// Why a substitution was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SwapError {
    #[display("period {period_id} is already completed")]
    PeriodCompleted { period_id: PeriodId },
    #[display("player {player_id} is not in the lineup")]
    NotInLineup { player_id: PlayerId },
    #[display("player {player_id} is not a present roster player")]
    Unavailable { player_id: PlayerId },
    #[display("player {player_id} is already in the lineup")]
    AlreadyInLineup { player_id: PlayerId },
}

/// Why a suggestion could not be committed as a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SuggestionError {
    #[display("lineup has {actual} players, {expected} needed on court")]
    WrongSize { expected: usize, actual: usize },
    #[display("player {player_id} appears twice in the lineup")]
    DuplicatePlayer { player_id: PlayerId },
    #[display("player {player_id} is not on the roster")]
    UnknownPlayer { player_id: PlayerId },
    #[display("player {player_id} is not present")]
    AbsentPlayer { player_id: PlayerId },
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum GameError {
    #[display("{present} players present, {required} needed on court")]
    InsufficientPlayers { present: usize, required: usize },
    #[display("invalid roster")]
    InvalidRoster(RosterError),
    #[display("invalid period history")]
    InvalidHistory(HistoryError),
    #[display("invalid game settings")]
    InvalidSettings(SettingsError),
    #[display("lineup size cannot change while period {period_id} is in progress")]
    LineupSizeLocked { period_id: PeriodId },
    #[display("invalid swap")]
    InvalidSwap(SwapError),
    #[display("invalid lineup suggestion")]
    InvalidSuggestion(SuggestionError),
    #[display("period {period_id} is already completed")]
    PeriodAlreadyCompleted { period_id: PeriodId },
    #[display("period {period_id} not found")]
    PeriodNotFound { period_id: PeriodId },
    #[display("player {player_id} not found")]
    PlayerNotFound { player_id: PlayerId },
    #[display("period duration must be a non-negative number of minutes, got {minutes}")]
    InvalidDuration { minutes: f32 },
    #[display("lineup selection failed")]
    Selection(SelectionError),
    #[display("fairness calculation failed")]
    Fairness(FairnessError),
}
