use serde::{Deserialize, Serialize};

use super::{player::PlayerId, settings::GameSettings};

/// Identifier of a period within a game.
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
pub struct PeriodId(u32);

impl PeriodId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// One game segment with its committed lineup.
///
/// A period is created incomplete when a suggestion is committed. Completing
/// it is one-way: afterwards the lineup and `actual_duration` are frozen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub id: PeriodId,
    /// 1-based sequence number, contiguous within a game.
    pub number: u32,
    pub lineup: Vec<PlayerId>,
    #[serde(default)]
    pub is_completed: bool,
    /// Minutes actually played; set on completion.
    #[serde(default)]
    pub actual_duration: Option<f32>,
}

impl Period {
    #[must_use]
    pub fn new(id: PeriodId, number: u32, lineup: Vec<PlayerId>) -> Self {
        Self {
            id,
            number,
            lineup,
            is_completed: false,
            actual_duration: None,
        }
    }

    /// Builds an already completed period, as found in stored history.
    #[must_use]
    pub fn completed(id: PeriodId, number: u32, lineup: Vec<PlayerId>, minutes: f32) -> Self {
        Self {
            id,
            number,
            lineup,
            is_completed: true,
            actual_duration: Some(minutes),
        }
    }

    #[must_use]
    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.lineup.contains(&player_id)
    }

    /// Minutes this period counts for: the recorded duration, or the
    /// configured period length when none was recorded.
    #[must_use]
    pub fn duration(&self, settings: &GameSettings) -> f32 {
        self.actual_duration.unwrap_or(settings.period_duration)
    }

    #[must_use]
    pub fn is_overtime(&self, settings: &GameSettings) -> bool {
        self.number > settings.periods_count
    }
}
