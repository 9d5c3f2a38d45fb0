use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{HistoryError, RosterError};

use super::{
    period::{Period, PeriodId},
    player::{JERSEY_NUMBERS, Player, PlayerId, SKILL_LEVELS},
    settings::GameSettings,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct GameId(u32);

impl GameId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::From,
)]
#[serde(transparent)]
pub struct TeamId(u32);

impl TeamId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

/// A game being played: settings, the working roster and the period history.
///
/// The roster is a working copy for this game; attendance and playing time
/// change here without touching the team's stored roster. Periods are ordered
/// and numbered from 1 without gaps.
///
/// `Game` is plain data. The invariants above are maintained by the session
/// coordinator that owns it during play.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub team_id: TeamId,
    pub date: NaiveDate,
    #[serde(default)]
    pub settings: GameSettings,
    pub roster: Vec<Player>,
    #[serde(default)]
    pub periods: Vec<Period>,
    #[serde(default)]
    pub is_active: bool,
}

impl Game {
    #[must_use]
    pub fn new(
        id: GameId,
        team_id: TeamId,
        date: NaiveDate,
        settings: GameSettings,
        roster: Vec<Player>,
    ) -> Self {
        Self {
            id,
            team_id,
            date,
            settings,
            roster,
            periods: vec![],
            is_active: false,
        }
    }

    /// Checks roster-level constraints: jersey numbers in range and unique,
    /// skill levels in range, player ids unique.
    pub fn validate_roster(&self) -> Result<(), RosterError> {
        let mut jerseys = BTreeMap::new();
        let mut ids = BTreeSet::new();
        for player in &self.roster {
            if !JERSEY_NUMBERS.contains(&player.jersey_number) {
                return Err(RosterError::InvalidJerseyNumber {
                    player_id: player.id,
                    jersey_number: player.jersey_number,
                });
            }
            if !SKILL_LEVELS.contains(&player.skill_level) {
                return Err(RosterError::InvalidSkillLevel {
                    player_id: player.id,
                    skill_level: player.skill_level,
                });
            }
            if !ids.insert(player.id) {
                return Err(RosterError::DuplicatePlayer {
                    player_id: player.id,
                });
            }
            if let Some(first) = jerseys.insert(player.jersey_number, player.id) {
                return Err(RosterError::DuplicateJerseyNumber {
                    jersey_number: player.jersey_number,
                    first,
                    second: player.id,
                });
            }
        }
        Ok(())
    }

    /// Checks the period history: numbered from 1 without gaps, unique
    /// period ids, and lineups of distinct roster players.
    pub fn validate_periods(&self) -> Result<(), HistoryError> {
        let mut period_ids = BTreeSet::new();
        for (expected, period) in (1..).zip(&self.periods) {
            if period.number != expected {
                return Err(HistoryError::NonContiguousNumber {
                    period_id: period.id,
                    number: period.number,
                    expected,
                });
            }
            if !period_ids.insert(period.id) {
                return Err(HistoryError::DuplicatePeriodId {
                    period_id: period.id,
                });
            }
            let mut lineup = BTreeSet::new();
            for &player_id in &period.lineup {
                if !lineup.insert(player_id) {
                    return Err(HistoryError::DuplicateLineupPlayer {
                        period_id: period.id,
                        player_id,
                    });
                }
                if self.player(player_id).is_none() {
                    return Err(HistoryError::UnknownLineupPlayer {
                        period_id: period.id,
                        player_id,
                    });
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.roster.iter_mut().find(|p| p.id == id)
    }

    pub fn present_players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.roster.iter().filter(|p| p.is_present)
    }

    #[must_use]
    pub fn present_count(&self) -> usize {
        self.present_players().count()
    }

    #[must_use]
    pub fn period(&self, id: PeriodId) -> Option<&Period> {
        self.periods.iter().find(|p| p.id == id)
    }

    pub fn period_mut(&mut self, id: PeriodId) -> Option<&mut Period> {
        self.periods.iter_mut().find(|p| p.id == id)
    }

    pub fn completed_periods(&self) -> impl Iterator<Item = &Period> + '_ {
        self.periods.iter().filter(|p| p.is_completed)
    }

    #[must_use]
    pub fn completed_period_count(&self) -> usize {
        self.completed_periods().count()
    }

    /// Minutes played so far, summed over completed periods.
    #[must_use]
    pub fn elapsed_minutes(&self) -> f32 {
        self.completed_periods()
            .map(|p| p.duration(&self.settings))
            .sum()
    }

    #[must_use]
    pub fn overtime_periods_used(&self) -> usize {
        self.periods
            .iter()
            .filter(|p| p.is_overtime(&self.settings))
            .count()
    }

    /// Sequence number the next committed period will get.
    #[must_use]
    pub fn next_period_number(&self) -> u32 {
        self.periods.last().map_or(1, |p| p.number + 1)
    }
}
