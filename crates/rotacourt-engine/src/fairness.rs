//! Fairness calculations: how far each present player is from an even share.
//!
//! Two parallel metrics are provided:
//!
//! - **Playing time** ([`time_report`]) compares accrued minutes against the
//!   regulation share:
//!
//!   ```text
//!   target = periods_count * period_duration * players_on_court / present_count
//!   ```
//!
//! - **Period count** ([`period_report`]) compares completed appearances against
//!   the share of completed periods so far:
//!
//!   ```text
//!   target = completed_periods * players_on_court / present_count
//!   ```
//!
//!   This is the preferred signal. It is coarser, but a short or long period
//!   does not skew it.
//!
//! Both reports include only present players and are ordered by ascending
//! `difference`, so the most under-served player comes first. When nobody is
//! present there is no meaningful share, and the calculation fails with
//! [`FairnessError::NoPresentPlayers`] instead of producing NaN or infinity.
//!
//! [`balance_score`] condenses the playing-time distribution into a single
//! figure in \[0.0, 1.0\].

use std::collections::BTreeMap;

use rotacourt_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::{GameSettings, Period, Player, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FairnessError {
    #[display("no present players to share playing time between")]
    NoPresentPlayers,
}

/// Which quantity a fairness report measures.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
pub enum FairnessMetric {
    /// Minutes on court.
    PlayingTime,
    /// Completed periods on court.
    #[default]
    PeriodCount,
}

/// One player's line in a fairness report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairnessEntry {
    pub player_id: PlayerId,
    /// Minutes or periods the player has been credited with.
    pub played: f32,
    /// Even share for the same metric.
    pub target: f32,
    /// `played - target`; negative means under target.
    pub difference: f32,
}

/// Computes a report for the requested metric.
pub fn report(
    metric: FairnessMetric,
    roster: &[Player],
    periods: &[Period],
    settings: &GameSettings,
) -> Result<Vec<FairnessEntry>, FairnessError> {
    match metric {
        FairnessMetric::PlayingTime => time_report(roster, settings),
        FairnessMetric::PeriodCount => period_report(roster, periods, settings),
    }
}

/// Regulation minutes each present player would get under a perfectly even split.
#[expect(clippy::cast_precision_loss)]
pub fn target_time_per_player(
    settings: &GameSettings,
    present_count: usize,
) -> Result<f32, FairnessError> {
    if present_count == 0 {
        return Err(FairnessError::NoPresentPlayers);
    }
    Ok(settings.regulation_court_minutes() / present_count as f32)
}

/// Periods each present player would have played so far under a perfectly even split.
#[expect(clippy::cast_precision_loss)]
pub fn target_periods_per_player(
    completed_periods: usize,
    settings: &GameSettings,
    present_count: usize,
) -> Result<f32, FairnessError> {
    if present_count == 0 {
        return Err(FairnessError::NoPresentPlayers);
    }
    Ok((completed_periods * settings.players_on_court) as f32 / present_count as f32)
}

/// Playing-time report over present players.
pub fn time_report(
    roster: &[Player],
    settings: &GameSettings,
) -> Result<Vec<FairnessEntry>, FairnessError> {
    let present = roster.iter().filter(|p| p.is_present).collect::<Vec<_>>();
    let target = target_time_per_player(settings, present.len())?;
    let entries = present
        .into_iter()
        .map(|p| entry(p.id, p.total_playing_time, target))
        .collect();
    Ok(sorted(entries))
}

/// Period-count report over present players.
#[expect(clippy::cast_precision_loss)]
pub fn period_report(
    roster: &[Player],
    periods: &[Period],
    settings: &GameSettings,
) -> Result<Vec<FairnessEntry>, FairnessError> {
    let present = roster.iter().filter(|p| p.is_present).collect::<Vec<_>>();
    let completed = periods.iter().filter(|p| p.is_completed).count();
    let target = target_periods_per_player(completed, settings, present.len())?;
    let counts = periods_played(present.iter().copied(), periods);
    let entries = present
        .into_iter()
        .map(|p| entry(p.id, counts[&p.id] as f32, target))
        .collect();
    Ok(sorted(entries))
}

/// Counts completed periods each given player appeared in.
///
/// Every given player gets an entry, zero when they have not played.
pub fn periods_played<'a, I>(players: I, periods: &[Period]) -> BTreeMap<PlayerId, usize>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut counts = players
        .into_iter()
        .map(|p| (p.id, 0))
        .collect::<BTreeMap<_, _>>();
    for period in periods.iter().filter(|p| p.is_completed) {
        for id in &period.lineup {
            if let Some(count) = counts.get_mut(id) {
                *count += 1;
            }
        }
    }
    counts
}

/// Aggregate playing-time balance of present players.
///
/// `max(0, 1 - std_dev / mean)` over accrued minutes. Before anyone has
/// played (mean of zero) the distribution is trivially even and scores 1.0.
pub fn balance_score(roster: &[Player]) -> Result<f32, FairnessError> {
    let stats = DescriptiveStats::new(
        roster
            .iter()
            .filter(|p| p.is_present)
            .map(|p| p.total_playing_time),
    )
    .ok_or(FairnessError::NoPresentPlayers)?;
    Ok(stats
        .coefficient_of_variation()
        .map_or(1.0, |cv| f32::max(0.0, 1.0 - cv)))
}

fn entry(player_id: PlayerId, played: f32, target: f32) -> FairnessEntry {
    FairnessEntry {
        player_id,
        played,
        target,
        difference: played - target,
    }
}

fn sorted(mut entries: Vec<FairnessEntry>) -> Vec<FairnessEntry> {
    entries.sort_by(|a, b| a.difference.total_cmp(&b.difference));
    entries
}
