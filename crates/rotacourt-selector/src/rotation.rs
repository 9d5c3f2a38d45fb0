//! Strict rotation policy.
//!
//! The lineup is filled one player at a time, always from the players with the
//! fewest completed periods:
//!
//! 1. Take the minimum period count among the remaining present players
//! 2. A single holder of that minimum is taken directly
//! 3. Among several, prefer players whose position is not yet on court
//!    (wildcards never cover or block a position)
//! 4. Still tied: prefer the higher skill level
//! 5. Still tied: keep roster order
//!
//! Because a player is never passed over for one with strictly more periods,
//! rotation counts of players present all game never differ by more than one.
//!
//! # Reported balance
//!
//! The suggestion's `playing_time_balance` is a rotation balance over the
//! counts projected after this period:
//!
//! ```text
//! balance = max(0, 1 - spread_penalty * (projected_max - projected_min))
//! ```

use std::{
    cmp::Reverse,
    collections::{BTreeMap, BTreeSet},
};

use log::debug;
use rotacourt_engine::{
    GameSettings, LineupSuggestion, Period, Player, PlayerId, Position, fairness,
};
use rotacourt_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::{LineupSelector, SelectionError, present_players};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Balance lost per period of spread between the most and least played.
    pub spread_penalty: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            spread_penalty: 0.33,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RotationSelector {
    config: RotationConfig,
}

impl RotationSelector {
    #[must_use]
    pub fn new(config: RotationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    #[expect(clippy::cast_precision_loss)]
    fn rotation_balance(&self, played: &BTreeMap<PlayerId, usize>, lineup: &[&Player]) -> f32 {
        let projected = played.iter().map(|(id, count)| {
            let on_court = lineup.iter().any(|p| p.id == *id);
            (count + usize::from(on_court)) as f32
        });
        DescriptiveStats::new(projected).map_or(1.0, |stats| {
            f32::max(0.0, 1.0 - self.config.spread_penalty * stats.range())
        })
    }
}

impl LineupSelector for RotationSelector {
    fn name(&self) -> &'static str {
        "rotation"
    }

    fn select_lineup(
        &self,
        players: &[Player],
        settings: &GameSettings,
        history: &[Period],
    ) -> Result<LineupSuggestion, SelectionError> {
        let mut remaining = present_players(players, settings)?;
        let played = fairness::periods_played(remaining.iter().copied(), history);

        let mut lineup = Vec::with_capacity(settings.players_on_court);
        while lineup.len() < settings.players_on_court {
            let index = next_pick(&remaining, &lineup, &played);
            let player = remaining.remove(index);
            debug!(
                "rotation pick #{}: player {} ({} periods played)",
                lineup.len() + 1,
                player.id,
                played[&player.id]
            );
            lineup.push(player);
        }

        let balance = self.rotation_balance(&played, &lineup);
        Ok(LineupSuggestion::from_players(&lineup, balance))
    }
}

/// Index into `remaining` of the next player to put on court.
///
/// `remaining` must not be empty.
fn next_pick(
    remaining: &[&Player],
    lineup: &[&Player],
    played: &BTreeMap<PlayerId, usize>,
) -> usize {
    let fewest = remaining
        .iter()
        .map(|p| played[&p.id])
        .min()
        .expect("candidates remain while the lineup is short");
    let tied = (0..remaining.len())
        .filter(|&i| played[&remaining[i].id] == fewest)
        .collect::<Vec<_>>();
    if let &[only] = tied.as_slice() {
        return only;
    }

    let covered = lineup
        .iter()
        .filter_map(|p| p.position.slot())
        .collect::<BTreeSet<Position>>();
    let uncovered = tied
        .iter()
        .copied()
        .filter(|&i| {
            remaining[i]
                .position
                .slot()
                .is_some_and(|slot| !covered.contains(&slot))
        })
        .collect::<Vec<_>>();
    let pool = if uncovered.is_empty() { tied } else { uncovered };

    pool.into_iter()
        .max_by_key(|&i| (remaining[i].skill_level, Reverse(i)))
        .expect("at least one candidate holds the minimum")
}

#[cfg(test)]
mod tests {
    use rand::{Rng as _, SeedableRng as _, seq::SliceRandom as _};
    use rand_pcg::Pcg32;
    use rotacourt_engine::PeriodId;

    use super::*;

    use Position::{Any, Center, Forward, Guard};

    fn player(id: u32, skill: u8, position: Position) -> Player {
        let jersey = u8::try_from(id).unwrap();
        Player::new(PlayerId::new(id), format!("P{id}"), jersey, skill, position)
    }

    fn completed(number: u32, lineup: &[u32]) -> Period {
        Period::completed(
            PeriodId::new(number),
            number,
            lineup.iter().copied().map(PlayerId::new).collect(),
            8.0,
        )
    }

    fn lineup_size(size: usize) -> GameSettings {
        GameSettings {
            players_on_court: size,
            ..GameSettings::default()
        }
    }

    fn ids(suggestion: &LineupSuggestion) -> Vec<u32> {
        let mut ids = suggestion
            .players
            .iter()
            .map(|id| id.get())
            .collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_least_played_first_with_skill_tiebreak() {
        // periods played: P1:0 P2:0 P3:1 P4:1 P5:2 P6:2
        let players = [
            player(1, 3, Guard),
            player(2, 3, Forward),
            player(3, 2, Center),
            player(4, 3, Guard),
            player(5, 2, Guard),
            player(6, 4, Guard),
        ];
        let history = [completed(1, &[3, 5, 6]), completed(2, &[4, 5, 6])];

        let suggestion = RotationSelector::default()
            .select_lineup(&players, &lineup_size(5), &history)
            .unwrap();
        assert_eq!(ids(&suggestion), [1, 2, 3, 4, 6]);

        // projected counts 1 1 2 2 2 3: spread of two periods
        assert!((suggestion.playing_time_balance - (1.0 - 2.0 * 0.33)).abs() < 1e-6);
    }

    #[test]
    fn test_position_coverage_beats_skill() {
        let players = [
            player(1, 5, Guard),
            player(2, 4, Guard),
            player(3, 1, Center),
            player(4, 5, Any),
        ];
        let suggestion = RotationSelector::default()
            .select_lineup(&players, &lineup_size(2), &[])
            .unwrap();
        assert_eq!(suggestion.players, [PlayerId::new(1), PlayerId::new(3)]);
        assert_eq!(suggestion.position_balance, 1.0);
        assert_eq!(suggestion.average_skill_level, 3.0);
    }

    #[test]
    fn test_wildcards_fall_back_to_skill() {
        let players = [player(1, 2, Any), player(2, 4, Any), player(3, 3, Any)];
        let suggestion = RotationSelector::default()
            .select_lineup(&players, &lineup_size(2), &[])
            .unwrap();
        assert_eq!(suggestion.players, [PlayerId::new(2), PlayerId::new(3)]);
        assert_eq!(suggestion.position_balance, 0.0);
    }

    #[test]
    fn test_equal_candidates_keep_roster_order() {
        let players = [player(4, 3, Guard), player(2, 3, Guard), player(9, 3, Guard)];
        let selector = RotationSelector::default();
        let first = selector
            .select_lineup(&players, &lineup_size(2), &[])
            .unwrap();
        let second = selector
            .select_lineup(&players, &lineup_size(2), &[])
            .unwrap();
        assert_eq!(first.players, [PlayerId::new(4), PlayerId::new(2)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_absent_players_are_never_selected() {
        let mut players = (1..=7).map(|i| player(i, 3, Any)).collect::<Vec<_>>();
        players[0].is_present = false;
        players[1].is_present = false;
        let suggestion = RotationSelector::default()
            .select_lineup(&players, &lineup_size(5), &[])
            .unwrap();
        assert_eq!(ids(&suggestion), [3, 4, 5, 6, 7]);

        players[2].is_present = false;
        let err = RotationSelector::default()
            .select_lineup(&players, &lineup_size(5), &[])
            .unwrap_err();
        assert!(matches!(
            err,
            SelectionError::InsufficientPlayers {
                present: 4,
                required: 5
            }
        ));
    }

    #[test]
    fn test_never_skips_a_less_played_player() {
        let mut rng = Pcg32::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let count = rng.random_range(5..=12_u32);
            let size = rng.random_range(1..=5_usize);
            let players = (1..=count)
                .map(|i| {
                    let position = [Guard, Forward, Center, Any][rng.random_range(0..4)];
                    player(i, rng.random_range(1..=5), position)
                })
                .collect::<Vec<_>>();
            let ids = players.iter().map(|p| p.id.get()).collect::<Vec<_>>();
            let history = (1..=rng.random_range(0..6_u32))
                .map(|n| {
                    let mut lineup = ids.clone();
                    lineup.shuffle(&mut rng);
                    completed(n, &lineup[..size])
                })
                .collect::<Vec<_>>();

            let suggestion = RotationSelector::default()
                .select_lineup(&players, &lineup_size(size), &history)
                .unwrap();
            let played = fairness::periods_played(&players, &history);
            let (on, off): (Vec<_>, Vec<_>) = players
                .iter()
                .partition(|p| suggestion.players.contains(&p.id));
            let max_on = on.iter().map(|p| played[&p.id]).max().unwrap();
            let min_off = off.iter().map(|p| played[&p.id]).min().unwrap_or(usize::MAX);
            assert!(max_on <= min_off, "{played:?} {:?}", suggestion.players);
            assert!((0.0..=1.0).contains(&suggestion.position_balance));
        }
    }

    #[test]
    fn test_full_game_keeps_rotation_within_one_period() {
        let players = (1..=8)
            .map(|i| player(i, u8::try_from(i % 5 + 1).unwrap(), Any))
            .collect::<Vec<_>>();
        let settings = lineup_size(5);
        let selector = RotationSelector::default();
        let mut history = vec![];
        for number in 1..=12 {
            let suggestion = selector
                .select_lineup(&players, &settings, &history)
                .unwrap();
            let lineup = suggestion.players.iter().map(|id| id.get()).collect::<Vec<_>>();
            history.push(completed(number, &lineup));

            let played = fairness::periods_played(&players, &history);
            let max = played.values().max().unwrap();
            let min = played.values().min().unwrap();
            assert!(max - min <= 1, "after period {number}: {played:?}");
            assert_eq!(played.values().sum::<usize>(), history.len() * 5);
        }
    }
}
