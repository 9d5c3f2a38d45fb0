//! Weighted-candidate policy.
//!
//! Instead of a single strict pass, this selector builds several candidate
//! lineups and keeps the one with the best overall balance.
//!
//! # Candidate Generation
//!
//! Present players are ordered by ascending playing time, with players within
//! `time_epsilon` minutes of each other ordered by descending skill. The first
//! candidate uses that ordering as is; every later one perturbs it with random
//! adjacent swaps, so candidates differ in how ties are resolved.
//!
//! Each candidate is filled greedily. Every remaining player is scored as
//!
//! ```text
//! score = time_weight * (max_time - time) / period_duration
//!       + position_bonus   (position not yet on court, wildcards excluded)
//!       + skill_weight * skill_fit
//! ```
//!
//! where `skill_fit` is 1.0 when adding the player keeps the lineup's skill sum
//! on track for `team_average_skill * lineup_size`, falling off linearly with
//! the gap. The highest scoring player is added (earlier in the ordering wins
//! ties).
//!
//! # Candidate Scoring
//!
//! ```text
//! score = 0.75 * time_balance + 0.15 * position_balance + 0.10 * skill_balance
//! time_balance = max(0, 1 - sqrt(avg_deviation / period_duration))
//! ```
//!
//! `avg_deviation` is the mean absolute gap between each present player's
//! projected minutes after the upcoming period and the even share of minutes
//! played by then. The square root makes the measure sensitive near small
//! deviations.
//!
//! All weights live in [`WeightedConfig`]. Randomness comes only from the
//! injected [`SelectorSeed`], so a given seed always yields the same lineup.

use log::debug;
use rand::{Rng, seq::SliceRandom as _};
use rotacourt_engine::{
    GameSettings, LineupSuggestion, Period, Player, average_skill, fairness, position_balance,
};
use rotacourt_stats::descriptive::DescriptiveStats;
use serde::{Deserialize, Serialize};

use crate::{LineupSelector, SelectionError, SelectorSeed, present_players};

/// Largest possible skill gap between two players.
const SKILL_SPAN: f32 = 4.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightedConfig {
    /// Number of candidate lineups built per request.
    pub candidate_count: usize,
    /// Playing times closer than this (minutes) are ordered by skill instead.
    pub time_epsilon: f32,
    /// Probability of swapping each adjacent pair when perturbing the ordering.
    pub perturbation_rate: f64,
    /// Weight of the playing-time priority in the greedy score.
    pub time_weight: f32,
    /// Greedy bonus for a position not yet on court.
    pub position_bonus: f32,
    /// Weight of the skill fit in the greedy score.
    pub skill_weight: f32,
    pub time_score_weight: f32,
    pub position_score_weight: f32,
    pub skill_score_weight: f32,
}

impl Default for WeightedConfig {
    fn default() -> Self {
        Self {
            candidate_count: 15,
            time_epsilon: 0.1,
            perturbation_rate: 0.3,
            time_weight: 10.0,
            position_bonus: 3.0,
            skill_weight: 1.0,
            time_score_weight: 0.75,
            position_score_weight: 0.15,
            skill_score_weight: 0.10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeightedSelector {
    config: WeightedConfig,
    seed: SelectorSeed,
}

/// Roster-wide figures shared by every candidate of one request.
#[derive(Debug, Clone, Copy)]
struct Context {
    lineup_size: usize,
    period_duration: f32,
    max_time: f32,
    team_skill: f32,
    /// Even share of minutes once the upcoming period is played.
    target: f32,
}

#[derive(Debug, Clone, Copy)]
struct CandidateScore {
    total: f32,
    time_balance: f32,
}

impl WeightedSelector {
    #[must_use]
    pub fn new(config: WeightedConfig, seed: SelectorSeed) -> Self {
        Self { config, seed }
    }

    #[must_use]
    pub fn config(&self) -> &WeightedConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> SelectorSeed {
        self.seed
    }

    fn build_candidate<'a>(&self, order: &[&'a Player], ctx: &Context) -> Vec<&'a Player> {
        let mut remaining = order.to_vec();
        let mut lineup = Vec::with_capacity(ctx.lineup_size);
        while lineup.len() < ctx.lineup_size && !remaining.is_empty() {
            let mut best_index = 0;
            let mut best_score = f32::MIN;
            for (i, player) in remaining.iter().enumerate() {
                let score = self.greedy_score(player, &lineup, ctx);
                if score > best_score {
                    best_score = score;
                    best_index = i;
                }
            }
            lineup.push(remaining.remove(best_index));
        }
        lineup
    }

    #[expect(clippy::cast_precision_loss)]
    fn greedy_score(&self, player: &Player, lineup: &[&Player], ctx: &Context) -> f32 {
        let time_priority = (ctx.max_time - player.total_playing_time) / ctx.period_duration;

        let novel_position = player
            .position
            .slot()
            .is_some_and(|slot| lineup.iter().all(|p| p.position.slot() != Some(slot)));
        let position_bonus = if novel_position {
            self.config.position_bonus
        } else {
            0.0
        };

        let skill_sum = lineup
            .iter()
            .map(|p| f32::from(p.skill_level))
            .sum::<f32>()
            + f32::from(player.skill_level);
        let on_track = ctx.team_skill * (lineup.len() + 1) as f32;
        let skill_fit = f32::max(0.0, 1.0 - (skill_sum - on_track).abs() / SKILL_SPAN);

        self.config.time_weight * time_priority
            + position_bonus
            + self.config.skill_weight * skill_fit
    }

    fn score_candidate(
        &self,
        lineup: &[&Player],
        present: &[&Player],
        ctx: &Context,
    ) -> CandidateScore {
        let deviations = present.iter().map(|p| {
            let on_court = lineup.iter().any(|l| l.id == p.id);
            let projected = p.total_playing_time + if on_court { ctx.period_duration } else { 0.0 };
            (projected - ctx.target).abs()
        });
        let avg_deviation = DescriptiveStats::new(deviations).map_or(0.0, |s| s.mean);
        let time_balance = f32::max(0.0, 1.0 - (avg_deviation / ctx.period_duration).sqrt());

        let position = position_balance(lineup.iter().map(|p| p.position));
        let skill_gap = (average_skill(lineup.iter().copied()) - ctx.team_skill).abs();
        let skill = f32::max(0.0, 1.0 - skill_gap / SKILL_SPAN);

        let total = self.config.time_score_weight * time_balance
            + self.config.position_score_weight * position
            + self.config.skill_score_weight * skill;
        CandidateScore {
            total,
            time_balance,
        }
    }
}

impl LineupSelector for WeightedSelector {
    fn name(&self) -> &'static str {
        "weighted"
    }

    #[expect(clippy::cast_precision_loss)]
    fn select_lineup(
        &self,
        players: &[Player],
        settings: &GameSettings,
        history: &[Period],
    ) -> Result<LineupSuggestion, SelectionError> {
        let present = present_players(players, settings)?;
        let full_share = fairness::target_time_per_player(settings, present.len())
            .map_err(SelectionError::Fairness)?;
        let elapsed = history.iter().filter(|p| p.is_completed).count() + 1;
        let ctx = Context {
            lineup_size: settings.players_on_court,
            period_duration: settings.period_duration,
            max_time: present
                .iter()
                .map(|p| p.total_playing_time)
                .fold(0.0, f32::max),
            team_skill: average_skill(present.iter().copied()),
            target: full_share * elapsed as f32 / settings.periods_count as f32,
        };

        let base_order = initial_order(&present, self.config.time_epsilon);
        let mut rng = self.seed.rng();
        let mut best: Option<(CandidateScore, Vec<&Player>)> = None;
        for attempt in 0..self.config.candidate_count.max(1) {
            let mut order = base_order.clone();
            if attempt > 0 {
                perturb(&mut order, self.config.perturbation_rate, &mut rng);
            }
            let lineup = self.build_candidate(&order, &ctx);
            let score = self.score_candidate(&lineup, &present, &ctx);
            debug!(
                "weighted candidate #{attempt}: score {:.3} (time balance {:.3})",
                score.total, score.time_balance
            );
            if best
                .as_ref()
                .is_none_or(|(best_score, _)| score.total > best_score.total)
            {
                best = Some((score, lineup));
            }
        }

        let (score, lineup) = best.expect("at least one candidate is always built");
        debug!("weighted selection: best score {:.3}", score.total);
        Ok(LineupSuggestion::from_players(&lineup, score.time_balance))
    }
}

/// Ascending playing time; times within `epsilon` of each other fall in the
/// same bucket and are ordered by descending skill instead.
#[expect(clippy::cast_possible_truncation)]
fn initial_order<'a>(present: &[&'a Player], epsilon: f32) -> Vec<&'a Player> {
    let epsilon = epsilon.max(f32::EPSILON);
    let bucket = |p: &Player| (p.total_playing_time / epsilon).floor() as i64;
    let mut order = present.to_vec();
    order.sort_by(|a, b| {
        bucket(a)
            .cmp(&bucket(b))
            .then_with(|| b.skill_level.cmp(&a.skill_level))
    });
    order
}

fn perturb<R>(order: &mut [&Player], rate: f64, rng: &mut R)
where
    R: Rng + ?Sized,
{
    let rate = rate.clamp(0.0, 1.0);
    for i in 1..order.len() {
        if rng.random_bool(rate) {
            order.swap(i - 1, i);
        }
    }
    if rate >= 1.0 {
        // swapping every pair only rotates the ordering by one
        order.shuffle(rng);
    }
}
