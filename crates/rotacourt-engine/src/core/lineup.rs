use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::player::{Player, PlayerId, Position};

/// An advisory lineup produced by a selector.
///
/// Suggestions carry no identity. They are recomputed on every request and
/// become a [`Period`](super::period::Period) only when committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineupSuggestion {
    pub players: Vec<PlayerId>,
    pub average_skill_level: f32,
    /// 0.0 to 1.0, where 1.0 is perfectly balanced playing time.
    pub playing_time_balance: f32,
    /// 0.0 to 1.0, where 1.0 covers every concrete position the lineup has room for.
    pub position_balance: f32,
}

impl LineupSuggestion {
    /// Builds a suggestion from selected players, computing the skill and
    /// position figures. `playing_time_balance` is policy specific.
    #[must_use]
    pub fn from_players(players: &[&Player], playing_time_balance: f32) -> Self {
        Self {
            players: players.iter().map(|p| p.id).collect(),
            average_skill_level: average_skill(players.iter().copied()),
            playing_time_balance,
            position_balance: position_balance(players.iter().map(|p| p.position)),
        }
    }
}

/// Mean skill level of the given players, 0.0 for none.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn average_skill<'a, I>(players: I) -> f32
where
    I: IntoIterator<Item = &'a Player>,
{
    let (sum, count) = players
        .into_iter()
        .fold((0u32, 0usize), |(sum, count), p| {
            (sum + u32::from(p.skill_level), count + 1)
        });
    if count == 0 {
        return 0.0;
    }
    sum as f32 / count as f32
}

/// Share of concrete positions covered by a lineup.
///
/// Computed as `distinct non-Any positions / min(3, lineup size)`, so a
/// lineup of three or more scores 1.0 only with a Guard, a Forward and a
/// Center. Wildcards count toward the lineup size but never cover a slot.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn position_balance<I>(positions: I) -> f32
where
    I: IntoIterator<Item = Position>,
{
    let mut size = 0usize;
    let mut covered = BTreeSet::new();
    for position in positions {
        size += 1;
        covered.extend(position.slot());
    }
    let slots = usize::min(Position::SLOTS.len(), size);
    if slots == 0 {
        return 0.0;
    }
    covered.len() as f32 / slots as f32
}
