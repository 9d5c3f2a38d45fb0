//! Lineup selection strategies.
//!
//! A [`LineupSelector`] looks at the roster, the game settings and the period
//! history and proposes the next lineup as a [`LineupSuggestion`]. Selectors are
//! read-only: they never touch the roster or the history, so a suggestion can
//! be regenerated as often as the caller likes before it is committed.
//!
//! Two interchangeable policies are provided:
//!
//! - [`RotationSelector`](rotation::RotationSelector) - strict rotation. Always
//!   plays the players with the fewest completed periods, breaking ties by
//!   position coverage and then skill. Guarantees that rotation counts never
//!   drift more than one period apart while attendance is stable.
//! - [`WeightedSelector`](weighted::WeightedSelector) - weighted candidates.
//!   Builds several greedy candidate lineups from a weighted score of playing
//!   time, position coverage and skill, and keeps the best. Trades the hard
//!   rotation cap for finer balance of minutes, which matters when periods
//!   have uneven lengths.
//!
//! The two give fairness guarantees of a different kind and are kept
//! separate; [`SelectorConfig`] chooses one at runtime.
//!
//! # Example
//!
//! ```
//! use rotacourt_engine::{GameSettings, Player, PlayerId, Position};
//! use rotacourt_selector::{LineupSelector as _, SelectorConfig};
//!
//! let roster: Vec<_> = (1..=7)
//!     .map(|i| Player::new(PlayerId::new(i), format!("P{i}"), i as u8, 3, Position::Any))
//!     .collect();
//! let selector = SelectorConfig::default().build();
//! let suggestion = selector
//!     .select_lineup(&roster, &GameSettings::default(), &[])
//!     .unwrap();
//! assert_eq!(suggestion.players.len(), 5);
//! ```

use std::fmt;

use rand::Rng as _;
use rotacourt_engine::{
    GameSettings, LineupSuggestion, Period, Player, SettingsError, fairness::FairnessError,
};
use serde::{Deserialize, Serialize};

pub use self::seed::SelectorSeed;

use self::{
    rotation::{RotationConfig, RotationSelector},
    weighted::{WeightedConfig, WeightedSelector},
};

pub mod rotation;
mod seed;
pub mod weighted;

/// Why a lineup could not be proposed.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SelectionError {
    #[display("{present} players present, {required} needed on court")]
    InsufficientPlayers { present: usize, required: usize },
    #[display("invalid game settings")]
    InvalidSettings(SettingsError),
    #[display("cannot compute playing time targets")]
    Fairness(FairnessError),
}

/// A strategy that proposes the next lineup.
pub trait LineupSelector: fmt::Debug {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Proposes a lineup of `settings.players_on_court` present players.
    ///
    /// # Arguments
    ///
    /// * `players` - The game roster; absent players are ignored
    /// * `settings` - Current game settings
    /// * `history` - Periods committed so far; only completed ones count
    fn select_lineup(
        &self,
        players: &[Player],
        settings: &GameSettings,
        history: &[Period],
    ) -> Result<LineupSuggestion, SelectionError>;
}

/// Which selection policy to use.
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
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    #[default]
    Rotation,
    Weighted,
}

/// Runtime choice of selector together with the tunables of every policy.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub kind: SelectorKind,
    /// Seed for the weighted selector; a random one is drawn when missing.
    pub seed: Option<SelectorSeed>,
    pub rotation: RotationConfig,
    pub weighted: WeightedConfig,
}

impl SelectorConfig {
    #[must_use]
    pub fn build(&self) -> Box<dyn LineupSelector> {
        match self.kind {
            SelectorKind::Rotation => Box::new(RotationSelector::new(self.rotation.clone())),
            SelectorKind::Weighted => {
                let seed = self.seed.unwrap_or_else(|| rand::rng().random());
                Box::new(WeightedSelector::new(self.weighted.clone(), seed))
            }
        }
    }
}

/// Present players in roster order, after checking the settings and that
/// enough of them are present to fill a lineup.
fn present_players<'a>(
    players: &'a [Player],
    settings: &GameSettings,
) -> Result<Vec<&'a Player>, SelectionError> {
    settings
        .validate()
        .map_err(SelectionError::InvalidSettings)?;
    let present = players.iter().filter(|p| p.is_present).collect::<Vec<_>>();
    if present.len() < settings.players_on_court {
        return Err(SelectionError::InsufficientPlayers {
            present: present.len(),
            required: settings.players_on_court,
        });
    }
    Ok(present)
}

#[cfg(test)]
mod tests {
    use rotacourt_engine::{PlayerId, Position};

    use super::*;

    fn roster(count: u8) -> Vec<Player> {
        (1..=count)
            .map(|i| Player::new(PlayerId::new(i.into()), format!("P{i}"), i, 3, Position::Any))
            .collect()
    }

    #[test]
    fn test_both_policies_share_the_interface() {
        let players = roster(8);
        let settings = GameSettings::default();
        for kind in [SelectorKind::Rotation, SelectorKind::Weighted] {
            let config = SelectorConfig {
                kind,
                seed: Some(SelectorSeed::from(1_u128)),
                ..SelectorConfig::default()
            };
            let selector = config.build();
            let suggestion = selector.select_lineup(&players, &settings, &[]).unwrap();
            assert_eq!(suggestion.players.len(), 5, "{}", selector.name());
        }
    }

    #[test]
    fn test_insufficient_players() {
        let mut players = roster(6);
        players[0].is_present = false;
        players[1].is_present = false;
        let err = present_players(&players, &GameSettings::default()).unwrap_err();
        assert!(matches!(
            err,
            SelectionError::InsufficientPlayers {
                present: 4,
                required: 5
            }
        ));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = GameSettings {
            players_on_court: 0,
            ..GameSettings::default()
        };
        let err = present_players(&roster(3), &settings).unwrap_err();
        assert!(matches!(err, SelectionError::InvalidSettings(_)));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{ "kind": "weighted", "seed": "000000000000000000000000000000ff" }"#;
        let config: SelectorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.kind, SelectorKind::Weighted);
        assert_eq!(config.seed, Some(SelectorSeed::from(255_u128)));
        assert_eq!(config.rotation, RotationConfig::default());
        assert_eq!("weighted".parse::<SelectorKind>().unwrap(), SelectorKind::Weighted);
    }
}
