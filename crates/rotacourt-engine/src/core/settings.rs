use serde::{Deserialize, Serialize};

use crate::SettingsError;

/// Length and shape of a game.
///
/// Settings can change mid-game through [`GameSettingsUpdate`], but completed
/// periods keep the duration they were completed with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Number of regulation periods.
    pub periods_count: u32,
    /// Regulation period length in minutes.
    pub period_duration: f32,
    /// Maximum number of overtime periods that may be added.
    pub overtime_periods: u32,
    /// Lineup size.
    pub players_on_court: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            periods_count: 4,
            period_duration: 8.0,
            overtime_periods: 1,
            players_on_court: 5,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.periods_count == 0 {
            return Err(SettingsError::NoPeriods);
        }
        if self.players_on_court == 0 {
            return Err(SettingsError::EmptyLineup);
        }
        if !(self.period_duration.is_finite() && self.period_duration > 0.0) {
            return Err(SettingsError::InvalidPeriodDuration {
                minutes: self.period_duration,
            });
        }
        Ok(())
    }

    /// Total court minutes handed out over regulation:
    /// `periods_count * period_duration * players_on_court`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn regulation_court_minutes(&self) -> f32 {
        self.periods_count as f32 * self.period_duration * self.players_on_court as f32
    }
}

/// Partial update merged into [`GameSettings`]; `None` fields are left as is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettingsUpdate {
    pub periods_count: Option<u32>,
    pub period_duration: Option<f32>,
    pub overtime_periods: Option<u32>,
    pub players_on_court: Option<usize>,
}

impl GameSettingsUpdate {
    #[must_use]
    pub fn apply(&self, settings: &GameSettings) -> GameSettings {
        GameSettings {
            periods_count: self.periods_count.unwrap_or(settings.periods_count),
            period_duration: self.period_duration.unwrap_or(settings.period_duration),
            overtime_periods: self.overtime_periods.unwrap_or(settings.overtime_periods),
            players_on_court: self.players_on_court.unwrap_or(settings.players_on_court),
        }
    }
}
