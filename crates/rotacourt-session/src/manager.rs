use std::collections::BTreeSet;

use log::{debug, info, warn};
use rotacourt_engine::{
    Game, GameSettings, GameSettingsUpdate, LineupSuggestion, Period, PeriodId, Player, PlayerId,
    fairness::{self, FairnessEntry, FairnessMetric},
};
use rotacourt_selector::{LineupSelector, SelectionError};

use crate::{GameError, ManagerConfig, SuggestionError, SwapError};

#[derive(Debug)]
pub struct GameManager {
    game: Game,
    selector: Box<dyn LineupSelector>,
    config: ManagerConfig,
}

impl GameManager {
    /// Takes ownership of `game` after checking its roster, settings and
    /// period history.
    pub fn new(
        game: Game,
        selector: Box<dyn LineupSelector>,
        config: ManagerConfig,
    ) -> Result<Self, GameError> {
        game.validate_roster().map_err(GameError::InvalidRoster)?;
        game.validate_periods().map_err(GameError::InvalidHistory)?;
        game.settings
            .validate()
            .map_err(GameError::InvalidSettings)?;
        Ok(Self {
            game,
            selector,
            config,
        })
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub fn into_game(self) -> Game {
        self.game
    }

    #[must_use]
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    #[must_use]
    pub fn selector(&self) -> &dyn LineupSelector {
        self.selector.as_ref()
    }

    pub fn start_game(&mut self) -> Result<(), GameError> {
        let present = self.game.present_count();
        let required = self.game.settings.players_on_court;
        if present < required {
            warn!("cannot start game {}: {present} of {required} players present", self.game.id);
            return Err(GameError::InsufficientPlayers { present, required });
        }
        self.game.is_active = true;
        info!("game {} started with {present} players present", self.game.id);
        Ok(())
    }

    pub fn end_game(&mut self) {
        self.game.is_active = false;
        info!(
            "game {} ended after {} periods",
            self.game.id,
            self.game.completed_period_count()
        );
    }

    /// Sets attendance without touching playing time.
    pub fn mark_present(&mut self, player_id: PlayerId, present: bool) -> Result<&Player, GameError> {
        let player = self.player_mut(player_id)?;
        player.is_present = present;
        debug!("player {player_id} present: {present}");
        Ok(player)
    }

    /// Marks an absent player present with a starting playing-time credit.
    ///
    /// The credit is `late_arrival_ratio` times the minutes an average present
    /// player has accrued over the completed periods. Time already accrued is
    /// never lowered, and a player who is already present is left unchanged.
    pub fn add_late_player(&mut self, player_id: PlayerId) -> Result<&Player, GameError> {
        let credit = self.late_arrival_credit();
        let player = self.player_mut(player_id)?;
        if !player.is_present {
            player.is_present = true;
            player.total_playing_time = player.total_playing_time.max(credit);
            info!(
                "late arrival: player {player_id} starts at {:.1} minutes",
                player.total_playing_time
            );
        }
        Ok(player)
    }

    /// Runs the configured selector on the current roster and history.
    pub fn generate_lineup(&self) -> Result<LineupSuggestion, GameError> {
        let suggestion = self
            .selector
            .select_lineup(&self.game.roster, &self.game.settings, &self.game.periods)
            .map_err(|err| match err {
                SelectionError::InsufficientPlayers { present, required } => {
                    GameError::InsufficientPlayers { present, required }
                }
                err => GameError::Selection(err),
            })?;
        debug!(
            "{} selector suggested {:?}",
            self.selector.name(),
            suggestion.players
        );
        Ok(suggestion)
    }

    /// Appends an incomplete period with the suggested lineup.
    pub fn commit_suggestion(
        &mut self,
        suggestion: &LineupSuggestion,
    ) -> Result<&Period, GameError> {
        if let Err(err) = self.check_lineup(&suggestion.players) {
            warn!("rejected lineup {:?}: {err}", suggestion.players);
            return Err(GameError::InvalidSuggestion(err));
        }
        let id = self.next_period_id();
        let number = self.game.next_period_number();
        self.game
            .periods
            .push(Period::new(id, number, suggestion.players.clone()));
        info!("period {number} committed: {:?}", suggestion.players);
        Ok(self.game.periods.last().expect("period was just pushed"))
    }

    /// Completes a period and credits its lineup with the played minutes.
    ///
    /// Without `actual_duration` the configured period length is credited.
    /// The recorded duration is frozen with the period, so later settings
    /// changes leave it alone. A completed period cannot be completed again.
    pub fn complete_period(
        &mut self,
        period_id: PeriodId,
        actual_duration: Option<f32>,
    ) -> Result<&Period, GameError> {
        let index = self.period_index(period_id)?;
        if self.game.periods[index].is_completed {
            warn!("period {period_id} is already completed");
            return Err(GameError::PeriodAlreadyCompleted { period_id });
        }
        let minutes = actual_duration.unwrap_or(self.game.settings.period_duration);
        if !(minutes.is_finite() && minutes >= 0.0) {
            return Err(GameError::InvalidDuration { minutes });
        }

        let Game {
            roster, periods, ..
        } = &mut self.game;
        let period = &mut periods[index];
        for player in roster.iter_mut().filter(|p| period.contains(p.id)) {
            player.total_playing_time += minutes;
        }
        period.is_completed = true;
        period.actual_duration = Some(minutes);
        info!("period {} completed after {minutes:.1} minutes", period.number);
        Ok(period)
    }

    /// Substitutes `in_id` for `out_id` in an incomplete period, keeping the
    /// lineup order.
    pub fn swap_player(
        &mut self,
        period_id: PeriodId,
        out_id: PlayerId,
        in_id: PlayerId,
    ) -> Result<&Period, GameError> {
        let index = self.period_index(period_id)?;
        let slot = match self.check_swap(&self.game.periods[index], out_id, in_id) {
            Ok(slot) => slot,
            Err(err) => {
                warn!("rejected swap {out_id} -> {in_id} in period {period_id}: {err}");
                return Err(GameError::InvalidSwap(err));
            }
        };
        let period = &mut self.game.periods[index];
        period.lineup[slot] = in_id;
        info!("period {}: player {in_id} replaces {out_id}", period.number);
        Ok(period)
    }

    /// Selects and commits one more overtime period.
    ///
    /// Returns `None` while regulation periods remain or once the overtime
    /// allowance is used up.
    pub fn add_overtime_period(&mut self) -> Result<Option<&Period>, GameError> {
        let settings = &self.game.settings;
        let regulation_done = self.game.next_period_number() > settings.periods_count;
        let used = self.game.overtime_periods_used();
        if !regulation_done || used >= settings.overtime_periods as usize {
            debug!("no overtime period available ({used} of {} used)", settings.overtime_periods);
            return Ok(None);
        }
        let suggestion = self.generate_lineup()?;
        let period = self.commit_suggestion(&suggestion)?;
        info!("overtime period {} added", period.number);
        Ok(Some(period))
    }

    /// Merges `update` into the settings. Completed periods keep the
    /// durations they were credited with.
    ///
    /// The lineup size is locked while a committed period is still in
    /// progress, since its lineup was sized for the old value.
    pub fn update_settings(
        &mut self,
        update: &GameSettingsUpdate,
    ) -> Result<&GameSettings, GameError> {
        let settings = update.apply(&self.game.settings);
        if settings.players_on_court != self.game.settings.players_on_court
            && let Some(period) = self.game.periods.iter().find(|p| !p.is_completed)
        {
            warn!(
                "rejected lineup size change to {} during period {}",
                settings.players_on_court, period.number
            );
            return Err(GameError::LineupSizeLocked {
                period_id: period.id,
            });
        }
        if let Err(err) = settings.validate() {
            warn!("rejected settings update {update:?}: {err}");
            return Err(GameError::InvalidSettings(err));
        }
        self.game.settings = settings;
        info!("settings updated: {settings:?}");
        Ok(&self.game.settings)
    }

    pub fn fairness_report(&self, metric: FairnessMetric) -> Result<Vec<FairnessEntry>, GameError> {
        fairness::report(
            metric,
            &self.game.roster,
            &self.game.periods,
            &self.game.settings,
        )
        .map_err(GameError::Fairness)
    }

    pub fn balance_score(&self) -> Result<f32, GameError> {
        fairness::balance_score(&self.game.roster).map_err(GameError::Fairness)
    }

    fn player_mut(&mut self, player_id: PlayerId) -> Result<&mut Player, GameError> {
        self.game
            .player_mut(player_id)
            .ok_or(GameError::PlayerNotFound { player_id })
    }

    fn period_index(&self, period_id: PeriodId) -> Result<usize, GameError> {
        self.game
            .periods
            .iter()
            .position(|p| p.id == period_id)
            .ok_or(GameError::PeriodNotFound { period_id })
    }

    fn next_period_id(&self) -> PeriodId {
        let last = self.game.periods.iter().map(|p| p.id.get()).max();
        PeriodId::new(last.map_or(1, |id| id + 1))
    }

    #[expect(clippy::cast_precision_loss)]
    fn late_arrival_credit(&self) -> f32 {
        let present = self.game.present_count();
        if present == 0 {
            return 0.0;
        }
        let court_minutes =
            self.game.elapsed_minutes() * self.game.settings.players_on_court as f32;
        self.config.late_arrival_ratio * court_minutes / present as f32
    }

    fn check_lineup(&self, lineup: &[PlayerId]) -> Result<(), SuggestionError> {
        let expected = self.game.settings.players_on_court;
        if lineup.len() != expected {
            return Err(SuggestionError::WrongSize {
                expected,
                actual: lineup.len(),
            });
        }
        let mut seen = BTreeSet::new();
        for &player_id in lineup {
            if !seen.insert(player_id) {
                return Err(SuggestionError::DuplicatePlayer { player_id });
            }
            let player = self
                .game
                .player(player_id)
                .ok_or(SuggestionError::UnknownPlayer { player_id })?;
            if !player.is_present {
                return Err(SuggestionError::AbsentPlayer { player_id });
            }
        }
        Ok(())
    }

    /// Index in the lineup of the player to take off.
    fn check_swap(
        &self,
        period: &Period,
        out_id: PlayerId,
        in_id: PlayerId,
    ) -> Result<usize, SwapError> {
        if period.is_completed {
            return Err(SwapError::PeriodCompleted {
                period_id: period.id,
            });
        }
        let slot = period
            .lineup
            .iter()
            .position(|&id| id == out_id)
            .ok_or(SwapError::NotInLineup { player_id: out_id })?;
        if !self.game.player(in_id).is_some_and(|p| p.is_present) {
            return Err(SwapError::Unavailable { player_id: in_id });
        }
        if period.contains(in_id) {
            return Err(SwapError::AlreadyInLineup { player_id: in_id });
        }
        Ok(slot)
    }
}
