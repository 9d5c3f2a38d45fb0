use std::path::PathBuf;

use anyhow::Context as _;
use chrono::Local;
use rand::Rng;
use rotacourt_engine::{
    Game, GameId, GameSettings, Period, Player, PlayerId, Position, SKILL_LEVELS, TeamId,
    fairness::FairnessMetric,
};
use rotacourt_selector::{SelectorKind, SelectorSeed};
use rotacourt_session::GameManager;

use crate::{command::report, config::RotacourtConfig, util};

const POSITIONS: [Position; 4] = [
    Position::Guard,
    Position::Forward,
    Position::Center,
    Position::Any,
];

/// Late arrivals show up before this period starts.
const LATE_ARRIVAL_PERIOD: u32 = 3;

/// Shortest played share of a period; clock stoppages cut some periods short.
const MIN_PLAYED_RATIO: f32 = 0.75;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Number of players on the roster
    #[arg(long, default_value_t = 10)]
    players: u32,
    /// Number of players arriving late
    #[arg(long, default_value_t = 1)]
    late_arrivals: u32,
    /// Play the allowed overtime periods after regulation
    #[arg(long)]
    overtime: bool,
    /// Selector and coordinator configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Selection policy, overriding the configuration file
    #[arg(long)]
    selector: Option<SelectorKind>,
    /// Seed for the roster, period lengths and the weighted selector
    #[arg(long)]
    seed: Option<SelectorSeed>,
    /// Write the final game JSON to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    anyhow::ensure!(
        arg.late_arrivals <= arg.players,
        "{} late arrivals on a roster of {} players",
        arg.late_arrivals,
        arg.players
    );
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let config =
        RotacourtConfig::load(arg.config.as_deref())?.with_overrides(arg.selector, Some(seed));
    eprintln!("Simulating with {} selector, seed {seed}", config.selector.kind);

    let mut rng = seed.rng();
    let roster = synthetic_roster(arg.players, arg.late_arrivals, &mut rng)?;
    let late = roster
        .iter()
        .filter(|p| !p.is_present)
        .map(|p| p.id)
        .collect::<Vec<_>>();
    let game = Game::new(
        GameId::new(1),
        TeamId::new(1),
        Local::now().date_naive(),
        GameSettings::default(),
        roster,
    );

    let mut manager = config.build_manager(game)?;
    play(&mut manager, &late, arg.overtime, &mut rng)?;

    let game = manager.game();
    for metric in [FairnessMetric::PeriodCount, FairnessMetric::PlayingTime] {
        println!();
        report::print_report(game, metric, &manager.fairness_report(metric)?);
    }
    println!("Balance score: {:.3}", manager.balance_score()?);

    if let Some(output) = &arg.output {
        util::write_json(game, Some(output.as_path()))?;
        eprintln!("Game saved to {}", output.display());
    }
    Ok(())
}

/// Builds `count` players with random skills and positions. The last
/// `late_arrivals` of them start absent.
fn synthetic_roster<R>(count: u32, late_arrivals: u32, rng: &mut R) -> anyhow::Result<Vec<Player>>
where
    R: Rng + ?Sized,
{
    (1..=count)
        .map(|i| -> anyhow::Result<Player> {
            let jersey = u8::try_from(i)
                .ok()
                .filter(|n| *n <= 99)
                .with_context(|| format!("no jersey number left for player {i}"))?;
            let position = POSITIONS[rng.random_range(0..POSITIONS.len())];
            let skill = rng.random_range(SKILL_LEVELS);
            Ok(
                Player::new(PlayerId::new(i), format!("Player {i}"), jersey, skill, position)
                    .with_presence(i + late_arrivals <= count),
            )
        })
        .collect()
}

/// Plays regulation (and optionally overtime) with every period suggested
/// by the configured selector, printing each completed period.
fn play<R>(
    manager: &mut GameManager,
    late: &[PlayerId],
    overtime: bool,
    rng: &mut R,
) -> anyhow::Result<()>
where
    R: Rng + ?Sized,
{
    manager.start_game()?;
    let periods_count = manager.game().settings.periods_count;
    for number in 1..=periods_count {
        if number == LATE_ARRIVAL_PERIOD {
            for id in late {
                manager.add_late_player(*id)?;
            }
        }
        let suggestion = manager.generate_lineup()?;
        let period_id = manager.commit_suggestion(&suggestion)?.id;
        let minutes =
            manager.game().settings.period_duration * rng.random_range(MIN_PLAYED_RATIO..=1.0);
        let period = manager.complete_period(period_id, Some(minutes))?.clone();
        print_period(manager.game(), &period);
    }

    if overtime {
        while let Some(period_id) = manager.add_overtime_period()?.map(|p| p.id) {
            let minutes = manager.game().settings.period_duration / 2.0;
            let period = manager.complete_period(period_id, Some(minutes))?.clone();
            print_period(manager.game(), &period);
        }
    }
    manager.end_game();
    Ok(())
}

fn print_period(game: &Game, period: &Period) {
    let overtime = if period.is_overtime(&game.settings) {
        " OT"
    } else {
        ""
    };
    let lineup = period
        .lineup
        .iter()
        .filter_map(|id| game.player(*id))
        .map(|p| format!("#{} {}", p.jersey_number, p.position))
        .collect::<Vec<_>>();
    println!(
        "Period {}{overtime} ({:.1} min): {}",
        period.number,
        period.duration(&game.settings),
        lineup.join(", ")
    );
}

#[cfg(test)]
mod tests {
    use rotacourt_engine::fairness;
    use rotacourt_selector::SelectorConfig;

    use super::*;

    fn manager(kind: SelectorKind, roster: Vec<Player>) -> GameManager {
        let config = RotacourtConfig {
            selector: SelectorConfig {
                kind,
                seed: Some(SelectorSeed::from(17_u128)),
                ..SelectorConfig::default()
            },
            ..RotacourtConfig::default()
        };
        let game = Game::new(
            GameId::new(1),
            TeamId::new(1),
            Local::now().date_naive(),
            GameSettings::default(),
            roster,
        );
        config.build_manager(game).unwrap()
    }

    #[test]
    fn test_synthetic_roster_is_valid() {
        let mut rng = SelectorSeed::from(3_u128).rng();
        let roster = synthetic_roster(12, 2, &mut rng).unwrap();
        assert_eq!(roster.len(), 12);
        assert_eq!(roster.iter().filter(|p| p.is_present).count(), 10);
        assert!(!roster[11].is_present);
        assert!(roster.iter().all(|p| SKILL_LEVELS.contains(&p.skill_level)));
        assert!(synthetic_roster(100, 0, &mut rng).is_err());
    }

    #[test]
    fn test_simulated_games_follow_the_rotation_invariants() {
        for kind in [SelectorKind::Rotation, SelectorKind::Weighted] {
            let mut rng = SelectorSeed::from(5_u128).rng();
            let roster = synthetic_roster(9, 1, &mut rng).unwrap();
            let mut manager = manager(kind, roster);
            play(&mut manager, &[PlayerId::new(9)], true, &mut rng).unwrap();

            let game = manager.game();
            assert!(!game.is_active);
            assert_eq!(game.periods.len(), 5, "{kind}");
            assert!(game.periods.iter().all(|p| p.is_completed));
            let played = fairness::periods_played(&game.roster, &game.periods);
            assert_eq!(played.values().sum::<usize>(), 5 * 5, "{kind}");
            assert!(game.player(PlayerId::new(9)).unwrap().is_present);
        }
    }
}
