use std::path::PathBuf;

use rotacourt_engine::{
    Game,
    fairness::{self, FairnessEntry, FairnessMetric},
};

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReportArg {
    /// Game JSON file
    game: PathBuf,
    /// Fairness metric: `PeriodCount` or `PlayingTime`
    #[arg(long, default_value = "PeriodCount")]
    metric: FairnessMetric,
}

pub(crate) fn run(arg: &ReportArg) -> anyhow::Result<()> {
    let ReportArg { game, metric } = arg;
    let game: Game = util::read_json_file("game", game)?;
    let entries = fairness::report(*metric, &game.roster, &game.periods, &game.settings)?;
    print_report(&game, *metric, &entries);
    println!(
        "Balance score: {:.3}",
        fairness::balance_score(&game.roster)?
    );
    Ok(())
}

pub(crate) fn print_report(game: &Game, metric: FairnessMetric, entries: &[FairnessEntry]) {
    println!(
        "{metric} after {} completed periods:",
        game.completed_period_count()
    );
    println!(
        "  {:>3}  {:<20} {:>8} {:>8} {:>8}",
        "#", "Player", "Played", "Target", "Diff"
    );
    for entry in entries {
        let (jersey, name) = game
            .player(entry.player_id)
            .map_or((0, "?"), |p| (p.jersey_number, p.name.as_str()));
        println!(
            "  {jersey:>3}  {name:<20} {:>8.2} {:>8.2} {:>+8.2}",
            entry.played, entry.target, entry.difference
        );
    }
}
