use std::path::PathBuf;

use rotacourt_engine::Game;
use rotacourt_selector::{SelectorKind, SelectorSeed};

use crate::{config::RotacourtConfig, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SuggestArg {
    /// Game JSON file
    game: PathBuf,
    /// Selector and coordinator configuration JSON file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Selection policy, overriding the configuration file
    #[arg(long)]
    selector: Option<SelectorKind>,
    /// Seed for the weighted selector (32 hex digits)
    #[arg(long)]
    seed: Option<SelectorSeed>,
    /// Commit the suggestion as the next period and write the updated game
    #[arg(long)]
    commit: bool,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SuggestArg) -> anyhow::Result<()> {
    let config =
        RotacourtConfig::load(arg.config.as_deref())?.with_overrides(arg.selector, arg.seed);
    let game: Game = util::read_json_file("game", &arg.game)?;
    let mut manager = config.build_manager(game)?;

    let suggestion = manager.generate_lineup()?;
    eprintln!(
        "Suggested lineup for period {}:",
        manager.game().next_period_number()
    );
    for id in &suggestion.players {
        if let Some(player) = manager.game().player(*id) {
            eprintln!(
                "  #{:<3} {:<20} {} (skill {})",
                player.jersey_number, player.name, player.position, player.skill_level
            );
        }
    }
    eprintln!("  Average skill:    {:.2}", suggestion.average_skill_level);
    eprintln!("  Playing time:     {:.3}", suggestion.playing_time_balance);
    eprintln!("  Position balance: {:.3}", suggestion.position_balance);

    if arg.commit {
        let number = manager.commit_suggestion(&suggestion)?.number;
        eprintln!("Committed as period {number}");
        util::write_json(manager.game(), arg.output.as_deref())
    } else {
        util::write_json(&suggestion, arg.output.as_deref())
    }
}
