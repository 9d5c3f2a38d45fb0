use clap::{Parser, Subcommand};

use self::{report::ReportArg, simulate::SimulateArg, suggest::SuggestArg};

mod report;
mod simulate;
mod suggest;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Suggest the next lineup for a stored game
    Suggest(#[clap(flatten)] SuggestArg),
    /// Print a fairness report for a stored game
    Report(#[clap(flatten)] ReportArg),
    /// Play a synthetic game end-to-end with a chosen selector
    Simulate(#[clap(flatten)] SimulateArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Suggest(arg) => suggest::run(&arg)?,
        Mode::Report(arg) => report::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
