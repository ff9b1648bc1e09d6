use clap::{Parser, Subcommand};

use self::{replay::ReplayArg, show_config::ShowConfigArg, train::TrainArg};

mod replay;
mod show_config;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Evolve a controller on the reference course
    Train(#[clap(flatten)] TrainArg),
    /// Run a trained model on the course and report how it did
    Replay(#[clap(flatten)] ReplayArg),
    /// Print the default training parameters as JSON
    ShowConfig(#[clap(flatten)] ShowConfigArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
        Mode::ShowConfig(arg) => show_config::run(&arg)?,
    }
    Ok(())
}
