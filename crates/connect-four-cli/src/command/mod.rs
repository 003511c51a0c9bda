use clap::{Parser, Subcommand};

use crate::config::{Config, ConfigArgs};

use self::{moves::MovesArg, play::PlayArg};

mod moves;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[clap(flatten)]
    config: ConfigArgs,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play an interactive two-player game in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Apply a sequence of column moves and print the resulting game
    Moves(#[clap(flatten)] MovesArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let config = Config::load(args.config.config.as_deref())?.with_overrides(&args.config);
    config.validate()?;

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg, &config)?,
        Mode::Moves(arg) => moves::run(&arg, &config)?,
    }
    Ok(())
}
