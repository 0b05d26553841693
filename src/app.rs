use clap::{Parser, Subcommand};

use crate::{logging, Error};

mod run;
mod show;

use run::Run;
use show::Show;

/// A demo personal-banking terminal
#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct App {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start an interactive banking session
    Run(Run),

    /// Print the configured accounts and their summaries
    Show(Show),
}

impl App {
    pub fn from_cli() -> Self {
        Self::parse()
    }

    pub async fn run(self) -> Result<(), Error> {
        logging::set_up(self.verbose);

        match self.command {
            Command::Run(run) => run.run().await,
            Command::Show(_) => Show::run(),
        }
    }
}
