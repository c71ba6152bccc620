use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Administer the four blocks and score the session
    Run(cmd::run::RunArgs),
    /// Print the trial list of a single block
    Sequence(cmd::sequence::SequenceArgs),
}

fn main() {
    // Raw matches tell typed values apart from defaults when merging configs.
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let default_level = if cli.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Run(args) => cmd::run::run(args, matches.subcommand_matches("run")),
        Commands::Sequence(args) => cmd::sequence::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
