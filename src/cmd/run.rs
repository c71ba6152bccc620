use crate::reports;
use clap::{ArgMatches, Args};
use cocon::config::Config;
use cocon::error::{CcResult, CoConError};
use cocon::export::save_session;
use cocon::runner::SimulatedPresenter;
use cocon::session::{run_session, SessionInfo, AUTHORS};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

// Added to `--seed` for the simulated participant; wraps at u64::MAX.
const PRESENTER_SEED_OFFSET: u64 = 9999;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: Config,

    /// Skips the interactive prompt
    #[arg(short, long)]
    pub participant: Option<String>,

    #[arg(short = 'S', long)]
    pub seed: Option<u64>,

    /// JSON file with timing, scoring and path settings
    #[arg(long)]
    pub config_file: Option<String>,
}

pub fn run(args: RunArgs, matches: Option<&ArgMatches>) -> CcResult<()> {
    let config = resolve_config(&args, matches)?;
    config.validate()?;

    println!("\n🧠 CoCon: Cognitive Control Task ({})", AUTHORS);
    let participant = match args.participant {
        Some(ref id) => id.clone(),
        None => prompt_participant()?,
    };

    let mut rng = match args.seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    };
    let mut presenter = SimulatedPresenter::new(args.seed.map(|s| s.wrapping_add(PRESENTER_SEED_OFFSET)));
    warn!("⚠️  No display backend attached: responses are simulated.");

    let mut session = SessionInfo::start(participant);
    let table = run_session(&mut presenter, &config, &mut rng)?;
    session.finish();

    let path = save_session(&config.paths.data_dir, &table, &session)?;

    reports::print_speed_report(&table.cells);
    reports::print_error_report(&table.cells);
    reports::print_summary(&table.summary);

    println!(
        "\n✅ {} trials in {:.1}s. Results: {}",
        table.rows.len(),
        session.duration_secs(),
        path.display()
    );
    Ok(())
}

fn resolve_config(args: &RunArgs, matches: Option<&ArgMatches>) -> CcResult<Config> {
    let Some(path) = &args.config_file else {
        return Ok(args.config.clone());
    };

    info!("⚙️  Loading settings from: {}", path);
    let mut config = Config::load_from_file(path)?;
    if let Some(m) = matches {
        config.merge_from_cli(&args.config, m);
    }
    Ok(config)
}

fn prompt_participant() -> CcResult<String> {
    print!("Participant ID: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let id = line.trim();
    if id.is_empty() {
        return Err(CoConError::Config("a participant ID is required".to_string()));
    }
    Ok(id.to_string())
}
