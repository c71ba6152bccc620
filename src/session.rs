use crate::aggregate::{aggregate, SessionTable};
use crate::config::Config;
use crate::error::CcResult;
use crate::factory::{block_spec, build_from_spec, session_blocks};
use crate::rng::RandomSource;
use crate::runner::stimuli::{instruction_legend, preload_manifest};
use crate::runner::{run_trials, Presenter};
use crate::scorer::score_block;
use chrono::{DateTime, Local};
use std::path::Path;
use tracing::info;

pub const VERSION: &str = "1.0";
pub const AUTHORS: &str = "Makowski et al.";

/// Who took part and when.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub participant_id: String,
    pub started: DateTime<Local>,
    pub ended: DateTime<Local>,
    pub version: &'static str,
}

impl SessionInfo {
    pub fn start(participant_id: impl Into<String>) -> Self {
        let now = Local::now();
        Self {
            participant_id: participant_id.into(),
            started: now,
            ended: now,
            version: VERSION,
        }
    }

    pub fn finish(&mut self) {
        self.ended = Local::now();
    }

    pub fn duration_secs(&self) -> f64 {
        (self.ended - self.started).num_microseconds().unwrap_or(0) as f64 / 1e6
    }
}

/// Runs the whole procedure: the four blocks in order, each generated,
/// presented and scored, then aggregated into one table.
pub fn run_session<P: Presenter, R: RandomSource>(
    presenter: &mut P,
    config: &Config,
    rng: &mut R,
) -> CcResult<SessionTable> {
    config.validate()?;
    presenter.preload(Path::new(&config.paths.stimuli_dir), &preload_manifest())?;

    let mut scored_blocks = Vec::new();
    for params in session_blocks() {
        let spec = block_spec(params)?;
        info!("▶️  Block '{}' ({} trials)", spec.name, spec.len());

        let mut trials = build_from_spec(spec, rng);
        presenter.instructions(&instruction_legend(&params))?;
        run_trials(presenter, &mut trials, &config.timing, rng)?;
        scored_blocks.push(score_block(trials)?);
    }

    aggregate(scored_blocks, &config.scoring)
}
