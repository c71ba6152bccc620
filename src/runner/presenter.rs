use crate::error::CcResult;
use crate::rng::RandomSource;
use crate::runner::stimuli::LegendEntry;
use crate::trial::{Direction, Stimulus};
use std::path::Path;
use tracing::debug;

/// The display and keyboard side of the experiment.
///
/// Implementations own the window, image cache and response clock. The
/// runner only tells them what to show and how long to listen.
pub trait Presenter {
    /// Called once per session with every image the blocks may request.
    /// Assets resolve to files via [`Stimulus::asset_path`].
    fn preload(&mut self, _stimuli_dir: &Path, _assets: &[Stimulus]) -> CcResult<()> {
        Ok(())
    }

    /// Shows the instruction page of a block and waits for the go-ahead.
    fn instructions(&mut self, _legend: &[LegendEntry]) -> CcResult<()> {
        Ok(())
    }

    /// Blocks for roughly `ms` milliseconds and returns the time actually waited.
    fn wait(&mut self, ms: u32) -> CcResult<u32>;

    /// Draws the global figure, then the local figure on top of it.
    fn show(&mut self, global: &Stimulus, local: &Stimulus) -> CcResult<()>;

    /// Blocks until one of `allowed` is pressed or `timeout_ms` elapses.
    /// Returns the key (`None` on timeout) and the elapsed time in ms.
    fn capture_response(
        &mut self,
        allowed: &[Direction],
        timeout_ms: u32,
    ) -> CcResult<(Option<Direction>, f64)>;

    /// Blanks the screen between trials.
    fn clear(&mut self) -> CcResult<()> {
        Ok(())
    }
}

/// Stand-in participant: never waits, answers at random.
///
/// Each response is one of the allowed keys or a timeout with equal
/// probability; RTs are uniform between 100 ms and the timeout.
pub struct SimulatedPresenter {
    pub rng: fastrand::Rng,
    pub shown: usize,
}

impl SimulatedPresenter {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        Self { rng, shown: 0 }
    }
}

const SIMULATED_MIN_RT_MS: f64 = 100.0;

impl Presenter for SimulatedPresenter {
    fn preload(&mut self, stimuli_dir: &Path, assets: &[Stimulus]) -> CcResult<()> {
        debug!(
            "Simulated preload of {} images from {}",
            assets.len(),
            stimuli_dir.display()
        );
        Ok(())
    }

    fn instructions(&mut self, legend: &[LegendEntry]) -> CcResult<()> {
        for entry in legend {
            debug!(
                "Legend: {} on {} -> {}",
                entry.local.asset_name(),
                entry.global.asset_name(),
                entry.cue.asset_name()
            );
        }
        Ok(())
    }

    fn wait(&mut self, ms: u32) -> CcResult<u32> {
        Ok(ms)
    }

    fn show(&mut self, _global: &Stimulus, _local: &Stimulus) -> CcResult<()> {
        self.shown += 1;
        Ok(())
    }

    fn capture_response(
        &mut self,
        allowed: &[Direction],
        timeout_ms: u32,
    ) -> CcResult<(Option<Direction>, f64)> {
        let pick = self.rng.index(allowed.len() + 1);
        let response = allowed.get(pick).copied();
        let ceiling = (timeout_ms as f64).max(SIMULATED_MIN_RT_MS + 1.0);
        let rt = self.rng.uniform(SIMULATED_MIN_RT_MS, ceiling);
        Ok((response, rt))
    }
}
