pub mod presenter;
pub mod stimuli;

pub use self::presenter::{Presenter, SimulatedPresenter};

use crate::config::TimingParams;
use crate::error::CcResult;
use crate::rng::RandomSource;
use crate::trial::{Outcome, Trial, RESPONSE_KEYS};
use chrono::Local;
use tracing::{debug, info};

/// Fixation durations for a block of `n` trials, truncated to whole ms.
pub fn prestimulus_schedule<R: RandomSource>(
    n: usize,
    timing: &TimingParams,
    rng: &mut R,
) -> Vec<u32> {
    (0..n)
        .map(|i| {
            if i == 0 {
                timing.first_prestimulus_ms
            } else {
                rng.uniform(timing.prestimulus_min_ms, timing.prestimulus_max_ms) as u32
            }
        })
        .collect()
}

/// Presents every trial in order and records what happened.
pub fn run_trials<P: Presenter, R: RandomSource>(
    presenter: &mut P,
    trials: &mut [Trial],
    timing: &TimingParams,
    rng: &mut R,
) -> CcResult<()> {
    let schedule = prestimulus_schedule(trials.len(), timing, rng);
    let mut timeouts = 0;

    for (idx, (trial, planned)) in trials.iter_mut().zip(schedule).enumerate() {
        let trial_onset = Local::now();
        let waited = presenter.wait(planned)?;

        presenter.show(&trial.global, &trial.local)?;
        let stimulus_onset = Local::now();

        let (response, rt) = presenter.capture_response(&RESPONSE_KEYS, timing.response_timeout_ms)?;
        if response.is_none() {
            timeouts += 1;
        }

        trial.outcome = Some(Outcome {
            order: idx + 1,
            trial_onset,
            prestimulus_interval: waited,
            stimulus_onset,
            response,
            rt,
        });
        debug!(
            "Trial {:>3}: {} / {} -> {:?} in {:.0}ms",
            idx + 1,
            trial.global.asset_name(),
            trial.local.asset_name(),
            response,
            rt
        );

        presenter.clear()?;
    }

    info!(
        "Ran {} trials ({} without response)",
        trials.len(),
        timeouts
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::generate_block;
    use crate::trial::ResponseSelection;

    #[test]
    fn test_schedule_starts_with_fixed_fixation() {
        let mut rng = fastrand::Rng::with_seed(5);
        let timing = TimingParams::default();
        let schedule = prestimulus_schedule(33, &timing, &mut rng);
        assert_eq!(schedule.len(), 33);
        assert_eq!(schedule[0], 2000);
        assert!(schedule[1..].iter().all(|&ms| (33..2000).contains(&ms)));
    }

    #[test]
    fn test_run_fills_outcomes_in_order() {
        let mut rng = fastrand::Rng::with_seed(8);
        let mut presenter = SimulatedPresenter::new(Some(9));
        let mut trials = generate_block(ResponseSelection::Conditional, false, false, &mut rng).unwrap();

        run_trials(&mut presenter, &mut trials, &TimingParams::default(), &mut rng).unwrap();

        assert_eq!(presenter.shown, 33);
        for (i, t) in trials.iter().enumerate() {
            let o = t.outcome.as_ref().expect("trial was not run");
            assert_eq!(o.order, i + 1);
            assert!(o.rt >= 100.0 && o.rt < 1750.0);
            assert!(o.stimulus_onset >= o.trial_onset);
        }
    }
}
