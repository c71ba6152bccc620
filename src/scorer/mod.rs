pub mod color;
pub mod cumulative;
pub mod types;

pub use self::cumulative::CumulativeRt;
pub use self::types::ScoredTrial;

use self::cumulative::running_rt;
use crate::error::{CcResult, CoConError};
use crate::trial::{Conflict, Trial};
use strum::IntoEnumIterator;
use tracing::debug;

/// Derives per-trial columns for one block of run trials.
///
/// Rows come back in presentation order. When the block manipulates
/// conflict, the running RT statistics restart for each congruence group.
pub fn score_block(trials: Vec<Trial>) -> CcResult<Vec<ScoredTrial>> {
    let Some(first) = trials.first() else {
        return Ok(Vec::new());
    };
    let params = first.params;
    if let Some(stray) = trials.iter().find(|t| t.params != params) {
        return Err(CoConError::Validation(format!(
            "block mixes conditions {:?} and {:?}",
            params, stray.params
        )));
    }

    let mut scored = trials
        .into_iter()
        .map(score_trial)
        .collect::<CcResult<Vec<_>>>()?;

    let groups: Vec<Vec<usize>> = if params.conflict {
        Conflict::iter()
            .map(|c| {
                (0..scored.len())
                    .filter(|&i| scored[i].trial.conflict == c)
                    .collect::<Vec<_>>()
            })
            .filter(|g| !g.is_empty())
            .collect()
    } else {
        vec![(0..scored.len()).collect()]
    };

    for mut group in groups {
        group.sort_by_key(|&i| scored[i].outcome.order);
        let rows = group
            .iter()
            .map(|&i| (scored[i].counts_for_speed(), scored[i].rt()));
        let cumulative = running_rt(rows);
        debug!(
            "Cumulative pass over {} rows ({:?})",
            group.len(),
            scored[group[0]].trial.conflict
        );
        for (i, c) in group.into_iter().zip(cumulative) {
            scored[i].cumulative = c;
        }
    }

    scored.sort_by_key(|s| s.outcome.order);
    Ok(scored)
}

fn score_trial(mut trial: Trial) -> CcResult<ScoredTrial> {
    let outcome = trial.outcome.take().ok_or_else(|| {
        CoConError::Validation(format!(
            "trial {} / {} was never presented",
            trial.global.asset_name(),
            trial.local.asset_name()
        ))
    })?;

    let correct = outcome.response == trial.expected_response();
    let (g, l) = (trial.global.color, trial.local.color);

    Ok(ScoredTrial {
        correct,
        color_congruence: g == l,
        luminance_global: color::luminance(g),
        luminance_local: color::luminance(l),
        contrast: color::contrast(g, l),
        cumulative: CumulativeRt::default(),
        trial,
        outcome,
    })
}
