use super::cumulative::CumulativeRt;
use crate::trial::{Direction, Outcome, Trial};

/// A trial after scoring: the factory's design, the runner's
/// observations and the derived columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTrial {
    pub trial: Trial,
    pub outcome: Outcome,

    pub correct: bool,
    pub color_congruence: bool,

    // Physical salience of the figures
    pub luminance_global: f64,
    pub luminance_local: f64,
    pub contrast: f64,

    pub cumulative: CumulativeRt,
}

impl ScoredTrial {
    pub fn expected_response(&self) -> Option<Direction> {
        self.trial.expected_response()
    }

    /// Correct answer on a trial that asked for a key press: the only
    /// trials whose RT measures speed.
    pub fn counts_for_speed(&self) -> bool {
        self.correct && self.trial.response_correct.is_some()
    }

    pub fn rt(&self) -> f64 {
        self.outcome.rt
    }
}
