#![allow(dead_code)]

use chrono::Local;
use cocon::rng::RandomSource;
use cocon::scorer::{score_block, ScoredTrial};
use cocon::trial::{
    Angle, BlockParams, Color, Conflict, Direction, Outcome, ResponseSelection, Shape, Stimulus,
    Trial,
};

pub const BASELINE: BlockParams = BlockParams::new(ResponseSelection::None, false, false);
pub const RESPONSE_SELECTION: BlockParams =
    BlockParams::new(ResponseSelection::Conditional, false, false);
pub const INHIBITION: BlockParams = BlockParams::new(ResponseSelection::Conditional, true, false);
pub const CONFLICT: BlockParams = BlockParams::new(ResponseSelection::Conditional, true, true);

/// Deterministic stand-in for the random source: replays `picks` in a
/// loop (each reduced modulo the requested range) and returns the low
/// bound for every float.
pub struct ScriptedRng {
    picks: Vec<usize>,
    pos: usize,
}

impl ScriptedRng {
    pub fn new(picks: Vec<usize>) -> Self {
        Self { picks, pos: 0 }
    }
}

impl RandomSource for ScriptedRng {
    fn index(&mut self, len: usize) -> usize {
        let v = self.picks[self.pos % self.picks.len()];
        self.pos += 1;
        v % len
    }

    fn uniform(&mut self, low: f64, _high: f64) -> f64 {
        low
    }
}

/// Builder for hand-made trials, already "run".
pub struct TrialBuilder {
    trial: Trial,
}

impl TrialBuilder {
    /// A go trial pointing `angle`, answered correctly in 500 ms.
    pub fn go(params: BlockParams, angle: Angle) -> Self {
        let now = Local::now();
        let correct = if params.response_selection == ResponseSelection::None {
            Angle::Down
        } else {
            angle
        };
        Self {
            trial: Trial {
                params,
                global: Stimulus {
                    color: Color::Red,
                    shape: if params.conflict {
                        Shape::Global
                    } else {
                        Shape::Circle
                    },
                    angle: Angle::Down,
                },
                local: Stimulus {
                    color: Color::Blue,
                    shape: Shape::Local,
                    angle,
                },
                inhibition: false,
                conflict: Conflict::Neutral,
                response_available: true,
                response_correct: Some(correct),
                outcome: Some(Outcome {
                    order: 1,
                    trial_onset: now,
                    prestimulus_interval: 1000,
                    stimulus_onset: now,
                    response: Some(correct.orientation()),
                    rt: 500.0,
                }),
            },
        }
    }

    /// Local figure points up: nothing should be pressed.
    pub fn no_response(params: BlockParams) -> Self {
        let mut b = Self::go(params, Angle::Up);
        b.trial.response_available = false;
        b.trial.response_correct = None;
        b.response(None)
    }

    /// White global figure: the response must be withheld.
    pub fn stop(params: BlockParams, angle: Angle) -> Self {
        let mut b = Self::go(params, angle);
        b.trial.global.color = Color::White;
        b.trial.inhibition = true;
        b.trial.response_available = angle != Angle::Up;
        b.trial.response_correct = None;
        b.response(None)
    }

    pub fn conflict(mut self, conflict: Conflict) -> Self {
        self.trial.conflict = conflict;
        self.trial.global.angle = match conflict {
            Conflict::Neutral => Angle::Down,
            Conflict::Congruent => self.trial.local.angle,
            Conflict::Incongruent => self.trial.local.angle.mirrored(),
        };
        self
    }

    pub fn order(mut self, order: usize) -> Self {
        if let Some(o) = self.trial.outcome.as_mut() {
            o.order = order;
        }
        self
    }

    pub fn rt(mut self, rt: f64) -> Self {
        if let Some(o) = self.trial.outcome.as_mut() {
            o.rt = rt;
        }
        self
    }

    pub fn response(mut self, response: Option<Direction>) -> Self {
        if let Some(o) = self.trial.outcome.as_mut() {
            o.response = response;
        }
        self
    }

    /// Answers with a key that is never right for this trial.
    pub fn wrong(self) -> Self {
        let wrong = match self.trial.expected_response() {
            Some(Direction::Left) => Direction::Right,
            Some(_) => Direction::Left,
            None => Direction::Down,
        };
        self.response(Some(wrong))
    }

    pub fn build(self) -> Trial {
        self.trial
    }
}

/// Numbers the trials 1..N in the given order, then scores them as a block.
pub fn score(mut trials: Vec<Trial>) -> Vec<ScoredTrial> {
    for (i, t) in trials.iter_mut().enumerate() {
        if let Some(o) = t.outcome.as_mut() {
            o.order = i + 1;
        }
    }
    score_block(trials).expect("scoring failed")
}

/// Correct baseline trials with the given RTs.
pub fn baseline_rts(rts: &[f64]) -> Vec<Trial> {
    rts.iter()
        .map(|&rt| TrialBuilder::go(BASELINE, Angle::Left).rt(rt).build())
        .collect()
}

/// Correct go trials of `params` with the given RTs.
pub fn go_rts(params: BlockParams, rts: &[f64]) -> Vec<Trial> {
    rts.iter()
        .map(|&rt| TrialBuilder::go(params, Angle::Right).rt(rt).build())
        .collect()
}
