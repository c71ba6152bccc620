//! Small descriptive statistics over reaction times.
//!
//! Undefined values are `None` rather than NaN: a mean needs one sample, a
//! standard deviation or standard error needs two.

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RtStats {
    pub n: usize,
    pub mean: Option<f64>,
    pub sd: Option<f64>,
}

impl RtStats {
    /// Standard error of the mean.
    pub fn se(&self) -> Option<f64> {
        self.sd.map(|sd| sd / (self.n as f64).sqrt())
    }

    /// Whether `rt` falls outside `mean ± z·sd`. Undefined statistics
    /// flag nothing.
    pub fn is_outlier(&self, rt: f64, z: f64) -> bool {
        match (self.mean, self.sd) {
            (Some(mean), Some(sd)) => rt > mean + z * sd || rt < mean - z * sd,
            _ => false,
        }
    }
}

/// Welford accumulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Running {
    n: usize,
    mean: f64,
    m2: f64,
}

impl Running {
    pub fn push(&mut self, x: f64) {
        self.n += 1;
        let delta = x - self.mean;
        self.mean += delta / self.n as f64;
        self.m2 += delta * (x - self.mean);
    }

    pub fn stats(&self) -> RtStats {
        RtStats {
            n: self.n,
            mean: (self.n > 0).then_some(self.mean),
            sd: (self.n > 1).then(|| (self.m2 / (self.n - 1) as f64).sqrt()),
        }
    }
}

pub fn describe<I: IntoIterator<Item = f64>>(values: I) -> RtStats {
    let mut acc = Running::default();
    for v in values {
        acc.push(v);
    }
    acc.stats()
}

/// `part / whole`, undefined for an empty population.
pub fn ratio(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64)
}
