use crate::error::{CcResult, CoConError};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub timing: TimingParams,
    #[command(flatten)]
    pub scoring: ScoringParams,
    #[command(flatten)]
    pub paths: SessionPaths,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingParams {
    // Fixation before the very first stimulus of a block
    #[arg(long, default_value_t = 2000)]
    pub first_prestimulus_ms: u32,

    // Jittered fixation for every later trial: uniform in [min, max)
    #[arg(long, default_value_t = 33.333333)]
    pub prestimulus_min_ms: f64,
    #[arg(long, default_value_t = 2000.0)]
    pub prestimulus_max_ms: f64,

    #[arg(long, default_value_t = 1750)]
    pub response_timeout_ms: u32,
}

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            first_prestimulus_ms: 2000,
            prestimulus_min_ms: 33.333333,
            prestimulus_max_ms: 2000.0,
            response_timeout_ms: 1750,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringParams {
    /// Half-width of the RT inclusion band, in standard deviations.
    #[arg(long, default_value_t = 1.96)]
    pub outlier_z: f64,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self { outlier_z: 1.96 }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionPaths {
    #[arg(long, default_value = "./Stimuli/")]
    pub stimuli_dir: String,
    #[arg(long, default_value = "./Data/")]
    pub data_dir: String,
}

impl Default for SessionPaths {
    fn default() -> Self {
        Self {
            stimuli_dir: "./Stimuli/".to_string(),
            data_dir: "./Data/".to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CcResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Overwrites fields with values the user typed on the command line,
    /// leaving file-provided values in place for everything else.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($group:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$group.$field = cli.$group.$field.clone();
                }
            };
        }

        update_if_present!(timing.first_prestimulus_ms);
        update_if_present!(timing.prestimulus_min_ms);
        update_if_present!(timing.prestimulus_max_ms);
        update_if_present!(timing.response_timeout_ms);

        update_if_present!(scoring.outlier_z);

        update_if_present!(paths.stimuli_dir);
        update_if_present!(paths.data_dir);
    }

    pub fn validate(&self) -> CcResult<()> {
        let t = &self.timing;
        if t.response_timeout_ms == 0 {
            return Err(CoConError::Config(
                "response_timeout_ms must be positive".to_string(),
            ));
        }
        if !(t.prestimulus_min_ms.is_finite() && t.prestimulus_max_ms.is_finite()) {
            return Err(CoConError::Config(
                "prestimulus bounds must be finite".to_string(),
            ));
        }
        if t.prestimulus_min_ms < 0.0 || t.prestimulus_min_ms >= t.prestimulus_max_ms {
            return Err(CoConError::Config(format!(
                "prestimulus range [{}, {}) is empty",
                t.prestimulus_min_ms, t.prestimulus_max_ms
            )));
        }
        if self.scoring.outlier_z.is_nan() || self.scoring.outlier_z <= 0.0 {
            return Err(CoConError::Config(format!(
                "outlier_z must be positive, got {}",
                self.scoring.outlier_z
            )));
        }
        Ok(())
    }
}
