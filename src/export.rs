use crate::aggregate::{SessionRow, SessionTable, Summary};
use crate::error::CcResult;
use crate::session::SessionInfo;
use crate::trial::{Color, Conflict, Direction, ResponseSelection, Shape};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

fn timestamp(t: &DateTime<Local>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// One line of the results file. Missing values are written as empty cells.
#[derive(Debug, Serialize)]
struct OutputRecord<'a> {
    #[serde(rename = "Participant_ID")]
    participant_id: &'a str,
    #[serde(rename = "Experiment_Start")]
    experiment_start: String,
    #[serde(rename = "Experiment_End")]
    experiment_end: String,
    #[serde(rename = "Experiment_Duration")]
    experiment_duration: f64,
    #[serde(rename = "Version")]
    version: &'a str,

    #[serde(rename = "Order")]
    order: usize,
    #[serde(rename = "Condition_Response_Selection")]
    condition_response_selection: ResponseSelection,
    #[serde(rename = "Condition_Inhibition")]
    condition_inhibition: bool,
    #[serde(rename = "Condition_Conflict")]
    condition_conflict: bool,
    #[serde(rename = "Global_Shape")]
    global_shape: Shape,
    #[serde(rename = "Global_Color")]
    global_color: Color,
    #[serde(rename = "Global_Angle")]
    global_angle: i16,
    #[serde(rename = "Local_Shape")]
    local_shape: Shape,
    #[serde(rename = "Local_Color")]
    local_color: Color,
    #[serde(rename = "Local_Angle")]
    local_angle: i16,
    #[serde(rename = "Inhibition")]
    inhibition: bool,
    #[serde(rename = "Conflict")]
    conflict: Conflict,
    #[serde(rename = "Response_Availability")]
    response_availability: bool,
    #[serde(rename = "Response_Correct")]
    response_correct: Option<i16>,

    #[serde(rename = "Time_Trial_Onset")]
    time_trial_onset: String,
    #[serde(rename = "Prestimulus_Interval")]
    prestimulus_interval: u32,
    #[serde(rename = "Time_Stimulus_Onset")]
    time_stimulus_onset: String,
    #[serde(rename = "Response")]
    response: Option<Direction>,
    #[serde(rename = "RT")]
    rt: f64,

    #[serde(rename = "Response_Correct_Orientation")]
    response_correct_orientation: Option<Direction>,
    #[serde(rename = "Correct")]
    correct: u8,
    #[serde(rename = "Color_Congruence")]
    color_congruence: bool,
    #[serde(rename = "Luminance_Global")]
    luminance_global: f64,
    #[serde(rename = "Luminance_Local")]
    luminance_local: f64,
    #[serde(rename = "Contrast")]
    contrast: f64,
    #[serde(rename = "Cumulative_Average")]
    cumulative_average: Option<f64>,
    #[serde(rename = "Cumulative_SD")]
    cumulative_sd: Option<f64>,
    #[serde(rename = "Cumulative_SE")]
    cumulative_se: Option<f64>,
    #[serde(rename = "Outliers")]
    outliers: bool,

    #[serde(rename = "Speed_Core")]
    speed_core: Option<f64>,
    #[serde(rename = "Speed_Core_Variability")]
    speed_core_variability: Option<f64>,
    #[serde(rename = "Speed_Response_Selection_Effect")]
    speed_response_selection_effect: Option<f64>,
    #[serde(rename = "Speed_Inhibition_Effect")]
    speed_inhibition_effect: Option<f64>,
    #[serde(rename = "Speed_Congruence_Effect")]
    speed_congruence_effect: Option<f64>,
    #[serde(rename = "Speed_Incongruence_Effect")]
    speed_incongruence_effect: Option<f64>,
    #[serde(rename = "Errors_Total")]
    errors_total: Option<f64>,
    #[serde(rename = "Errors_Orientation")]
    errors_orientation: Option<f64>,
    #[serde(rename = "Errors_Response_Selection")]
    errors_response_selection: Option<f64>,
    #[serde(rename = "Errors_Inhibition")]
    errors_inhibition: Option<f64>,
    #[serde(rename = "IES_Neutral")]
    ies_neutral: Option<f64>,
    #[serde(rename = "IES_Neutral_log")]
    ies_neutral_log: Option<f64>,
    #[serde(rename = "IES_Congruent")]
    ies_congruent: Option<f64>,
    #[serde(rename = "IES_Congruent_log")]
    ies_congruent_log: Option<f64>,
    #[serde(rename = "IES_Incongruent")]
    ies_incongruent: Option<f64>,
    #[serde(rename = "IES_Incongruent_log")]
    ies_incongruent_log: Option<f64>,
}

impl<'a> OutputRecord<'a> {
    fn new(row: &SessionRow, s: &Summary, info: &'a SessionInfo) -> Self {
        let scored = &row.scored;
        let t = &scored.trial;
        let o = &scored.outcome;

        Self {
            participant_id: &info.participant_id,
            experiment_start: timestamp(&info.started),
            experiment_end: timestamp(&info.ended),
            experiment_duration: info.duration_secs(),
            version: info.version,

            order: row.order,
            condition_response_selection: t.params.response_selection,
            condition_inhibition: t.params.inhibition,
            condition_conflict: t.params.conflict,
            global_shape: t.global.shape,
            global_color: t.global.color,
            global_angle: t.global.angle.degrees(),
            local_shape: t.local.shape,
            local_color: t.local.color,
            local_angle: t.local.angle.degrees(),
            inhibition: t.inhibition,
            conflict: t.conflict,
            response_availability: t.response_available,
            response_correct: t.response_correct.map(|a| a.degrees()),

            time_trial_onset: timestamp(&o.trial_onset),
            prestimulus_interval: o.prestimulus_interval,
            time_stimulus_onset: timestamp(&o.stimulus_onset),
            response: o.response,
            rt: o.rt,

            response_correct_orientation: scored.expected_response(),
            correct: scored.correct as u8,
            color_congruence: scored.color_congruence,
            luminance_global: scored.luminance_global,
            luminance_local: scored.luminance_local,
            contrast: scored.contrast,
            cumulative_average: scored.cumulative.average,
            cumulative_sd: scored.cumulative.sd,
            cumulative_se: scored.cumulative.se,
            outliers: row.outlier,

            speed_core: s.speed_core,
            speed_core_variability: s.speed_core_variability,
            speed_response_selection_effect: s.speed_response_selection_effect,
            speed_inhibition_effect: s.speed_inhibition_effect,
            speed_congruence_effect: s.speed_congruence_effect,
            speed_incongruence_effect: s.speed_incongruence_effect,
            errors_total: s.errors_total,
            errors_orientation: s.errors_orientation,
            errors_response_selection: s.errors_response_selection,
            errors_inhibition: s.errors_inhibition,
            ies_neutral: s.ies_neutral,
            ies_neutral_log: s.ies_neutral_log,
            ies_congruent: s.ies_congruent,
            ies_congruent_log: s.ies_congruent_log,
            ies_incongruent: s.ies_incongruent,
            ies_incongruent_log: s.ies_incongruent_log,
        }
    }
}

/// Writes the session table as CSV, one row per trial.
pub fn write_session<W: Write>(writer: W, table: &SessionTable, info: &SessionInfo) -> CcResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in &table.rows {
        wtr.serialize(OutputRecord::new(row, &table.summary, info))?;
    }
    wtr.flush()?;
    Ok(())
}

/// File name for a participant, with anything outside `[A-Za-z0-9_-]`
/// replaced so ids cannot escape the data directory.
pub fn results_file_name(participant_id: &str) -> String {
    let safe: String = participant_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_CoCon.csv", safe)
}

/// Saves the session under `data_dir`, creating it if needed.
pub fn save_session<P: AsRef<Path>>(
    data_dir: P,
    table: &SessionTable,
    info: &SessionInfo,
) -> CcResult<PathBuf> {
    let dir = data_dir.as_ref();
    fs::create_dir_all(dir)?;
    let path = dir.join(results_file_name(&info.participant_id));
    let file = File::create(&path)?;
    write_session(file, table, info)?;
    info!("💾 Saved {} rows to {}", table.rows.len(), path.display());
    Ok(path)
}
