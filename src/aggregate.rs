use crate::config::ScoringParams;
use crate::error::{CcResult, CoConError};
use crate::scorer::ScoredTrial;
use crate::stats::{describe, ratio, RtStats};
use crate::trial::{Conflict, ResponseSelection, Trial, TrialKind};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};
use tracing::{info, warn};

/// Analysis cells. The conflict block splits into its two congruence groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
pub enum Cell {
    Baseline,
    ResponseSelection,
    Inhibition,
    Congruent,
    Incongruent,
}

impl Cell {
    pub fn of(trial: &Trial) -> Option<Self> {
        let p = trial.params;
        match (p.response_selection, p.inhibition, p.conflict) {
            (ResponseSelection::None, false, false) => Some(Self::Baseline),
            (ResponseSelection::Conditional, false, false) => Some(Self::ResponseSelection),
            (ResponseSelection::Conditional, true, false) => Some(Self::Inhibition),
            (ResponseSelection::Conditional, true, true) => match trial.conflict {
                Conflict::Congruent => Some(Self::Congruent),
                Conflict::Incongruent => Some(Self::Incongruent),
                Conflict::Neutral => None,
            },
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub errors: usize,
    pub total: usize,
}

impl Tally {
    fn record(&mut self, correct: bool) {
        self.total += 1;
        if !correct {
            self.errors += 1;
        }
    }

    pub fn rate(&self) -> Option<f64> {
        ratio(self.errors, self.total)
    }
}

/// Error counts of a cell split by what each trial asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ErrorBreakdown {
    pub go: Tally,
    pub no_response: Tally,
    pub inhibit_go: Tally,
    pub inhibit_double: Tally,
}

impl ErrorBreakdown {
    pub fn tally(&self, kind: TrialKind) -> &Tally {
        match kind {
            TrialKind::Go => &self.go,
            TrialKind::NoResponse => &self.no_response,
            TrialKind::InhibitGo => &self.inhibit_go,
            TrialKind::InhibitDouble => &self.inhibit_double,
        }
    }

    fn record(&mut self, kind: TrialKind, correct: bool) {
        let tally = match kind {
            TrialKind::Go => &mut self.go,
            TrialKind::NoResponse => &mut self.no_response,
            TrialKind::InhibitGo => &mut self.inhibit_go,
            TrialKind::InhibitDouble => &mut self.inhibit_double,
        };
        tally.record(correct);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellStats {
    pub cell: Cell,
    pub trials: usize,
    /// All correct go responses.
    pub first_pass: RtStats,
    /// Same, without RT outliers. This is the reported speed.
    pub second_pass: RtStats,
    pub outliers: usize,
    pub errors: ErrorBreakdown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionRow {
    pub cell: Cell,
    /// 1-based position within the cell.
    pub order: usize,
    pub outlier: bool,
    pub scored: ScoredTrial,
}

/// Session-level results, identical on every output row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub speed_core: Option<f64>,
    pub speed_core_variability: Option<f64>,
    pub speed_response_selection_effect: Option<f64>,
    pub speed_inhibition_effect: Option<f64>,
    pub speed_congruence_effect: Option<f64>,
    pub speed_incongruence_effect: Option<f64>,

    pub errors_total: Option<f64>,
    pub errors_orientation: Option<f64>,
    pub errors_response_selection: Option<f64>,
    pub errors_inhibition: Option<f64>,

    pub ies_neutral: Option<f64>,
    pub ies_neutral_log: Option<f64>,
    pub ies_congruent: Option<f64>,
    pub ies_congruent_log: Option<f64>,
    pub ies_incongruent: Option<f64>,
    pub ies_incongruent_log: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionTable {
    pub rows: Vec<SessionRow>,
    pub cells: Vec<CellStats>,
    pub summary: Summary,
}

impl SessionTable {
    pub fn cell(&self, cell: Cell) -> Option<&CellStats> {
        self.cells.iter().find(|c| c.cell == cell)
    }
}

/// Combines the scored blocks of a session into one table.
pub fn aggregate<I>(blocks: I, scoring: &ScoringParams) -> CcResult<SessionTable>
where
    I: IntoIterator<Item = Vec<ScoredTrial>>,
{
    let mut buckets: Vec<(Cell, Vec<ScoredTrial>)> = Cell::iter().map(|c| (c, Vec::new())).collect();

    for scored in blocks.into_iter().flatten() {
        let cell = Cell::of(&scored.trial).ok_or_else(|| {
            CoConError::Validation(format!(
                "trial with condition {:?} / {} belongs to no analysis cell",
                scored.trial.params, scored.trial.conflict
            ))
        })?;
        if let Some((_, bucket)) = buckets.iter_mut().find(|(c, _)| *c == cell) {
            bucket.push(scored);
        }
    }

    let mut rows = Vec::new();
    let mut cells = Vec::new();

    for (cell, bucket) in buckets {
        let first_pass = describe(
            bucket
                .iter()
                .filter(|s| s.counts_for_speed())
                .map(|s| s.rt()),
        );
        let flags: Vec<bool> = bucket
            .iter()
            .map(|s| first_pass.is_outlier(s.rt(), scoring.outlier_z))
            .collect();
        let second_pass = describe(
            bucket
                .iter()
                .zip(&flags)
                .filter(|(s, outlier)| s.counts_for_speed() && !**outlier)
                .map(|(s, _)| s.rt()),
        );

        let mut errors = ErrorBreakdown::default();
        for s in &bucket {
            errors.record(s.trial.kind(), s.correct);
        }

        let stats = CellStats {
            cell,
            trials: bucket.len(),
            first_pass,
            second_pass,
            outliers: flags.iter().filter(|&&f| f).count(),
            errors,
        };
        info!(
            "{}: {} trials, {} outliers, mean RT {}",
            cell,
            stats.trials,
            stats.outliers,
            stats
                .second_pass
                .mean
                .map_or("n/a".to_string(), |m| format!("{:.1}ms", m))
        );
        cells.push(stats);

        rows.extend(
            bucket
                .into_iter()
                .zip(flags)
                .enumerate()
                .map(|(i, (scored, outlier))| SessionRow {
                    cell,
                    order: i + 1,
                    outlier,
                    scored,
                }),
        );
    }

    let summary = summarize(&rows, &cells);
    if summary.speed_core.is_none() {
        warn!("No correct baseline responses: core speed is undefined");
    }

    Ok(SessionTable {
        rows,
        cells,
        summary,
    })
}

fn summarize(rows: &[SessionRow], cells: &[CellStats]) -> Summary {
    let stats_of = |cell: Cell| cells.iter().find(|c| c.cell == cell);
    let mean_of = |cell: Cell| stats_of(cell).and_then(|c| c.second_pass.mean);
    let diff = |a: Cell, b: Cell| Some(mean_of(a)? - mean_of(b)?);

    // Errors only count in blocks where a response had to be selected.
    // The overall rate divides them by every row of the session.
    let mut conditional_errors = 0;
    let mut orientation = Tally::default();
    let mut response_selection = Tally::default();
    let mut inhibition = Tally::default();
    for row in rows {
        let trial = &row.scored.trial;
        if trial.params.response_selection != ResponseSelection::Conditional {
            continue;
        }
        let correct = row.scored.correct;
        if !correct {
            conditional_errors += 1;
        }
        if trial.kind() == TrialKind::Go {
            orientation.record(correct);
        }
        if !trial.response_available {
            response_selection.record(correct);
        }
        if trial.inhibition {
            inhibition.record(correct);
        }
    }

    let ies_of = |cell: Cell| stats_of(cell).and_then(inverse_efficiency);
    let log = |v: Option<f64>| v.filter(|&x| x > 0.0).map(f64::ln);

    let ies_neutral = ies_of(Cell::Inhibition);
    let ies_congruent = ies_of(Cell::Congruent);
    let ies_incongruent = ies_of(Cell::Incongruent);

    Summary {
        speed_core: mean_of(Cell::Baseline),
        speed_core_variability: stats_of(Cell::Baseline).and_then(|c| c.second_pass.sd),
        speed_response_selection_effect: diff(Cell::ResponseSelection, Cell::Baseline),
        speed_inhibition_effect: diff(Cell::Inhibition, Cell::ResponseSelection),
        speed_congruence_effect: diff(Cell::Congruent, Cell::Inhibition),
        speed_incongruence_effect: diff(Cell::Incongruent, Cell::Inhibition),

        errors_total: ratio(conditional_errors, rows.len()),
        errors_orientation: orientation.rate(),
        errors_response_selection: response_selection.rate(),
        errors_inhibition: inhibition.rate(),

        ies_neutral,
        ies_neutral_log: log(ies_neutral),
        ies_congruent,
        ies_congruent_log: log(ies_congruent),
        ies_incongruent,
        ies_incongruent_log: log(ies_incongruent),
    }
}

/// Mean go RT divided by go accuracy. Undefined when nothing was answered
/// correctly.
pub fn inverse_efficiency(stats: &CellStats) -> Option<f64> {
    let mean = stats.second_pass.mean?;
    let accuracy = 1.0 - stats.errors.go.rate()?;
    (accuracy > 0.0).then(|| mean / accuracy)
}
