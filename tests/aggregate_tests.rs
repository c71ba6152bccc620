mod common;

use cocon::aggregate::{aggregate, Cell, SessionTable};
use cocon::config::ScoringParams;
use cocon::error::CoConError;
use cocon::scorer::ScoredTrial;
use cocon::trial::{Angle, Conflict, Direction, Trial};
use common::{
    baseline_rts, go_rts, score, TrialBuilder, BASELINE, CONFLICT, INHIBITION, RESPONSE_SELECTION,
};

const EPS: f64 = 1e-9;

fn run(blocks: Vec<Vec<Trial>>, z: f64) -> SessionTable {
    let scored: Vec<Vec<ScoredTrial>> = blocks.into_iter().map(score).collect();
    aggregate(scored, &ScoringParams { outlier_z: z }).unwrap()
}

fn conflict_rts(conflict: Conflict, rts: &[f64]) -> Vec<Trial> {
    rts.iter()
        .map(|&rt| {
            TrialBuilder::go(CONFLICT, Angle::Left)
                .conflict(conflict)
                .rt(rt)
                .build()
        })
        .collect()
}

// --- OUTLIERS ---
#[test]
fn test_single_slow_response_is_excluded() {
    // With five values the largest reachable |z| is (n-1)/sqrt(n) ≈ 1.79.
    let table = run(vec![baseline_rts(&[100.0, 100.0, 100.0, 100.0, 5000.0])], 1.5);
    let base = table.cell(Cell::Baseline).unwrap();

    assert_eq!(base.first_pass.n, 5);
    assert!((base.first_pass.mean.unwrap() - 1080.0).abs() < EPS);
    assert_eq!(base.outliers, 1);
    assert_eq!(base.second_pass.n, 4);
    assert_eq!(base.second_pass.mean, Some(100.0));
    assert_ne!(base.first_pass.mean, base.second_pass.mean);

    let flagged: Vec<f64> = table
        .rows
        .iter()
        .filter(|r| r.outlier)
        .map(|r| r.scored.rt())
        .collect();
    assert_eq!(flagged, vec![5000.0]);
}

#[test]
fn test_default_band_on_longer_series() {
    let mut rts = vec![100.0; 9];
    rts.push(5000.0);
    let table = run(vec![baseline_rts(&rts)], ScoringParams::default().outlier_z);
    let base = table.cell(Cell::Baseline).unwrap();

    assert_eq!(base.outliers, 1);
    assert_eq!(base.second_pass.mean, Some(100.0));
    assert_eq!(table.summary.speed_core, Some(100.0));
    assert_eq!(table.summary.speed_core_variability, Some(0.0));
}

#[test]
fn test_each_cell_uses_its_own_band() {
    let mut base = vec![100.0; 9];
    base.push(5000.0);
    let mut rs = vec![400.0; 9];
    rs.push(1000.0);

    let table = run(
        vec![baseline_rts(&base), go_rts(RESPONSE_SELECTION, &rs)],
        1.96,
    );
    let cell = table.cell(Cell::ResponseSelection).unwrap();

    // 1000 sits inside the baseline band but outside its own.
    assert_eq!(cell.outliers, 1);
    assert_eq!(cell.second_pass.mean, Some(400.0));
    assert!((table.summary.speed_response_selection_effect.unwrap() - 300.0).abs() < EPS);
}

#[test]
fn test_identical_rts_flag_nothing() {
    let table = run(vec![baseline_rts(&[250.0; 6])], 1.96);
    let base = table.cell(Cell::Baseline).unwrap();
    assert_eq!(base.outliers, 0);
    assert_eq!(base.first_pass, base.second_pass);
}

// --- EFFECTS ---
#[test]
fn test_speed_effects_chain_across_cells() {
    let table = run(
        vec![
            baseline_rts(&[300.0; 4]),
            go_rts(RESPONSE_SELECTION, &[400.0; 4]),
            go_rts(INHIBITION, &[450.0; 4]),
            [
                conflict_rts(Conflict::Incongruent, &[600.0; 4]),
                conflict_rts(Conflict::Congruent, &[500.0; 4]),
            ]
            .concat(),
        ],
        1.96,
    );
    let s = table.summary;

    assert_eq!(s.speed_core, Some(300.0));
    assert_eq!(s.speed_response_selection_effect, Some(100.0));
    assert_eq!(s.speed_inhibition_effect, Some(50.0));
    assert_eq!(s.speed_congruence_effect, Some(50.0));
    assert_eq!(s.speed_incongruence_effect, Some(150.0));

    // No errors anywhere: IES equals the mean.
    assert_eq!(s.ies_neutral, Some(450.0));
    assert_eq!(s.ies_congruent, Some(500.0));
    assert_eq!(s.ies_incongruent, Some(600.0));
    assert!((s.ies_incongruent_log.unwrap() - 600.0f64.ln()).abs() < EPS);
}

#[test]
fn test_missing_cells_leave_effects_undefined() {
    let table = run(vec![go_rts(RESPONSE_SELECTION, &[400.0, 420.0])], 1.96);
    let s = table.summary;

    assert_eq!(s.speed_core, None);
    assert_eq!(s.speed_response_selection_effect, None);
    assert_eq!(s.ies_neutral, None);
    assert_eq!(s.ies_neutral_log, None);
    assert_eq!(s.errors_total, Some(0.0));
    assert_eq!(table.cells.len(), 5);
}

// --- ERRORS ---
#[test]
fn test_error_rates() {
    let baseline = vec![
        TrialBuilder::go(BASELINE, Angle::Left).wrong().build(),
        TrialBuilder::go(BASELINE, Angle::Right).build(),
    ];
    let response_selection = vec![
        TrialBuilder::go(RESPONSE_SELECTION, Angle::Left).build(),
        TrialBuilder::go(RESPONSE_SELECTION, Angle::Right).build(),
        TrialBuilder::go(RESPONSE_SELECTION, Angle::Down).build(),
        TrialBuilder::go(RESPONSE_SELECTION, Angle::Left).wrong().build(),
        TrialBuilder::no_response(RESPONSE_SELECTION).build(),
        TrialBuilder::no_response(RESPONSE_SELECTION)
            .response(Some(Direction::Down))
            .build(),
    ];
    let inhibition = vec![
        TrialBuilder::stop(INHIBITION, Angle::Left).build(),
        TrialBuilder::stop(INHIBITION, Angle::Right)
            .response(Some(Direction::Right))
            .build(),
    ];

    let table = run(vec![baseline, response_selection, inhibition], 1.96);
    let s = table.summary;

    // Baseline mistakes stay out of every numerator; the overall rate is
    // over all ten rows.
    assert_eq!(s.errors_total, Some(3.0 / 10.0));
    assert_eq!(s.errors_orientation, Some(0.25));
    assert_eq!(s.errors_response_selection, Some(0.5));
    assert_eq!(s.errors_inhibition, Some(0.5));

    let rs = table.cell(Cell::ResponseSelection).unwrap();
    assert_eq!(rs.errors.go.errors, 1);
    assert_eq!(rs.errors.go.total, 4);
    assert_eq!(rs.errors.no_response.errors, 1);
    let inh = table.cell(Cell::Inhibition).unwrap();
    assert_eq!(inh.errors.inhibit_go.total, 2);
    assert_eq!(inh.errors.inhibit_go.errors, 1);
}

#[test]
fn test_overall_error_rate_spans_whole_session() {
    let response_selection = vec![
        TrialBuilder::go(RESPONSE_SELECTION, Angle::Left).build(),
        TrialBuilder::go(RESPONSE_SELECTION, Angle::Right).wrong().build(),
    ];
    let table = run(vec![baseline_rts(&[300.0; 10]), response_selection], 1.96);

    assert_eq!(table.summary.errors_total, Some(1.0 / 12.0));
    assert_eq!(table.summary.errors_orientation, Some(0.5));
}

#[test]
fn test_inverse_efficiency_scales_with_accuracy() {
    let mut block = go_rts(INHIBITION, &[600.0; 3]);
    block.push(TrialBuilder::go(INHIBITION, Angle::Left).wrong().rt(200.0).build());

    let table = run(vec![block], 1.96);
    let s = table.summary;
    assert!((s.ies_neutral.unwrap() - 800.0).abs() < EPS);
    assert!((s.ies_neutral_log.unwrap() - 800.0f64.ln()).abs() < EPS);
}

#[test]
fn test_inverse_efficiency_undefined_without_correct_go() {
    let block = vec![
        TrialBuilder::go(INHIBITION, Angle::Left).wrong().build(),
        TrialBuilder::go(INHIBITION, Angle::Right).wrong().build(),
    ];
    let table = run(vec![block], 1.96);
    assert_eq!(table.summary.ies_neutral, None);
    assert_eq!(table.summary.ies_neutral_log, None);
    assert_eq!(table.summary.errors_orientation, Some(1.0));
}

// --- ROWS ---
#[test]
fn test_order_restarts_within_each_cell() {
    let table = run(
        vec![
            baseline_rts(&[300.0; 3]),
            [
                conflict_rts(Conflict::Incongruent, &[600.0; 2]),
                conflict_rts(Conflict::Congruent, &[500.0; 4]),
            ]
            .concat(),
        ],
        1.96,
    );
    assert_eq!(table.rows.len(), 9);

    for cell in [Cell::Baseline, Cell::Congruent, Cell::Incongruent] {
        let orders: Vec<usize> = table
            .rows
            .iter()
            .filter(|r| r.cell == cell)
            .map(|r| r.order)
            .collect();
        let expected: Vec<usize> = (1..=orders.len()).collect();
        assert_eq!(orders, expected, "{}", cell);
    }
}

#[test]
fn test_neutral_trial_in_conflict_block_is_rejected() {
    let scored = vec![score(go_rts(CONFLICT, &[500.0]))];
    let err = aggregate(scored, &ScoringParams::default()).unwrap_err();
    assert!(matches!(err, CoConError::Validation(_)));
}
