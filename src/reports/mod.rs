use cocon::aggregate::{CellStats, Summary};
use cocon::trial::{Trial, TrialKind};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use strum::IntoEnumIterator;

fn fmt_opt(v: Option<f64>, precision: usize) -> String {
    match v {
        Some(x) => format!("{:.*}", precision, x),
        None => "-".to_string(),
    }
}

fn fmt_pct(v: Option<f64>) -> String {
    match v {
        Some(x) => format!("{:.1}%", x * 100.0),
        None => "-".to_string(),
    }
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_sequence(trials: &[Trial]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Conflict"),
        Cell::new("Kind"),
        Cell::new("Global"),
        Cell::new("G°"),
        Cell::new("Local"),
        Cell::new("L°"),
        Cell::new("Answer").fg(Color::Cyan),
    ]);

    for (i, t) in trials.iter().enumerate() {
        let answer = match t.expected_response() {
            Some(d) => Cell::new(d.to_string()).fg(Color::Cyan),
            None => Cell::new("withhold").fg(Color::Red),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(t.conflict.to_string()),
            Cell::new(t.kind().to_string()),
            Cell::new(t.global.asset_name()),
            Cell::new(t.global.angle.degrees()),
            Cell::new(t.local.asset_name()),
            Cell::new(t.local.angle.degrees()),
            answer,
        ]);
    }
    right_align(&mut table, 4, 4);
    right_align(&mut table, 6, 6);

    println!("\n{}", table);
    println!("{} trials", trials.len());
}

pub fn print_speed_report(cells: &[CellStats]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Cell").add_attribute(Attribute::Bold),
        Cell::new("Trials"),
        Cell::new("N (raw)"),
        Cell::new("RT (raw)"),
        Cell::new("SD (raw)"),
        Cell::new("Outliers").fg(Color::Red),
        Cell::new("N"),
        Cell::new("RT").fg(Color::Cyan),
        Cell::new("SD"),
    ]);

    for c in cells {
        table.add_row(vec![
            Cell::new(c.cell.to_string()).add_attribute(Attribute::Bold),
            Cell::new(c.trials),
            Cell::new(c.first_pass.n),
            Cell::new(fmt_opt(c.first_pass.mean, 1)),
            Cell::new(fmt_opt(c.first_pass.sd, 1)),
            Cell::new(c.outliers).fg(Color::Red),
            Cell::new(c.second_pass.n),
            Cell::new(fmt_opt(c.second_pass.mean, 1)).fg(Color::Cyan),
            Cell::new(fmt_opt(c.second_pass.sd, 1)),
        ]);
    }
    right_align(&mut table, 1, 8);

    println!("\n⏱️  Speed by cell (ms)\n{}", table);
}

pub fn print_error_report(cells: &[CellStats]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Cell").add_attribute(Attribute::Bold)];
    header.extend(TrialKind::iter().map(|k| Cell::new(k.to_string())));
    table.set_header(header);

    for c in cells {
        let mut row = vec![Cell::new(c.cell.to_string()).add_attribute(Attribute::Bold)];
        for kind in TrialKind::iter() {
            let t = c.errors.tally(kind);
            let text = if t.total == 0 {
                "-".to_string()
            } else {
                format!("{}/{}", t.errors, t.total)
            };
            row.push(Cell::new(text));
        }
        table.add_row(row);
    }
    right_align(&mut table, 1, 4);

    println!("\n❌ Errors by trial kind\n{}", table);
}

pub fn print_summary(s: &Summary) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Measure").add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan),
    ]);

    let rows: Vec<(&str, String)> = vec![
        ("Speed_Core", fmt_opt(s.speed_core, 1)),
        ("Speed_Core_Variability", fmt_opt(s.speed_core_variability, 1)),
        (
            "Speed_Response_Selection_Effect",
            fmt_opt(s.speed_response_selection_effect, 1),
        ),
        ("Speed_Inhibition_Effect", fmt_opt(s.speed_inhibition_effect, 1)),
        ("Speed_Congruence_Effect", fmt_opt(s.speed_congruence_effect, 1)),
        (
            "Speed_Incongruence_Effect",
            fmt_opt(s.speed_incongruence_effect, 1),
        ),
        ("Errors_Total", fmt_pct(s.errors_total)),
        ("Errors_Orientation", fmt_pct(s.errors_orientation)),
        ("Errors_Response_Selection", fmt_pct(s.errors_response_selection)),
        ("Errors_Inhibition", fmt_pct(s.errors_inhibition)),
        ("IES_Neutral", fmt_opt(s.ies_neutral, 1)),
        ("IES_Neutral_log", fmt_opt(s.ies_neutral_log, 3)),
        ("IES_Congruent", fmt_opt(s.ies_congruent, 1)),
        ("IES_Congruent_log", fmt_opt(s.ies_congruent_log, 3)),
        ("IES_Incongruent", fmt_opt(s.ies_incongruent, 1)),
        ("IES_Incongruent_log", fmt_opt(s.ies_incongruent_log, 3)),
    ];

    for (name, value) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value)]);
    }
    right_align(&mut table, 1, 1);

    println!("\n📊 Session summary\n{}", table);
}
