use analytics::{Comparison, ConditionSummary, CurvePoint, ExitSeries};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use core_types::{ParameterKey, SimulationRecord};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn parameter_cell(record: &SimulationRecord, key: ParameterKey) -> Cell {
    match record.parameter(key) {
        Some(value) => Cell::new(value),
        None => Cell::new("-"),
    }
}

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

/// One row per loaded simulation file.
pub fn records_table(records: &[&SimulationRecord]) -> Table {
    let mut table = new_table(vec![
        "File",
        "Agents",
        "Exits",
        "Runs",
        "Recorded",
        "Time step",
        "Curves",
    ]);
    for record in records {
        table.add_row(vec![
            Cell::new(record.file_name()),
            parameter_cell(record, ParameterKey::NumAgents),
            parameter_cell(record, ParameterKey::NumExits),
            parameter_cell(record, ParameterKey::Runs),
            Cell::new(record.evacuation_times().len()),
            parameter_cell(record, ParameterKey::SimulationTimeStep),
            Cell::new(record.agents_vs_time().len()),
        ]);
    }
    table
}

/// Mean and standard deviation of evacuation time against agent count for
/// one exit count.
pub fn series_table(series: &ExitSeries) -> Table {
    let mut table = new_table(vec!["Agents", "Runs", "Mean (s)", "Std dev", "Min", "Max"]);
    for point in &series.points {
        table.add_row(vec![
            Cell::new(point.num_agents),
            Cell::new(point.runs),
            Cell::new(format!("{:.3}", point.mean)),
            Cell::new(optional(point.std_dev)),
            Cell::new(format!("{:.3}", point.min)),
            Cell::new(format!("{:.3}", point.max)),
        ]);
    }
    table
}

fn condition_row(label: &str, summary: &ConditionSummary) -> Vec<Cell> {
    vec![
        Cell::new(label),
        Cell::new(summary.num_agents),
        Cell::new(summary.num_exits),
        Cell::new(summary.runs),
        Cell::new(format!("{:.3}", summary.mean)),
        Cell::new(optional(summary.std_dev)),
    ]
}

/// Both conditions of a comparison, followed by the test outcome.
pub fn comparison_table(comparison: &Comparison, alpha: f64) -> Table {
    let mut table = new_table(vec!["Condition", "Agents", "Exits", "Runs", "Mean (s)", "Std dev"]);
    table.add_row(condition_row("control", &comparison.control));
    table.add_row(condition_row("treatment", &comparison.treatment));

    let test = &comparison.test;
    let verdict = if comparison.is_significant(alpha) {
        format!("significant at alpha = {alpha}")
    } else {
        format!("not significant at alpha = {alpha}")
    };
    table.add_row(vec![
        Cell::new(format!("{:?} t-test", test.kind)),
        Cell::new(format!("t = {:.4}", test.t_statistic)),
        Cell::new(format!("df = {:.2}", test.degrees_of_freedom)),
        Cell::new(format!("p = {:.6}", test.p_value)),
        Cell::new(format!("diff = {:.3}", comparison.mean_difference())),
        Cell::new(verdict),
    ]);
    table
}

/// The mean evacuation curve, printing every `every`-th step and always the last.
pub fn curve_table(curve: &[CurvePoint], every: usize) -> Table {
    let every = every.max(1);
    let last = curve.len().saturating_sub(1);
    let mut table = new_table(vec!["Step", "Time (s)", "Mean evacuated"]);
    for point in curve
        .iter()
        .filter(|p| p.step % every == 0 || p.step == last)
    {
        table.add_row(vec![
            Cell::new(point.step),
            Cell::new(format!("{:.3}", point.time)),
            Cell::new(format!("{:.2}", point.mean_evacuated)),
        ]);
    }
    table
}
