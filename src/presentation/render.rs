// Plain-text projection of the dashboard view state
use crate::domain::dashboard::DashboardViewState;
use crate::domain::dataset::DatasetSummary;

const PLACEHOLDER: &str = "–";
const AVERAGE_COLUMNS: [&str; 3] = ["Flowrate", "Pressure", "Temperature"];

pub fn render_user(username: Option<&str>) -> String {
    match username.map(str::trim).filter(|u| !u.is_empty()) {
        Some(user) => format!("Logged in as {}", user),
        None => "Logged in as —".to_string(),
    }
}

fn fmt_average(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{:.2}", v))
}

fn fmt_count(value: Option<u64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| v.to_string())
}

fn summary_lines(summary: &DatasetSummary, lines: &mut Vec<String>) {
    if let Some(filename) = &summary.filename {
        lines.push(format!("Latest dataset: {}", filename));
    }
    lines.push(format!("Total Rows: {}", fmt_count(summary.total_count)));
    for column in AVERAGE_COLUMNS {
        lines.push(format!("Avg {}: {}", column, fmt_average(summary.average(column))));
    }

    lines.push("Type Distribution:".to_string());
    if summary.type_distribution.is_empty() {
        lines.push(format!("  {}", PLACEHOLDER));
    }
    for (kind, count) in &summary.type_distribution {
        lines.push(format!("  - {}: {}", kind, count));
    }
}

pub fn render_dashboard(username: Option<&str>, view: &DashboardViewState) -> String {
    let mut lines = vec![render_user(username)];

    if let Some(error) = &view.error {
        lines.push(format!("Error: {}", error));
    }

    lines.push(String::new());
    match &view.summary {
        Some(summary) => summary_lines(summary, &mut lines),
        None => lines.push("No dataset yet. Upload a CSV to see insights.".to_string()),
    }

    lines.push(String::new());
    lines.push("Recent uploads:".to_string());
    if view.history.is_empty() {
        lines.push("  (none)".to_string());
    }
    for entry in &view.history {
        lines.push(format!(
            "  {}  {}  {} rows",
            entry.uploaded_at.format("%Y-%m-%d %H:%M"),
            entry.filename,
            fmt_count(entry.total_count())
        ));
    }

    if !view.raw_rows.is_empty() {
        let shown = view.raw_rows.rows.len();
        let total = view.raw_rows.total_rows.unwrap_or(shown as u64);
        lines.push(String::new());
        lines.push(format!(
            "Raw rows: showing {} of {} from {}",
            shown, total, view.raw_rows.filename
        ));
    }

    lines.join("\n")
}
