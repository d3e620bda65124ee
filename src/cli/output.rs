//! Output formatting helpers for CLI commands

use crate::pipeline::RouteResult;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

/// One-line header plus totals.
pub fn format_route_summary(result: &RouteResult) -> String {
    let mut out = format!(
        "{} {} {}\n{} {}  {} {}",
        result.origin.bold(),
        "→".dimmed(),
        result.destination.bold(),
        "Distance:".dimmed(),
        result.distance,
        "Duration:".dimmed(),
        result.duration,
    );

    if result.is_fallback {
        out.push_str(&format!("\n{}", "No route found; showing fallback guidance".yellow()));
    } else if result.includes_landmarks {
        out.push_str(&format!(
            "\n{}",
            format!("{} landmark(s) along the way", result.landmark_count).green()
        ));
    }

    out
}

/// Steps as a table.
pub fn format_steps_table(result: &RouteResult) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Instruction", "Distance", "Duration", "Mode", "Landmark"]);

    for step in &result.steps {
        let landmark = step
            .landmarks
            .first()
            .map(|l| l.name.cyan().to_string())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(step.step_number),
            Cell::new(&step.instruction),
            Cell::new(&step.distance),
            Cell::new(&step.duration),
            Cell::new(&step.travel_mode),
            Cell::new(landmark),
        ]);
    }

    table.to_string()
}

/// Summary, step table and narrative for terminal display.
pub fn format_route_pretty(result: &RouteResult) -> String {
    format!(
        "{}\n\n{}\n\n{}\n{}",
        format_route_summary(result),
        format_steps_table(result),
        "Narrative".bold().underline(),
        result.narrative
    )
}

pub fn format_route_json(result: &RouteResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
