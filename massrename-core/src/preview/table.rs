use crate::planner::{Decision, RenamePlan};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

fn decision_color(decision: Decision) -> Color {
    match decision {
        Decision::Accepted => Color::Green,
        Decision::SkippedNoOp => Color::DarkGrey,
        Decision::SkippedConflict => Color::Yellow,
        Decision::SkippedEmptyName | Decision::SkippedInvalidChars => Color::Red,
    }
}

/// Render the plan as a table of file, new name and decision
pub fn render_table(plan: &RenamePlan, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("#").fg(Color::Cyan),
            Cell::new("File").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
            Cell::new("Decision").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["#", "File", "New name", "Decision"]);
    }

    for op in &plan.operations {
        let row = (op.index + 1).to_string();
        let target = if op.decision == Decision::Accepted {
            format!("→ {}", op.target_name)
        } else {
            op.target_name.clone()
        };

        if use_color {
            table.add_row(vec![
                Cell::new(&row),
                Cell::new(&op.source.name),
                Cell::new(&target).fg(Color::Magenta),
                Cell::new(op.decision.label()).fg(decision_color(op.decision)),
            ]);
        } else {
            table.add_row(vec![
                row.as_str(),
                op.source.name.as_str(),
                target.as_str(),
                op.decision.label(),
            ]);
        }
    }

    let totals = format!(
        "{} renames, {} planned",
        plan.count(Decision::Accepted),
        plan.operations.len()
    );
    let counts = format!("{} files, {} names", plan.files_found, plan.names_found);
    table.add_row(vec!["─────────", "─────────", "─────────", "─────────"]);
    if use_color {
        table.add_row(vec![
            Cell::new("TOTALS").fg(Color::Cyan),
            Cell::new(&counts),
            Cell::new(""),
            Cell::new(&totals).fg(Color::Yellow),
        ]);
    } else {
        table.add_row(vec!["TOTALS", counts.as_str(), "", totals.as_str()]);
    }

    table.to_string()
}
