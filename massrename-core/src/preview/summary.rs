use crate::planner::{Decision, RenamePlan};
use std::fmt::Write;

/// Render the plan as a plain line-per-item listing
pub fn render_summary(plan: &RenamePlan) -> String {
    let mut output = String::new();

    writeln!(output, "[PLAN SUMMARY]").unwrap();
    writeln!(output, "Folder: {}", plan.directory.display()).unwrap();
    writeln!(output, "Files: {}", plan.files_found).unwrap();
    writeln!(output, "Names: {}", plan.names_found).unwrap();
    writeln!(output, "Planned: {}", plan.operations.len()).unwrap();

    if plan.operations.is_empty() {
        return output;
    }

    writeln!(output).unwrap();
    writeln!(output, "[ITEMS]").unwrap();
    for op in &plan.operations {
        let row = op.index + 1;
        match op.decision {
            Decision::Accepted => {
                writeln!(output, "{}: {} -> {}", row, op.source.name, op.target_name).unwrap();
            },
            decision => {
                writeln!(
                    output,
                    "{}: {} ({}: {:?})",
                    row,
                    op.source.name,
                    decision.label(),
                    op.target_name
                )
                .unwrap();
            },
        }
    }

    output
}
