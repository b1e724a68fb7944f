use crate::executor::{RenameOutcome, SkipReason, Status};
use crate::planner::RenamePlan;
use nu_ansi_term::Color;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::PathBuf;

/// Per-status totals of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameCounts {
    /// Files that now carry their new name, including `unchanged`
    pub renamed: usize,
    /// Files that already had their new name
    pub unchanged: usize,
    pub skipped_empty_name: usize,
    pub skipped_invalid_chars: usize,
    pub skipped_conflict: usize,
    pub failed: usize,
    /// Planned items, i.e. matching file/name pairs
    pub total: usize,
}

impl RenameCounts {
    pub fn skipped(&self) -> usize {
        self.skipped_empty_name + self.skipped_invalid_chars + self.skipped_conflict
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub index: usize,
    pub source: String,
    pub target: String,
    pub error: String,
}

/// End-of-run summary handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameReport {
    pub directory: PathBuf,
    pub counts: RenameCounts,
    pub files_found: usize,
    pub names_found: usize,
    pub count_mismatch: bool,
    pub dry_run: bool,
    pub failures: Vec<FailureDetail>,
}

impl RenameReport {
    pub fn from_outcomes(plan: &RenamePlan, outcomes: &[RenameOutcome], dry_run: bool) -> Self {
        let mut counts = RenameCounts {
            total: outcomes.len(),
            ..RenameCounts::default()
        };
        let mut failures = Vec::new();

        for outcome in outcomes {
            match &outcome.status {
                Status::Renamed => counts.renamed += 1,
                Status::Unchanged => {
                    counts.renamed += 1;
                    counts.unchanged += 1;
                },
                Status::Skipped(SkipReason::EmptyName) => counts.skipped_empty_name += 1,
                Status::Skipped(SkipReason::InvalidChars) => counts.skipped_invalid_chars += 1,
                Status::Skipped(SkipReason::Conflict) => counts.skipped_conflict += 1,
                Status::Failed(error) => {
                    counts.failed += 1;
                    failures.push(FailureDetail {
                        index: outcome.operation.index,
                        source: outcome.operation.source.name.clone(),
                        target: outcome.operation.target_name.clone(),
                        error: error.clone(),
                    });
                },
            }
        }

        Self {
            directory: plan.directory.clone(),
            counts,
            files_found: plan.files_found,
            names_found: plan.names_found,
            count_mismatch: plan.count_mismatch().is_some(),
            dry_run,
            failures,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.counts.failed > 0
    }

    /// Human-readable summary, optionally colored for a terminal.
    pub fn render(&self, use_color: bool) -> String {
        let paint = |color: Color, text: String| {
            if use_color {
                color.paint(text).to_string()
            } else {
                text
            }
        };
        let counts = &self.counts;
        let mut output = String::new();

        if self.count_mismatch {
            let line = format!(
                "Warning: the number of files ({}) and names ({}) differ; only {} matching pairs were processed.",
                self.files_found, self.names_found, counts.total
            );
            writeln!(output, "{}", paint(Color::Yellow, line)).unwrap();
        }

        let noun = if counts.renamed == 1 { "file" } else { "files" };
        let headline = if self.dry_run {
            format!("{} {} would be renamed (dry run)", counts.renamed, noun)
        } else {
            format!("{} {} renamed", counts.renamed, noun)
        };
        writeln!(output, "{}", paint(Color::Green, headline)).unwrap();

        if counts.unchanged > 0 {
            writeln!(output, "({} unchanged: name already matched)", counts.unchanged).unwrap();
        }
        if counts.skipped_empty_name > 0 {
            writeln!(output, "({} skipped: empty name)", counts.skipped_empty_name).unwrap();
        }
        if counts.skipped_invalid_chars > 0 {
            writeln!(
                output,
                "({} skipped: invalid characters)",
                counts.skipped_invalid_chars
            )
            .unwrap();
        }
        if counts.skipped_conflict > 0 {
            writeln!(
                output,
                "({} skipped: target name already exists)",
                counts.skipped_conflict
            )
            .unwrap();
        }
        if counts.failed > 0 {
            let line = format!("({} failed during rename)", counts.failed);
            writeln!(output, "{}", paint(Color::Red, line)).unwrap();
        }

        output
    }
}
