use crate::planner::{Decision, RenameOperation, RenamePlan};
use crate::report::RenameReport;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

#[derive(Serialize)]
struct PlanSummary {
    files_found: usize,
    names_found: usize,
    count_mismatch: bool,
    planned: usize,
    accepted: usize,
    unchanged: usize,
    skipped_empty_name: usize,
    skipped_invalid_chars: usize,
    skipped_conflict: usize,
}

#[derive(Serialize)]
struct PlanJson<'a> {
    success: bool,
    operation: &'static str,
    directory: &'a Path,
    summary: PlanSummary,
    operations: &'a [RenameOperation],
}

#[derive(Serialize)]
struct ReportJson<'a> {
    success: bool,
    operation: &'static str,
    #[serde(flatten)]
    report: &'a RenameReport,
}

impl OutputFormatter for RenamePlan {
    fn format_json(&self) -> String {
        serde_json::to_string(&PlanJson {
            success: true,
            operation: "plan",
            directory: &self.directory,
            summary: PlanSummary {
                files_found: self.files_found,
                names_found: self.names_found,
                count_mismatch: self.count_mismatch().is_some(),
                planned: self.operations.len(),
                accepted: self.count(Decision::Accepted),
                unchanged: self.count(Decision::SkippedNoOp),
                skipped_empty_name: self.count(Decision::SkippedEmptyName),
                skipped_invalid_chars: self.count(Decision::SkippedInvalidChars),
                skipped_conflict: self.count(Decision::SkippedConflict),
            },
            operations: &self.operations,
        })
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("Rename plan for {}\n", self.directory.display());

        writeln!(
            output,
            "Files: {}, names: {}, planned: {}",
            self.files_found,
            self.names_found,
            self.operations.len()
        )
        .unwrap();

        if let Some(mismatch) = self.count_mismatch() {
            writeln!(
                output,
                "Warning: {} files but {} names; only matching pairs are planned",
                mismatch.files, mismatch.names
            )
            .unwrap();
        }

        let skipped = self.count(Decision::SkippedEmptyName)
            + self.count(Decision::SkippedInvalidChars)
            + self.count(Decision::SkippedConflict);
        writeln!(
            output,
            "Renames: {}, unchanged: {}, skipped: {}",
            self.count(Decision::Accepted),
            self.count(Decision::SkippedNoOp),
            skipped
        )
        .unwrap();

        output
    }
}

impl OutputFormatter for RenameReport {
    fn format_json(&self) -> String {
        serde_json::to_string(&ReportJson {
            success: !self.has_failures(),
            operation: if self.dry_run { "dry_run" } else { "rename" },
            report: self,
        })
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        self.render(false)
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}\n", self.name, self.version)
    }
}
