use anyhow::{Context, Result};
use massrename_core::{
    execute_operation, open_source, plan_operation, render_plan, ExecuteOptions, FsRenamer,
    OutputFormatter, Preview, RenameOutcome, Status,
};
use std::path::Path;

use crate::OutputFormat;

/// Runs the rename and returns whether any file failed to rename
#[allow(clippy::too_many_arguments)]
#[allow(clippy::fn_params_excessive_bools)]
pub fn handle_rename(
    directory: &Path,
    names: &Path,
    preview: Preview,
    output: OutputFormat,
    dry_run: bool,
    failure_notice: bool,
    use_color: bool,
    quiet: bool,
) -> Result<bool> {
    let mut source = open_source(names)?;
    let plan = plan_operation(directory, source.as_mut())
        .with_context(|| format!("Failed to plan renames in {}", directory.display()))?;

    if output == OutputFormat::Summary && !quiet {
        let rendered = render_plan(&plan, preview, use_color);
        if !rendered.is_empty() {
            println!("{}", rendered.trim_end());
            println!();
        }
    }

    let mut options = ExecuteOptions {
        dry_run,
        on_first_failure: None,
    };
    if failure_notice {
        options.on_first_failure = Some(Box::new(|outcome: &RenameOutcome| {
            print_failure_notice(outcome);
        }));
    }

    let run = execute_operation(plan, &FsRenamer, &mut options);

    match output {
        OutputFormat::Json => {
            println!("{}", run.report.format_json());
        },
        OutputFormat::Summary => {
            if !quiet {
                print!("{}", run.report.render(use_color));
            }
        },
    }

    Ok(run.report.has_failures())
}

fn print_failure_notice(outcome: &RenameOutcome) {
    let error = match &outcome.status {
        Status::Failed(error) => error.as_str(),
        _ => return,
    };
    eprintln!(
        "Could not rename '{}' to '{}'. Error: {}",
        outcome.operation.source.name, outcome.operation.target_name, error
    );
    eprintln!("Check file permissions or if the file is open.");
}
