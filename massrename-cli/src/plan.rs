use anyhow::{Context, Result};
use massrename_core::{open_source, plan_operation, render_plan, OutputFormatter, Preview};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_plan(
    directory: &Path,
    names: &Path,
    preview: Preview,
    output: OutputFormat,
    use_color: bool,
    quiet: bool,
) -> Result<()> {
    let mut source = open_source(names)?;
    let plan = plan_operation(directory, source.as_mut())
        .with_context(|| format!("Failed to plan renames in {}", directory.display()))?;

    match output {
        OutputFormat::Json => {
            println!("{}", plan.format_json());
        },
        OutputFormat::Summary => {
            if !quiet {
                let rendered = render_plan(&plan, preview, use_color);
                if !rendered.is_empty() {
                    println!("{}", rendered.trim_end());
                    println!();
                }
                print!("{}", plan.format_summary());
            }
        },
    }

    Ok(())
}
