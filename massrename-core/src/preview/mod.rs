mod summary;
mod table;

pub use summary::render_summary;
pub use table::render_table;

use crate::planner::RenamePlan;
use serde::{Deserialize, Serialize};
use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preview {
    Table,
    Summary,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "summary" => Ok(Self::Summary),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color,
        None => is_terminal(),
    }
}

pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render the plan in the given preview format; `None` renders nothing.
pub fn render_plan(plan: &RenamePlan, format: Preview, use_color: bool) -> String {
    match format {
        Preview::Table => render_table(plan, use_color),
        Preview::Summary => render_summary(plan),
        Preview::None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_preview_from_str() {
        assert_eq!("Table".parse::<Preview>().unwrap(), Preview::Table);
        assert_eq!("none".parse::<Preview>().unwrap(), Preview::None);
        assert!("diff".parse::<Preview>().is_err());
    }

    #[test]
    fn test_color_detection() {
        assert!(should_use_color_with_detector(Some(true), || false));
        assert!(!should_use_color_with_detector(Some(false), || true));
        assert!(should_use_color_with_detector(None, || true));
        assert!(!should_use_color_with_detector(None, || false));
    }

    #[test]
    fn test_none_renders_nothing() {
        let plan = RenamePlan {
            directory: PathBuf::from("dir"),
            operations: vec![],
            files_found: 0,
            names_found: 0,
        };
        assert_eq!(render_plan(&plan, Preview::None, false), "");
    }
}
