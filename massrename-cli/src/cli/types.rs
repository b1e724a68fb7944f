use clap::ValueEnum;
use massrename_core::{OutputFormat as CoreOutputFormat, Preview};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Table,
    Summary,
    None,
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Table => Self::Table,
            PreviewArg::Summary => Self::Summary,
            PreviewArg::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<CoreOutputFormat> for OutputFormat {
    fn from(format: CoreOutputFormat) -> Self {
        match format {
            CoreOutputFormat::Summary => Self::Summary,
            CoreOutputFormat::Json => Self::Json,
        }
    }
}
