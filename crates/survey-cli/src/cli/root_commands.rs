use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{FarmerCommands, KebeleCommands, WoredaCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize a survey project in the current directory.
    Init(InitArgs),
    /// Woredas (districts).
    Woreda {
        #[command(subcommand)]
        action: WoredaCommands,
    },
    /// Kebeles (sub-districts of a woreda).
    Kebele {
        #[command(subcommand)]
        action: KebeleCommands,
    },
    /// Farmer registrations.
    Farmer {
        #[command(subcommand)]
        action: FarmerCommands,
    },
    /// Export registered farmers as a flat table.
    Export(ExportArgs),
    /// Bulk-import woredas and kebeles from CSV.
    Import(ImportArgs),
    /// Query the audit trail.
    Audit(AuditArgs),
    /// Database and storage summary.
    Status,
}

/// Arguments for `survey init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory).
    pub path: Option<PathBuf>,
}

/// Serialization of an export file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Jsonl,
}

impl ExportFormat {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Jsonl => "jsonl",
        }
    }
}

/// Arguments for `survey export`.
#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// File serialization.
    #[arg(long, value_enum, default_value = "csv")]
    pub file_format: ExportFormat,
    /// Output path, or `-` for stdout (defaults to general.export_file_name).
    #[arg(long)]
    pub output: Option<String>,
    /// Only farmers whose name or woreda contains this text.
    #[arg(long)]
    pub search: Option<String>,
}

/// Arguments for `survey import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// CSV file with a `Woreda` column and optionally a `Kebele` column.
    pub path: PathBuf,
}

/// Arguments for `survey audit`.
#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    #[arg(long)]
    pub entity_type: Option<String>,
    #[arg(long)]
    pub entity_id: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
    /// Only changes made by this operator.
    #[arg(long)]
    pub by: Option<String>,
}
