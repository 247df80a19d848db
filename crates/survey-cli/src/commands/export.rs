use std::path::{Path, PathBuf};

use anyhow::Context;
use survey_core::export::{to_rows, write_csv, write_jsonl};
use survey_core::responses::ExportResponse;
use survey_db::repos::farmer::FarmerFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ExportArgs, ExportFormat};
use crate::context::AppContext;
use crate::output::output;

/// Handle `survey export`.
pub async fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = FarmerFilter {
        search: args.search.clone(),
        limit: None,
    };
    let farmers = ctx.service.list_farmers(&filter).await?;
    let rows = to_rows(&farmers);

    if args.output.as_deref() == Some("-") {
        let stdout = std::io::stdout().lock();
        return write_rows(stdout, args.file_format, &rows);
    }

    let path = output_path(
        &ctx.project_root,
        args.output.as_deref(),
        &ctx.config.general.export_file_name,
        args.file_format,
    );
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_rows(std::io::BufWriter::new(file), args.file_format, &rows)?;
    tracing::info!(path = %path.display(), rows = rows.len(), "export written");

    output(
        &ExportResponse {
            path: path.display().to_string(),
            format: args.file_format.as_str().to_string(),
            rows: u32::try_from(rows.len())?,
        },
        flags.format,
    )
}

fn write_rows<W: std::io::Write>(
    writer: W,
    format: ExportFormat,
    rows: &[survey_core::export::ExportRow],
) -> anyhow::Result<()> {
    match format {
        ExportFormat::Csv => write_csv(writer, rows)?,
        ExportFormat::Jsonl => write_jsonl(writer, rows)?,
    }
    Ok(())
}

/// Explicit paths are used as given; the configured default lands in the
/// project root and takes a `.jsonl` extension for JSON Lines.
fn output_path(
    project_root: &Path,
    explicit: Option<&str>,
    default_name: &str,
    format: ExportFormat,
) -> PathBuf {
    if let Some(explicit) = explicit {
        return PathBuf::from(explicit);
    }
    let path = project_root.join(default_name);
    match format {
        ExportFormat::Csv => path,
        ExportFormat::Jsonl => path.with_extension("jsonl"),
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::output_path;
    use crate::cli::root_commands::ExportFormat;

    #[test]
    fn default_csv_lands_in_project_root() {
        let path = output_path(
            Path::new("/srv/survey"),
            None,
            "Amhara_Survey_2025.csv",
            ExportFormat::Csv,
        );
        assert_eq!(path, PathBuf::from("/srv/survey/Amhara_Survey_2025.csv"));
    }

    #[test]
    fn default_jsonl_swaps_extension() {
        let path = output_path(
            Path::new("/srv/survey"),
            None,
            "Amhara_Survey_2025.csv",
            ExportFormat::Jsonl,
        );
        assert_eq!(path, PathBuf::from("/srv/survey/Amhara_Survey_2025.jsonl"));
    }

    #[test]
    fn explicit_path_is_kept() {
        let path = output_path(
            Path::new("/srv/survey"),
            Some("out/farmers.csv"),
            "Amhara_Survey_2025.csv",
            ExportFormat::Jsonl,
        );
        assert_eq!(path, PathBuf::from("out/farmers.csv"));
    }
}
