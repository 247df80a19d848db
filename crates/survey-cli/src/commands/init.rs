use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use survey_config::{PROJECT_DIR, SurveyConfig};
use survey_db::service::SurveyService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    project_root: String,
    config_path: String,
    config_created: bool,
    database: String,
    schema_version: u32,
}

/// Handle `survey init`.
pub async fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match &args.path {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    std::fs::create_dir_all(root.join(PROJECT_DIR))
        .with_context(|| format!("failed to create {}", root.join(PROJECT_DIR).display()))?;

    let (config_path, config_created) = write_default_config(&root)?;
    let config = SurveyConfig::load_for_project(&root)
        .context("failed to load survey configuration")?;

    let db_path = SurveyConfig::resolve_path(&root, &config.database.path);
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let service = SurveyService::new_local(&db_path.to_string_lossy())
        .await
        .with_context(|| format!("failed to open database {}", db_path.display()))?;
    let schema_version = service.db().schema_version().await?;
    tracing::info!(root = %root.display(), schema_version, "survey project initialized");

    output(
        &InitResponse {
            project_root: root.display().to_string(),
            config_path: config_path.display().to_string(),
            config_created,
            database: db_path.display().to_string(),
            schema_version,
        },
        flags.format,
    )
}

/// Write the default config unless one exists. Returns its path and whether
/// it was written.
fn write_default_config(root: &Path) -> anyhow::Result<(PathBuf, bool)> {
    let path = SurveyConfig::project_config_path(root);
    if path.exists() {
        return Ok((path, false));
    }
    let rendered = toml::to_string_pretty(&SurveyConfig::default())
        .context("failed to render default configuration")?;
    std::fs::write(&path, rendered)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok((path, true))
}
