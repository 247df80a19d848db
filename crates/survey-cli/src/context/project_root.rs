use std::path::{Path, PathBuf};

use anyhow::Context;
use survey_config::PROJECT_DIR;

/// Nearest ancestor of `start` (inclusive) holding a `.survey` directory.
#[must_use]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_DIR).is_dir())
        .map(Path::to_path_buf)
}

/// Project root from `--project`, or discovered upwards from `cwd`.
///
/// `--project` may name the project directory or its `.survey` directory.
pub fn resolve_project_root(project: Option<&str>, cwd: &Path) -> anyhow::Result<PathBuf> {
    let Some(project) = project else {
        return find_project_root(cwd).context(
            "not a survey project (no .survey directory found). Run 'survey init' first.",
        );
    };

    let explicit = PathBuf::from(project);
    if explicit.file_name().is_some_and(|name| name == PROJECT_DIR) {
        return explicit
            .parent()
            .map(Path::to_path_buf)
            .context("invalid --project path: '.survey' directory has no parent");
    }
    if explicit.is_dir() {
        return Ok(explicit);
    }
    anyhow::bail!(
        "invalid --project '{}': directory does not exist",
        explicit.display()
    )
}
