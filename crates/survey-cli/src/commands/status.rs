use survey_core::responses::StatusResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `survey status`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let counts = ctx.service.registry_counts().await?;
    let status = StatusResponse {
        database: ctx.db_path.display().to_string(),
        schema_version: ctx.service.db().schema_version().await?,
        woredas: counts.woredas,
        kebeles: counts.kebeles,
        farmers: counts.farmers,
        audio_backend: ctx.config.storage.backend.as_str().to_string(),
    };
    output(&status, flags.format)
}
