use anyhow::Context;
use survey_core::import::read_location_rows;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `survey import`.
pub async fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let operator = ctx.operator_ctx()?;
    let file = std::fs::File::open(&args.path)
        .with_context(|| format!("failed to open {}", args.path.display()))?;
    let rows = read_location_rows(std::io::BufReader::new(file))
        .with_context(|| format!("failed to read locations from {}", args.path.display()))?;

    let summary = ctx.service.import_locations(&operator, &rows).await?;
    output(&summary, flags.format)
}
