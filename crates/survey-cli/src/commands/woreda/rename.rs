use crate::cli::GlobalFlags;
use crate::commands::shared::locate::resolve_woreda;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    woreda: &str,
    new_name: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let operator = ctx.operator_ctx()?;
    let current = resolve_woreda(ctx, woreda).await?;
    let renamed = ctx
        .service
        .rename_woreda(&operator, &current.id, new_name)
        .await?;
    output(&renamed, flags.format)
}
