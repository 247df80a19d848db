use crate::cli::GlobalFlags;
use crate::commands::shared::locate::resolve_woreda;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(woreda: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let operator = ctx.operator_ctx()?;
    let target = resolve_woreda(ctx, woreda).await?;
    let deleted = ctx.service.delete_woreda(&operator, &target.id).await?;
    tracing::info!(
        woreda = %deleted.woreda.name,
        kebeles = deleted.kebeles_deleted,
        "woreda deleted"
    );
    output(&deleted, flags.format)
}
