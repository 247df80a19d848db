use crate::cli::GlobalFlags;
use crate::cli::subcommands::KebeleCommands;
use crate::commands::shared::locate::resolve_woreda;
use crate::context::AppContext;
use crate::output::output;

/// Handle `survey kebele`.
pub async fn handle(
    action: &KebeleCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        KebeleCommands::Add { woreda, name } => {
            let operator = ctx.operator_ctx()?;
            let woreda = resolve_woreda(ctx, woreda).await?;
            let kebele = ctx.service.add_kebele(&operator, &woreda.id, name).await?;
            output(&kebele, flags.format)
        }
        KebeleCommands::Rename { id, new_name } => {
            let operator = ctx.operator_ctx()?;
            let kebele = ctx.service.rename_kebele(&operator, id, new_name).await?;
            output(&kebele, flags.format)
        }
        KebeleCommands::Delete { id } => {
            let operator = ctx.operator_ctx()?;
            let kebele = ctx.service.delete_kebele(&operator, id).await?;
            output(&kebele, flags.format)
        }
        KebeleCommands::List { woreda } => {
            let woreda = resolve_woreda(ctx, woreda).await?;
            let kebeles = ctx.service.list_kebele_records(&woreda.id).await?;
            output(&kebeles, flags.format)
        }
    }
}
