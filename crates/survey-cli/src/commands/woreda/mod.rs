mod add;
mod delete;
mod list;
mod rename;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::WoredaCommands;
use crate::context::AppContext;

/// Handle `survey woreda`.
pub async fn handle(
    action: &WoredaCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        WoredaCommands::Add { name } => add::run(name, ctx, flags).await,
        WoredaCommands::Rename { woreda, new_name } => {
            rename::run(woreda, new_name, ctx, flags).await
        }
        WoredaCommands::Delete { woreda } => delete::run(woreda, ctx, flags).await,
        WoredaCommands::List { tree } => list::run(*tree, ctx, flags).await,
    }
}
