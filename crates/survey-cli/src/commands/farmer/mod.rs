mod register;

use survey_db::repos::farmer::FarmerFilter;
use survey_db::updates::farmer::FarmerUpdateBuilder;
use survey_core::responses::DeleteResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FarmerCommands;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

/// Handle `survey farmer`.
pub async fn handle(
    action: &FarmerCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        FarmerCommands::Register(args) => register::run(args, ctx, flags).await,
        FarmerCommands::Get { id } => {
            let farmer = ctx.service.get_farmer(id).await?;
            output(&farmer, flags.format)
        }
        FarmerCommands::Update { id, name, phone } => {
            let operator = ctx.operator_ctx()?;
            let mut builder = FarmerUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name.clone());
            }
            if let Some(phone) = phone {
                builder = builder.phone(phone.clone());
            }
            let farmer = ctx
                .service
                .update_farmer(&operator, id, builder.build())
                .await?;
            output(&farmer, flags.format)
        }
        FarmerCommands::Delete { id } => {
            let operator = ctx.operator_ctx()?;
            let farmer = ctx.service.delete_farmer(&operator, id).await?;
            output(
                &DeleteResponse {
                    id: farmer.id,
                    deleted: true,
                },
                flags.format,
            )
        }
        FarmerCommands::List { search, limit } => {
            let filter = FarmerFilter {
                search: search.clone(),
                limit: effective_limit(*limit, flags.limit, ctx.config.general.default_limit),
            };
            let farmers = ctx.service.list_farmers(&filter).await?;
            output(&farmers, flags.format)
        }
    }
}
