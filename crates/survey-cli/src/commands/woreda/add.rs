use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(name: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let operator = ctx.operator_ctx()?;
    let woreda = ctx.service.add_woreda(&operator, name).await?;
    output(&woreda, flags.format)
}
