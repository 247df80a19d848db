use survey_core::enums::FarmerType;
use survey_core::registration::NewFarmer;
use survey_core::responses::RegistrationResponse;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RegisterArgs;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(args: &RegisterArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let operator = ctx.operator_ctx()?;
    let mut input = NewFarmer {
        name: args.name.clone(),
        farmer_type: args
            .farmer_type
            .as_deref()
            .map(str::parse::<FarmerType>)
            .transpose()?,
        woreda: args.woreda.clone(),
        kebele: args.kebele.clone(),
        phone: args.phone.clone(),
        audio_ref: None,
    };

    // Nothing is uploaded for a registration that would be rejected.
    let validated = ctx.service.validate_registration(&input).await?;

    let mut warnings = Vec::new();
    if let Some(path) = &args.audio {
        match upload_audio(ctx, path, &validated.name).await {
            Ok(reference) => input.audio_ref = Some(reference),
            Err(error) => {
                tracing::warn!(error = %format!("{error:#}"), path = %path.display(), "audio upload failed");
                warnings.push(format!(
                    "audio note was not saved ({error:#}); farmer registered without audio"
                ));
            }
        }
    }

    let farmer = ctx.service.register_farmer(&operator, &input).await?;
    output(&RegistrationResponse { farmer, warnings }, flags.format)
}

async fn upload_audio(
    ctx: &AppContext,
    path: &std::path::Path,
    name: &str,
) -> anyhow::Result<String> {
    let store = ctx.audio_store()?;
    Ok(store.upload_file(path, name).await?)
}
