use survey_core::enums::{AuditAction, EntityType};
use survey_db::repos::audit::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `survey audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let filter = build_filter(args, flags.limit)?;
    let entries = ctx.service.query_audit(&filter).await?;
    output(&entries, flags.format)
}

fn build_filter(args: &AuditArgs, global_limit: Option<u32>) -> anyhow::Result<AuditFilter> {
    Ok(AuditFilter {
        entity_type: args
            .entity_type
            .as_deref()
            .map(|raw| parse_enum::<EntityType>(raw, "entity-type"))
            .transpose()?,
        entity_id: args.entity_id.clone(),
        action: args
            .action
            .as_deref()
            .map(|raw| parse_enum::<AuditAction>(raw, "action"))
            .transpose()?,
        operator: args.by.clone(),
        limit: effective_limit(None, global_limit, 50),
    })
}

#[cfg(test)]
mod tests {
    use survey_core::enums::{AuditAction, EntityType};

    use super::build_filter;
    use crate::cli::root_commands::AuditArgs;

    fn args() -> AuditArgs {
        AuditArgs {
            entity_type: None,
            entity_id: None,
            action: None,
            by: None,
        }
    }

    #[test]
    fn parses_filters() {
        let filter = build_filter(
            &AuditArgs {
                entity_type: Some("kebele".into()),
                action: Some("Deleted".into()),
                by: Some("enumerator1".into()),
                ..args()
            },
            None,
        )
        .expect("filter should build");
        assert_eq!(filter.entity_type, Some(EntityType::Kebele));
        assert_eq!(filter.action, Some(AuditAction::Deleted));
        assert_eq!(filter.operator.as_deref(), Some("enumerator1"));
        assert_eq!(filter.limit, Some(50));
    }

    #[test]
    fn global_limit_applies() {
        let filter = build_filter(&args(), Some(5)).expect("filter should build");
        assert_eq!(filter.limit, Some(5));
    }

    #[test]
    fn rejects_unknown_action() {
        let err = build_filter(
            &AuditArgs {
                action: Some("archived".into()),
                ..args()
            },
            None,
        )
        .expect_err("unknown action should fail");
        assert!(err.to_string().contains("invalid action"));
    }
}
