use survey_core::entities::Woreda;
use survey_core::enums::EntityType;
use survey_core::ids::{PREFIX_WOREDA, has_prefix};
use survey_db::error::DatabaseError;

use crate::context::AppContext;

/// Resolve a `WOREDA` argument given as an id (`wrd-…`) or an exact name.
///
/// An id-shaped argument that matches no id is retried as a name.
pub async fn resolve_woreda(ctx: &AppContext, key: &str) -> anyhow::Result<Woreda> {
    let key = key.trim();
    if has_prefix(key, PREFIX_WOREDA) {
        match ctx.service.get_woreda(key).await {
            Ok(woreda) => return Ok(woreda),
            Err(DatabaseError::NotFound { .. }) => {}
            Err(error) => return Err(error.into()),
        }
    }
    ctx.service
        .get_woreda_by_name(key)
        .await?
        .ok_or_else(|| {
            DatabaseError::NotFound {
                entity: EntityType::Woreda,
                id: key.to_string(),
            }
            .into()
        })
}
