//! Registry-wide counts for the status view.

use serde::Serialize;

use crate::error::DatabaseError;
use crate::service::SurveyService;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryCounts {
    pub woredas: u64,
    pub kebeles: u64,
    pub farmers: u64,
}

impl SurveyService {
    /// # Errors
    ///
    /// Returns `DatabaseError` if a count query fails.
    pub async fn registry_counts(&self) -> Result<RegistryCounts, DatabaseError> {
        Ok(RegistryCounts {
            woredas: self.count_woredas().await?,
            kebeles: self.count_kebeles().await?,
            farmers: self.count_farmers().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{abebe, seed_location, test_ctx, test_service};

    use super::*;

    #[tokio::test]
    async fn counts_follow_mutations() {
        let svc = test_service().await;
        assert_eq!(svc.registry_counts().await.unwrap(), RegistryCounts::default());

        seed_location(&svc).await;
        svc.register_farmer(&test_ctx(), &abebe()).await.unwrap();
        assert_eq!(
            svc.registry_counts().await.unwrap(),
            RegistryCounts {
                woredas: 1,
                kebeles: 1,
                farmers: 1,
            }
        );
    }
}
