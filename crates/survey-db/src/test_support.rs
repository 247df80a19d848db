//! Shared test utilities for survey-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use survey_core::entities::{Kebele, Woreda};
    use survey_core::operator::OperatorContext;
    use survey_core::registration::NewFarmer;

    use crate::service::SurveyService;

    /// In-memory service with all migrations applied.
    pub async fn test_service() -> SurveyService {
        SurveyService::new_local(":memory:").await.unwrap()
    }

    pub fn test_ctx() -> OperatorContext {
        OperatorContext::new("enumerator1").unwrap()
    }

    /// Create woreda "Mecha" with kebele "Kebele 01".
    pub async fn seed_location(svc: &SurveyService) -> (Woreda, Kebele) {
        let ctx = test_ctx();
        let woreda = svc.add_woreda(&ctx, "Mecha").await.unwrap();
        let kebele = svc.add_kebele(&ctx, &woreda.id, "Kebele 01").await.unwrap();
        (woreda, kebele)
    }

    /// Registration input matching [`seed_location`].
    pub fn abebe() -> NewFarmer {
        NewFarmer {
            name: "Abebe".into(),
            woreda: "Mecha".into(),
            kebele: Some("Kebele 01".into()),
            phone: "0911000000".into(),
            ..NewFarmer::default()
        }
    }
}
