//! End-to-end registry scenarios through the public service API.

use pretty_assertions::assert_eq;

use survey_core::export::{to_csv_string, to_rows};
use survey_core::import::read_location_rows;
use survey_core::operator::OperatorContext;
use survey_core::registration::NewFarmer;
use survey_db::error::DatabaseError;
use survey_db::repos::farmer::FarmerFilter;
use survey_db::service::SurveyService;

async fn service() -> SurveyService {
    SurveyService::new_local(":memory:").await.unwrap()
}

fn ctx() -> OperatorContext {
    OperatorContext::new("enumerator1").unwrap()
}

#[tokio::test]
async fn register_first_farmer_end_to_end() {
    let svc = service().await;
    let ctx = ctx();

    let woreda = svc.add_woreda(&ctx, "Mecha").await.unwrap();
    svc.add_kebele(&ctx, &woreda.id, "Kebele 01").await.unwrap();
    svc.register_farmer(
        &ctx,
        &NewFarmer {
            name: "Abebe".into(),
            woreda: "Mecha".into(),
            kebele: Some("Kebele 01".into()),
            phone: "0911000000".into(),
            ..NewFarmer::default()
        },
    )
    .await
    .unwrap();

    let farmers = svc.list_farmers(&FarmerFilter::default()).await.unwrap();
    assert_eq!(farmers.len(), 1);
    assert_eq!(farmers[0].name, "Abebe");
    assert_eq!(farmers[0].woreda, "Mecha");
    assert_eq!(farmers[0].kebele, "Kebele 01");
    assert_eq!(farmers[0].phone, "0911000000");
    assert_eq!(farmers[0].audio_ref, None);
}

#[tokio::test]
async fn registration_blocked_until_hierarchy_is_populated() {
    let svc = service().await;
    let ctx = ctx();
    svc.add_woreda(&ctx, "Mecha").await.unwrap();

    let err = svc
        .register_farmer(
            &ctx,
            &NewFarmer {
                name: "Abebe".into(),
                woreda: "Mecha".into(),
                kebele: None,
                ..NewFarmer::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DatabaseError::Validation(_)));
    assert_eq!(svc.count_farmers().await.unwrap(), 0);
}

#[tokio::test]
async fn deleted_woreda_and_kebeles_disappear_from_reads() {
    let svc = service().await;
    let ctx = ctx();
    let woreda = svc.add_woreda(&ctx, "Mecha").await.unwrap();
    svc.add_kebele(&ctx, &woreda.id, "Kebele 01").await.unwrap();
    svc.add_kebele(&ctx, &woreda.id, "Kebele 02").await.unwrap();

    let response = svc.delete_woreda(&ctx, &woreda.id).await.unwrap();
    assert_eq!(response.kebeles_deleted, 2);
    assert!(svc.location_tree().await.unwrap().is_empty());
    assert_eq!(svc.count_kebeles().await.unwrap(), 0);
}

#[tokio::test]
async fn export_then_reimport_creates_no_duplicates() {
    let svc = service().await;
    let ctx = ctx();
    let woreda = svc.add_woreda(&ctx, "Mecha").await.unwrap();
    svc.add_kebele(&ctx, &woreda.id, "Kebele 01").await.unwrap();
    for name in ["Abebe", "Almaz"] {
        svc.register_farmer(
            &ctx,
            &NewFarmer {
                name: name.into(),
                woreda: "Mecha".into(),
                kebele: Some("Kebele 01".into()),
                ..NewFarmer::default()
            },
        )
        .await
        .unwrap();
    }

    let farmers = svc.list_farmers(&FarmerFilter::default()).await.unwrap();
    let csv = to_csv_string(&to_rows(&farmers)).unwrap();
    let rows = read_location_rows(csv.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);

    let summary = svc.import_locations(&ctx, &rows).await.unwrap();
    assert_eq!(summary.woredas_created, 0);
    assert_eq!(summary.kebeles_created, 0);
    assert_eq!(svc.count_woredas().await.unwrap(), 1);
    assert_eq!(svc.list_kebeles(&woreda.id).await.unwrap(), vec!["Kebele 01"]);
}

#[tokio::test]
async fn file_database_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("survey.db");
    let path = path.to_str().unwrap();

    {
        let svc = SurveyService::new_local(path).await.unwrap();
        svc.add_woreda(&ctx(), "Mecha").await.unwrap();
    }

    let svc = SurveyService::new_local(path).await.unwrap();
    assert_eq!(
        svc.get_woreda_by_name("Mecha").await.unwrap().map(|w| w.name),
        Some("Mecha".to_string())
    );
    assert_eq!(
        svc.db().schema_version().await.unwrap(),
        survey_db::LATEST_SCHEMA_VERSION
    );
}
