//! Serde roundtrip and JsonSchema validation tests for entity and response types.

use chrono::Utc;
use schemars::schema_for;
use survey_core::entities::*;
use survey_core::enums::*;
use survey_core::responses::*;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn woreda() -> Woreda {
    Woreda {
        id: "wrd-a3f8b2c1".into(),
        name: "Mecha".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn kebele() -> Kebele {
    Kebele {
        id: "keb-0b1c2d3e".into(),
        woreda_id: "wrd-a3f8b2c1".into(),
        name: "Kebele 01".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn farmer() -> Farmer {
    Farmer {
        id: "frm-4f5e6d7c".into(),
        name: "Abebe".into(),
        farmer_type: Some(FarmerType::LargeScale),
        woreda: "Mecha".into(),
        kebele: "Kebele 01".into(),
        phone: "0911000000".into(),
        audio_ref: None,
        registered_by: "enumerator1".into(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

roundtrip_and_validate!(woreda_roundtrip, Woreda, woreda());

roundtrip_and_validate!(kebele_roundtrip, Kebele, kebele());

roundtrip_and_validate!(farmer_roundtrip, Farmer, farmer());

roundtrip_and_validate!(
    farmer_without_type_roundtrip,
    Farmer,
    Farmer {
        farmer_type: None,
        audio_ref: Some("https://storage.example.test/audio/abebe_20250101_0930.mp3".into()),
        ..farmer()
    }
);

roundtrip_and_validate!(
    location_node_roundtrip,
    LocationNode,
    LocationNode {
        woreda: woreda(),
        kebeles: vec![kebele()],
    }
);

roundtrip_and_validate!(
    audit_entry_roundtrip,
    AuditEntry,
    AuditEntry {
        id: "aud-11223344".into(),
        operator: "enumerator1".into(),
        entity_type: EntityType::Woreda,
        entity_id: "wrd-a3f8b2c1".into(),
        action: AuditAction::Renamed,
        detail: Some(serde_json::json!({"from": "Mecha", "to": "Mecha Zuria"})),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    registration_response_roundtrip,
    RegistrationResponse,
    RegistrationResponse {
        farmer: farmer(),
        warnings: vec!["audio upload failed".into()],
    }
);

roundtrip_and_validate!(
    woreda_delete_response_roundtrip,
    WoredaDeleteResponse,
    WoredaDeleteResponse {
        woreda: woreda(),
        kebeles_deleted: 3,
    }
);

roundtrip_and_validate!(
    import_summary_roundtrip,
    ImportSummary,
    ImportSummary {
        woredas_created: 2,
        woredas_skipped: 1,
        kebeles_created: 5,
        kebeles_skipped: 0,
        rows_skipped: 1,
    }
);

#[test]
fn registration_response_omits_empty_warnings() {
    let response = RegistrationResponse {
        farmer: farmer(),
        warnings: Vec::new(),
    };
    let json = serde_json::to_value(&response).unwrap();
    assert!(json.get("warnings").is_none());
}

#[test]
fn farmer_type_serializes_snake_case() {
    let json = serde_json::to_value(farmer()).unwrap();
    assert_eq!(json["farmer_type"], "large_scale");
    assert!(json["audio_ref"].is_null());
}
