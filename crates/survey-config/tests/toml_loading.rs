//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and working-directory
//! manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use survey_config::{StorageBackend, SurveyConfig};

#[test]
fn loads_storage_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
backend = "s3"
endpoint = "http://localhost:9000"
bucket_name = "toml-bucket"
access_key_id = "toml-key"
secret_access_key = "toml-secret"
region = "us-east-1"
public_base_url = "https://audio.example.org"
"#,
        )?;

        let config: SurveyConfig = Figment::from(Serialized::defaults(SurveyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.storage.backend, StorageBackend::S3);
        assert_eq!(config.storage.endpoint, "http://localhost:9000");
        assert_eq!(config.storage.bucket_name, "toml-bucket");
        assert_eq!(config.storage.region, "us-east-1");
        assert!(config.storage.is_configured());
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_from_survey_dir() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".survey"))
            .map_err(|e| e.to_string())?;
        jail.create_file(
            ".survey/config.toml",
            r#"
[database]
path = "data/registry.db"

[general]
operator = "enumerator7"
default_limit = 50
"#,
        )?;

        let config = SurveyConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.database.path, "data/registry.db");
        assert_eq!(config.general.operator, "enumerator7");
        assert_eq!(config.general.default_limit, 50);
        // Untouched sections keep their defaults.
        assert_eq!(config.storage.backend, StorageBackend::Local);
        Ok(())
    });
}

#[test]
fn partial_section_keeps_field_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
operator = "enumerator2"
"#,
        )?;

        let config: SurveyConfig = Figment::from(Serialized::defaults(SurveyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.operator, "enumerator2");
        assert_eq!(config.general.default_limit, 20);
        assert_eq!(config.general.export_file_name, "Amhara_Survey_2025.csv");
        Ok(())
    });
}
