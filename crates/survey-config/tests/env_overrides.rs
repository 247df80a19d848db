use figment::Jail;
use survey_config::{StorageBackend, SurveyConfig};

#[test]
fn env_vars_map_to_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("SURVEY_DATABASE__PATH", ":memory:");
        jail.set_env("SURVEY_STORAGE__BACKEND", "s3");
        jail.set_env("SURVEY_GENERAL__OPERATOR", "from_env");

        let config = SurveyConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.database.path, ":memory:");
        assert_eq!(config.storage.backend, StorageBackend::S3);
        assert_eq!(config.general.operator, "from_env");
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".survey"))
            .map_err(|e| e.to_string())?;
        jail.create_file(
            ".survey/config.toml",
            r#"
[general]
operator = "from_toml"
"#,
        )?;
        jail.set_env("SURVEY_GENERAL__OPERATOR", "from_env");

        let config = SurveyConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.general.operator, "from_env");
        Ok(())
    });
}
