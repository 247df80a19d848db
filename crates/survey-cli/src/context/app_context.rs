use std::path::PathBuf;

use anyhow::Context;
use survey_config::SurveyConfig;
use survey_core::operator::OperatorContext;
use survey_db::service::SurveyService;
use survey_media::AudioStore;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: SurveyService,
    pub config: SurveyConfig,
    pub project_root: PathBuf,
    pub db_path: PathBuf,
    operator: Option<String>,
}

impl AppContext {
    /// Open the project database. `operator` is the `--operator` flag and
    /// takes precedence over `general.operator`.
    pub async fn init(
        project_root: PathBuf,
        config: SurveyConfig,
        operator: Option<String>,
    ) -> anyhow::Result<Self> {
        let db_path = SurveyConfig::resolve_path(&project_root, &config.database.path);
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let service = SurveyService::new_local(&db_path.to_string_lossy())
            .await
            .with_context(|| format!("failed to open database {}", db_path.display()))?;

        let operator = operator.or_else(|| {
            Some(config.general.operator.clone()).filter(|name| !name.trim().is_empty())
        });
        Ok(Self {
            service,
            config,
            project_root,
            db_path,
            operator,
        })
    }

    /// Operator for mutating commands.
    pub fn operator_ctx(&self) -> anyhow::Result<OperatorContext> {
        let operator = self.operator.as_deref().context(
            "no operator set: pass --operator NAME or set general.operator in .survey/config.toml",
        )?;
        Ok(OperatorContext::new(operator)?)
    }

    /// Audio store for the configured backend.
    pub fn audio_store(&self) -> anyhow::Result<AudioStore> {
        AudioStore::from_config(&self.config.storage, &self.project_root)
            .context("audio storage is unavailable")
    }
}
