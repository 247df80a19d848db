//! Audio-note storage configuration.
//!
//! The `local` backend writes notes under `local_dir` and records file paths.
//! The `s3` backend targets any S3-compatible bucket (AWS, Cloudflare R2,
//! MinIO) and records public URLs built from `public_base_url`.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Which backend receives uploaded audio notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    Local,
    S3,
}

impl StorageBackend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
        }
    }
}

fn default_local_dir() -> String {
    String::from(".survey/audio")
}

fn default_bucket_name() -> String {
    String::from("survey-audio")
}

fn default_region() -> String {
    String::from("auto")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the `local` backend.
    #[serde(default = "default_local_dir")]
    pub local_dir: String,

    /// S3-compatible endpoint URL (e.g. `https://<account>.r2.cloudflarestorage.com`).
    #[serde(default)]
    pub endpoint: String,

    #[serde(default = "default_bucket_name")]
    pub bucket_name: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    #[serde(default = "default_region")]
    pub region: String,

    /// Public base URL under which uploaded objects are readable,
    /// e.g. `https://audio.example.org`.
    #[serde(default)]
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            local_dir: default_local_dir(),
            endpoint: String::new(),
            bucket_name: default_bucket_name(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            region: default_region(),
            public_base_url: String::new(),
        }
    }
}

impl StorageConfig {
    /// Check if the selected backend has the fields it needs.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        match self.backend {
            StorageBackend::Local => !self.local_dir.is_empty(),
            StorageBackend::S3 => {
                !self.endpoint.is_empty()
                    && !self.bucket_name.is_empty()
                    && !self.access_key_id.is_empty()
                    && !self.secret_access_key.is_empty()
                    && !self.public_base_url.is_empty()
            }
        }
    }

    /// Like [`is_configured`](Self::is_configured), but as an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` if required fields are missing.
    pub fn require_configured(&self) -> Result<(), ConfigError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ConfigError::NotConfigured {
                section: format!("storage ({})", self.backend.as_str()),
            })
        }
    }

    /// Public URL of an object key, joined onto `public_base_url`.
    #[must_use]
    pub fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}",
            self.public_base_url.trim_end_matches('/'),
            key.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s3() -> StorageConfig {
        StorageConfig {
            backend: StorageBackend::S3,
            endpoint: "https://abc123.r2.cloudflarestorage.com".into(),
            access_key_id: "key".into(),
            secret_access_key: "secret".into(),
            public_base_url: "https://audio.example.org".into(),
            ..Default::default()
        }
    }

    #[test]
    fn default_is_local_and_configured() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Local);
        assert_eq!(config.local_dir, ".survey/audio");
        assert_eq!(config.bucket_name, "survey-audio");
        assert!(config.is_configured());
    }

    #[test]
    fn s3_configured_when_all_required_fields_set() {
        assert!(s3().is_configured());
        assert!(s3().require_configured().is_ok());
    }

    #[test]
    fn s3_not_configured_when_missing_field() {
        let config = StorageConfig {
            access_key_id: String::new(),
            ..s3()
        };
        assert!(!config.is_configured());
        let err = config.require_configured().unwrap_err();
        assert!(err.to_string().contains("storage (s3)"));
    }

    #[test]
    fn public_url_joins_without_double_slash() {
        let config = StorageConfig {
            public_base_url: "https://audio.example.org/".into(),
            ..s3()
        };
        assert_eq!(
            config.public_url("/audio/abebe.mp3"),
            "https://audio.example.org/audio/abebe.mp3"
        );
    }
}
