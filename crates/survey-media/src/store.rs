//! Audio-note store over `object_store`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use survey_config::{StorageBackend, StorageConfig, SurveyConfig};

use crate::{AudioFormat, MediaError, object_key};

/// How an uploaded key is turned into the reference stored on the farmer.
#[derive(Debug, Clone)]
enum Reference {
    /// Absolute file path under the local directory.
    LocalPath(PathBuf),
    /// `{public_base_url}/{key}`.
    PublicUrl(StorageConfig),
    /// `memory://{key}`, for tests.
    Memory,
}

/// Puts audio blobs into the configured backend and returns a reference
/// (local file path or public URL).
pub struct AudioStore {
    store: Arc<dyn ObjectStore>,
    reference: Reference,
}

impl AudioStore {
    /// Build the store selected by `[storage]`.
    ///
    /// Relative `local_dir` paths resolve against `project_root`; the
    /// directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Config` if the backend is not fully configured, or
    /// an `ObjectStore`/`Io` error if it cannot be initialised.
    pub fn from_config(config: &StorageConfig, project_root: &Path) -> Result<Self, MediaError> {
        config.require_configured()?;
        match config.backend {
            StorageBackend::Local => {
                let dir = SurveyConfig::resolve_path(project_root, &config.local_dir);
                std::fs::create_dir_all(&dir)?;
                let dir = dir.canonicalize()?;
                let store = LocalFileSystem::new_with_prefix(&dir)?;
                Ok(Self {
                    store: Arc::new(store),
                    reference: Reference::LocalPath(dir),
                })
            }
            StorageBackend::S3 => {
                let store = AmazonS3Builder::new()
                    .with_endpoint(&config.endpoint)
                    .with_bucket_name(&config.bucket_name)
                    .with_access_key_id(&config.access_key_id)
                    .with_secret_access_key(&config.secret_access_key)
                    .with_region(&config.region)
                    .build()?;
                Ok(Self {
                    store: Arc::new(store),
                    reference: Reference::PublicUrl(config.clone()),
                })
            }
        }
    }

    /// A store that keeps uploads in memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(InMemory::new()),
            reference: Reference::Memory,
        }
    }

    /// Name of the backend, for status output.
    #[must_use]
    pub const fn backend_name(&self) -> &'static str {
        match self.reference {
            Reference::LocalPath(_) => "local",
            Reference::PublicUrl(_) => "s3",
            Reference::Memory => "memory",
        }
    }

    /// Upload an audio note for `name` and return its reference.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Empty` for an empty payload, or the backend error.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        name: &str,
        format: AudioFormat,
    ) -> Result<String, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::Empty);
        }
        let key = object_key(name, format, Utc::now());
        let path = ObjectPath::from(key.as_str());
        let size = bytes.len();

        // The local filesystem backend rejects object attributes.
        let opts = match self.reference {
            Reference::LocalPath(_) => PutOptions::default(),
            Reference::PublicUrl(_) | Reference::Memory => {
                let mut attributes = Attributes::new();
                attributes.insert(Attribute::ContentType, format.content_type().into());
                PutOptions {
                    attributes,
                    ..PutOptions::default()
                }
            }
        };
        self.store
            .put_opts(&path, PutPayload::from(bytes), opts)
            .await?;
        tracing::debug!(%key, size, backend = self.backend_name(), "audio note uploaded");

        Ok(self.reference_for(&key))
    }

    /// Upload an audio file from disk, detecting its format by extension.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::UnsupportedFormat` before reading the file if the
    /// extension is not accepted, then any read or upload error.
    pub async fn upload_file(&self, file: &Path, name: &str) -> Result<String, MediaError> {
        let format = AudioFormat::from_path(file)?;
        let bytes = tokio::fs::read(file).await?;
        self.upload(bytes, name, format).await
    }

    /// Read back an uploaded note by key.
    ///
    /// # Errors
    ///
    /// Returns the backend error, including `NotFound` for an unknown key.
    pub async fn fetch(&self, key: &str) -> Result<Vec<u8>, MediaError> {
        let result = self.store.get(&ObjectPath::from(key)).await?;
        Ok(result.bytes().await?.to_vec())
    }

    fn reference_for(&self, key: &str) -> String {
        match &self.reference {
            Reference::LocalPath(dir) => dir.join(key).display().to_string(),
            Reference::PublicUrl(config) => config.public_url(key),
            Reference::Memory => format!("memory://{key}"),
        }
    }
}

impl std::fmt::Debug for AudioStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioStore")
            .field("backend", &self.backend_name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_upload_roundtrips_bytes() {
        let store = AudioStore::in_memory();
        let reference = store
            .upload(b"ID3fake".to_vec(), "Abebe", AudioFormat::Mp3)
            .await
            .unwrap();
        let key = reference.strip_prefix("memory://").unwrap();
        assert!(key.starts_with("audio/Abebe_"));
        assert!(key.ends_with(".mp3"));
        assert_eq!(store.fetch(key).await.unwrap(), b"ID3fake");
    }

    #[tokio::test]
    async fn empty_payload_is_rejected() {
        let store = AudioStore::in_memory();
        let err = store
            .upload(Vec::new(), "Abebe", AudioFormat::Wav)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::Empty));
    }

    #[test]
    fn unconfigured_s3_is_a_config_error() {
        let config = StorageConfig {
            backend: StorageBackend::S3,
            ..StorageConfig::default()
        };
        let err = AudioStore::from_config(&config, Path::new(".")).unwrap_err();
        assert!(matches!(err, MediaError::Config(_)));
    }

    #[test]
    fn configured_s3_builds_without_network() {
        let config = StorageConfig {
            backend: StorageBackend::S3,
            endpoint: "https://abc123.r2.cloudflarestorage.com".into(),
            access_key_id: "key".into(),
            secret_access_key: "secret".into(),
            public_base_url: "https://audio.example.org".into(),
            ..StorageConfig::default()
        };
        let store = AudioStore::from_config(&config, Path::new(".")).unwrap();
        assert_eq!(store.backend_name(), "s3");
        assert_eq!(
            store.reference_for("audio/Abebe_20250307_0905.mp3"),
            "https://audio.example.org/audio/Abebe_20250307_0905.mp3"
        );
    }
}
