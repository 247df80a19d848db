//! # survey-media
//!
//! Storage for the audio notes attached to farmer registrations.
//!
//! Backends are `object_store` implementations: any S3-compatible bucket
//! (AWS, Cloudflare R2, MinIO), a local directory, or memory for tests.
//! An upload returns the reference stored on the farmer record: a public URL
//! for buckets, an absolute file path for the local directory.

mod error;
mod format;
mod key;
mod store;

pub use error::MediaError;
pub use format::AudioFormat;
pub use key::{AUDIO_PREFIX, object_key, sanitize_name};
pub use store::AudioStore;
