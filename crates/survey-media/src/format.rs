//! Accepted audio formats.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::MediaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Wav,
    M4a,
}

impl AudioFormat {
    pub const ALL: [Self; 3] = [Self::Mp3, Self::Wav, Self::M4a];

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::M4a => "m4a",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::M4a => "audio/mp4",
        }
    }

    /// Detect the format from a file's extension.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::UnsupportedFormat` for a missing or unknown extension.
    pub fn from_path(path: &Path) -> Result<Self, MediaError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| MediaError::UnsupportedFormat(path.display().to_string()))?
            .parse()
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for AudioFormat {
    type Err = MediaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ext = s.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extension() == ext)
            .ok_or_else(|| MediaError::UnsupportedFormat(s.to_string()))
    }
}
