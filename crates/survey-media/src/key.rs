//! Object keys for uploaded audio notes.

use chrono::{DateTime, Utc};

use crate::AudioFormat;

/// Prefix under which every audio note is stored.
pub const AUDIO_PREFIX: &str = "audio";

/// Make a farmer name safe for use as a key segment.
///
/// Runs of anything other than ASCII alphanumerics, `-` and `_` collapse to a
/// single `_`. Never returns an empty string.
#[must_use]
pub fn sanitize_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_underscore = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' {
            out.push(ch);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let mut sanitized = out.trim_matches('_').to_string();
    if sanitized.is_empty() {
        return "farmer".to_string();
    }
    sanitized.truncate(96);
    sanitized
}

/// `audio/{sanitized name}_{YYYYmmdd_HHMM}.{ext}`
#[must_use]
pub fn object_key(name: &str, format: AudioFormat, at: DateTime<Utc>) -> String {
    format!(
        "{AUDIO_PREFIX}/{}_{}.{}",
        sanitize_name(name),
        at.format("%Y%m%d_%H%M"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn key_has_name_timestamp_and_extension() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 42).unwrap();
        assert_eq!(
            object_key("Abebe Kebede", AudioFormat::Mp3, at),
            "audio/Abebe_Kebede_20250307_0905.mp3"
        );
    }

    #[test]
    fn sanitize_collapses_unsafe_runs() {
        assert_eq!(sanitize_name("  Almaz / Tesfaye?? "), "Almaz_Tesfaye");
        assert_eq!(sanitize_name("../../etc"), "etc");
    }

    #[test]
    fn sanitize_never_empty() {
        assert_eq!(sanitize_name("አበበ"), "farmer");
        assert_eq!(sanitize_name(""), "farmer");
    }
}
