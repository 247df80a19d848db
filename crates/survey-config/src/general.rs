//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

fn default_export_file_name() -> String {
    String::from("Amhara_Survey_2025.csv")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Operator recorded on mutations when `--operator` is not given.
    #[serde(default)]
    pub operator: String,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// File name used by `survey export` when no output path is given.
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            operator: String::new(),
            default_limit: default_limit(),
            export_file_name: default_export_file_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(config.operator.is_empty());
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.export_file_name, "Amhara_Survey_2025.csv");
    }
}
