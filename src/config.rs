use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{ProcessorError, Result};

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub io: IoConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// Directory scanned for `*.csv` order exports.
    pub input_dir: PathBuf,
    /// Directory the report tables are written to (created if absent).
    pub output_dir: PathBuf,
    pub output_prefix: String,
    /// Optional `SKU,Description,Ink Color` lookup file.
    pub metadata: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Emit a REVIEW column for quantities whose size never resolved.
    pub include_unresolved: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            output_prefix: "processed_orders".to_string(),
            metadata: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            include_unresolved: true,
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let config_content = std::fs::read_to_string(path).map_err(|e| {
            ProcessorError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let config = Config::load_from(Path::new("does_not_exist.toml")).unwrap();
        assert_eq!(config.io.input_dir, PathBuf::from("input"));
        assert_eq!(config.io.output_prefix, "processed_orders");
        assert!(config.report.include_unresolved);
    }

    #[test]
    fn test_partial_config_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[io]\ninput_dir = \"orders\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.io.input_dir, PathBuf::from("orders"));
        assert_eq!(config.io.output_dir, PathBuf::from("output"));
    }
}
