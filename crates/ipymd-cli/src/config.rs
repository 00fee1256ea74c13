//! Configuration file support for ipymd CLI
//!
//! Loads settings from `_ipymd.toml` configuration file.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "_ipymd.toml";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Markdown to notebook settings
    #[serde(skip_serializing_if = "MarkdownSection::is_empty")]
    pub markdown: MarkdownSection,
    /// Notebook settings
    #[serde(skip_serializing_if = "NotebookSection::is_empty")]
    pub notebook: NotebookSection,
}

/// Markdown to notebook settings
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct MarkdownSection {
    /// Fence language whose blocks become code cells (default: "python")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_language: Option<String>,
}

impl MarkdownSection {
    fn is_empty(&self) -> bool {
        self.code_language.is_none()
    }
}

/// Notebook settings
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct NotebookSection {
    /// Merge successive code cells into one fence when exporting to Markdown (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_code_cells: Option<bool>,
    /// nbformat minor version of written notebooks (default: 4)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbformat_minor: Option<u64>,
}

impl NotebookSection {
    fn is_empty(&self) -> bool {
        self.merge_code_cells.is_none() && self.nbformat_minor.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_ipymd.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Create a sample configuration with the built-in defaults for `--init`
    pub fn sample() -> Self {
        Config {
            markdown: MarkdownSection {
                code_language: Some("python".to_string()),
            },
            notebook: NotebookSection {
                merge_code_cells: Some(false),
                nbformat_minor: Some(4),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.markdown.code_language.is_none());
        assert!(config.notebook.merge_code_cells.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            [markdown]
            code_language = "julia"

            [notebook]
            merge_code_cells = true
            nbformat_minor = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.markdown.code_language, Some("julia".to_string()));
        assert_eq!(config.notebook.merge_code_cells, Some(true));
        assert_eq!(config.notebook.nbformat_minor, Some(2));
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str(
            r#"
            [notebook]
            merge_code_cells = true
            "#,
        )
        .unwrap();

        assert_eq!(config.notebook.merge_code_cells, Some(true));
        assert!(config.notebook.nbformat_minor.is_none());
        assert!(config.markdown.code_language.is_none());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [notebook]
            merge_code_cells = "yes"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_empty_config() {
        let toml = Config::default().to_toml_string().unwrap();
        assert!(!toml.contains("[markdown]"));
        assert!(!toml.contains("[notebook]"));
    }

    #[test]
    fn test_serialize_sample_config() {
        let toml = Config::sample().to_toml_string().unwrap();
        assert!(toml.contains("[markdown]"));
        assert!(toml.contains("code_language = \"python\""));
        assert!(toml.contains("merge_code_cells = false"));
    }

    #[test]
    fn test_json_schema_generation() {
        let schema = Config::json_schema_string().unwrap();
        assert!(schema.contains("\"title\""));
        assert!(schema.contains("code_language"));
        assert!(schema.contains("merge_code_cells"));
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::sample();
        let parsed: Config = toml::from_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(config.markdown.code_language, parsed.markdown.code_language);
        assert_eq!(config.notebook.merge_code_cells, parsed.notebook.merge_code_cells);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[markdown]\ncode_language = \"r\"\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.markdown.code_language, Some("r".to_string()));
    }
}
