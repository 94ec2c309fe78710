//! Configuration loading and transcript path resolution.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::report::OutputFormat;

/// Placeholder replaced by the run identifier in a transcript template.
pub const RUN_PLACEHOLDER: &str = "{k}";

/// Template used when neither the command line nor a config file names one.
pub const DEFAULT_TRANSCRIPT_TEMPLATE: &str = "log_k{k}.txt";

/// Error type for configuration failures.
#[derive(Debug)]
pub enum ConfigError {
    FileRead(String),
    Parse(String),
    InvalidTemplate(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::FileRead(msg) => write!(f, "Failed to read config file: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Failed to parse config file: {}", msg),
            ConfigError::InvalidTemplate(template) => {
                write!(f, "Transcript template `{}` does not contain the {} placeholder", template, RUN_PLACEHOLDER)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Optional settings file for the analyzer.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Path of the transcript, with `{k}` standing in for the run identifier.
    pub transcript_template: Option<String>,
    /// Default report format.
    pub format: Option<OutputFormat>,
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(AnalyzerConfig)` if the file was successfully loaded and parsed
    /// * `Err(ConfigError)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(config_path).map_err(|e| ConfigError::FileRead(format!("{}: {}", config_path.display(), e)))?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if let Some(template) = &config.transcript_template {
            validate_template(template)?;
        }
        log::debug!("Loaded config from {}: {:?}", config_path.display(), config);
        Ok(config)
    }
}

/// Settings after merging the command line over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub transcript_template: String,
    pub format: OutputFormat,
}

impl ResolvedSettings {
    /// Command-line values win over the config file, which wins over defaults.
    pub fn resolve(cli_template: Option<&str>, cli_format: Option<OutputFormat>, config: &AnalyzerConfig) -> Result<Self, ConfigError> {
        let transcript_template = cli_template
            .or(config.transcript_template.as_deref())
            .unwrap_or(DEFAULT_TRANSCRIPT_TEMPLATE)
            .to_string();
        validate_template(&transcript_template)?;

        Ok(Self {
            transcript_template,
            format: cli_format.or(config.format).unwrap_or_default(),
        })
    }

    /// Path of the transcript for run `k`.
    pub fn transcript_path(&self, k: &str) -> PathBuf {
        transcript_path(&self.transcript_template, k)
    }
}

/// Substitute every `{k}` in `template` with the run identifier.
pub fn transcript_path(template: &str, k: &str) -> PathBuf {
    PathBuf::from(template.replace(RUN_PLACEHOLDER, k))
}

fn validate_template(template: &str) -> Result<(), ConfigError> {
    if template.contains(RUN_PLACEHOLDER) {
        Ok(())
    } else {
        Err(ConfigError::InvalidTemplate(template.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_transcript_path() {
        assert_eq!(transcript_path("/home/sid/tmp/log_k{k}.txt", "8"), PathBuf::from("/home/sid/tmp/log_k8.txt"));
        assert_eq!(transcript_path("runs/{k}/log_k{k}.txt", "20"), PathBuf::from("runs/20/log_k20.txt"));
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = ResolvedSettings::resolve(None, None, &AnalyzerConfig::default()).unwrap();
        assert_eq!(settings.transcript_template, DEFAULT_TRANSCRIPT_TEMPLATE);
        assert_eq!(settings.format, OutputFormat::Text);
        assert_eq!(settings.transcript_path("3"), PathBuf::from("log_k3.txt"));
    }

    #[test]
    fn test_resolve_precedence() {
        let config = AnalyzerConfig {
            transcript_template: Some("from_config_{k}.log".to_string()),
            format: Some(OutputFormat::Json),
        };

        let settings = ResolvedSettings::resolve(None, None, &config).unwrap();
        assert_eq!(settings.transcript_template, "from_config_{k}.log");
        assert_eq!(settings.format, OutputFormat::Json);

        let settings = ResolvedSettings::resolve(Some("from_cli_{k}.log"), Some(OutputFormat::Text), &config).unwrap();
        assert_eq!(settings.transcript_template, "from_cli_{k}.log");
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn test_template_without_placeholder() {
        let err = ResolvedSettings::resolve(Some("fixed.log"), None, &AnalyzerConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTemplate(t) if t == "fixed.log"));
    }

    #[test]
    fn test_load_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "transcript-template = \"/data/log_k{{k}}.txt\"").unwrap();
        writeln!(file, "format = \"json\"").unwrap();

        let config = AnalyzerConfig::load(file.path()).unwrap();
        assert_eq!(config.transcript_template.as_deref(), Some("/data/log_k{k}.txt"));
        assert_eq!(config.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_load_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(AnalyzerConfig::load(&dir.path().join("missing.toml")), Err(ConfigError::FileRead(_))));

        let unknown = dir.path().join("unknown.toml");
        std::fs::write(&unknown, "transcript = \"log_k{k}.txt\"\n").unwrap();
        assert!(matches!(AnalyzerConfig::load(&unknown), Err(ConfigError::Parse(_))));

        let no_placeholder = dir.path().join("no_placeholder.toml");
        std::fs::write(&no_placeholder, "transcript-template = \"log.txt\"\n").unwrap();
        assert!(matches!(AnalyzerConfig::load(&no_placeholder), Err(ConfigError::InvalidTemplate(_))));
    }
}
