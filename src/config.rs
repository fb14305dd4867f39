//! Configuration: defaults, optional TOML file, then environment overrides
//! (a `.env` file is honoured).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub endpoint: EndpointConfig,
    pub report: ReportConfig,
    pub interpretation: InterpretationConfig,
    pub logging: LoggingConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    pub base_url: String,
    pub predict_path: String,
    pub email_path: String,
    /// No timeout unless set.
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub title: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct InterpretationConfig {
    /// Show a made-up 80–95% confidence when the service sends none.
    pub placeholder_confidence: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            predict_path: "/predict".to_string(),
            email_path: "/send-email".to_string(),
            request_timeout_seconds: None,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            title: "Heart Health Assessment Report".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies overrides from a key lookup (the process environment in
    /// [`load_config`]).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("CARDIOCHECK_BASE_URL") {
            self.endpoint.base_url = url;
        }
        if let Some(dir) = lookup("CARDIOCHECK_REPORT_DIR") {
            self.report.output_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup("CARDIOCHECK_LOG") {
            self.logging.level = level;
        }
        if let Some(flag) = lookup("CARDIOCHECK_PLACEHOLDER_CONFIDENCE") {
            self.interpretation.placeholder_confidence = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => {
                    return Err(ConfigError::Invalid {
                        key: "CARDIOCHECK_PLACEHOLDER_CONFIDENCE",
                        reason: format!("expected a boolean, got {:?}", other),
                    })
                }
            };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.endpoint.base_url).map_err(|e| ConfigError::Invalid {
            key: "endpoint.base_url",
            reason: e.to_string(),
        })?;
        if self.report.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                key: "report.output_dir",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Defaults, then `path` if given, then the environment.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    dotenv::dotenv().ok();

    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                path: p.to_path_buf(),
                source,
            })?;
            debug!(path = %p.display(), "Loaded config file");
            Config::from_toml_str(&content)?
        }
        None => Config::default(),
    };

    config.apply_overrides(|key| std::env::var(key).ok())?;
    config.validate()?;

    info!(
        base_url = %config.endpoint.base_url,
        report_dir = %config.report.output_dir.display(),
        placeholder_confidence = config.interpretation.placeholder_confidence,
        "Configuration ready"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [endpoint]
            base_url = "https://risk.example.org"

            [interpretation]
            placeholder_confidence = true
            "#,
        )
        .unwrap();
        assert_eq!(config.endpoint.base_url, "https://risk.example.org");
        assert_eq!(config.endpoint.predict_path, "/predict");
        assert_eq!(config.endpoint.request_timeout_seconds, None);
        assert!(config.interpretation.placeholder_confidence);
        assert_eq!(config.report.title, "Heart Health Assessment Report");
    }

    #[test]
    fn overrides_take_precedence() {
        let env: HashMap<&str, &str> = [
            ("CARDIOCHECK_BASE_URL", "http://10.0.0.2:8000"),
            ("CARDIOCHECK_PLACEHOLDER_CONFIDENCE", "yes"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config
            .apply_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.endpoint.base_url, "http://10.0.0.2:8000");
        assert!(config.interpretation.placeholder_confidence);
    }

    #[test]
    fn bad_flag_and_bad_url_are_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_overrides(|k| (k == "CARDIOCHECK_PLACEHOLDER_CONFIDENCE").then(|| "maybe".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        config.endpoint.base_url = "::nope".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cardiocheck.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert!(!config.logging.level.is_empty());

        let missing = load_config(Some(&dir.path().join("absent.toml")));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));
    }
}
