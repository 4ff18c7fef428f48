use anyhow::{Context, Result};
use rdfgen::{RdfFormat, Vocabulary, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bind_address: String,
    /// Prefix prepended to every record id.
    pub namespace: String,
    pub default_format: RdfFormat,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            default_format: RdfFormat::Turtle,
            log_format: LogFormat::Pretty,
        }
    }
}

impl AppConfig {
    /// Defaults, overridden by the JSON file at `path` when one is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        let config: AppConfig = serde_json::from_str(&raw)
            .context(format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    pub fn vocabulary(&self) -> Result<Vocabulary> {
        Vocabulary::new(self.namespace.clone())
            .context(format!("Invalid namespace IRI: {}", self.namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"namespace": "http://purl.example.com/ddt#", "default_format": "rdfxml"}"#)
                .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:3000");
        assert_eq!(config.default_format, RdfFormat::RdfXml);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.vocabulary().unwrap().namespace(), "http://purl.example.com/ddt#");
    }

    #[test]
    fn test_no_path_is_default() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.namespace, DEFAULT_NAMESPACE);
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(AppConfig::load(Some(Path::new("does/not/exist.json"))).is_err());
    }

    #[test]
    fn test_bad_namespace_rejected() {
        let config = AppConfig {
            namespace: "example org".to_string(),
            ..AppConfig::default()
        };
        assert!(config.vocabulary().is_err());
    }
}
