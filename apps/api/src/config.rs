use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::inference::ResponsePolicy;
use crate::preprocess::NormalizerConfig;

/// Application configuration loaded from environment variables (and `.env`).
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub model_path: PathBuf,
    /// Reported verbatim by `/health`.
    pub model_version: String,
    /// When false, a model that fails to load leaves the service up with
    /// `model_loaded: false` instead of aborting startup.
    pub model_required: bool,
    pub response_policy: ResponsePolicy,
    pub cors_allowed_origins: Vec<String>,
    /// Include raw error messages in 500 responses.
    pub expose_error_details: bool,
    pub stopwords_path: Option<PathBuf>,
    pub lemma_exceptions_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            rust_log: "info".to_string(),
            model_path: PathBuf::from("apps/api/model/model.json"),
            model_version: "1.0.0".to_string(),
            model_required: true,
            response_policy: ResponsePolicy::Category,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
            expose_error_details: true,
            stopwords_path: None,
            lemma_exceptions_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Config {
            port: match get("PORT") {
                Some(v) => v
                    .parse::<u16>()
                    .context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: get("RUST_LOG").unwrap_or(defaults.rust_log),
            model_path: get("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            model_version: get("MODEL_VERSION").unwrap_or(defaults.model_version),
            model_required: match get("MODEL_REQUIRED") {
                Some(v) => parse_bool("MODEL_REQUIRED", &v)?,
                None => defaults.model_required,
            },
            response_policy: match get("RESPONSE_FORMAT") {
                Some(v) => v
                    .parse::<ResponsePolicy>()
                    .map_err(anyhow::Error::msg)
                    .context("RESPONSE_FORMAT is invalid")?,
                None => defaults.response_policy,
            },
            cors_allowed_origins: match get("CORS_ALLOWED_ORIGINS") {
                Some(v) => v
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => defaults.cors_allowed_origins,
            },
            expose_error_details: match get("EXPOSE_ERROR_DETAILS") {
                Some(v) => parse_bool("EXPOSE_ERROR_DETAILS", &v)?,
                None => defaults.expose_error_details,
            },
            stopwords_path: get("STOPWORDS_PATH").map(PathBuf::from),
            lemma_exceptions_path: get("LEMMA_EXCEPTIONS_PATH").map(PathBuf::from),
        })
    }

    pub fn normalizer_config(&self) -> NormalizerConfig {
        NormalizerConfig {
            stopwords_path: self.stopwords_path.clone(),
            lemma_exceptions_path: self.lemma_exceptions_path.clone(),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("{key} must be a boolean, got '{value}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.model_version, "1.0.0");
        assert_eq!(config.model_path, PathBuf::from("apps/api/model/model.json"));
        assert!(config.model_required);
        assert_eq!(config.response_policy, ResponsePolicy::Category);
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:3000"]);
        assert!(config.stopwords_path.is_none());
    }

    #[test]
    fn test_default_model_path_resolves_from_workspace_root() {
        let workspace_root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        assert!(workspace_root.join(Config::default().model_path).is_file());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = config_from(&[
            ("PORT", "9100"),
            ("MODEL_PATH", "/srv/model.json"),
            ("MODEL_VERSION", "2.3.1"),
            ("MODEL_REQUIRED", "false"),
            ("RESPONSE_FORMAT", "score"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("EXPOSE_ERROR_DETAILS", "no"),
            ("STOPWORDS_PATH", "/srv/stopwords.txt"),
        ])
        .unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(config.model_version, "2.3.1");
        assert!(!config.model_required);
        assert_eq!(config.response_policy, ResponsePolicy::Score);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(!config.expose_error_details);
        assert_eq!(
            config.normalizer_config().stopwords_path,
            Some(PathBuf::from("/srv/stopwords.txt"))
        );
    }

    #[test]
    fn test_invalid_values_are_errors() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("MODEL_REQUIRED", "maybe")]).is_err());
        let err = config_from(&[("RESPONSE_FORMAT", "sentence")]).unwrap_err();
        assert!(format!("{err:#}").contains("sentence"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "  "), ("MODEL_VERSION", "")]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.model_version, "1.0.0");
    }
}
