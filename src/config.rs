//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default remote Q&A endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/ask";

/// Fixed user-visible texts the engine emits on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineTexts {
    /// Display text of the go-back option. Option lists in the catalog that
    /// contain this exact string get a typed back command instead.
    pub back_label: String,
    /// Prompt shown with a restored option set.
    pub restore_prompt: String,
    /// Reply when go-back is used with nothing to restore.
    pub no_previous: String,
    /// Reply for a label the catalog doesn't know.
    pub fallback: String,
    /// Anchor text used when rendering links in bot messages.
    pub link_text: String,
}

impl Default for EngineTexts {
    fn default() -> Self {
        Self {
            back_label: "Go back".to_string(),
            restore_prompt: "Choose again from the previous options".to_string(),
            no_previous: "There are no previous options".to_string(),
            fallback: String::new(),
            link_text: "Open link".to_string(),
        }
    }
}

/// Remote query client configuration.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// `POST` target for free-text questions.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub remote: RemoteConfig,
    /// Label → answer/menu mapping.
    pub responses_path: PathBuf,
    /// File holding the initial greeting.
    pub options_path: PathBuf,
    /// Fail startup on catalog issues instead of logging them.
    pub strict_catalog: bool,
    /// Port for the HTTP shell. `None` disables it.
    pub http_port: Option<u16>,
    pub texts: EngineTexts,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            responses_path: PathBuf::from("./assets/predefinedResponses.json"),
            options_path: PathBuf::from("./assets/options.json"),
            strict_catalog: false,
            http_port: None,
            texts: EngineTexts::default(),
        }
    }
}

impl ChatConfig {
    /// Build configuration from `CHATFLOW_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Unparseable numbers fall back to their defaults; an endpoint that is
    /// not an http(s) URL is rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let default_texts = EngineTexts::default();

        let endpoint = lookup("CHATFLOW_ENDPOINT").unwrap_or(defaults.remote.endpoint);
        let parsed = reqwest::Url::parse(&endpoint).map_err(|e| ConfigError::InvalidValue {
            key: "CHATFLOW_ENDPOINT".into(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                key: "CHATFLOW_ENDPOINT".into(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let timeout_secs: u64 = lookup("CHATFLOW_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .filter(|&secs| secs > 0)
            .unwrap_or(defaults.remote.timeout.as_secs());

        let strict_catalog = lookup("CHATFLOW_STRICT_CATALOG")
            .map(|s| matches!(s.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let http_port: Option<u16> =
            lookup("CHATFLOW_HTTP_PORT").and_then(|s| s.trim().parse().ok());

        let texts = EngineTexts {
            back_label: lookup("CHATFLOW_BACK_LABEL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(default_texts.back_label),
            restore_prompt: lookup("CHATFLOW_RESTORE_TEXT").unwrap_or(default_texts.restore_prompt),
            no_previous: lookup("CHATFLOW_NO_PREVIOUS_TEXT").unwrap_or(default_texts.no_previous),
            fallback: lookup("CHATFLOW_FALLBACK_TEXT").unwrap_or(default_texts.fallback),
            link_text: lookup("CHATFLOW_LINK_TEXT").unwrap_or(default_texts.link_text),
        };

        Ok(Self {
            remote: RemoteConfig {
                endpoint,
                timeout: Duration::from_secs(timeout_secs),
            },
            responses_path: lookup("CHATFLOW_RESPONSES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.responses_path),
            options_path: lookup("CHATFLOW_OPTIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.options_path),
            strict_catalog,
            http_port,
            texts,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ChatConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.remote.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.remote.timeout, Duration::from_secs(30));
        assert!(!config.strict_catalog);
        assert!(config.http_port.is_none());
        assert_eq!(config.texts, EngineTexts::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = ChatConfig::from_lookup(lookup_from(&[
            ("CHATFLOW_ENDPOINT", "https://qa.example.com/ask"),
            ("CHATFLOW_REQUEST_TIMEOUT_SECS", "5"),
            ("CHATFLOW_STRICT_CATALOG", "TRUE"),
            ("CHATFLOW_HTTP_PORT", "9090"),
            ("CHATFLOW_BACK_LABEL", "Chọn lại"),
        ]))
        .unwrap();
        assert_eq!(config.remote.endpoint, "https://qa.example.com/ask");
        assert_eq!(config.remote.timeout, Duration::from_secs(5));
        assert!(config.strict_catalog);
        assert_eq!(config.http_port, Some(9090));
        assert_eq!(config.texts.back_label, "Chọn lại");
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let config = ChatConfig::from_lookup(lookup_from(&[
            ("CHATFLOW_REQUEST_TIMEOUT_SECS", "soon"),
            ("CHATFLOW_HTTP_PORT", "99999"),
        ]))
        .unwrap();
        assert_eq!(config.remote.timeout, Duration::from_secs(30));
        assert!(config.http_port.is_none());
    }

    #[test]
    fn test_blank_back_label_keeps_default() {
        let config =
            ChatConfig::from_lookup(lookup_from(&[("CHATFLOW_BACK_LABEL", "   ")])).unwrap();
        assert_eq!(config.texts.back_label, "Go back");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = ChatConfig::from_lookup(lookup_from(&[("CHATFLOW_ENDPOINT", "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "CHATFLOW_ENDPOINT"));

        let err = ChatConfig::from_lookup(lookup_from(&[("CHATFLOW_ENDPOINT", "ftp://host/ask")]))
            .unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"));
    }
}
