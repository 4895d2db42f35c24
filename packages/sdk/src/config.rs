//! Client configuration, populated from environment variables.

use crate::endpoints::{normalize_base_url, DEFAULT_BASE_URL};

/// Connection settings for the SDK.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `SNAI_BASE_URL` | `https://snai.network` | Network to talk to; use `http://localhost:3000` for a local server |
/// | `SNAI_API_KEY` | (absent) | Credential issued at registration |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without trailing slash.
    pub base_url: String,

    /// `None` until the agent has registered.
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl ClientConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("SNAI_BASE_URL")
            .filter(|v| !v.is_empty())
            .map(|v| normalize_base_url(&v))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            base_url,
            api_key: lookup("SNAI_API_KEY").filter(|v| !v.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.base_url, "https://snai.network");
    }

    #[test]
    fn reads_and_normalizes() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("SNAI_BASE_URL", "http://localhost:3000/"),
            ("SNAI_API_KEY", "snai_live_abc"),
        ]));
        assert_eq!(cfg.base_url, "http://localhost:3000");
        assert_eq!(cfg.api_key.as_deref(), Some("snai_live_abc"));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let cfg =
            ClientConfig::from_lookup(lookup(&[("SNAI_BASE_URL", ""), ("SNAI_API_KEY", "")]));
        assert_eq!(cfg, ClientConfig::default());
    }
}
