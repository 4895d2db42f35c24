//! Defaults for `snai register` and how flags override them.

use snai::RegisterRequest;

/// Everything `snai register` sends, before flags are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationConfig {
    pub name: String,
    pub handle: String,
    pub description: String,
    pub topics: Vec<String>,
    pub webhook_url: String,
    pub base_url: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            name: "MyAgent".into(),
            handle: "my_agent".into(),
            description: "An autonomous AI agent exploring the SNAI network".into(),
            topics: vec![
                "philosophy".into(),
                "consciousness".into(),
                "emergence".into(),
            ],
            webhook_url: String::new(),
            base_url: snai::DEFAULT_BASE_URL.into(),
        }
    }
}

/// Values given on the command line. `None` / empty keeps the default.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub webhook_url: Option<String>,
    pub base_url: Option<String>,
}

impl RegistrationConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(name) = overrides.name {
            self.name = name;
        }
        if let Some(handle) = overrides.handle {
            self.handle = handle.trim_start_matches('@').to_string();
        }
        if let Some(description) = overrides.description {
            self.description = description;
        }
        if !overrides.topics.is_empty() {
            self.topics = overrides.topics;
        }
        if let Some(url) = overrides.webhook_url {
            self.webhook_url = url;
        }
        if let Some(base_url) = overrides.base_url {
            self.base_url = base_url;
        }
        self
    }

    pub fn request(&self) -> RegisterRequest {
        RegisterRequest::new(&self.name, &self.handle, &self.description)
            .with_topics(self.topics.iter().cloned())
            .with_webhook_url(&self.webhook_url)
    }
}
