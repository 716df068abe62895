use std::env;

use serde::Deserialize;

use crate::error::{Result, TodoistError};

pub const DEFAULT_BASE_URL: &str = "https://api.todoist.com/api/v1/";

pub const API_KEY_ENV: &str = "TODOIST_API_KEY";
pub const BASE_URL_ENV: &str = "TODOIST_BASE_URL";

/// Client configuration.
///
/// Both fields are optional at this level so a config file or environment
/// with a missing key still loads; `Todoist::new` rejects a missing key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn from_env() -> Self {
        Self {
            api_key: env::var(API_KEY_ENV).ok(),
            base_url: env::var(BASE_URL_ENV).ok(),
        }
    }

    pub(crate) fn token(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(TodoistError::Configuration(
                "Todoist apiKey is required".to_string(),
            )),
        }
    }

    /// Base URL, always ending in `/` so resource paths can be appended.
    pub(crate) fn resolved_base_url(&self) -> String {
        let base = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}/", base.trim_end_matches('/'))
    }
}
