use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use crate::ai::gemini::DEFAULT_BASE_URL;

/// Environment variables checked for the Gemini API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(path, config_content)?;
        Ok(())
    }

    pub fn save_api_key(key: &str) -> Result<()> {
        let mut config = Self::load().unwrap_or_else(|_| Self::new());
        config.api_key = Some(key.to_string());
        config.save()
    }

    /// API key from the environment, then the config file. Missing keys
    /// resolve to an empty string; the provider rejects it at call time.
    pub fn resolve_api_key(&self) -> String {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_api_key_with<F>(&self, lookup: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.is_empty())
            .or_else(|| self.api_key.clone())
            .unwrap_or_default()
    }

    /// Where the key came from, for display: "env", "config" or `None`.
    pub fn key_source_with<F>(&self, lookup: F) -> Option<&'static str>
    where
        F: Fn(&str) -> Option<String>,
    {
        if API_KEY_ENV_VARS
            .iter()
            .any(|name| lookup(name).is_some_and(|v| !v.is_empty()))
        {
            Some("env")
        } else if self.api_key.as_deref().is_some_and(|k| !k.is_empty()) {
            Some("config")
        } else {
            None
        }
    }

    pub fn key_source(&self) -> Option<&'static str> {
        self.key_source_with(|name| std::env::var(name).ok())
    }

    pub fn endpoint(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("cloudops-kit").join("config.json"))
    }
}
