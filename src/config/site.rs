//! Blog configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main blog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    // Site
    pub title: String,

    // Content
    pub posts_dir: String,
    pub default_category: String,
    pub words_per_minute: u32,
    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Server
    #[serde(default)]
    pub server: ServerConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            title: "Inkpress".to_string(),

            posts_dir: "posts".to_string(),
            default_category: "Uncategorized".to_string(),
            words_per_minute: 200,
            markdown: MarkdownConfig::default(),

            server: ServerConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl BlogConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: BlogConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break content loading
    pub fn validate(&self) -> Result<()> {
        if self.words_per_minute == 0 {
            anyhow::bail!("words_per_minute must be greater than zero");
        }
        if self.default_category.trim().is_empty() {
            anyhow::bail!("default_category must not be empty");
        }
        Ok(())
    }

    /// Serialize the configuration back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Markdown rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Strip scripts and unsafe attributes from rendered HTML
    pub sanitize: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { sanitize: true }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
    /// Pre-built frontend bundle served for non-API paths
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 5000,
            static_dir: None,
        }
    }
}
