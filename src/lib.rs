//! inkpress: a markdown-sourced blog backend
//!
//! Posts are markdown files with a YAML front-matter header. They are parsed,
//! rendered and indexed once at startup, then served read-only over a small
//! JSON API alongside in-memory newsletter and contact inboxes.

pub mod commands;
pub mod config;
pub mod content;
pub mod server;
pub mod store;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main blog application
#[derive(Clone)]
pub struct Blog {
    /// Blog configuration
    pub config: config::BlogConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding the post markdown files
    pub posts_dir: PathBuf,
}

impl Blog {
    /// Create a new blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::BlogConfig::load(&config_path)?
        } else {
            config::BlogConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a blog instance with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::BlogConfig) -> Self {
        let posts_dir = base_dir.join(&config.posts_dir);
        Self {
            config,
            base_dir,
            posts_dir,
        }
    }

    /// Scan the posts directory, reporting every excluded file
    pub fn load_posts(&self) -> content::LoadReport {
        content::ContentLoader::new(self).load_posts()
    }

    /// Scan the posts directory and build the read-only index
    pub fn build_index(&self) -> store::PostIndex {
        store::PostIndex::new(self.load_posts().posts)
    }

    /// Resolved frontend bundle directory, if configured
    pub fn static_dir(&self) -> Option<PathBuf> {
        self.config
            .server
            .static_dir
            .as_ref()
            .map(|dir| self.base_dir.join(dir))
    }
}
