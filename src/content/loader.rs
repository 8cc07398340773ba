//! Content loader - loads posts from the posts directory

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::{ContentSettings, FrontMatter, FrontMatterError, MarkdownRenderer, Post, PostError};
use crate::Blog;

/// Why a single file was left out of the index
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    FrontMatter(#[from] FrontMatterError),

    #[error(transparent)]
    Post(#[from] PostError),

    #[error("duplicate slug `{0}`")]
    DuplicateSlug(String),
}

/// Outcome of a directory scan
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Posts in scan order (sorted by file name)
    pub posts: Vec<Post>,
    /// Files that were excluded, with the reason
    pub failures: Vec<(PathBuf, LoadError)>,
}

/// Loads posts from the posts directory
pub struct ContentLoader {
    posts_dir: PathBuf,
    renderer: MarkdownRenderer,
    settings: ContentSettings,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(blog: &Blog) -> Self {
        Self::with_settings(
            &blog.posts_dir,
            MarkdownRenderer::with_options(blog.config.markdown.sanitize),
            ContentSettings {
                words_per_minute: blog.config.words_per_minute,
                default_category: blog.config.default_category.clone(),
            },
        )
    }

    /// Create a loader for an explicit directory
    pub fn with_settings<P: AsRef<Path>>(
        posts_dir: P,
        renderer: MarkdownRenderer,
        settings: ContentSettings,
    ) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            renderer,
            settings,
        }
    }

    /// Load every markdown file directly inside the posts directory.
    ///
    /// Malformed files are logged and reported, never fatal. A missing
    /// directory yields an empty report.
    pub fn load_posts(&self) -> LoadReport {
        let mut report = LoadReport::default();
        if !self.posts_dir.is_dir() {
            tracing::warn!("Posts directory {:?} does not exist", self.posts_dir);
            return report;
        }

        let mut seen = HashSet::new();
        let mut next_id = 1;

        for entry in WalkDir::new(&self.posts_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(self.posts_dir.as_path()).to_path_buf();
                    tracing::warn!("Skipping entry {:?}: {}", path, e);
                    report.failures.push((path, LoadError::Io(e.into())));
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let result = self.load_post(path, next_id).and_then(|post| {
                if seen.insert(post.slug.clone()) {
                    Ok(post)
                } else {
                    Err(LoadError::DuplicateSlug(post.slug))
                }
            });

            match result {
                Ok(post) => {
                    tracing::debug!("Loaded post {:?} as `{}`", path, post.slug);
                    next_id += 1;
                    report.posts.push(post);
                }
                Err(e) => {
                    tracing::warn!("Skipping post {:?}: {}", path, e);
                    report.failures.push((path.to_path_buf(), e));
                }
            }
        }

        tracing::info!(
            "Loaded {} posts from {:?} ({} skipped)",
            report.posts.len(),
            self.posts_dir,
            report.failures.len()
        );
        report
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path, id: u32) -> Result<Post, LoadError> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        let html = self.renderer.render(body);
        Ok(Post::from_parts(id, stem, fm, body, html, &self.settings)?)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
