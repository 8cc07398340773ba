//! Post model and normalization

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use super::frontmatter::{AuthorMeta, FrontMatter};

/// Errors that exclude a single file from the index
#[derive(Debug, Error)]
pub enum PostError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid date `{0}`")]
    InvalidDate(String),

    #[error("slug is empty")]
    EmptySlug,
}

/// Settings the normalizer needs from the blog configuration
#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub words_per_minute: u32,
    pub default_category: String,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            words_per_minute: 200,
            default_category: "Uncategorized".to_string(),
        }
    }
}

/// Post author
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
}

/// A blog post
#[derive(Debug, Clone)]
pub struct Post {
    /// Sequential identifier assigned at load time
    pub id: u32,

    /// Slug (URL-friendly name), unique across the index
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Utc>,

    /// Cover image URL
    pub cover_image: String,

    /// Short summary shown in listings
    pub excerpt: String,

    /// Rendered HTML content
    pub content: String,

    /// Raw markdown body
    pub raw: String,

    /// Post categories, display-cased
    pub categories: Vec<String>,

    /// Estimated reading time in minutes
    pub reading_time: u32,

    pub featured: bool,

    pub author: Author,

    /// Custom front-matter fields
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl Post {
    /// Build a canonical post from its parsed parts.
    ///
    /// `stem` is the source file name without extension; it supplies the
    /// slug when the front-matter has none.
    pub fn from_parts(
        id: u32,
        stem: &str,
        fm: FrontMatter,
        raw: &str,
        html: String,
        settings: &ContentSettings,
    ) -> Result<Self, PostError> {
        let title = required(fm.title, "title")?;
        let date_str = required(fm.date, "date")?;
        let date = super::frontmatter::parse_date_string(&date_str)
            .ok_or(PostError::InvalidDate(date_str))?;

        let slug = match fm.slug {
            Some(slug) => slug.trim().to_string(),
            None => slug::slugify(stem),
        };
        if slug.is_empty() {
            return Err(PostError::EmptySlug);
        }

        let categories = if fm.categories.is_empty() {
            vec![settings.default_category.clone()]
        } else {
            fm.categories
        };

        Ok(Self {
            id,
            slug,
            title,
            date,
            cover_image: fm.cover_image.unwrap_or_default(),
            excerpt: fm.excerpt.unwrap_or_default(),
            content: html,
            raw: raw.to_string(),
            categories,
            reading_time: reading_time(raw, settings.words_per_minute),
            featured: fm.featured.unwrap_or(false),
            author: Author::from_meta(fm.author)?,
            extra: fm.extra,
        })
    }

    /// Case-insensitive category membership
    pub fn has_category(&self, category: &str) -> bool {
        let wanted = category.to_lowercase();
        self.categories.iter().any(|c| c.to_lowercase() == wanted)
    }
}

impl Author {
    fn from_meta(meta: AuthorMeta) -> Result<Self, PostError> {
        Ok(Self {
            name: required(meta.name, "author.name")?,
            role: required(meta.role, "author.role")?,
            avatar: meta.avatar.unwrap_or_default(),
            twitter: non_blank(meta.twitter),
            github: non_blank(meta.github),
            linkedin: non_blank(meta.linkedin),
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, PostError> {
    non_blank(value).ok_or(PostError::MissingField(field))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Count whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Minutes needed to read `text`, rounded up, never below one
pub fn reading_time(text: &str, words_per_minute: u32) -> u32 {
    let wpm = words_per_minute.max(1) as usize;
    let minutes = word_count(text).div_ceil(wpm);
    minutes.max(1) as u32
}
