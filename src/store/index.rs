//! Read-only post index built once at startup

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::content::Post;

/// Category value that matches every post
pub const ALL_CATEGORIES: &str = "all";

/// A category with the number of posts filed under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Immutable collection of posts, newest first
#[derive(Debug, Default)]
pub struct PostIndex {
    posts: Vec<Post>,
    by_slug: HashMap<String, usize>,
}

impl PostIndex {
    /// Build the index. Posts with equal dates keep their input order; a
    /// repeated slug keeps the first post that claimed it.
    pub fn new(posts: Vec<Post>) -> Self {
        let mut posts = posts;
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        let mut by_slug = HashMap::with_capacity(posts.len());
        let mut kept = Vec::with_capacity(posts.len());
        for post in posts {
            if by_slug.contains_key(&post.slug) {
                tracing::warn!("Ignoring duplicate slug `{}`", post.slug);
                continue;
            }
            by_slug.insert(post.slug.clone(), kept.len());
            kept.push(post);
        }

        Self {
            posts: kept,
            by_slug,
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// All posts sorted by date descending
    pub fn all_posts(&self) -> &[Post] {
        &self.posts
    }

    /// Exact slug lookup
    pub fn post_by_slug(&self, slug: &str) -> Option<&Post> {
        self.by_slug.get(slug).map(|&i| &self.posts[i])
    }

    /// Posts filed under `category` (case-insensitive), newest first.
    /// `all` in any casing returns every post.
    pub fn posts_by_category(&self, category: &str) -> Vec<&Post> {
        if category.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return self.posts.iter().collect();
        }
        self.posts.iter().filter(|p| p.has_category(category)).collect()
    }

    /// The first featured post, or the newest one
    pub fn featured_post(&self) -> Option<&Post> {
        self.posts
            .iter()
            .find(|p| p.featured)
            .or_else(|| self.posts.first())
    }

    /// Posts sharing categories with `slug`, most shared first, topped up
    /// with the most recent remaining posts
    pub fn related_posts(&self, slug: &str, count: usize) -> Vec<&Post> {
        let Some(current) = self.post_by_slug(slug) else {
            return Vec::new();
        };

        let mut related: Vec<(usize, &Post)> = self
            .posts
            .iter()
            .filter(|p| p.slug != current.slug)
            .map(|p| (shared_categories(current, p), p))
            .filter(|(shared, _)| *shared > 0)
            .collect();
        related.sort_by(|a, b| b.0.cmp(&a.0));

        let mut result: Vec<&Post> = related.into_iter().map(|(_, p)| p).take(count).collect();

        if result.len() < count {
            let missing = count - result.len();
            let recent: Vec<&Post> = self
                .posts
                .iter()
                .filter(|p| p.slug != current.slug && !result.iter().any(|r| r.slug == p.slug))
                .take(missing)
                .collect();
            result.extend(recent);
        }

        result
    }

    /// Category names with post counts, most used first
    pub fn categories(&self) -> Vec<CategoryCount> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for post in &self.posts {
            for category in lowercase_categories(post) {
                *counts.entry(category).or_insert(0) += 1;
            }
        }

        let mut categories: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(name, count)| CategoryCount {
                name: capitalize(&name),
                count,
            })
            .collect();
        categories.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
        categories
    }

    /// Posts whose title, excerpt or categories contain `query`
    pub fn search(&self, query: &str) -> Vec<&Post> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.posts
            .iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.excerpt.to_lowercase().contains(&needle)
                    || p.categories.iter().any(|c| c.to_lowercase().contains(&needle))
            })
            .collect()
    }
}

fn shared_categories(a: &Post, b: &Post) -> usize {
    lowercase_categories(b)
        .intersection(&lowercase_categories(a))
        .count()
}

/// A post's categories with case-only repeats collapsed
fn lowercase_categories(post: &Post) -> HashSet<String> {
    post.categories.iter().map(|c| c.to_lowercase()).collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
