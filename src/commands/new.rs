//! Create a new post

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;

use crate::content::{AuthorMeta, FrontMatter};
use crate::Blog;

/// Options for a new post beyond its title
#[derive(Debug, Default)]
pub struct NewPost {
    pub slug: Option<String>,
    pub categories: Vec<String>,
    pub author: Option<String>,
}

/// Scaffold a post file in the posts directory and return its path
pub fn create_post(blog: &Blog, title: &str, options: NewPost) -> Result<PathBuf> {
    let slug = slug::slugify(options.slug.as_deref().unwrap_or(title));
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from title {:?}", title);
    }

    fs::create_dir_all(&blog.posts_dir)?;
    let file_path = blog.posts_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let categories = if options.categories.is_empty() {
        vec![blog.config.default_category.clone()]
    } else {
        options.categories
    };

    let fm = FrontMatter {
        slug: Some(slug),
        title: Some(title.to_string()),
        date: Some(Utc::now().format("%Y-%m-%d").to_string()),
        cover_image: Some(String::new()),
        excerpt: Some(String::new()),
        featured: Some(false),
        categories,
        author: AuthorMeta {
            name: Some(options.author.unwrap_or_else(|| "Anonymous".to_string())),
            role: Some("Author".to_string()),
            avatar: Some(String::new()),
            ..Default::default()
        },
        ..Default::default()
    };

    let content = format!("{}\nWrite your post here.\n", fm.to_yaml_block()?);
    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(file_path)
}
