//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const DEFAULT_CONFIG: &str = r#"# Inkpress Configuration

# Site
title: My Blog

# Content
posts_dir: posts
default_category: Uncategorized
words_per_minute: 200
markdown:
  sanitize: true

# Server
server:
  ip: 127.0.0.1
  port: 5000
  static_dir:
"#;

const SAMPLE_POST: &str = r#"---
title: "Hello World"
slug: hello-world
date: 2024-01-01
coverImage: "https://images.unsplash.com/photo-1499750310107-5fef28a66643"
excerpt: "Welcome to the blog. This is the first post."
featured: true
categories: [Programming, Writing]
author:
  name: "Jane Doe"
  role: "Editor"
  avatar: "https://i.pravatar.cc/150?img=5"
  github: "janedoe"
---

# Hello World

Welcome! Posts live in the `posts` directory as markdown files with a
front-matter header. Edit this one or create a new post with `inkpress new`.
"#;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }

    let posts_dir = target_dir.join("posts");
    fs::create_dir_all(&posts_dir)?;
    fs::write(&config_path, DEFAULT_CONFIG)?;

    let sample = posts_dir.join("hello-world.md");
    if !sample.exists() {
        fs::write(&sample, SAMPLE_POST)?;
    }

    tracing::info!("Created {:?} and {:?}", config_path, sample);
    Ok(())
}
