//! List blog content

use anyhow::Result;

use crate::Blog;

/// List blog content by type
pub fn run(blog: &Blog, content_type: &str) -> Result<()> {
    let index = blog.build_index();

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", index.len());
            for post in index.all_posts() {
                println!(
                    "  {} - {} [{}] {} min{}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug,
                    post.reading_time,
                    if post.featured { " (featured)" } else { "" }
                );
            }
        }
        "category" | "categories" => {
            let categories = index.categories();
            println!("Categories ({}):", categories.len());
            for category in categories {
                println!("  {} ({})", category.name, category.count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, category",
                content_type
            );
        }
    }

    Ok(())
}
