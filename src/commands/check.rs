//! Validate every post file without serving

use anyhow::Result;

use crate::Blog;

/// Load all posts and print the files that would be excluded.
/// Fails when at least one file is malformed.
pub fn run(blog: &Blog) -> Result<()> {
    let report = blog.load_posts();

    for (path, error) in &report.failures {
        let name = path.strip_prefix(&blog.base_dir).unwrap_or(path);
        println!("✗ {}: {}", name.display(), error);
    }
    println!(
        "{} posts ok, {} failed",
        report.posts.len(),
        report.failures.len()
    );

    if !report.failures.is_empty() {
        anyhow::bail!("{} post(s) failed to load", report.failures.len());
    }
    Ok(())
}
