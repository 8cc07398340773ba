//! Content module - handles posts, front-matter and markdown processing

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::{AuthorMeta, FrontMatter, FrontMatterError};
pub use loader::{ContentLoader, LoadError, LoadReport};
pub use markdown::MarkdownRenderer;
pub use post::{reading_time, word_count, Author, ContentSettings, Post, PostError};
