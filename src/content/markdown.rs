//! Markdown rendering

use pulldown_cmark::{html, Options, Parser};

/// Markdown renderer producing (optionally sanitized) HTML
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    sanitize: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer that sanitizes its output
    pub fn new() -> Self {
        Self { sanitize: true }
    }

    /// Create with custom settings
    pub fn with_options(sanitize: bool) -> Self {
        Self { sanitize }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is split off before rendering, so no metadata blocks
        let options =
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
        let parser = Parser::new_ext(markdown, options);

        let mut html_output = String::new();
        html::push_html(&mut html_output, parser);

        if self.sanitize {
            sanitize_html(&html_output)
        } else {
            html_output
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip scripts, event handlers and unsafe URLs, keeping formatting markup
fn sanitize_html(html: &str) -> String {
    ammonia::Builder::default()
        .add_tag_attributes("code", &["class"])
        .add_tag_attributes("input", &["type", "checked", "disabled"])
        .add_tags(&["input"])
        .clean(html)
        .to_string()
}
