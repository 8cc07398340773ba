//! JSON shapes returned by the API

use chrono::SecondsFormat;
use serde::Serialize;

use crate::content::{Author, Post};

/// Public view of a post
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDto<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    /// RFC 3339 with milliseconds and a `Z` suffix
    pub date: String,
    pub cover_image: &'a str,
    pub excerpt: &'a str,
    pub content: &'a str,
    pub reading_time: u32,
    pub featured: bool,
    pub categories: &'a [String],
    pub author: &'a Author,
}

impl<'a> From<&'a Post> for PostDto<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            slug: &post.slug,
            title: &post.title,
            date: post.date.to_rfc3339_opts(SecondsFormat::Millis, true),
            cover_image: &post.cover_image,
            excerpt: &post.excerpt,
            content: &post.content,
            reading_time: post.reading_time,
            featured: post.featured,
            categories: &post.categories,
            author: &post.author,
        }
    }
}

pub fn post_list<'a>(posts: impl IntoIterator<Item = &'a Post>) -> Vec<PostDto<'a>> {
    posts.into_iter().map(PostDto::from).collect()
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub message: &'static str,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
    pub id: u64,
}
