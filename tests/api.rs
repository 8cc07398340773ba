use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tower::ServiceExt;

use inkpress::server::{router, AppState};
use inkpress::Blog;

fn write_post(dir: &Path, file: &str, front: &str, body: &str) {
    fs::write(dir.join(file), format!("---\n{}---\n\n{}\n", front, body)).unwrap();
}

fn fifty_words() -> String {
    (1..=50)
        .map(|i| format!("word{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Three valid posts and one malformed file
fn blog_fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let posts = dir.path().join("posts");
    fs::create_dir_all(&posts).unwrap();

    write_post(
        &posts,
        "hello-world.md",
        "title: Hello World\nslug: hello-world\ndate: 2024-01-01\ncategories: [Programming, Writing]\nexcerpt: First steps\nauthor:\n  name: Jane Doe\n  role: Editor\n  github: janedoe\n",
        &fifty_words(),
    );
    write_post(
        &posts,
        "rust-tips.md",
        "title: Rust Tips\ndate: 2024-03-10\ncategories: Programming\nfeatured: true\nexcerpt: Ownership made simple\ncoverImage: https://example.com/rust.png\nauthor:\n  name: Sam\n  role: Engineer\n",
        "Borrow checker **basics**.",
    );
    write_post(
        &posts,
        "garden.md",
        "title: Spring Garden\ndate: 2024-02-01\ncategories: [Life]\nauthor:\n  name: Lee\n  role: Gardener\n",
        "Tomatoes and basil.",
    );
    fs::write(posts.join("broken.md"), "no front matter here").unwrap();

    dir
}

fn app(dir: &Path) -> Router {
    let blog = Blog::new(dir).unwrap();
    router(AppState::new(blog.build_index()), None)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

fn slugs(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn list_posts_newest_first_without_malformed_files() {
    let dir = blog_fixture();
    let (status, body) = get(app(dir.path()), "/api/posts").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&body), vec!["rust-tips", "garden", "hello-world"]);
}

#[tokio::test]
async fn get_post_by_slug() {
    let dir = blog_fixture();
    let (status, body) = get(app(dir.path()), "/api/posts/hello-world").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Hello World");
    assert_eq!(body["readingTime"], 1);
    assert_eq!(body["categories"], json!(["Programming", "Writing"]));
    assert_eq!(body["date"], "2024-01-01T00:00:00.000Z");
    assert_eq!(body["coverImage"], "");
    assert_eq!(body["featured"], false);
    assert_eq!(body["author"]["name"], "Jane Doe");
    assert_eq!(body["author"]["github"], "janedoe");
    assert_eq!(body["author"]["twitter"], Value::Null);
    assert!(body["content"].as_str().unwrap().starts_with("<p>word1"));
}

#[tokio::test]
async fn slug_falls_back_to_file_name() {
    let dir = blog_fixture();
    let (status, body) = get(app(dir.path()), "/api/posts/rust-tips").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coverImage"], "https://example.com/rust.png");
    assert!(body["content"]
        .as_str()
        .unwrap()
        .contains("<strong>basics</strong>"));
}

#[tokio::test]
async fn unknown_post_is_404_with_message() {
    let dir = blog_fixture();
    let (status, body) = get(app(dir.path()), "/api/posts/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Post not found" }));
}

#[tokio::test]
async fn posts_by_category_is_case_insensitive() {
    let dir = blog_fixture();
    let (status, body) = get(app(dir.path()), "/api/categories/programming").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&body), vec!["rust-tips", "hello-world"]);

    let (_, all) = get(app(dir.path()), "/api/categories/All").await;
    assert_eq!(all.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn unknown_category_is_empty_list() {
    let dir = blog_fixture();
    let (status, body) = get(app(dir.path()), "/api/categories/unknown-category").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_categories_with_counts() {
    let dir = blog_fixture();
    let (status, body) = get(app(dir.path()), "/api/categories").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([
            { "name": "Programming", "count": 2 },
            { "name": "Life", "count": 1 },
            { "name": "Writing", "count": 1 },
        ])
    );
}

#[tokio::test]
async fn featured_post_prefers_flag() {
    let dir = blog_fixture();
    let (status, body) = get(app(dir.path()), "/api/featured").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "rust-tips");
    assert_eq!(body["featured"], true);
}

#[tokio::test]
async fn featured_post_on_empty_blog_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let (status, body) = get(app(dir.path()), "/api/featured").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No posts published");
}

#[tokio::test]
async fn related_posts_share_categories_first() {
    let dir = blog_fixture();
    let (status, body) = get(app(dir.path()), "/api/posts/hello-world/related").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&body), vec!["rust-tips", "garden"]);

    let (_, one) = get(app(dir.path()), "/api/posts/hello-world/related?count=1").await;
    assert_eq!(slugs(&one), vec!["rust-tips"]);
}

#[tokio::test]
async fn related_posts_errors() {
    let dir = blog_fixture();
    let (status, _) = get(app(dir.path()), "/api/posts/nope/related").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(app(dir.path()), "/api/posts/hello-world/related?count=many").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Validation error: "));
}

#[tokio::test]
async fn search_matches_title_excerpt_and_categories() {
    let dir = blog_fixture();

    let (status, body) = get(app(dir.path()), "/api/search?q=ownership").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&body), vec!["rust-tips"]);

    let (_, body) = get(app(dir.path()), "/api/search?q=LIFE").await;
    assert_eq!(slugs(&body), vec!["garden"]);

    let (_, body) = get(app(dir.path()), "/api/search").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn subscribe_then_duplicate() {
    let app = app(blog_fixture().path());

    let (status, body) = post_json(
        app.clone(),
        "/api/subscribe",
        json!({ "email": "reader@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({ "message": "Subscribed successfully", "email": "reader@example.com" })
    );

    let (status, body) = post_json(
        app,
        "/api/subscribe",
        json!({ "email": "reader@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Email already subscribed" }));
}

#[tokio::test]
async fn subscribe_validation() {
    let dir = blog_fixture();

    let (status, body) = post_json(app(dir.path()), "/api/subscribe", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], r#"Validation error: Required at "email""#);

    let (status, body) = post_json(
        app(dir.path()),
        "/api/subscribe",
        json!({ "email": "not-an-email" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], r#"Validation error: Invalid email at "email""#);
}

#[tokio::test]
async fn subscribe_rejects_malformed_json() {
    let dir = blog_fixture();
    let request = Request::post("/api/subscribe")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app(dir.path()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Validation error: "));
}

#[tokio::test]
async fn contact_assigns_increasing_ids() {
    let app = app(blog_fixture().path());
    let message = json!({
        "name": "Ann",
        "email": "ann@example.com",
        "message": "Loved the garden post",
    });

    let (status, first) = post_json(app.clone(), "/api/contact", message.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["message"], "Message sent successfully");
    assert_eq!(first["id"], 1);

    let (_, second) = post_json(app, "/api/contact", message).await;
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn contact_validation_lists_every_field() {
    let dir = blog_fixture();
    let (status, body) = post_json(
        app(dir.path()),
        "/api/contact",
        json!({ "email": "ann@example.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        r#"Validation error: Required at "name"; Required at "message""#
    );
}

#[tokio::test]
async fn unknown_api_path_is_json_404() {
    let dir = blog_fixture();
    let (status, body) = get(app(dir.path()), "/api/nothing/here").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Not found" }));
}

#[tokio::test]
async fn static_dir_serves_frontend_with_index_fallback() {
    let dir = blog_fixture();
    let dist = dir.path().join("dist");
    fs::create_dir_all(&dist).unwrap();
    fs::write(dist.join("index.html"), "<html>app</html>").unwrap();

    let blog = Blog::new(dir.path()).unwrap();
    let app = router(AppState::new(blog.build_index()), Some(&dist));

    let response = app
        .clone()
        .oneshot(Request::get("/blog/hello-world").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<html>app</html>");

    let (status, body) = get(app, "/api/posts/hello-world").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "hello-world");
}
