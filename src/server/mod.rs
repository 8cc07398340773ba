//! JSON API server

mod dto;
mod error;
mod forms;
pub mod handlers;

use anyhow::Result;
use axum::{
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use dto::PostDto;
pub use error::{ApiError, MessageBody};
pub use forms::{ContactRequest, SubscribeRequest};

use crate::store::{Inbox, PostIndex};
use crate::Blog;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostIndex>,
    pub inbox: Arc<Inbox>,
}

impl AppState {
    pub fn new(posts: PostIndex) -> Self {
        Self {
            posts: Arc::new(posts),
            inbox: Arc::new(Inbox::new()),
        }
    }
}

/// Build the application router.
///
/// When `static_dir` is given, paths outside `/api` are served from it with
/// `index.html` as the fallback for client-side routes.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/posts", get(handlers::list_posts))
        .route("/posts/:slug", get(handlers::get_post))
        .route("/posts/:slug/related", get(handlers::related_posts))
        .route("/categories", get(handlers::list_categories))
        .route("/categories/:category", get(handlers::posts_by_category))
        .route("/featured", get(handlers::featured_post))
        .route("/search", get(handlers::search_posts))
        .route("/subscribe", post(handlers::subscribe))
        .route("/contact", post(handlers::contact))
        .fallback(handlers::api_not_found);

    let mut app = Router::new().nest("/api", api);

    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(state)
}

/// Turn a handler panic into the generic 500 body
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!("Request handler panicked: {}", detail);
    ApiError::Internal.into_response()
}

/// Load content and serve the API until interrupted
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let index = blog.build_index();
    if index.is_empty() {
        tracing::warn!("No posts loaded from {:?}", blog.posts_dir);
    }

    let static_dir = blog.static_dir().filter(|dir| {
        let exists = dir.is_dir();
        if !exists {
            tracing::warn!("Static directory {:?} not found, serving API only", dir);
        }
        exists
    });

    let app = router(AppState::new(index), static_dir.as_deref());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Serving {} on http://{}", blog.config.title, addr);
    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
