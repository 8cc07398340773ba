//! API route handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::dto::{post_list, ContactResponse, PostDto, SubscribeResponse};
use super::error::ApiError;
use super::forms::{ContactRequest, SubscribeRequest};
use super::AppState;
use crate::store::{CategoryCount, InboxError};

const DEFAULT_RELATED: usize = 2;
const MAX_RELATED: usize = 20;

pub async fn list_posts(State(state): State<AppState>) -> Result<Response, ApiError> {
    json_response(&post_list(state.posts.all_posts()))
}

pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let post = state
        .posts
        .post_by_slug(&slug)
        .ok_or(ApiError::NotFound("Post not found"))?;
    json_response(&PostDto::from(post))
}

pub async fn posts_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Response, ApiError> {
    json_response(&post_list(state.posts.posts_by_category(&category)))
}

pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryCount>> {
    Json(state.posts.categories())
}

pub async fn featured_post(State(state): State<AppState>) -> Result<Response, ApiError> {
    let post = state
        .posts
        .featured_post()
        .ok_or(ApiError::NotFound("No posts published"))?;
    json_response(&PostDto::from(post))
}

#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    count: Option<usize>,
}

pub async fn related_posts(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    query: Result<Query<RelatedQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    if state.posts.post_by_slug(&slug).is_none() {
        return Err(ApiError::NotFound("Post not found"));
    }

    let count = query.count.unwrap_or(DEFAULT_RELATED).min(MAX_RELATED);
    json_response(&post_list(state.posts.related_posts(&slug, count)))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    q: String,
}

pub async fn search_posts(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    json_response(&post_list(state.posts.search(&query.q)))
}

pub async fn subscribe(
    State(state): State<AppState>,
    payload: Result<Json<SubscribeRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubscribeResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    let new = request.validate().map_err(ApiError::validation)?;

    match state.inbox.subscribe(&new.email).await {
        Ok(subscriber) => {
            tracing::info!("New subscriber #{}", subscriber.id);
            Ok((
                StatusCode::CREATED,
                Json(SubscribeResponse {
                    message: "Subscribed successfully",
                    email: subscriber.email,
                }),
            ))
        }
        Err(e @ InboxError::AlreadySubscribed) => Err(ApiError::BadRequest(e.to_string())),
    }
}

pub async fn contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    let new = request.validate().map_err(ApiError::validation)?;

    let contact = state
        .inbox
        .add_contact(&new.name, &new.email, &new.message)
        .await;
    tracing::info!("New contact message #{}", contact.id);

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            message: "Message sent successfully",
            id: contact.id,
        }),
    ))
}

pub async fn api_not_found() -> ApiError {
    ApiError::NotFound("Not found")
}

/// Serialize a borrowed DTO straight into a response body
fn json_response<T: Serialize>(value: &T) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(|e| {
        tracing::error!("Failed to serialize response: {}", e);
        ApiError::Internal
    })?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
