use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use site_core::source::{CONTENT_ENDPOINT, POSTS_ENDPOINT};
use site_core::{ContentEnvelope, ErrorEnvelope, NotionProxy, PostsEnvelope, ProxyError};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<NotionProxy>,
}

#[derive(Debug, Deserialize)]
struct ContentQuery {
    #[serde(rename = "pageId")]
    page_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostsQuery {
    #[serde(rename = "type")]
    kind: Option<String>,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route(CONTENT_ENDPOINT, get(content_handler).options(preflight))
        .route(POSTS_ENDPOINT, get(posts_handler).options(preflight))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn content_handler(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Response {
    match state.proxy.get_content(query.page_id.as_deref()).await {
        Ok(content) => Json(ContentEnvelope::from(content)).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn posts_handler(State(state): State<AppState>, Query(query): Query<PostsQuery>) -> Response {
    match state.proxy.get_posts(query.kind.as_deref()).await {
        Ok(posts) => Json(PostsEnvelope::from(posts)).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

fn error_response(err: &ProxyError) -> Response {
    let status = err.status();
    warn!(%status, error = %err, "proxy request failed");
    (status, Json(ErrorEnvelope::from(err))).into_response()
}
