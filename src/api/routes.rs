use axum::{
    routing::get,
    Router,
    extract::{Json, State},
};
use tower_http::cors::{CorsLayer, Any};
use tracing::info;

use crate::api::models::FeedResponse;
use crate::config::{SOCIAL_QUERY, SOCIAL_RESULT_COUNT};
use crate::digest::{self, Digest};
use crate::feeds;
use crate::AppState;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/feed", get(feed_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

/// Every request runs a fresh fetch-and-render cycle. Collectors
/// degrade to partial or empty content, so the route always answers 200.
async fn feed_handler(State(state): State<AppState>) -> Json<FeedResponse> {
    Json(FeedResponse {
        feed: generate_feed(&state).await,
    })
}

async fn generate_feed(state: &AppState) -> Digest {
    let date = digest::today_string();
    info!("Generating digest for {}", date);

    let articles = feeds::fetch_marketplace_updates(&state.config.rss_feeds).await;
    let posts = state.social.fetch_posts(SOCIAL_QUERY, SOCIAL_RESULT_COUNT).await;
    info!("Collected {} articles and {} social posts", articles.len(), posts.len());

    digest::build_digest(date, articles, posts)
}
