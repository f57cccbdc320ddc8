use std::sync::Arc;
use std::time::Instant;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    Router,
    routing::{delete, get, patch},
};

use crate::store::Store;

use super::bookings;
use super::posts;
use super::settings;

pub struct AppState {
    pub store: Arc<dyn Store>,
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/posts",
            get(posts::list_posts).post(posts::create_post),
        )
        .route("/api/posts/{id}", delete(posts::delete_post))
        .route(
            "/api/settings",
            get(settings::get_settings).post(settings::save_settings),
        )
        .route(
            "/api/bookings",
            get(bookings::list_bookings).post(bookings::create_booking),
        )
        .route(
            "/api/bookings/{id}",
            patch(bookings::update_booking_status).delete(bookings::delete_booking),
        )
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}
