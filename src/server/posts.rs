use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::response::{ApiError, IdResponse, StoreResultExt, SuccessResponse};
use crate::types::NewPost;

pub async fn list_posts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let posts = state
        .store
        .list_posts()
        .api_err("Failed to list posts")?;

    Ok::<_, ApiError>(Json(posts))
}

pub async fn create_post(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewPost>,
) -> impl IntoResponse {
    let id = state
        .store
        .create_post(&req)
        .api_err("Failed to create post")?;

    Ok::<_, ApiError>(Json(IdResponse { id }))
}

/// Reports success even when the id did not exist; callers cannot distinguish
/// "deleted" from "was already absent".
pub async fn delete_post(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    state
        .store
        .delete_post(id)
        .api_err("Failed to delete post")?;

    Ok::<_, ApiError>(Json(SuccessResponse::ok()))
}
