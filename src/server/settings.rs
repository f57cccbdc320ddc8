use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::dto::SaveSettingsRequest;
use crate::server::response::{ApiError, StoreResultExt, SuccessResponse};
use crate::types::SiteSettings;

/// Returns the settings table flattened into a single `{key: value}` object.
pub async fn get_settings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rows = state
        .store
        .list_settings()
        .api_err("Failed to list settings")?;

    let settings = SiteSettings::from_pairs(rows.into_iter().map(|s| (s.key, s.value)));

    Ok::<_, ApiError>(Json(settings))
}

/// Upserts each submitted key in turn. The writes are sequential and not
/// wrapped in a transaction; a failure partway through leaves earlier keys
/// updated and later keys untouched.
pub async fn save_settings(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Json(req): Json<SaveSettingsRequest>,
) -> impl IntoResponse {
    for (key, value) in &req.settings {
        state
            .store
            .upsert_setting(key, value)
            .api_err("Failed to save setting")?;
    }

    Ok::<_, ApiError>(Json(SuccessResponse::ok()))
}
