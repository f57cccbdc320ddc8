use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::auth::RequireAdmin;
use crate::server::AppState;
use crate::server::dto::UpdateBookingStatusRequest;
use crate::server::response::{ApiError, IdResponse, StoreResultExt, SuccessResponse};
use crate::types::NewBooking;

pub async fn list_bookings(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let bookings = state
        .store
        .list_bookings()
        .api_err("Failed to list bookings")?;

    Ok::<_, ApiError>(Json(bookings))
}

/// Public endpoint behind the booking form. Status is forced to pending.
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewBooking>,
) -> impl IntoResponse {
    let id = state
        .store
        .create_booking(&req)
        .api_err("Failed to create booking")?;

    Ok::<_, ApiError>(Json(IdResponse { id }))
}

/// No transition guard: any status may replace any other, and success is
/// reported even when the id matched no row.
pub async fn update_booking_status(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> impl IntoResponse {
    state
        .store
        .update_booking_status(id, req.status)
        .api_err("Failed to update booking status")?;

    Ok::<_, ApiError>(Json(SuccessResponse::ok()))
}

pub async fn delete_booking(
    _auth: RequireAdmin,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    state
        .store
        .delete_booking(id)
        .api_err("Failed to delete booking")?;

    Ok::<_, ApiError>(Json(SuccessResponse::ok()))
}
