//! Guest endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shared::{CreateGuestRequest, Guest, GuestListResponse, UpdateGuestRequest};
use tracing::info;

use crate::io::rest::error::ApiResult;
use crate::io::rest::mappers::guest_mapper::GuestMapper;
use crate::io::rest::AppState;

/// GET /api/guests
pub async fn list_guests(State(state): State<AppState>) -> ApiResult<Json<GuestListResponse>> {
    let guests = state
        .guests
        .list()
        .await?
        .into_iter()
        .map(GuestMapper::to_dto)
        .collect();
    Ok(Json(GuestListResponse { guests }))
}

/// POST /api/guests
pub async fn create_guest(
    State(state): State<AppState>,
    Json(request): Json<CreateGuestRequest>,
) -> ApiResult<(StatusCode, Json<Guest>)> {
    info!("POST /api/guests - name: {}", request.full_name);
    let guest = state.guests.create(request).await?;
    Ok((StatusCode::CREATED, Json(GuestMapper::to_dto(guest))))
}

/// GET /api/guests/:id
pub async fn get_guest(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Guest>> {
    let guest = state.guests.get(id).await?;
    Ok(Json(GuestMapper::to_dto(guest)))
}

/// PUT /api/guests/:id
pub async fn update_guest(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateGuestRequest>,
) -> ApiResult<Json<Guest>> {
    info!("PUT /api/guests/{id}");
    let guest = state.guests.update(id, request).await?;
    Ok(Json(GuestMapper::to_dto(guest)))
}

/// DELETE /api/guests/:id
pub async fn delete_guest(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    info!("DELETE /api/guests/{id}");
    state.guests.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
