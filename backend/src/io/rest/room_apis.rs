//! Room and room type endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shared::{
    CreateRoomRequest, CreateRoomTypeRequest, Room, RoomListResponse, RoomType,
    RoomTypeListResponse, UpdateRoomRequest, UpdateRoomTypeRequest,
};
use tracing::info;

use crate::io::rest::error::ApiResult;
use crate::io::rest::mappers::room_mapper::RoomMapper;
use crate::io::rest::AppState;

/// GET /api/room-types
pub async fn list_room_types(
    State(state): State<AppState>,
) -> ApiResult<Json<RoomTypeListResponse>> {
    let room_types = state
        .rooms
        .list_room_types()
        .await?
        .into_iter()
        .map(RoomMapper::type_to_dto)
        .collect();
    Ok(Json(RoomTypeListResponse { room_types }))
}

/// POST /api/room-types
pub async fn create_room_type(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomTypeRequest>,
) -> ApiResult<(StatusCode, Json<RoomType>)> {
    info!("POST /api/room-types - code: {}", request.code);
    let room_type = state.rooms.create_room_type(request).await?;
    Ok((StatusCode::CREATED, Json(RoomMapper::type_to_dto(room_type))))
}

/// GET /api/room-types/:id
pub async fn get_room_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<RoomType>> {
    let room_type = state.rooms.get_room_type(id).await?;
    Ok(Json(RoomMapper::type_to_dto(room_type)))
}

/// PUT /api/room-types/:id
pub async fn update_room_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRoomTypeRequest>,
) -> ApiResult<Json<RoomType>> {
    info!("PUT /api/room-types/{id}");
    let room_type = state.rooms.update_room_type(id, request).await?;
    Ok(Json(RoomMapper::type_to_dto(room_type)))
}

/// GET /api/rooms
pub async fn list_rooms(State(state): State<AppState>) -> ApiResult<Json<RoomListResponse>> {
    let rooms = state
        .rooms
        .list_rooms()
        .await?
        .into_iter()
        .map(RoomMapper::to_dto)
        .collect();
    Ok(Json(RoomListResponse { rooms }))
}

/// POST /api/rooms
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> ApiResult<(StatusCode, Json<Room>)> {
    info!("POST /api/rooms - room_number: {}", request.room_number);
    let detail = state.rooms.create_room(request).await?;
    Ok((StatusCode::CREATED, Json(RoomMapper::to_dto(detail))))
}

/// GET /api/rooms/:id
pub async fn get_room(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Room>> {
    let detail = state.rooms.get_room(id).await?;
    Ok(Json(RoomMapper::to_dto(detail)))
}

/// PUT /api/rooms/:id
pub async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRoomRequest>,
) -> ApiResult<Json<Room>> {
    info!("PUT /api/rooms/{id}");
    let detail = state.rooms.update_room(id, request).await?;
    Ok(Json(RoomMapper::to_dto(detail)))
}

/// DELETE /api/rooms/:id — deactivates rather than deletes.
pub async fn deactivate_room(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    info!("DELETE /api/rooms/{id}");
    state.rooms.deactivate_room(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
