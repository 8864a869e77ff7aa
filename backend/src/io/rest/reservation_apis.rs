//! Reservation endpoints: CRUD, lifecycle transitions, availability,
//! balance inquiry and the advisory quote.

use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{
    AvailabilityResponse, BalanceResponse, CheckInOutRequest, CreateReservationRequest,
    QuoteResponse, Reservation, ReservationListResponse, ReservationStatus,
    UpdateReservationRequest,
};
use tracing::info;

use crate::domain::models::reservation::Reservation as DomainReservation;
use crate::io::rest::error::ApiResult;
use crate::io::rest::mappers::reservation_mapper::ReservationMapper;
use crate::io::rest::{AppState, CurrentUser};

#[derive(Debug, Deserialize)]
pub struct ReservationListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<ReservationStatus>,
    pub guest_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub discount_percent: Option<Decimal>,
}

async fn to_dto(state: &AppState, reservation: DomainReservation) -> ApiResult<Reservation> {
    let totals = state.payments.totals_for(&reservation).await?;
    Ok(ReservationMapper::to_dto(reservation, &totals))
}

/// GET /api/reservations
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ReservationListQuery>,
) -> ApiResult<Json<ReservationListResponse>> {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(20);
    let (reservations, total) = state
        .reservations
        .list(query.status, query.guest_id, skip, limit)
        .await?;

    let mut dtos = Vec::with_capacity(reservations.len());
    for reservation in reservations {
        dtos.push(to_dto(&state, reservation).await?);
    }
    Ok(Json(ReservationListResponse {
        reservations: dtos,
        total,
        skip,
        limit,
    }))
}

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    Json(request): Json<CreateReservationRequest>,
) -> ApiResult<(StatusCode, Json<Reservation>)> {
    info!(
        "POST /api/reservations - guest {} room {}",
        request.guest_id, request.room_id
    );
    let reservation = state.reservations.create(request).await?;
    let dto = to_dto(&state, reservation).await?;
    Ok((StatusCode::CREATED, Json(dto)))
}

/// GET /api/reservations/:id
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Reservation>> {
    let reservation = state.reservations.get(id).await?;
    Ok(Json(to_dto(&state, reservation).await?))
}

/// PUT /api/reservations/:id
pub async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateReservationRequest>,
) -> ApiResult<Json<Reservation>> {
    info!("PUT /api/reservations/{id}");
    let reservation = state.reservations.update(id, request).await?;
    Ok(Json(to_dto(&state, reservation).await?))
}

/// DELETE /api/reservations/:id — soft cancel; the record and its payment
/// history remain queryable afterwards.
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    info!("DELETE /api/reservations/{id}");
    state.reservations.cancel(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/reservations/:id/check-in
pub async fn check_in(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CheckInOutRequest>,
) -> ApiResult<Json<Reservation>> {
    info!("POST /api/reservations/{id}/check-in by {}", user.username);
    let reservation = state
        .reservations
        .check_in(id, request.notes, user.id)
        .await?;
    Ok(Json(to_dto(&state, reservation).await?))
}

/// POST /api/reservations/:id/check-out
pub async fn check_out(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<CheckInOutRequest>,
) -> ApiResult<Json<Reservation>> {
    info!("POST /api/reservations/{id}/check-out by {}", user.username);
    let reservation = state
        .reservations
        .check_out(id, request.notes, user.id)
        .await?;
    Ok(Json(to_dto(&state, reservation).await?))
}

/// GET /api/reservations/availability
pub async fn check_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<Json<AvailabilityResponse>> {
    let check = state
        .reservations
        .availability(query.room_id, query.check_in_date, query.check_out_date)
        .await?;
    Ok(Json(AvailabilityResponse {
        room_id: query.room_id,
        check_in_date: query.check_in_date,
        check_out_date: query.check_out_date,
        available: check.available,
        conflicting_reservations: check.conflicting,
    }))
}

/// GET /api/reservations/:id/balance
pub async fn get_balance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<BalanceResponse>> {
    let (reservation, totals) = state.payments.balance(id).await?;
    Ok(Json(BalanceResponse {
        reservation_id: reservation.id,
        total_amount: totals.total_amount,
        total_paid: totals.total_paid,
        balance: totals.balance,
        payment_status: totals.payment_status(),
        reservation_status: reservation.status,
    }))
}

/// GET /api/reservations/quote — advisory only; nothing is persisted.
pub async fn quote(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> ApiResult<Json<QuoteResponse>> {
    let quote = state
        .reservations
        .quote(
            query.room_id,
            query.check_in_date,
            query.check_out_date,
            query.discount_percent,
        )
        .await?;
    Ok(Json(QuoteResponse {
        room_id: query.room_id,
        nightly_rate: quote.nightly_rate,
        discount_percent: quote.discount_percent,
        effective_rate: quote.effective_rate,
        nights: quote.nights,
        total_amount: quote.total_amount,
    }))
}
