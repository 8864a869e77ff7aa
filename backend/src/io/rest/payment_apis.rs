//! Payment ledger endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shared::{CreatePaymentRequest, Payment, PaymentListResponse};
use tracing::info;

use crate::io::rest::error::ApiResult;
use crate::io::rest::mappers::payment_mapper::PaymentMapper;
use crate::io::rest::AppState;

#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    pub reservation_id: i64,
}

/// POST /api/payments
pub async fn create_payment(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentRequest>,
) -> ApiResult<(StatusCode, Json<Payment>)> {
    info!(
        "POST /api/payments - reservation {} amount {}",
        request.reservation_id, request.amount
    );
    let payment = state.payments.record(request).await?;
    Ok((StatusCode::CREATED, Json(PaymentMapper::to_dto(payment))))
}

/// GET /api/payments?reservation_id=
pub async fn list_payments(
    State(state): State<AppState>,
    Query(query): Query<PaymentListQuery>,
) -> ApiResult<Json<PaymentListResponse>> {
    let payments = state
        .payments
        .list_for_reservation(query.reservation_id)
        .await?
        .into_iter()
        .map(PaymentMapper::to_dto)
        .collect();
    Ok(Json(PaymentListResponse { payments }))
}

/// GET /api/payments/:id
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Payment>> {
    let payment = state.payments.get(id).await?;
    Ok(Json(PaymentMapper::to_dto(payment)))
}

/// DELETE /api/payments/:id — balances recompute from the surviving
/// ledger on the next read.
pub async fn delete_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    info!("DELETE /api/payments/{id}");
    state.payments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
