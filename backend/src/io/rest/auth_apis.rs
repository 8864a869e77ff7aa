//! Login and logout endpoints. Login is the only route outside the
//! bearer-token middleware.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use shared::{LoginRequest, LoginResponse};
use tracing::info;

use crate::io::rest::error::ApiResult;
use crate::io::rest::mappers::user_mapper::UserMapper;
use crate::io::rest::{bearer_token, AppState};

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    info!("POST /api/auth/login - username: {}", request.username);
    let (token, user) = state.auth.login(&request.username, &request.password).await?;
    Ok(Json(LoginResponse {
        token,
        user: UserMapper::to_dto(user),
    }))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<StatusCode> {
    if let Some(token) = bearer_token(&headers) {
        state.auth.logout(&token).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
