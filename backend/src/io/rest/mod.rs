//! REST interface layer.
//!
//! Handlers are a thin translation between the wire types in `shared` and
//! the domain services: no business logic lives here. Every route except
//! login sits behind the bearer-token middleware, and a missing or expired
//! token is answered with 401 so clients force a logout.

pub mod auth_apis;
pub mod dashboard_apis;
pub mod error;
pub mod expense_apis;
pub mod guest_apis;
pub mod mappers;
pub mod payment_apis;
pub mod reservation_apis;
pub mod room_apis;

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;

use crate::config::Config;
use crate::domain::auth_service::AuthService;
use crate::domain::dashboard_service::DashboardService;
use crate::domain::expense_service::ExpenseService;
use crate::domain::guest_service::GuestService;
use crate::domain::payment_service::PaymentService;
use crate::domain::reservation_service::ReservationService;
use crate::domain::room_service::RoomService;
use crate::domain::DomainError;
use crate::io::rest::error::ApiError;
use crate::storage::DbConnection;
use crate::io::rest::mappers::user_mapper::UserMapper;

/// Per-entity services shared across handlers. Everything is constructed
/// from one database connection at startup and injected here — no ambient
/// singletons.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub rooms: RoomService,
    pub guests: GuestService,
    pub reservations: ReservationService,
    pub payments: PaymentService,
    pub expenses: ExpenseService,
    pub dashboard: DashboardService,
}

impl AppState {
    pub fn new(db: DbConnection, config: &Config) -> Self {
        Self {
            auth: AuthService::new(db.clone(), config.session_ttl_hours),
            rooms: RoomService::new(db.clone()),
            guests: GuestService::new(db.clone()),
            reservations: ReservationService::new(db.clone()),
            payments: PaymentService::new(db.clone()),
            expenses: ExpenseService::new(db.clone()),
            dashboard: DashboardService::new(db),
        }
    }
}

/// The authenticated user for the current request, inserted by
/// [`require_auth`].
#[derive(Clone)]
pub struct CurrentUser(pub shared::User);

/// Build the full `/api` router with authentication applied.
pub fn api_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/auth/logout", post(auth_apis::logout))
        .route(
            "/room-types",
            get(room_apis::list_room_types).post(room_apis::create_room_type),
        )
        .route(
            "/room-types/:id",
            get(room_apis::get_room_type).put(room_apis::update_room_type),
        )
        .route(
            "/rooms",
            get(room_apis::list_rooms).post(room_apis::create_room),
        )
        .route(
            "/rooms/:id",
            get(room_apis::get_room)
                .put(room_apis::update_room)
                .delete(room_apis::deactivate_room),
        )
        .route(
            "/guests",
            get(guest_apis::list_guests).post(guest_apis::create_guest),
        )
        .route(
            "/guests/:id",
            get(guest_apis::get_guest)
                .put(guest_apis::update_guest)
                .delete(guest_apis::delete_guest),
        )
        .route(
            "/reservations",
            get(reservation_apis::list_reservations).post(reservation_apis::create_reservation),
        )
        .route(
            "/reservations/availability",
            get(reservation_apis::check_availability),
        )
        .route("/reservations/quote", get(reservation_apis::quote))
        .route(
            "/reservations/:id",
            get(reservation_apis::get_reservation)
                .put(reservation_apis::update_reservation)
                .delete(reservation_apis::cancel_reservation),
        )
        .route(
            "/reservations/:id/check-in",
            post(reservation_apis::check_in),
        )
        .route(
            "/reservations/:id/check-out",
            post(reservation_apis::check_out),
        )
        .route("/reservations/:id/balance", get(reservation_apis::get_balance))
        .route(
            "/payments",
            get(payment_apis::list_payments).post(payment_apis::create_payment),
        )
        .route(
            "/payments/:id",
            get(payment_apis::get_payment).delete(payment_apis::delete_payment),
        )
        .route(
            "/expenses",
            get(expense_apis::list_expenses).post(expense_apis::create_expense),
        )
        .route(
            "/expenses/:id",
            get(expense_apis::get_expense)
                .put(expense_apis::update_expense)
                .delete(expense_apis::delete_expense),
        )
        .route("/dashboard/summary", get(dashboard_apis::summary))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let public = Router::new().route("/auth/login", post(auth_apis::login));

    Router::new()
        .nest("/api", public.merge(protected))
        .with_state(state)
}

/// Bearer-token middleware. Resolves the token to a user and makes it
/// available to handlers as a [`CurrentUser`] extension.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or(DomainError::AuthExpired)?;
    let user = state.auth.validate_token(&token).await?;
    request
        .extensions_mut()
        .insert(CurrentUser(UserMapper::to_dto(user)));
    Ok(next.run(request).await)
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request as HttpRequest, StatusCode};
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use tower::ServiceExt;

    use crate::storage::DbConnection;

    fn test_config() -> Config {
        Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            database_url: String::new(),
            cors_origin: "http://localhost:8080".to_string(),
            admin_username: "admin".to_string(),
            admin_password: "hunter2".to_string(),
            session_ttl_hours: 12,
        }
    }

    async fn test_app() -> Router {
        let db = DbConnection::init_test()
            .await
            .expect("failed to create test database");
        let config = test_config();
        let state = AppState::new(db, &config);
        state
            .auth
            .ensure_admin(&config.admin_username, &config.admin_password)
            .await
            .expect("failed to bootstrap admin");
        api_router(state)
    }

    fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: HttpRequest<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn login(app: &Router) -> String {
        let (status, body) = send(
            app,
            request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": "admin", "password": "hunter2"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    /// Seed a room type, room and guest over HTTP; returns (room_id, guest_id).
    async fn seed_inventory(app: &Router, token: &str) -> (i64, i64) {
        let (status, room_type) = send(
            app,
            request(
                "POST",
                "/api/room-types",
                Some(token),
                Some(json!({
                    "name": "Standard",
                    "code": "STD",
                    "default_rate": "500000",
                    "max_occupancy": 2
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, room) = send(
            app,
            request(
                "POST",
                "/api/rooms",
                Some(token),
                Some(json!({
                    "room_number": "101",
                    "floor": 1,
                    "room_type_id": room_type["id"],
                    "custom_rate": null,
                    "notes": null
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, guest) = send(
            app,
            request(
                "POST",
                "/api/guests",
                Some(token),
                Some(json!({"full_name": "Ana Pratama"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        (room["id"].as_i64().unwrap(), guest["id"].as_i64().unwrap())
    }

    #[tokio::test]
    async fn requests_without_a_valid_token_get_401() {
        let app = test_app().await;

        let (status, body) = send(&app, request("GET", "/api/rooms", None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "session expired");

        let (status, _) = send(&app, request("GET", "/api/rooms", Some("bogus"), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn bad_credentials_are_rejected() {
        let app = test_app().await;
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({"username": "admin", "password": "nope"})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn full_booking_flow_over_http() {
        let app = test_app().await;
        let token = login(&app).await;
        let (room_id, guest_id) = seed_inventory(&app, &token).await;

        // quote: 2 nights at the type default rate
        let (status, quote) = send(
            &app,
            request(
                "GET",
                &format!(
                    "/api/reservations/quote?room_id={room_id}&check_in_date=2026-03-01&check_out_date=2026-03-03"
                ),
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(quote["nights"], 2);
        assert_eq!(quote["total_amount"], "1000000");

        // create the reservation with the quoted amount
        let (status, reservation) = send(
            &app,
            request(
                "POST",
                "/api/reservations",
                Some(&token),
                Some(json!({
                    "guest_id": guest_id,
                    "room_id": room_id,
                    "check_in_date": "2026-03-01",
                    "check_out_date": "2026-03-03",
                    "total_amount": "1000000"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(reservation["status"], "confirmed");
        assert_eq!(reservation["balance"], "1000000");
        let reservation_id = reservation["id"].as_i64().unwrap();

        // the room is no longer available for overlapping dates
        let (status, availability) = send(
            &app,
            request(
                "GET",
                &format!(
                    "/api/reservations/availability?room_id={room_id}&check_in_date=2026-03-02&check_out_date=2026-03-04"
                ),
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(availability["available"], false);

        // pay in two installments
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/api/payments",
                Some(&token),
                Some(json!({
                    "reservation_id": reservation_id,
                    "amount": "400000",
                    "payment_type": "downpayment",
                    "payment_method": "cash",
                    "payment_date": "2026-03-01"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, balance) = send(
            &app,
            request(
                "GET",
                &format!("/api/reservations/{reservation_id}/balance"),
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(balance["balance"], "600000");
        assert_eq!(balance["payment_status"], "partial_paid");

        let (status, _) = send(
            &app,
            request(
                "POST",
                "/api/payments",
                Some(&token),
                Some(json!({
                    "reservation_id": reservation_id,
                    "amount": "600000",
                    "payment_type": "full",
                    "payment_method": "bank_transfer",
                    "payment_date": "2026-03-01"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // check in, then check out now that the balance is settled
        let (status, checked_in) = send(
            &app,
            request(
                "POST",
                &format!("/api/reservations/{reservation_id}/check-in"),
                Some(&token),
                Some(json!({})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(checked_in["status"], "checked_in");

        let (status, checked_out) = send(
            &app,
            request(
                "POST",
                &format!("/api/reservations/{reservation_id}/check-out"),
                Some(&token),
                Some(json!({})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(checked_out["status"], "checked_out");
        assert_eq!(checked_out["balance"], "0");

        // ledger remains queryable
        let (status, payments) = send(
            &app,
            request(
                "GET",
                &format!("/api/payments?reservation_id={reservation_id}"),
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payments["payments"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn validation_conflict_and_not_found_statuses() {
        let app = test_app().await;
        let token = login(&app).await;
        let (room_id, guest_id) = seed_inventory(&app, &token).await;

        // backwards dates fail validation before anything is stored
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/api/reservations",
                Some(&token),
                Some(json!({
                    "guest_id": guest_id,
                    "room_id": room_id,
                    "check_in_date": "2026-03-03",
                    "check_out_date": "2026-03-01",
                    "total_amount": "0"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // first booking succeeds, overlapping second conflicts
        let make_booking = |check_in: &str, check_out: &str| {
            json!({
                "guest_id": guest_id,
                "room_id": room_id,
                "check_in_date": check_in,
                "check_out_date": check_out,
                "total_amount": "500000"
            })
        };
        let (status, reservation) = send(
            &app,
            request(
                "POST",
                "/api/reservations",
                Some(&token),
                Some(make_booking("2026-03-01", "2026-03-05")),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let reservation_id = reservation["id"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            request(
                "POST",
                "/api/reservations",
                Some(&token),
                Some(make_booking("2026-03-04", "2026-03-06")),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["error"].as_str().unwrap().contains("already reserved"));

        // check-out before check-in is an invalid transition
        let (status, _) = send(
            &app,
            request(
                "POST",
                &format!("/api/reservations/{reservation_id}/check-out"),
                Some(&token),
                Some(json!({})),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        // unknown ids are 404
        let (status, _) = send(
            &app,
            request("GET", "/api/reservations/9999", Some(&token), None),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cancelling_over_http_keeps_the_record() {
        let app = test_app().await;
        let token = login(&app).await;
        let (room_id, guest_id) = seed_inventory(&app, &token).await;

        let (_, reservation) = send(
            &app,
            request(
                "POST",
                "/api/reservations",
                Some(&token),
                Some(json!({
                    "guest_id": guest_id,
                    "room_id": room_id,
                    "check_in_date": "2026-03-01",
                    "check_out_date": "2026-03-03",
                    "total_amount": "1000000"
                })),
            ),
        )
        .await;
        let reservation_id = reservation["id"].as_i64().unwrap();

        let (status, _) = send(
            &app,
            request(
                "DELETE",
                &format!("/api/reservations/{reservation_id}"),
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, cancelled) = send(
            &app,
            request(
                "GET",
                &format!("/api/reservations/{reservation_id}"),
                Some(&token),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cancelled["status"], "cancelled");

        // paying a cancelled reservation is refused
        let (status, _) = send(
            &app,
            request(
                "POST",
                "/api/payments",
                Some(&token),
                Some(json!({
                    "reservation_id": reservation_id,
                    "amount": "100000",
                    "payment_type": "downpayment",
                    "payment_method": "cash",
                    "payment_date": "2026-03-01"
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn logout_invalidates_the_session() {
        let app = test_app().await;
        let token = login(&app).await;

        let (status, _) = send(
            &app,
            request("POST", "/api/auth/logout", Some(&token), None),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, request("GET", "/api/rooms", Some(&token), None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
