//! Shared fixtures for service tests: a fresh in-memory database plus
//! quick entity seeding through the real services.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::{CreateGuestRequest, CreateRoomRequest, CreateRoomTypeRequest};

use crate::domain::auth_service::AuthService;
use crate::domain::guest_service::GuestService;
use crate::domain::models::guest::Guest;
use crate::domain::models::room::RoomDetail;
use crate::domain::room_service::RoomService;
use crate::storage::DbConnection;

pub(crate) async fn test_db() -> DbConnection {
    let db = DbConnection::init_test()
        .await
        .expect("failed to create test database");
    // Bootstrap the admin account so actor foreign keys (id = 1) resolve,
    // mirroring the startup `ensure_admin` call in production.
    AuthService::new(db.clone(), 24)
        .ensure_admin("admin", "hunter2")
        .await
        .expect("failed to seed admin user");
    db
}

pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Create a room type and one room of that type, returning the room.
pub(crate) async fn seed_room(
    db: &DbConnection,
    room_number: &str,
    default_rate: Decimal,
) -> RoomDetail {
    let rooms = RoomService::new(db.clone());
    let room_type = rooms
        .create_room_type(CreateRoomTypeRequest {
            name: format!("Standard {room_number}"),
            code: format!("S{room_number}"),
            default_rate,
            max_occupancy: 2,
        })
        .await
        .expect("failed to seed room type");
    rooms
        .create_room(CreateRoomRequest {
            room_number: room_number.to_string(),
            floor: Some(1),
            room_type_id: room_type.id,
            custom_rate: None,
            notes: None,
        })
        .await
        .expect("failed to seed room")
}

pub(crate) async fn seed_guest(db: &DbConnection, full_name: &str) -> Guest {
    GuestService::new(db.clone())
        .create(CreateGuestRequest {
            full_name: full_name.to_string(),
            email: None,
            phone: None,
            id_type: None,
            id_number: None,
            nationality: None,
            notes: None,
            is_vip: false,
        })
        .await
        .expect("failed to seed guest")
}
