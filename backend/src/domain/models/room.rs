use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::RoomStatus;

/// A physical room.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub floor: Option<i32>,
    pub room_type_id: i64,
    pub status: RoomStatus,
    /// Room-level rate override; `None` falls back to the type default.
    pub custom_rate: Option<Decimal>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Nightly rate actually charged for this room.
    pub fn effective_rate(&self, type_default_rate: Decimal) -> Decimal {
        self.custom_rate.unwrap_or(type_default_rate)
    }
}

/// A room joined with its type's default rate, as most read paths need
/// the effective rate alongside the room itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomDetail {
    pub room: Room,
    pub default_rate: Decimal,
}

impl RoomDetail {
    pub fn effective_rate(&self) -> Decimal {
        self.room.effective_rate(self.default_rate)
    }
}
