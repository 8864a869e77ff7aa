use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Reference data describing a class of rooms. Read-only as far as the
/// reservation core is concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomType {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub default_rate: Decimal,
    pub max_occupancy: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
