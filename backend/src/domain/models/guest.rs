use chrono::{DateTime, Utc};

/// A guest on file. Referenced by reservations, never mutated by the
/// reservation core itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Guest {
    pub id: i64,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub nationality: Option<String>,
    pub notes: Option<String>,
    pub is_vip: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
