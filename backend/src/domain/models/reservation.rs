use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::ReservationStatus;

/// A booking of one room for one guest across a date range.
///
/// `total_amount` is the only price the backend stores; `total_paid` and
/// `balance` are derived from the payment ledger at read time and do not
/// appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i64,
    pub confirmation_number: String,
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: ReservationStatus,
    pub total_amount: Decimal,
    pub booking_source: Option<String>,
    pub notes: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_in_by: Option<i64>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub checked_out_by: Option<i64>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Length of stay in whole nights. Creation validates the date order,
    /// so this is always at least 1 for a stored reservation.
    pub fn nights(&self) -> i64 {
        (self.check_out_date - self.check_in_date).num_days()
    }

    /// Whether payments may still be recorded against this reservation.
    pub fn accepts_payments(&self) -> bool {
        matches!(
            self.status,
            ReservationStatus::Confirmed | ReservationStatus::CheckedIn
        )
    }
}
