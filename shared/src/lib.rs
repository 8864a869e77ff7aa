//! Wire types shared between the frontdesk backend and its clients.
//!
//! Every REST payload shape lives here: entity views, request bodies and
//! response envelopes, plus the status/kind enums that appear on the wire.
//! All shapes are strict — unknown or malformed payloads fail at
//! deserialization instead of being patched up downstream.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Status and kind enums
// ---------------------------------------------------------------------------

/// Lifecycle status of a reservation.
///
/// `confirmed -> checked_in -> checked_out` moves forward only;
/// `cancelled` is reachable from `confirmed` and `checked_in`.
/// `checked_out` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::CheckedIn => "checked_in",
            ReservationStatus::CheckedOut => "checked_out",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states admit no further transitions or payments.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::CheckedOut | ReservationStatus::Cancelled
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "confirmed" => Ok(ReservationStatus::Confirmed),
            "checked_in" => Ok(ReservationStatus::CheckedIn),
            "checked_out" => Ok(ReservationStatus::CheckedOut),
            "cancelled" => Ok(ReservationStatus::Cancelled),
            other => Err(format!("unknown reservation status: {other}")),
        }
    }
}

/// Operational status of a physical room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    OutOfOrder,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Occupied => "occupied",
            RoomStatus::OutOfOrder => "out_of_order",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(RoomStatus::Available),
            "occupied" => Ok(RoomStatus::Occupied),
            "out_of_order" => Ok(RoomStatus::OutOfOrder),
            other => Err(format!("unknown room status: {other}")),
        }
    }
}

/// What a payment represents relative to the reservation total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Full,
    Downpayment,
    Deposit,
    Adjustment,
}

impl PaymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentType::Full => "full",
            PaymentType::Downpayment => "downpayment",
            PaymentType::Deposit => "deposit",
            PaymentType::Adjustment => "adjustment",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(PaymentType::Full),
            "downpayment" => Ok(PaymentType::Downpayment),
            "deposit" => Ok(PaymentType::Deposit),
            "adjustment" => Ok(PaymentType::Adjustment),
            other => Err(format!("unknown payment type: {other}")),
        }
    }
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    CreditCard,
    DebitCard,
    BankTransfer,
    EWallet,
    Other,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::EWallet => "e_wallet",
            PaymentMethod::Other => "other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "debit_card" => Ok(PaymentMethod::DebitCard),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "e_wallet" => Ok(PaymentMethod::EWallet),
            "other" => Ok(PaymentMethod::Other),
            other => Err(format!("unknown payment method: {other}")),
        }
    }
}

/// Bookkeeping category for property expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Utilities,
    Maintenance,
    Cleaning,
    Supplies,
    Repairs,
    Insurance,
    Taxes,
    Other,
}

impl ExpenseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Maintenance => "maintenance",
            ExpenseCategory::Cleaning => "cleaning",
            ExpenseCategory::Supplies => "supplies",
            ExpenseCategory::Repairs => "repairs",
            ExpenseCategory::Insurance => "insurance",
            ExpenseCategory::Taxes => "taxes",
            ExpenseCategory::Other => "other",
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "utilities" => Ok(ExpenseCategory::Utilities),
            "maintenance" => Ok(ExpenseCategory::Maintenance),
            "cleaning" => Ok(ExpenseCategory::Cleaning),
            "supplies" => Ok(ExpenseCategory::Supplies),
            "repairs" => Ok(ExpenseCategory::Repairs),
            "insurance" => Ok(ExpenseCategory::Insurance),
            "taxes" => Ok(ExpenseCategory::Taxes),
            "other" => Ok(ExpenseCategory::Other),
            other => Err(format!("unknown expense category: {other}")),
        }
    }
}

/// Coarse settlement status derived from a reservation's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    PartialPaid,
    FullyPaid,
}

// ---------------------------------------------------------------------------
// Entity views
// ---------------------------------------------------------------------------

/// A room type: reference data describing a class of rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomType {
    pub id: i64,
    pub name: String,
    /// Short unique code, e.g. "DLX"
    pub code: String,
    /// Nightly rate used when a room carries no custom rate
    pub default_rate: Decimal,
    pub max_occupancy: i32,
    pub is_active: bool,
}

/// A physical room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub room_number: String,
    pub floor: Option<i32>,
    pub room_type_id: i64,
    pub status: RoomStatus,
    /// Room-level rate override; when absent the room type's default applies
    pub custom_rate: Option<Decimal>,
    /// The rate actually charged: custom_rate if set, else the type default
    pub effective_rate: Decimal,
    pub notes: Option<String>,
    pub is_active: bool,
}

/// A guest on file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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
}

/// A reservation together with its ledger-derived totals.
///
/// `total_paid` and `balance` are recomputed from the payment ledger on
/// every read — the server never trusts a previously serialized balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub confirmation_number: String,
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: ReservationStatus,
    pub total_amount: Decimal,
    pub total_paid: Decimal,
    /// `total_amount - total_paid`; negative on overpayment
    pub balance: Decimal,
    pub booking_source: Option<String>,
    pub notes: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub checked_out_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single ledger entry against a reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub reservation_id: i64,
    pub amount: Decimal,
    pub payment_type: PaymentType,
    pub payment_method: PaymentMethod,
    pub payment_date: NaiveDate,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A property expense; unrelated to any reservation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub description: String,
}

/// The authenticated admin user, minus credentials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token; attach as `Authorization: Bearer <token>`
    pub token: String,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Room types and rooms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomTypeRequest {
    pub name: String,
    pub code: String,
    pub default_rate: Decimal,
    pub max_occupancy: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoomTypeRequest {
    pub name: Option<String>,
    pub default_rate: Option<Decimal>,
    pub max_occupancy: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTypeListResponse {
    pub room_types: Vec<RoomType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub room_number: String,
    pub floor: Option<i32>,
    pub room_type_id: i64,
    pub custom_rate: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    pub floor: Option<i32>,
    pub room_type_id: Option<i64>,
    pub status: Option<RoomStatus>,
    pub custom_rate: Option<Decimal>,
    pub notes: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomListResponse {
    pub rooms: Vec<Room>,
}

// ---------------------------------------------------------------------------
// Guests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuestRequest {
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub nationality: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub is_vip: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGuestRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_type: Option<String>,
    pub id_number: Option<String>,
    pub nationality: Option<String>,
    pub notes: Option<String>,
    pub is_vip: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestListResponse {
    pub guests: Vec<Guest>,
}

// ---------------------------------------------------------------------------
// Reservations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReservationRequest {
    pub guest_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    /// Final billable amount; any discount is applied client-side and only
    /// the resulting number is persisted
    pub total_amount: Decimal,
    pub booking_source: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    pub room_id: Option<i64>,
    pub check_in_date: Option<NaiveDate>,
    pub check_out_date: Option<NaiveDate>,
    pub total_amount: Option<Decimal>,
    pub booking_source: Option<String>,
    pub notes: Option<String>,
}

/// Body for check-in and check-out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckInOutRequest {
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationListResponse {
    pub reservations: Vec<Reservation>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub available: bool,
    /// Number of non-cancelled reservations overlapping the range
    pub conflicting_reservations: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceResponse {
    pub reservation_id: i64,
    pub total_amount: Decimal,
    pub total_paid: Decimal,
    /// Signed; negative means overpayment
    pub balance: Decimal,
    pub payment_status: PaymentStatus,
    pub reservation_status: ReservationStatus,
}

/// Advisory price derivation for a prospective stay. Nothing here is
/// persisted; the client submits only the resulting `total_amount`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub room_id: i64,
    pub nightly_rate: Decimal,
    pub discount_percent: Decimal,
    pub effective_rate: Decimal,
    pub nights: i64,
    pub total_amount: Decimal,
}

// ---------------------------------------------------------------------------
// Payments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePaymentRequest {
    pub reservation_id: i64,
    pub amount: Decimal,
    pub payment_type: PaymentType,
    pub payment_method: PaymentMethod,
    pub payment_date: NaiveDate,
    pub reference_number: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentListResponse {
    pub payments: Vec<Payment>,
}

// ---------------------------------------------------------------------------
// Expenses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateExpenseRequest {
    pub date: Option<NaiveDate>,
    pub category: Option<ExpenseCategory>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Occupancy and money-at-a-glance numbers for the landing view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub rooms_total: i64,
    pub rooms_available: i64,
    pub rooms_occupied: i64,
    pub rooms_out_of_order: i64,
    pub guests_in_house: i64,
    pub arrivals_today: i64,
    pub outstanding_balance: Decimal,
    pub expenses_month_to_date: Decimal,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Uniform error body for non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_status_round_trips_through_str() {
        for status in [
            ReservationStatus::Confirmed,
            ReservationStatus::CheckedIn,
            ReservationStatus::CheckedOut,
            ReservationStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<ReservationStatus>(), Ok(status));
        }
    }

    #[test]
    fn terminal_statuses() {
        assert!(!ReservationStatus::Confirmed.is_terminal());
        assert!(!ReservationStatus::CheckedIn.is_terminal());
        assert!(ReservationStatus::CheckedOut.is_terminal());
        assert!(ReservationStatus::Cancelled.is_terminal());
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("pending".parse::<ReservationStatus>().is_err());
        assert!("".parse::<RoomStatus>().is_err());
    }

    #[test]
    fn payment_method_wire_names() {
        assert_eq!(PaymentMethod::BankTransfer.as_str(), "bank_transfer");
        assert_eq!(
            "e_wallet".parse::<PaymentMethod>(),
            Ok(PaymentMethod::EWallet)
        );
    }
}
