use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::{PaymentMethod, PaymentType};

/// One entry in a reservation's payment ledger. Immutable once recorded;
/// corrections are made with `adjustment`-type entries or by deleting the
/// row outright, after which balances recompute from what survives.
#[derive(Debug, Clone, PartialEq)]
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
