use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::ExpenseCategory;

/// A property expense. Stands alone — no relationship to reservations.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub date: NaiveDate,
    pub category: ExpenseCategory,
    pub amount: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
