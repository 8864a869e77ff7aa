use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::errors::Result;
use crate::domain::models::payment::Payment;
use crate::storage::{read_decimal, read_parsed, DbConnection};

/// Repository for the payment ledger. Rows are append-only except for the
/// explicit admin delete; nothing here ever updates an existing payment.
#[derive(Clone)]
pub struct PaymentRepository {
    db: DbConnection,
}

fn from_row(row: &SqliteRow) -> Result<Payment> {
    Ok(Payment {
        id: row.get("id"),
        reservation_id: row.get("reservation_id"),
        amount: read_decimal(row, "amount")?,
        payment_type: read_parsed(row, "payment_type")?,
        payment_method: read_parsed(row, "payment_method")?,
        payment_date: row.get("payment_date"),
        reference_number: row.get("reference_number"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
    })
}

impl PaymentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, payment: &Payment) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO payments (reservation_id, amount, payment_type, payment_method, payment_date,
                                  reference_number, notes, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(payment.reservation_id)
        .bind(payment.amount.to_string())
        .bind(payment.payment_type.as_str())
        .bind(payment.payment_method.as_str())
        .bind(payment.payment_date)
        .bind(&payment.reference_number)
        .bind(&payment.notes)
        .bind(payment.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Payment>> {
        let row = sqlx::query(
            r#"
            SELECT id, reservation_id, amount, payment_type, payment_method, payment_date,
                   reference_number, notes, created_at
            FROM payments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| from_row(&r)).transpose()
    }

    /// Full ledger for one reservation, oldest entry first.
    pub async fn list_for_reservation(&self, reservation_id: i64) -> Result<Vec<Payment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, reservation_id, amount, payment_type, payment_method, payment_date,
                   reference_number, notes, created_at
            FROM payments
            WHERE reservation_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(reservation_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(from_row).collect()
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM payments WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
