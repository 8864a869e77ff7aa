use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::errors::Result;
use crate::domain::models::reservation::Reservation;
use crate::storage::{read_decimal, read_parsed, DbConnection};

/// Repository for reservations. Date columns hold ISO dates, so the SQL
/// range comparisons below are plain lexicographic ones.
#[derive(Clone)]
pub struct ReservationRepository {
    db: DbConnection,
}

fn from_row(row: &SqliteRow) -> Result<Reservation> {
    Ok(Reservation {
        id: row.get("id"),
        confirmation_number: row.get("confirmation_number"),
        guest_id: row.get("guest_id"),
        room_id: row.get("room_id"),
        check_in_date: row.get("check_in_date"),
        check_out_date: row.get("check_out_date"),
        status: read_parsed(row, "status")?,
        total_amount: read_decimal(row, "total_amount")?,
        booking_source: row.get("booking_source"),
        notes: row.get("notes"),
        checked_in_at: row.get("checked_in_at"),
        checked_in_by: row.get("checked_in_by"),
        checked_out_at: row.get("checked_out_at"),
        checked_out_by: row.get("checked_out_by"),
        cancelled_at: row.get("cancelled_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl ReservationRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, reservation: &Reservation) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO reservations (confirmation_number, guest_id, room_id, check_in_date, check_out_date,
                                      status, total_amount, booking_source, notes, checked_in_at, checked_in_by,
                                      checked_out_at, checked_out_by, cancelled_at, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&reservation.confirmation_number)
        .bind(reservation.guest_id)
        .bind(reservation.room_id)
        .bind(reservation.check_in_date)
        .bind(reservation.check_out_date)
        .bind(reservation.status.as_str())
        .bind(reservation.total_amount.to_string())
        .bind(&reservation.booking_source)
        .bind(&reservation.notes)
        .bind(reservation.checked_in_at)
        .bind(reservation.checked_in_by)
        .bind(reservation.checked_out_at)
        .bind(reservation.checked_out_by)
        .bind(reservation.cancelled_at)
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Reservation>> {
        let row = sqlx::query(
            r#"
            SELECT id, confirmation_number, guest_id, room_id, check_in_date, check_out_date,
                   status, total_amount, booking_source, notes, checked_in_at, checked_in_by,
                   checked_out_at, checked_out_by, cancelled_at, created_at, updated_at
            FROM reservations
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| from_row(&r)).transpose()
    }

    pub async fn update(&self, reservation: &Reservation) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE reservations
            SET room_id = ?, check_in_date = ?, check_out_date = ?, status = ?, total_amount = ?,
                booking_source = ?, notes = ?, checked_in_at = ?, checked_in_by = ?,
                checked_out_at = ?, checked_out_by = ?, cancelled_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(reservation.room_id)
        .bind(reservation.check_in_date)
        .bind(reservation.check_out_date)
        .bind(reservation.status.as_str())
        .bind(reservation.total_amount.to_string())
        .bind(&reservation.booking_source)
        .bind(&reservation.notes)
        .bind(reservation.checked_in_at)
        .bind(reservation.checked_in_by)
        .bind(reservation.checked_out_at)
        .bind(reservation.checked_out_by)
        .bind(reservation.cancelled_at)
        .bind(reservation.updated_at)
        .bind(reservation.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Page through reservations, optionally filtered by status and guest.
    /// Returns the page plus the unpaged total for the same filter.
    pub async fn list(
        &self,
        status: Option<&str>,
        guest_id: Option<i64>,
        skip: i64,
        limit: i64,
    ) -> Result<(Vec<Reservation>, i64)> {
        let mut conditions: Vec<&str> = Vec::new();
        if status.is_some() {
            conditions.push("status = ?");
        }
        if guest_id.is_some() {
            conditions.push("guest_id = ?");
        }
        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let page_sql = format!(
            r#"
            SELECT id, confirmation_number, guest_id, room_id, check_in_date, check_out_date,
                   status, total_amount, booking_source, notes, checked_in_at, checked_in_by,
                   checked_out_at, checked_out_by, cancelled_at, created_at, updated_at
            FROM reservations{where_clause}
            ORDER BY check_in_date DESC, id DESC
            LIMIT ? OFFSET ?
            "#
        );
        let mut page_query = sqlx::query(&page_sql);
        if let Some(s) = status {
            page_query = page_query.bind(s);
        }
        if let Some(g) = guest_id {
            page_query = page_query.bind(g);
        }
        let rows = page_query
            .bind(limit)
            .bind(skip)
            .fetch_all(self.db.pool())
            .await?;
        let reservations = rows.iter().map(from_row).collect::<Result<Vec<_>>>()?;

        let count_sql = format!("SELECT COUNT(*) AS cnt FROM reservations{where_clause}");
        let mut count_query = sqlx::query(&count_sql);
        if let Some(s) = status {
            count_query = count_query.bind(s);
        }
        if let Some(g) = guest_id {
            count_query = count_query.bind(g);
        }
        let total: i64 = count_query.fetch_one(self.db.pool()).await?.get("cnt");

        Ok((reservations, total))
    }

    /// Number of blocking reservations (confirmed or checked-in) on the
    /// room whose date range overlaps `[check_in, check_out)`.
    pub async fn count_overlapping(
        &self,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
        exclude_id: Option<i64>,
    ) -> Result<i64> {
        let row = if let Some(exclude) = exclude_id {
            sqlx::query(
                r#"
                SELECT COUNT(*) AS cnt
                FROM reservations
                WHERE room_id = ?
                  AND id != ?
                  AND status IN ('confirmed', 'checked_in')
                  AND NOT (check_out_date <= ? OR check_in_date >= ?)
                "#,
            )
            .bind(room_id)
            .bind(exclude)
            .bind(check_in)
            .bind(check_out)
            .fetch_one(self.db.pool())
            .await?
        } else {
            sqlx::query(
                r#"
                SELECT COUNT(*) AS cnt
                FROM reservations
                WHERE room_id = ?
                  AND status IN ('confirmed', 'checked_in')
                  AND NOT (check_out_date <= ? OR check_in_date >= ?)
                "#,
            )
            .bind(room_id)
            .bind(check_in)
            .bind(check_out)
            .fetch_one(self.db.pool())
            .await?
        };

        Ok(row.get("cnt"))
    }

    pub async fn count_by_status(&self, status: &str) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM reservations WHERE status = ?")
            .bind(status)
            .fetch_one(self.db.pool())
            .await?;
        Ok(row.get("cnt"))
    }

    pub async fn count_arrivals_on(&self, date: NaiveDate) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS cnt FROM reservations WHERE status = 'confirmed' AND check_in_date = ?",
        )
        .bind(date)
        .fetch_one(self.db.pool())
        .await?;
        Ok(row.get("cnt"))
    }

    /// All reservations that can still accumulate payments.
    pub async fn list_active(&self) -> Result<Vec<Reservation>> {
        let rows = sqlx::query(
            r#"
            SELECT id, confirmation_number, guest_id, room_id, check_in_date, check_out_date,
                   status, total_amount, booking_source, notes, checked_in_at, checked_in_by,
                   checked_out_at, checked_out_by, cancelled_at, created_at, updated_at
            FROM reservations
            WHERE status IN ('confirmed', 'checked_in')
            ORDER BY check_in_date ASC, id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(from_row).collect()
    }

    pub async fn count_for_guest(&self, guest_id: i64) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM reservations WHERE guest_id = ?")
            .bind(guest_id)
            .fetch_one(self.db.pool())
            .await?;
        Ok(row.get("cnt"))
    }
}
