use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::errors::Result;
use crate::domain::models::guest::Guest;
use crate::storage::DbConnection;

/// Repository for guests.
#[derive(Clone)]
pub struct GuestRepository {
    db: DbConnection,
}

fn from_row(row: &SqliteRow) -> Guest {
    Guest {
        id: row.get("id"),
        full_name: row.get("full_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        id_type: row.get("id_type"),
        id_number: row.get("id_number"),
        nationality: row.get("nationality"),
        notes: row.get("notes"),
        is_vip: row.get("is_vip"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl GuestRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, guest: &Guest) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO guests (full_name, email, phone, id_type, id_number, nationality, notes, is_vip, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&guest.full_name)
        .bind(&guest.email)
        .bind(&guest.phone)
        .bind(&guest.id_type)
        .bind(&guest.id_number)
        .bind(&guest.nationality)
        .bind(&guest.notes)
        .bind(guest.is_vip)
        .bind(guest.created_at)
        .bind(guest.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Guest>> {
        let row = sqlx::query(
            r#"
            SELECT id, full_name, email, phone, id_type, id_number, nationality, notes, is_vip, created_at, updated_at
            FROM guests
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| from_row(&r)))
    }

    pub async fn list(&self) -> Result<Vec<Guest>> {
        let rows = sqlx::query(
            r#"
            SELECT id, full_name, email, phone, id_type, id_number, nationality, notes, is_vip, created_at, updated_at
            FROM guests
            ORDER BY full_name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(from_row).collect())
    }

    pub async fn update(&self, guest: &Guest) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE guests
            SET full_name = ?, email = ?, phone = ?, id_type = ?, id_number = ?, nationality = ?, notes = ?, is_vip = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&guest.full_name)
        .bind(&guest.email)
        .bind(&guest.phone)
        .bind(&guest.id_type)
        .bind(&guest.id_number)
        .bind(&guest.nationality)
        .bind(&guest.notes)
        .bind(guest.is_vip)
        .bind(guest.updated_at)
        .bind(guest.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM guests WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
