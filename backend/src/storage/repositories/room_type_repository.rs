use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::errors::Result;
use crate::domain::models::room_type::RoomType;
use crate::storage::{read_decimal, DbConnection};

/// Repository for room type reference data.
#[derive(Clone)]
pub struct RoomTypeRepository {
    db: DbConnection,
}

fn from_row(row: &SqliteRow) -> Result<RoomType> {
    Ok(RoomType {
        id: row.get("id"),
        name: row.get("name"),
        code: row.get("code"),
        default_rate: read_decimal(row, "default_rate")?,
        max_occupancy: row.get("max_occupancy"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl RoomTypeRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, room_type: &RoomType) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO room_types (name, code, default_rate, max_occupancy, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&room_type.name)
        .bind(&room_type.code)
        .bind(room_type.default_rate.to_string())
        .bind(room_type.max_occupancy)
        .bind(room_type.is_active)
        .bind(room_type.created_at)
        .bind(room_type.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get(&self, id: i64) -> Result<Option<RoomType>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, code, default_rate, max_occupancy, is_active, created_at, updated_at
            FROM room_types
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| from_row(&r)).transpose()
    }

    pub async fn get_by_code(&self, code: &str) -> Result<Option<RoomType>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, code, default_rate, max_occupancy, is_active, created_at, updated_at
            FROM room_types
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| from_row(&r)).transpose()
    }

    pub async fn list(&self) -> Result<Vec<RoomType>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, code, default_rate, max_occupancy, is_active, created_at, updated_at
            FROM room_types
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(from_row).collect()
    }

    pub async fn update(&self, room_type: &RoomType) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE room_types
            SET name = ?, default_rate = ?, max_occupancy = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&room_type.name)
        .bind(room_type.default_rate.to_string())
        .bind(room_type.max_occupancy)
        .bind(room_type.is_active)
        .bind(room_type.updated_at)
        .bind(room_type.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }
}
