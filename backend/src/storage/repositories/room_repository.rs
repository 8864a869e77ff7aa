use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::errors::Result;
use crate::domain::models::room::{Room, RoomDetail};
use crate::storage::{read_decimal, read_decimal_opt, read_parsed, DbConnection};

/// Repository for physical rooms.
#[derive(Clone)]
pub struct RoomRepository {
    db: DbConnection,
}

fn from_row(row: &SqliteRow) -> Result<Room> {
    Ok(Room {
        id: row.get("id"),
        room_number: row.get("room_number"),
        floor: row.get("floor"),
        room_type_id: row.get("room_type_id"),
        status: read_parsed(row, "status")?,
        custom_rate: read_decimal_opt(row, "custom_rate")?,
        notes: row.get("notes"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn detail_from_row(row: &SqliteRow) -> Result<RoomDetail> {
    Ok(RoomDetail {
        room: from_row(row)?,
        default_rate: read_decimal(row, "default_rate")?,
    })
}

impl RoomRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, room: &Room) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO rooms (room_number, floor, room_type_id, status, custom_rate, notes, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&room.room_number)
        .bind(room.floor)
        .bind(room.room_type_id)
        .bind(room.status.as_str())
        .bind(room.custom_rate.map(|r| r.to_string()))
        .bind(&room.notes)
        .bind(room.is_active)
        .bind(room.created_at)
        .bind(room.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Room>> {
        let row = sqlx::query(
            r#"
            SELECT id, room_number, floor, room_type_id, status, custom_rate, notes, is_active, created_at, updated_at
            FROM rooms
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| from_row(&r)).transpose()
    }

    pub async fn get_by_number(&self, room_number: &str) -> Result<Option<Room>> {
        let row = sqlx::query(
            r#"
            SELECT id, room_number, floor, room_type_id, status, custom_rate, notes, is_active, created_at, updated_at
            FROM rooms
            WHERE room_number = ?
            "#,
        )
        .bind(room_number)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| from_row(&r)).transpose()
    }

    /// Fetch a room joined with its type's default rate.
    pub async fn get_detail(&self, id: i64) -> Result<Option<RoomDetail>> {
        let row = sqlx::query(
            r#"
            SELECT r.id, r.room_number, r.floor, r.room_type_id, r.status, r.custom_rate,
                   r.notes, r.is_active, r.created_at, r.updated_at, t.default_rate
            FROM rooms r
            JOIN room_types t ON t.id = r.room_type_id
            WHERE r.id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| detail_from_row(&r)).transpose()
    }

    /// List all rooms (active and inactive) ordered by room number.
    pub async fn list_detail(&self) -> Result<Vec<RoomDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.room_number, r.floor, r.room_type_id, r.status, r.custom_rate,
                   r.notes, r.is_active, r.created_at, r.updated_at, t.default_rate
            FROM rooms r
            JOIN room_types t ON t.id = r.room_type_id
            ORDER BY r.room_number ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(detail_from_row).collect()
    }

    pub async fn update(&self, room: &Room) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE rooms
            SET floor = ?, room_type_id = ?, status = ?, custom_rate = ?, notes = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(room.floor)
        .bind(room.room_type_id)
        .bind(room.status.as_str())
        .bind(room.custom_rate.map(|r| r.to_string()))
        .bind(&room.notes)
        .bind(room.is_active)
        .bind(room.updated_at)
        .bind(room.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Count active rooms grouped by status.
    pub async fn count_by_status(&self) -> Result<Vec<(String, i64)>> {
        let rows = sqlx::query(
            r#"
            SELECT status, COUNT(*) AS cnt
            FROM rooms
            WHERE is_active = 1
            GROUP BY status
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows
            .iter()
            .map(|row| (row.get("status"), row.get("cnt")))
            .collect())
    }
}
