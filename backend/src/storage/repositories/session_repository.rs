use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::errors::Result;
use crate::domain::models::user::Session;
use crate::storage::DbConnection;

/// Repository for bearer sessions.
#[derive(Clone)]
pub struct SessionRepository {
    db: DbConnection,
}

fn from_row(row: &SqliteRow) -> Session {
    Session {
        token: row.get("token"),
        user_id: row.get("user_id"),
        expires_at: row.get("expires_at"),
        created_at: row.get("created_at"),
    }
}

impl SessionRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, session: &Session) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO sessions (token, user_id, expires_at, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn get(&self, token: &str) -> Result<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT token, user_id, expires_at, created_at
            FROM sessions
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(|r| from_row(&r)))
    }

    pub async fn delete(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
