use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::domain::errors::Result;
use crate::domain::models::expense::Expense;
use crate::storage::{read_decimal, read_parsed, DbConnection};

/// Repository for property expenses.
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

fn from_row(row: &SqliteRow) -> Result<Expense> {
    Ok(Expense {
        id: row.get("id"),
        date: row.get("date"),
        category: read_parsed(row, "category")?,
        amount: read_decimal(row, "amount")?,
        description: row.get("description"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn insert(&self, expense: &Expense) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (date, category, amount, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(expense.date)
        .bind(expense.category.as_str())
        .bind(expense.amount.to_string())
        .bind(&expense.description)
        .bind(expense.created_at)
        .bind(expense.updated_at)
        .execute(self.db.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn get(&self, id: i64) -> Result<Option<Expense>> {
        let row = sqlx::query(
            r#"
            SELECT id, date, category, amount, description, created_at, updated_at
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        row.map(|r| from_row(&r)).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, category, amount, description, created_at, updated_at
            FROM expenses
            ORDER BY date DESC, id DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(from_row).collect()
    }

    /// Expenses with `from <= date <= to`, oldest first.
    pub async fn list_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Expense>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, category, amount, description, created_at, updated_at
            FROM expenses
            WHERE date >= ? AND date <= ?
            ORDER BY date ASC, id ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(from_row).collect()
    }

    pub async fn update(&self, expense: &Expense) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE expenses
            SET date = ?, category = ?, amount = ?, description = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(expense.date)
        .bind(expense.category.as_str())
        .bind(expense.amount.to_string())
        .bind(&expense.description)
        .bind(expense.updated_at)
        .bind(expense.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
