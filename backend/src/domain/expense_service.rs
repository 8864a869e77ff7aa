//! Expense bookkeeping. Plain CRUD — expenses have no relationship to
//! reservations or rooms.

use chrono::Utc;
use rust_decimal::Decimal;
use shared::{CreateExpenseRequest, UpdateExpenseRequest};
use tracing::info;

use crate::domain::errors::{DomainError, Result};
use crate::domain::models::expense::Expense;
use crate::storage::repositories::ExpenseRepository;
use crate::storage::DbConnection;

#[derive(Clone)]
pub struct ExpenseService {
    expenses: ExpenseRepository,
}

impl ExpenseService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            expenses: ExpenseRepository::new(db),
        }
    }

    pub async fn create(&self, request: CreateExpenseRequest) -> Result<Expense> {
        if request.amount <= Decimal::ZERO {
            return Err(DomainError::validation("expense amount must be positive"));
        }
        if request.description.trim().is_empty() {
            return Err(DomainError::validation("description must not be empty"));
        }

        let now = Utc::now();
        let mut expense = Expense {
            id: 0,
            date: request.date,
            category: request.category,
            amount: request.amount.round_dp(2),
            description: request.description.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        expense.id = self.expenses.insert(&expense).await?;
        info!(
            "created {} expense {} of {}",
            expense.category, expense.id, expense.amount
        );
        Ok(expense)
    }

    pub async fn get(&self, id: i64) -> Result<Expense> {
        self.expenses
            .get(id)
            .await?
            .ok_or(DomainError::not_found("expense", id))
    }

    pub async fn list(&self) -> Result<Vec<Expense>> {
        self.expenses.list().await
    }

    pub async fn update(&self, id: i64, request: UpdateExpenseRequest) -> Result<Expense> {
        let mut expense = self.get(id).await?;
        if let Some(date) = request.date {
            expense.date = date;
        }
        if let Some(category) = request.category {
            expense.category = category;
        }
        if let Some(amount) = request.amount {
            if amount <= Decimal::ZERO {
                return Err(DomainError::validation("expense amount must be positive"));
            }
            expense.amount = amount.round_dp(2);
        }
        if let Some(description) = request.description {
            if description.trim().is_empty() {
                return Err(DomainError::validation("description must not be empty"));
            }
            expense.description = description.trim().to_string();
        }
        expense.updated_at = Utc::now();
        self.expenses.update(&expense).await?;
        Ok(expense)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.expenses.delete(id).await? {
            return Err(DomainError::not_found("expense", id));
        }
        info!("deleted expense {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::{date, test_db};
    use rust_decimal_macros::dec;
    use shared::ExpenseCategory;

    fn expense_request(amount: Decimal) -> CreateExpenseRequest {
        CreateExpenseRequest {
            date: date(2026, 2, 10),
            category: ExpenseCategory::Utilities,
            amount,
            description: "February electricity".to_string(),
        }
    }

    #[tokio::test]
    async fn create_list_update_delete() {
        let db = test_db().await;
        let service = ExpenseService::new(db.clone());

        let expense = service.create(expense_request(dec!(350000))).await.unwrap();
        assert_eq!(service.list().await.unwrap().len(), 1);

        let updated = service
            .update(
                expense.id,
                UpdateExpenseRequest {
                    category: Some(ExpenseCategory::Repairs),
                    amount: Some(dec!(420000)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.category, ExpenseCategory::Repairs);
        assert_eq!(updated.amount, dec!(420000));

        service.delete(expense.id).await.unwrap();
        assert!(matches!(
            service.get(expense.id).await.unwrap_err(),
            DomainError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn non_positive_amounts_are_rejected() {
        let db = test_db().await;
        let service = ExpenseService::new(db.clone());

        for amount in [Decimal::ZERO, dec!(-50)] {
            let result = service.create(expense_request(amount)).await;
            assert!(matches!(
                result.unwrap_err(),
                DomainError::Validation { .. }
            ));
        }
    }
}
