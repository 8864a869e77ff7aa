use shared::Expense as ExpenseDto;

use crate::domain::models::expense::Expense;

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn to_dto(expense: Expense) -> ExpenseDto {
        ExpenseDto {
            id: expense.id,
            date: expense.date,
            category: expense.category,
            amount: expense.amount,
            description: expense.description,
        }
    }
}
