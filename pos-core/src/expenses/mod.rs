//! Expense book (manager bookkeeping)

use parking_lot::RwLock;
use shared::models::{Expense, ExpenseCreate};
use shared::util::now_millis;
use uuid::Uuid;

use crate::utils::error::{AppError, AppResult};

/// Expense store
#[derive(Debug, Default)]
pub struct ExpenseBook {
    expenses: RwLock<Vec<Expense>>,
}

impl ExpenseBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, payload: ExpenseCreate) -> AppResult<Expense> {
        let description = payload.description.trim().to_string();
        if description.is_empty() {
            return Err(AppError::validation("expense description must not be empty"));
        }
        if payload.amount <= 0 {
            return Err(AppError::validation("expense amount must be positive"));
        }

        let expense = Expense {
            id: Uuid::new_v4(),
            description,
            amount: payload.amount,
            date: payload.date.unwrap_or_else(now_millis),
        };
        self.expenses.write().push(expense.clone());
        Ok(expense)
    }

    /// All expenses, newest first
    pub fn list(&self) -> Vec<Expense> {
        let mut expenses = self.expenses.read().clone();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_is_newest_first() {
        let book = ExpenseBook::new();
        for (desc, date) in [("gas", 100), ("produce", 300), ("repairs", 200)] {
            book.add(ExpenseCreate {
                description: desc.to_string(),
                amount: 500,
                date: Some(date),
            })
            .unwrap();
        }
        let dates: Vec<i64> = book.list().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![300, 200, 100]);
    }

    #[test]
    fn rejects_blank_description_and_non_positive_amount() {
        let book = ExpenseBook::new();
        assert!(book
            .add(ExpenseCreate {
                description: " ".to_string(),
                amount: 100,
                date: None,
            })
            .is_err());
        assert!(book
            .add(ExpenseCreate {
                description: "gas".to_string(),
                amount: 0,
                date: None,
            })
            .is_err());
        assert!(book.list().is_empty());
    }
}
