//! Core domain layer. No external I/O dependencies.
//!
//! Records, money amounts and capture outcomes live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod money;
pub mod speech;

pub use entities::{
    BUDGET_CATEGORIES, BudgetCategory, Expense, Meal, MealType, NewExpense, NewMeal, NewTask,
    Priority, Task,
};
pub use errors::DomainError;
pub use money::Amount;
pub use speech::{CaptureOutcome, RecognitionFailure};
