//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    Amount, CaptureOutcome, DomainError, Expense, Meal, NewExpense, NewMeal, NewTask, Task,
};
use std::time::Duration;

/// Speech capture. Returns one utterance or a recoverable failure per call.
#[async_trait::async_trait]
pub trait CapturePort: Send + Sync {
    /// Wait at most `timeout` for input.
    ///
    /// Returns `Err(DomainError::InputClosed)` once the source is exhausted;
    /// every other recognition problem is a `CaptureOutcome::Failure`.
    async fn capture(&self, timeout: Duration) -> Result<CaptureOutcome, DomainError>;
}

/// Speech playback. Completes before the next capture begins.
#[async_trait::async_trait]
pub trait PlaybackPort: Send + Sync {
    async fn render(&self, text: &str) -> Result<(), DomainError>;
}

/// Task collection. Append plus completion flag; tasks are never deleted.
#[async_trait::async_trait]
pub trait TaskStore: Send + Sync {
    async fn create_task(&self, task: NewTask) -> Result<Task, DomainError>;

    /// All tasks in insertion order.
    async fn list_tasks(&self) -> Result<Vec<Task>, DomainError>;

    /// Mark a task completed. Returns `false` if no task has this id.
    async fn complete_task(&self, id: i64) -> Result<bool, DomainError>;
}

/// Expense collection. Append-only.
#[async_trait::async_trait]
pub trait ExpenseStore: Send + Sync {
    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, DomainError>;

    /// All expenses in insertion order.
    async fn list_expenses(&self) -> Result<Vec<Expense>, DomainError>;

    /// Sum of every recorded amount.
    async fn total_expenses(&self) -> Result<Amount, DomainError>;
}

/// Meal collection. Append-only.
#[async_trait::async_trait]
pub trait MealStore: Send + Sync {
    async fn create_meal(&self, meal: NewMeal) -> Result<Meal, DomainError>;

    /// All meals in insertion order.
    async fn list_meals(&self) -> Result<Vec<Meal>, DomainError>;
}

/// A durable store backing all three collections, with an explicit release step.
#[async_trait::async_trait]
pub trait RecordStore: TaskStore + ExpenseStore + MealStore {
    /// Release the underlying handle. Later operations fail with `DomainError::Store`.
    /// Calling it twice is harmless.
    async fn close(&self);
}
