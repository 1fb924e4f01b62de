//! In-process record store. Same contract as the SQLite store, nothing written to disk.
//!
//! Used for `ASSISTANT_IN_MEMORY=true` sessions and by responder tests.

use crate::domain::{Amount, DomainError, Expense, Meal, NewExpense, NewMeal, NewTask, Task};
use crate::ports::{ExpenseStore, MealStore, RecordStore, TaskStore};
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Default)]
struct Collections {
    tasks: Vec<Task>,
    expenses: Vec<Expense>,
    meals: Vec<Meal>,
    next_id: i64,
    closed: bool,
}

impl Collections {
    fn open(&mut self) -> Result<&mut Self, DomainError> {
        if self.closed {
            return Err(DomainError::Store("store is closed".into()));
        }
        Ok(self)
    }

    fn assign_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, task: NewTask) -> Result<Task, DomainError> {
        let mut guard = self.inner.write().await;
        let data = guard.open()?;
        let task = Task {
            id: data.assign_id(),
            description: task.description,
            priority: task.priority,
            completed: false,
            created_at: Utc::now(),
        };
        data.tasks.push(task.clone());
        Ok(task)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, DomainError> {
        let mut guard = self.inner.write().await;
        Ok(guard.open()?.tasks.clone())
    }

    async fn complete_task(&self, id: i64) -> Result<bool, DomainError> {
        let mut guard = self.inner.write().await;
        let data = guard.open()?;
        match data.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl ExpenseStore for MemoryStore {
    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, DomainError> {
        let mut guard = self.inner.write().await;
        let data = guard.open()?;
        let expense = Expense {
            id: data.assign_id(),
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
            date: expense.date,
            created_at: Utc::now(),
        };
        data.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>, DomainError> {
        let mut guard = self.inner.write().await;
        Ok(guard.open()?.expenses.clone())
    }

    async fn total_expenses(&self) -> Result<Amount, DomainError> {
        let mut guard = self.inner.write().await;
        Ok(guard.open()?.expenses.iter().map(|e| e.amount).sum())
    }
}

#[async_trait::async_trait]
impl MealStore for MemoryStore {
    async fn create_meal(&self, meal: NewMeal) -> Result<Meal, DomainError> {
        let mut guard = self.inner.write().await;
        let data = guard.open()?;
        let meal = Meal {
            id: data.assign_id(),
            name: meal.name,
            meal_type: meal.meal_type,
            calories: meal.calories,
            ingredients: meal.ingredients,
            date: meal.date,
            created_at: Utc::now(),
        };
        data.meals.push(meal.clone());
        Ok(meal)
    }

    async fn list_meals(&self) -> Result<Vec<Meal>, DomainError> {
        let mut guard = self.inner.write().await;
        Ok(guard.open()?.meals.clone())
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn close(&self) {
        let mut guard = self.inner.write().await;
        if !guard.closed {
            guard.closed = true;
            info!(
                tasks = guard.tasks.len(),
                expenses = guard.expenses.len(),
                meals = guard.meals.len(),
                "in-memory store closed"
            );
        }
    }
}
