//! SQLite-backed record store via libsql. Implements TaskStore, ExpenseStore and MealStore.
//!
//! Three independent tables (tasks, expenses, meals), each with an autoincrement id and a
//! store-assigned RFC 3339 `created_at`. One database file: data/assistant_data.db

use crate::domain::{
    Amount, DomainError, Expense, Meal, MealType, NewExpense, NewMeal, NewTask, Priority, Task,
};
use crate::ports::{ExpenseStore, MealStore, RecordStore, TaskStore};
use chrono::{DateTime, NaiveDate, Utc};
use libsql::{Connection, Database, params};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

const DB_FILE: &str = "assistant_data.db";
const DATE_FORMAT: &str = "%Y-%m-%d";

const TASKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    description TEXT NOT NULL,
    priority TEXT NOT NULL DEFAULT 'medium',
    completed INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL
)"#;

const EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount_cents INTEGER NOT NULL CHECK (amount_cents >= 0),
    category TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    date TEXT NOT NULL,
    created_at TEXT NOT NULL
)"#;

const MEALS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS meals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    meal_name TEXT NOT NULL,
    meal_type TEXT NOT NULL,
    calories INTEGER NOT NULL CHECK (calories >= 0),
    ingredients TEXT NOT NULL DEFAULT '',
    date TEXT NOT NULL,
    created_at TEXT NOT NULL
)"#;

/// Open database plus the single connection every operation goes through.
struct Handle {
    _db: Database,
    conn: Connection,
}

/// SQLite store. Acquired once at startup and shared (via Arc) by the three owning responders.
pub struct SqliteStore {
    handle: RwLock<Option<Handle>>,
    db_path: PathBuf,
}

impl SqliteStore {
    /// Connect to (or create) `assistant_data.db` in `base_dir` and ensure the schema exists.
    ///
    /// Sets WAL mode and synchronous=NORMAL.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(|e| DomainError::Store(e.to_string()))?;
        let db_path = base.join(DB_FILE);
        let path_str = db_path.to_string_lossy().into_owned();
        let store = Self::open(&path_str, db_path).await?;
        {
            let conn = store.conn().await?;
            // PRAGMA returns a row (new value); use query and consume rows (execute fails when rows are returned).
            for pragma in ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"] {
                let mut rows = conn
                    .query(pragma, ())
                    .await
                    .map_err(|e| DomainError::Store(format!("{} failed: {}", pragma, e)))?;
                while rows
                    .next()
                    .await
                    .map_err(|e| DomainError::Store(e.to_string()))?
                    .is_some()
                {}
            }
        }
        info!(path = %store.db_path.display(), "SQLite store connected with WAL mode");
        Ok(store)
    }

    /// Private in-memory database. Nothing survives `close`.
    pub async fn open_in_memory() -> Result<Self, DomainError> {
        Self::open(":memory:", PathBuf::from(":memory:")).await
    }

    async fn open(path: &str, db_path: PathBuf) -> Result<Self, DomainError> {
        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let conn = db.connect().map_err(|e| DomainError::Store(e.to_string()))?;

        for ddl in [TASKS_TABLE, EXPENSES_TABLE, MEALS_TABLE] {
            conn.execute(ddl, ())
                .await
                .map_err(|e| DomainError::Store(e.to_string()))?;
        }

        Ok(Self {
            handle: RwLock::new(Some(Handle { _db: db, conn })),
            db_path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    async fn conn(&self) -> Result<Connection, DomainError> {
        self.handle
            .read()
            .await
            .as_ref()
            .map(|h| h.conn.clone())
            .ok_or_else(|| DomainError::Store("store is closed".into()))
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, DomainError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DomainError::Store(format!("bad timestamp {:?}: {}", s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| DomainError::Store(format!("bad date {:?}: {}", s, e)))
}

#[async_trait::async_trait]
impl TaskStore for SqliteStore {
    async fn create_task(&self, task: NewTask) -> Result<Task, DomainError> {
        let conn = self.conn().await?;
        let created_at = Utc::now();
        conn.execute(
            "INSERT INTO tasks (description, priority, completed, created_at) VALUES (?1, ?2, 0, ?3)",
            params![
                task.description.as_str(),
                task.priority.as_str(),
                created_at.to_rfc3339()
            ],
        )
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;
        let id = conn.last_insert_rowid();
        debug!(id, priority = %task.priority, "task created");
        Ok(Task {
            id,
            description: task.description,
            priority: task.priority,
            completed: false,
            created_at,
        })
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, DomainError> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                "SELECT id, description, priority, completed, created_at FROM tasks ORDER BY id",
                (),
            )
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut tasks = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            let id: i64 = row.get(0).map_err(|e| DomainError::Store(e.to_string()))?;
            let description: String = row.get::<String>(1).unwrap_or_default();
            let priority: String = row.get(2).map_err(|e| DomainError::Store(e.to_string()))?;
            let completed: i64 = row.get(3).map_err(|e| DomainError::Store(e.to_string()))?;
            let created_at: String = row.get(4).map_err(|e| DomainError::Store(e.to_string()))?;
            tasks.push(Task {
                id,
                description,
                priority: priority
                    .parse::<Priority>()
                    .map_err(DomainError::Store)?,
                completed: completed != 0,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(tasks)
    }

    async fn complete_task(&self, id: i64) -> Result<bool, DomainError> {
        let conn = self.conn().await?;
        let changed = conn
            .execute("UPDATE tasks SET completed = 1 WHERE id = ?1", params![id])
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        Ok(changed > 0)
    }
}

#[async_trait::async_trait]
impl ExpenseStore for SqliteStore {
    async fn create_expense(&self, expense: NewExpense) -> Result<Expense, DomainError> {
        let conn = self.conn().await?;
        let created_at = Utc::now();
        conn.execute(
            r#"
            INSERT INTO expenses (amount_cents, category, description, date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                expense.amount.cents(),
                expense.category.as_str(),
                expense.description.as_str(),
                expense.date.format(DATE_FORMAT).to_string(),
                created_at.to_rfc3339()
            ],
        )
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;
        let id = conn.last_insert_rowid();
        debug!(id, amount = %expense.amount, category = %expense.category, "expense recorded");
        Ok(Expense {
            id,
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
            date: expense.date,
            created_at,
        })
    }

    async fn list_expenses(&self) -> Result<Vec<Expense>, DomainError> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                r#"
                SELECT id, amount_cents, category, description, date, created_at
                FROM expenses
                ORDER BY id
                "#,
                (),
            )
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut expenses = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            let id: i64 = row.get(0).map_err(|e| DomainError::Store(e.to_string()))?;
            let cents: i64 = row.get(1).map_err(|e| DomainError::Store(e.to_string()))?;
            let category: String = row.get(2).map_err(|e| DomainError::Store(e.to_string()))?;
            let description: String = row.get::<String>(3).unwrap_or_default();
            let date: String = row.get(4).map_err(|e| DomainError::Store(e.to_string()))?;
            let created_at: String = row.get(5).map_err(|e| DomainError::Store(e.to_string()))?;
            expenses.push(Expense {
                id,
                amount: Amount::from_cents(cents),
                category,
                description,
                date: parse_date(&date)?,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(expenses)
    }

    async fn total_expenses(&self) -> Result<Amount, DomainError> {
        // Summed here rather than with SUM(), which errors on i64 overflow.
        let conn = self.conn().await?;
        let mut rows = conn
            .query("SELECT amount_cents FROM expenses", ())
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut total = Amount::ZERO;
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            let cents = row
                .get::<i64>(0)
                .map_err(|e| DomainError::Store(e.to_string()))?;
            total = total + Amount::from_cents(cents);
        }
        Ok(total)
    }
}

#[async_trait::async_trait]
impl MealStore for SqliteStore {
    async fn create_meal(&self, meal: NewMeal) -> Result<Meal, DomainError> {
        let conn = self.conn().await?;
        let created_at = Utc::now();
        conn.execute(
            r#"
            INSERT INTO meals (meal_name, meal_type, calories, ingredients, date, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                meal.name.as_str(),
                meal.meal_type.as_str(),
                i64::from(meal.calories),
                meal.ingredients.as_str(),
                meal.date.format(DATE_FORMAT).to_string(),
                created_at.to_rfc3339()
            ],
        )
        .await
        .map_err(|e| DomainError::Store(e.to_string()))?;
        let id = conn.last_insert_rowid();
        debug!(id, meal_type = %meal.meal_type, calories = meal.calories, "meal logged");
        Ok(Meal {
            id,
            name: meal.name,
            meal_type: meal.meal_type,
            calories: meal.calories,
            ingredients: meal.ingredients,
            date: meal.date,
            created_at,
        })
    }

    async fn list_meals(&self) -> Result<Vec<Meal>, DomainError> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                r#"
                SELECT id, meal_name, meal_type, calories, ingredients, date, created_at
                FROM meals
                ORDER BY id
                "#,
                (),
            )
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?;
        let mut meals = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| DomainError::Store(e.to_string()))?
        {
            let id: i64 = row.get(0).map_err(|e| DomainError::Store(e.to_string()))?;
            let name: String = row.get(1).map_err(|e| DomainError::Store(e.to_string()))?;
            let meal_type: String = row.get(2).map_err(|e| DomainError::Store(e.to_string()))?;
            let calories: i64 = row.get(3).map_err(|e| DomainError::Store(e.to_string()))?;
            let ingredients: String = row.get::<String>(4).unwrap_or_default();
            let date: String = row.get(5).map_err(|e| DomainError::Store(e.to_string()))?;
            let created_at: String = row.get(6).map_err(|e| DomainError::Store(e.to_string()))?;
            meals.push(Meal {
                id,
                name,
                meal_type: meal_type.parse::<MealType>().map_err(DomainError::Store)?,
                calories: u32::try_from(calories).map_err(|e| DomainError::Store(e.to_string()))?,
                ingredients,
                date: parse_date(&date)?,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(meals)
    }
}

#[async_trait::async_trait]
impl RecordStore for SqliteStore {
    async fn close(&self) {
        if self.handle.write().await.take().is_some() {
            info!(path = %self.db_path.display(), "SQLite store closed");
        }
    }
}
