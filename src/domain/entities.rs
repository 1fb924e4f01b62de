//! Domain entities. Pure data structures for the assistant's records.
//!
//! No storage types here; adapters map rows into these.

use crate::domain::money::Amount;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A to-do item owned by the productivity responder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Task fields supplied by the caller; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub description: String,
    pub priority: Priority,
}

/// A recorded expense. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

impl MealType {
    pub const ALL: [MealType; 3] = [MealType::Breakfast, MealType::Lunch, MealType::Dinner];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
        }
    }

    /// Capitalized label used in spoken replies ("Breakfast - ...").
    pub fn label(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown meal type: {s}"))
    }
}

/// A logged meal. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub calories: u32,
    pub ingredients: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub name: String,
    pub meal_type: MealType,
    pub calories: u32,
    pub ingredients: String,
    pub date: NaiveDate,
}

/// Static monthly spending limit for one category. Reference data, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetCategory {
    pub name: &'static str,
    /// Monthly limit in whole dollars.
    pub limit: i64,
}

impl BudgetCategory {
    /// Category name with the first letter uppercased ("Transportation").
    pub fn title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn limit_amount(&self) -> Amount {
        Amount::from_cents(self.limit * 100)
    }
}

pub const BUDGET_CATEGORIES: &[BudgetCategory] = &[
    BudgetCategory { name: "food", limit: 500 },
    BudgetCategory { name: "transportation", limit: 200 },
    BudgetCategory { name: "entertainment", limit: 150 },
    BudgetCategory { name: "utilities", limit: 300 },
    BudgetCategory { name: "shopping", limit: 200 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parses_its_own_labels() {
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(p.as_str().parse::<Priority>().unwrap(), p);
        }
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn meal_type_labels() {
        assert_eq!("dinner".parse::<MealType>().unwrap(), MealType::Dinner);
        assert_eq!(MealType::Breakfast.label(), "Breakfast");
        assert!("brunch".parse::<MealType>().is_err());
    }

    #[test]
    fn budget_category_title_case() {
        assert_eq!(BUDGET_CATEGORIES[1].title(), "Transportation");
        assert_eq!(BUDGET_CATEGORIES[0].limit_amount().to_string(), "500.00");
    }
}
