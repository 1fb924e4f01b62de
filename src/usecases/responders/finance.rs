//! Finance and budget: expense recording, spending totals, budget overview, saving tips.
//!
//! Owns the expense collection. Only "add expense"/"spent" utterances carrying an amount write to it.

use super::{Responder, ResponderId};
use crate::domain::{Amount, BUDGET_CATEGORIES, DomainError, Expense, NewExpense};
use crate::ports::{ExpenseStore, RandomSource, pick};
use crate::shared::text::{after_any, contains_any, normalize};
use chrono::{Datelike, Local, NaiveDate};
use std::sync::Arc;
use tracing::info;

const RECORD_PHRASES: &[&str] = &["add expense", "spent"];

/// Category used when the utterance names none of the budget categories.
pub const UNCATEGORIZED: &str = "other";

pub const SAVING_TIPS: &[&str] = &[
    "Try the 50-30-20 rule: 50% needs, 30% wants, 20% savings.",
    "Track your daily expenses to identify spending patterns.",
    "Consider cooking at home more often to save on food costs.",
    "Look for subscription services you're not using and cancel them.",
];

const ASK_AMOUNT: &str = "I can help you track that expense. What did you spend money on and how much?";
const NO_EXPENSES: &str = "You haven't recorded any expenses yet.";
const GENERIC_REPLY: &str = "I can help you track expenses, manage your budget, and provide money-saving tips. What would you like to know about your finances?";

pub struct FinanceResponder {
    expenses: Arc<dyn ExpenseStore>,
    rng: Arc<dyn RandomSource>,
}

impl FinanceResponder {
    pub fn new(expenses: Arc<dyn ExpenseStore>, rng: Arc<dyn RandomSource>) -> Self {
        Self { expenses, rng }
    }

    async fn record(&self, command: &str) -> Result<String, DomainError> {
        let Some(amount) = Amount::find_in(command) else {
            return Ok(ASK_AMOUNT.to_string());
        };
        let category = BUDGET_CATEGORIES
            .iter()
            .find(|c| command.contains(c.name))
            .map(|c| c.name)
            .unwrap_or(UNCATEGORIZED);
        let description = after_any(command, &["add expense"])
            .unwrap_or(command)
            .trim()
            .to_string();

        let expense = self
            .expenses
            .create_expense(NewExpense {
                amount,
                category: category.to_string(),
                description,
                date: Local::now().date_naive(),
            })
            .await?;
        info!(expense_id = expense.id, amount = %expense.amount, category, "expense recorded");
        Ok(format!(
            "Recorded an expense of ${} for {}.",
            expense.amount, expense.category
        ))
    }

    async fn total(&self) -> Result<String, DomainError> {
        if self.expenses.list_expenses().await?.is_empty() {
            return Ok(NO_EXPENSES.to_string());
        }
        let total = self.expenses.total_expenses().await?;
        Ok(format!("Your total recorded expenses are ${}.", total))
    }

    async fn remaining(&self) -> Result<String, DomainError> {
        let expenses = self.expenses.list_expenses().await?;
        Ok(remaining_report(&expenses, Local::now().date_naive()))
    }
}

fn budget_overview() -> String {
    let items: Vec<String> = BUDGET_CATEGORIES
        .iter()
        .map(|c| format!("{}: ${}.", c.title(), c.limit))
        .collect();
    format!("Here's your monthly budget: {}", items.join(" "))
}

/// Per-category budget left for the month containing `today`.
fn remaining_report(expenses: &[Expense], today: NaiveDate) -> String {
    let this_month: Vec<&Expense> = expenses
        .iter()
        .filter(|e| e.date.year() == today.year() && e.date.month() == today.month())
        .collect();

    let mut items: Vec<String> = BUDGET_CATEGORIES
        .iter()
        .map(|c| {
            let spent: Amount = this_month
                .iter()
                .filter(|e| e.category == c.name)
                .map(|e| e.amount)
                .sum();
            let left = c.limit_amount() - spent;
            if left < Amount::ZERO {
                format!(
                    "{}: ${} over the ${} limit.",
                    c.title(),
                    Amount::ZERO - left,
                    c.limit
                )
            } else {
                format!("{}: ${} left of ${}.", c.title(), left, c.limit)
            }
        })
        .collect();

    let other: Amount = this_month
        .iter()
        .filter(|e| !BUDGET_CATEGORIES.iter().any(|c| c.name == e.category))
        .map(|e| e.amount)
        .sum();
    if other > Amount::ZERO {
        items.push(format!("Uncategorized spending: ${}.", other));
    }

    format!("Here's what's left in your budget this month: {}", items.join(" "))
}

#[async_trait::async_trait]
impl Responder for FinanceResponder {
    fn id(&self) -> ResponderId {
        ResponderId::Finance
    }

    async fn handle(&self, utterance: &str) -> Result<String, DomainError> {
        let command = normalize(utterance);

        if contains_any(&command, RECORD_PHRASES) {
            return self.record(&command).await;
        }
        if command.contains("budget") {
            if contains_any(&command, &["left", "remaining"]) {
                return self.remaining().await;
            }
            return Ok(budget_overview());
        }
        if contains_any(&command, &["expenses", "spending"]) {
            return self.total().await;
        }
        if contains_any(&command, &["save money", "saving tips"]) {
            return Ok(pick(self.rng.as_ref(), SAVING_TIPS).to_string());
        }
        Ok(GENERIC_REPLY.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::MemoryStore;
    use crate::adapters::random::{FixedRandom, ThreadRandom};

    fn responder() -> (FinanceResponder, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (
            FinanceResponder::new(store.clone(), Arc::new(FixedRandom(0))),
            store,
        )
    }

    fn expense(cents: i64, category: &str, date: &str) -> Expense {
        Expense {
            id: 0,
            amount: Amount::from_cents(cents),
            category: category.into(),
            description: String::new(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn record_then_total() {
        let (responder, store) = responder();
        assert_eq!(responder.handle("show expenses").await.unwrap(), NO_EXPENSES);
        assert_eq!(
            responder
                .handle("add expense spent 20 on food")
                .await
                .unwrap(),
            "Recorded an expense of $20.00 for food."
        );
        assert_eq!(
            responder.handle("show expenses").await.unwrap(),
            "Your total recorded expenses are $20.00."
        );
        let saved = store.list_expenses().await.unwrap();
        assert_eq!(saved[0].category, "food");
        assert_eq!(saved[0].description, "spent 20 on food");
    }

    #[tokio::test]
    async fn totals_accumulate_to_the_cent() {
        let (responder, _store) = responder();
        responder.handle("add expense 12.5 for a movie").await.unwrap();
        responder.handle("I spent $7.25 on shopping").await.unwrap();
        assert_eq!(
            responder.handle("how is my spending").await.unwrap(),
            "Your total recorded expenses are $19.75."
        );
    }

    #[tokio::test]
    async fn record_without_amount_asks_and_stores_nothing() {
        let (responder, store) = responder();
        assert_eq!(
            responder.handle("add expense for food").await.unwrap(),
            ASK_AMOUNT
        );
        assert!(store.list_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_amounts_are_not_recorded() {
        let (responder, store) = responder();
        for _ in 0..2 {
            assert_eq!(
                responder
                    .handle("add expense 90000000000000000 on food")
                    .await
                    .unwrap(),
                ASK_AMOUNT
            );
        }
        assert!(store.list_expenses().await.unwrap().is_empty());
        assert_eq!(responder.handle("show expenses").await.unwrap(), NO_EXPENSES);
    }

    #[test]
    fn remaining_report_survives_extreme_totals() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let expenses = [
            expense(i64::MAX - 1, "food", "2026-10-02"),
            expense(i64::MAX - 1, "food", "2026-10-03"),
        ];
        let report = remaining_report(&expenses, today);
        assert!(report.starts_with("Here's what's left in your budget this month: Food: $"));
    }

    #[tokio::test]
    async fn unknown_category_is_other() {
        let (responder, _store) = responder();
        assert_eq!(
            responder.handle("add expense 3 for coffee").await.unwrap(),
            "Recorded an expense of $3.00 for other."
        );
    }

    #[tokio::test]
    async fn budget_overview_lists_categories_in_order() {
        let (responder, _store) = responder();
        assert_eq!(
            responder.handle("show my budget").await.unwrap(),
            "Here's your monthly budget: Food: $500. Transportation: $200. Entertainment: $150. Utilities: $300. Shopping: $200."
        );
    }

    #[tokio::test]
    async fn budget_remaining_uses_recorded_expenses() {
        let (responder, _store) = responder();
        responder.handle("add expense 20 on food").await.unwrap();
        let reply = responder.handle("how much budget is left").await.unwrap();
        assert!(reply.contains("Food: $480.00 left of $500."), "{reply}");
        assert!(reply.contains("Shopping: $200.00 left of $200."));
    }

    #[test]
    fn remaining_report_ignores_other_months_and_flags_overspend() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let expenses = [
            expense(60_000, "food", "2026-10-02"),
            expense(10_000, "food", "2026-09-30"),
            expense(450, "coffee", "2026-10-03"),
        ];
        let report = remaining_report(&expenses, today);
        assert!(report.contains("Food: $100.00 over the $500 limit."), "{report}");
        assert!(report.contains("Uncategorized spending: $4.50."));
    }

    #[tokio::test]
    async fn saving_tips_come_from_the_table() {
        let store = Arc::new(MemoryStore::new());
        let responder = FinanceResponder::new(store, Arc::new(ThreadRandom));
        for _ in 0..20 {
            let tip = responder.handle("money saving tips").await.unwrap();
            assert!(SAVING_TIPS.contains(&tip.as_str()));
        }
    }

    #[tokio::test]
    async fn generic_reply() {
        let (responder, _store) = responder();
        assert_eq!(responder.handle("finance").await.unwrap(), GENERIC_REPLY);
    }
}
