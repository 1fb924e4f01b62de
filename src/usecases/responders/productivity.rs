//! Productivity: task list management plus reminder and schedule prompts.
//!
//! Owns the task collection. Only "add task"/"new task" and "complete task" write to it.

use super::{Responder, ResponderId};
use crate::domain::{DomainError, NewTask, Priority, Task};
use crate::ports::TaskStore;
use crate::shared::text::{after_any, contains_any, first_number, normalize};
use std::sync::Arc;
use tracing::info;

const ADD_PHRASES: &[&str] = &["add tasks", "add task", "new tasks", "new task"];
const LIST_PHRASES: &[&str] = &["list tasks", "show tasks"];

/// Phrases stripped from a task description once they have set its priority.
const HIGH_PRIORITY_PHRASES: &[&str] = &["with high priority", "high priority", "urgent"];
const LOW_PRIORITY_PHRASES: &[&str] = &["with low priority", "low priority"];

const ASK_DESCRIPTION: &str = "What task would you like to add? Please tell me the task description.";
const ASK_NUMBER: &str = "Which task number would you like to mark as complete?";
const NO_TASKS: &str = "You have no tasks scheduled.";
const REMINDER_REPLY: &str = "I can set reminders for you. What would you like to be reminded about and when?";
const SCHEDULE_REPLY: &str = "I can help you manage your schedule. Would you like to add an appointment or view your calendar?";
const GENERIC_REPLY: &str = "I can help you add tasks, set reminders, manage your schedule, and boost productivity. What would you like to do?";

pub struct ProductivityResponder {
    tasks: Arc<dyn TaskStore>,
}

impl ProductivityResponder {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    async fn add(&self, details: &str) -> Result<String, DomainError> {
        let (description, priority) = parse_task(details);
        if description.is_empty() {
            return Ok(ASK_DESCRIPTION.to_string());
        }
        let task = self
            .tasks
            .create_task(NewTask {
                description,
                priority,
            })
            .await?;
        info!(task_id = task.id, priority = %task.priority, "task added");
        Ok(format!(
            "Task added: {} with {} priority.",
            task.description, task.priority
        ))
    }

    async fn list(&self) -> Result<String, DomainError> {
        let tasks = self.tasks.list_tasks().await?;
        if tasks.is_empty() {
            return Ok(NO_TASKS.to_string());
        }
        let items: Vec<String> = tasks
            .iter()
            .enumerate()
            .map(|(i, task)| format_task(i + 1, task))
            .collect();
        Ok(format!("Here are your current tasks: {}", items.join(" ")))
    }

    async fn complete(&self, command: &str) -> Result<String, DomainError> {
        let Some(number) = first_number(command) else {
            return Ok(ASK_NUMBER.to_string());
        };
        let tasks = self.tasks.list_tasks().await?;
        let Some(task) = (number as usize)
            .checked_sub(1)
            .and_then(|i| tasks.get(i))
        else {
            return Ok(format!("I couldn't find task number {}.", number));
        };
        if task.completed {
            return Ok(format!(
                "Task {} is already complete: {}.",
                number, task.description
            ));
        }
        if !self.tasks.complete_task(task.id).await? {
            return Ok(format!("I couldn't find task number {}.", number));
        }
        info!(task_id = task.id, "task completed");
        Ok(format!(
            "Marked task {} as complete: {}.",
            number, task.description
        ))
    }
}

/// Split "buy milk with high priority" into ("buy milk", High). Default priority is medium.
fn parse_task(details: &str) -> (String, Priority) {
    let (priority, phrases) = if contains_any(details, HIGH_PRIORITY_PHRASES) {
        (Priority::High, HIGH_PRIORITY_PHRASES)
    } else if contains_any(details, LOW_PRIORITY_PHRASES) {
        (Priority::Low, LOW_PRIORITY_PHRASES)
    } else {
        (Priority::Medium, &[][..])
    };

    let mut description = details.to_string();
    for phrase in phrases {
        description = description.replace(phrase, " ");
    }
    let description = description
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_start_matches(':')
        .trim()
        .to_string();
    (description, priority)
}

fn format_task(number: usize, task: &Task) -> String {
    let status = if task.completed { " (completed)" } else { "" };
    format!(
        "{}. {} - Priority: {}{}.",
        number, task.description, task.priority, status
    )
}

#[async_trait::async_trait]
impl Responder for ProductivityResponder {
    fn id(&self) -> ResponderId {
        ResponderId::Productivity
    }

    async fn handle(&self, utterance: &str) -> Result<String, DomainError> {
        let command = normalize(utterance);

        if let Some(details) = after_any(&command, ADD_PHRASES) {
            return self.add(details).await;
        }
        if contains_any(&command, LIST_PHRASES) {
            return self.list().await;
        }
        if command.contains("complete task") {
            return self.complete(&command).await;
        }
        if command.contains("reminder") {
            return Ok(REMINDER_REPLY.to_string());
        }
        if command.contains("schedule") {
            return Ok(SCHEDULE_REPLY.to_string());
        }
        Ok(GENERIC_REPLY.to_string())
    }
}
