//! Handles shared by the responders, built once at startup.

use crate::ports::{ExpenseStore, MealStore, RandomSource, RecordStore, TaskStore};
use std::sync::Arc;

/// Store handles and the random source. Cloning shares the same underlying store.
#[derive(Clone)]
pub struct AssistantContext {
    pub tasks: Arc<dyn TaskStore>,
    pub expenses: Arc<dyn ExpenseStore>,
    pub meals: Arc<dyn MealStore>,
    pub rng: Arc<dyn RandomSource>,
}

impl AssistantContext {
    /// Split one record store into the per-collection handles.
    pub fn new<S: RecordStore + 'static>(store: Arc<S>, rng: Arc<dyn RandomSource>) -> Self {
        Self {
            tasks: store.clone(),
            expenses: store.clone(),
            meals: store,
            rng,
        }
    }
}
