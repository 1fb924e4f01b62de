//! Meal planning and nutrition: recipe suggestions, daily plans, meal logging.
//!
//! Owns the meal collection. Only "log meal"/"add meal"/"record meal" write to it.

use super::{Responder, ResponderId};
use crate::domain::{DomainError, Meal, MealType, NewMeal};
use crate::ports::{MealStore, RandomSource, pick};
use crate::shared::text::{after_any, contains_any, normalize};
use chrono::Local;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipe {
    pub name: &'static str,
    pub calories: u32,
    pub prep_time: &'static str,
}

const fn recipe(name: &'static str, calories: u32, prep_time: &'static str) -> Recipe {
    Recipe {
        name,
        calories,
        prep_time,
    }
}

pub const BREAKFAST: &[Recipe] = &[
    recipe("Oatmeal with berries", 300, "5 minutes"),
    recipe("Greek yogurt parfait", 250, "3 minutes"),
    recipe("Avocado toast", 350, "5 minutes"),
];

pub const LUNCH: &[Recipe] = &[
    recipe("Grilled chicken salad", 400, "15 minutes"),
    recipe("Quinoa bowl", 450, "20 minutes"),
    recipe("Turkey sandwich", 380, "5 minutes"),
];

pub const DINNER: &[Recipe] = &[
    recipe("Baked salmon with vegetables", 500, "25 minutes"),
    recipe("Chicken stir-fry", 450, "20 minutes"),
    recipe("Vegetarian pasta", 400, "15 minutes"),
];

pub const NUTRITION_TIPS: &[&str] = &[
    "Aim for 5 servings of fruits and vegetables daily.",
    "Include lean proteins in every meal.",
    "Choose whole grains over refined grains.",
    "Stay hydrated with 8 glasses of water daily.",
];

pub const LOG_PHRASES: &[&str] = &["log meal", "add meal", "record meal"];
/// "history" would route to study first, so none of these may contain a study keyword.
pub const HISTORY_PHRASES: &[&str] = &["meal log", "my meals", "logged meals"];

/// Highest calorie count accepted for one logged meal.
pub const MAX_MEAL_CALORIES: u32 = 10_000;

/// Words dropped from a free-text meal name.
const FILLER_WORDS: &[&str] = &["for", "i", "had", "ate", "a", "an", "my", "of", ":"];

const CALORIES_INFO: &str = "The average daily calorie needs are about 2000 for women and 2500 for men, but this varies based on age, activity level, and other factors.";
const ASK_MEAL_TYPE: &str = "Which meal was it: breakfast, lunch, or dinner?";
const ASK_MEAL_NAME: &str = "What did you eat? Tell me the meal name.";
const TOO_MANY_CALORIES: &str = "That calorie count looks too high for one meal. Please tell me the calories again.";
const NO_MEALS: &str = "You haven't logged any meals yet.";
const GENERIC_REPLY: &str = "I can help you plan meals, suggest recipes, provide nutrition information, and give healthy eating tips. What would you like to know?";

pub fn recipes_for(meal_type: MealType) -> &'static [Recipe] {
    match meal_type {
        MealType::Breakfast => BREAKFAST,
        MealType::Lunch => LUNCH,
        MealType::Dinner => DINNER,
    }
}

/// What a logging utterance said about the meal.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MealEntry {
    meal_type: Option<MealType>,
    name: String,
    calories: u64,
    ingredients: String,
}

/// Parse "oatmeal with berries for breakfast 320 calories" or
/// "dinner pasta with tomato, basil". Known recipe names supply default calories.
fn parse_meal_entry(details: &str) -> MealEntry {
    let meal_type = MealType::ALL
        .into_iter()
        .find(|t| details.contains(t.as_str()));

    let mut tokens: Vec<&str> = details.split_whitespace().collect();
    let mut stated_calories = None;
    if let Some(i) = tokens
        .windows(2)
        .position(|w| w[1].starts_with("cal") && w[0].parse::<u64>().is_ok())
    {
        stated_calories = tokens[i].parse::<u64>().ok();
        tokens.drain(i..i + 2);
    }
    let rest = tokens.join(" ");

    let known = [BREAKFAST, LUNCH, DINNER]
        .into_iter()
        .flatten()
        .find(|r| rest.contains(&r.name.to_lowercase()));
    if let Some(recipe) = known {
        return MealEntry {
            meal_type,
            name: recipe.name.to_string(),
            calories: stated_calories.unwrap_or(u64::from(recipe.calories)),
            ingredients: String::new(),
        };
    }

    let (name_part, ingredients) = match rest.split_once(" with ") {
        Some((name, ingredients)) => (name.to_string(), ingredients.trim().to_string()),
        None => (rest.clone(), String::new()),
    };
    let name = name_part
        .split_whitespace()
        .filter(|w| !FILLER_WORDS.contains(w))
        .filter(|w| !MealType::ALL.iter().any(|t| t.as_str() == *w))
        .collect::<Vec<_>>()
        .join(" ");

    MealEntry {
        meal_type,
        name,
        calories: stated_calories.unwrap_or(0),
        ingredients,
    }
}

pub struct MealPlannerResponder {
    meals: Arc<dyn MealStore>,
    rng: Arc<dyn RandomSource>,
}

impl MealPlannerResponder {
    pub fn new(meals: Arc<dyn MealStore>, rng: Arc<dyn RandomSource>) -> Self {
        Self { meals, rng }
    }

    fn suggest(&self, meal_type: MealType) -> &'static Recipe {
        pick(self.rng.as_ref(), recipes_for(meal_type))
    }

    async fn log(&self, details: &str) -> Result<String, DomainError> {
        let entry = parse_meal_entry(details);
        let Some(meal_type) = entry.meal_type else {
            return Ok(ASK_MEAL_TYPE.to_string());
        };
        if entry.name.is_empty() {
            return Ok(ASK_MEAL_NAME.to_string());
        }
        let Some(calories) = u32::try_from(entry.calories)
            .ok()
            .filter(|c| *c <= MAX_MEAL_CALORIES)
        else {
            return Ok(TOO_MANY_CALORIES.to_string());
        };
        let meal = self
            .meals
            .create_meal(NewMeal {
                name: entry.name,
                meal_type,
                calories,
                ingredients: entry.ingredients,
                date: Local::now().date_naive(),
            })
            .await?;
        info!(meal_id = meal.id, meal_type = %meal.meal_type, calories = meal.calories, "meal logged");
        Ok(format!(
            "Logged {}: {} ({} calories).",
            meal.meal_type, meal.name, meal.calories
        ))
    }

    async fn history(&self) -> Result<String, DomainError> {
        let meals = self.meals.list_meals().await?;
        if meals.is_empty() {
            return Ok(NO_MEALS.to_string());
        }
        let total: u64 = meals.iter().map(|m| u64::from(m.calories)).sum();
        let items: Vec<String> = meals.iter().map(format_meal).collect();
        let noun = if meals.len() == 1 { "meal" } else { "meals" };
        Ok(format!(
            "You've logged {} {}: {} Total calories: {}.",
            meals.len(),
            noun,
            items.join(" "),
            total
        ))
    }
}

fn format_meal(meal: &Meal) -> String {
    format!(
        "{} - {} ({} calories).",
        meal.meal_type.label(),
        meal.name,
        meal.calories
    )
}

#[async_trait::async_trait]
impl Responder for MealPlannerResponder {
    fn id(&self) -> ResponderId {
        ResponderId::MealPlanner
    }

    async fn handle(&self, utterance: &str) -> Result<String, DomainError> {
        let request = normalize(utterance);

        if let Some(details) = after_any(&request, LOG_PHRASES) {
            return self.log(details).await;
        }
        if contains_any(&request, HISTORY_PHRASES) {
            return self.history().await;
        }
        if request.contains("breakfast") {
            let meal = self.suggest(MealType::Breakfast);
            return Ok(format!(
                "For breakfast, I suggest {}. It has {} calories and takes {} to prepare.",
                meal.name, meal.calories, meal.prep_time
            ));
        }
        if request.contains("lunch") {
            let meal = self.suggest(MealType::Lunch);
            return Ok(format!(
                "For lunch, try {}. It has {} calories and takes {} to prepare.",
                meal.name, meal.calories, meal.prep_time
            ));
        }
        if request.contains("dinner") {
            let meal = self.suggest(MealType::Dinner);
            return Ok(format!(
                "For dinner, I recommend {}. It has {} calories and takes {} to prepare.",
                meal.name, meal.calories, meal.prep_time
            ));
        }
        if request.contains("meal plan") {
            let breakfast = self.suggest(MealType::Breakfast);
            let lunch = self.suggest(MealType::Lunch);
            let dinner = self.suggest(MealType::Dinner);
            return Ok(format!(
                "Here's your daily meal plan: Breakfast - {}, Lunch - {}, Dinner - {}. Total calories: approximately {}.",
                breakfast.name,
                lunch.name,
                dinner.name,
                breakfast.calories + lunch.calories + dinner.calories
            ));
        }
        if request.contains("calories") {
            return Ok(CALORIES_INFO.to_string());
        }
        if request.contains("nutrition") {
            return Ok(pick(self.rng.as_ref(), NUTRITION_TIPS).to_string());
        }
        Ok(GENERIC_REPLY.to_string())
    }
}
