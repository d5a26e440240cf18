#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use chrono::NaiveDate;
use weeknight_mealplan::{Command, GenerateRequest, JsonPlanStore, PlannerConstraints};
use weeknight_recipe::{JsonRecipeStore, ProteinType, Recipe};

pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
}

pub fn recipe(id: &str, protein: Option<ProteinType>) -> Recipe {
    let mut recipe = Recipe::new(id, format!("Recipe {id}"));
    recipe.protein_type = protein;
    recipe.cook_time_min = Some(30);
    recipe
}

/// `count` dinners cycling through a handful of proteins.
pub fn recipes(count: usize) -> Vec<Recipe> {
    let proteins = [
        ProteinType::Beef,
        ProteinType::Chicken,
        ProteinType::Fish,
        ProteinType::Vegetarian,
    ];

    (0..count)
        .map(|i| recipe(&format!("r{i}"), Some(proteins[i % proteins.len()])))
        .collect()
}

pub fn request(dinners: u8, seed: &str) -> GenerateRequest {
    GenerateRequest {
        week_start_date: monday(),
        dinners_per_week: dinners,
        constraints: PlannerConstraints::default(),
        seed: Some(seed.to_owned()),
    }
}

pub async fn setup_command(dir: &Path, recipes: Vec<Recipe>) -> anyhow::Result<Command> {
    let recipe_store = JsonRecipeStore::open(dir.join("recipes.json")).await?;
    for recipe in recipes {
        recipe_store.insert(recipe).await?;
    }

    let plan_store = JsonPlanStore::open(dir.join("plans.json")).await?;

    Ok(Command::new(Arc::new(recipe_store), Arc::new(plan_store)))
}
