pub mod config;
pub mod error;
pub mod observability;
pub mod routes;

pub use config::Config;
pub use routes::{AppState, router};

use std::sync::Arc;

use weeknight_mealplan::{Command, JsonPlanStore};
use weeknight_recipe::JsonRecipeStore;

/// Opens the configured JSON stores and wires them into the planner.
pub async fn open_command(config: &Config) -> anyhow::Result<Command> {
    let recipes = JsonRecipeStore::open(&config.store.recipes_path).await?;
    let plans = JsonPlanStore::open(&config.store.plans_path).await?;

    Ok(Command::new(Arc::new(recipes), Arc::new(plans)).page_size(config.planner.page_size))
}
