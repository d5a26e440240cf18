use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use weeknight_shared::json;

use crate::{MealType, Recipe};

pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Source of candidate recipes for the planner.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Recipes of the given meal type, in stable store order.
    async fn list_candidates(
        &self,
        meal_type: MealType,
        page_size: Option<usize>,
    ) -> weeknight_shared::Result<Vec<Recipe>>;

    async fn get(&self, id: &str) -> weeknight_shared::Result<Option<Recipe>>;

    /// Records the date each recipe was last put on a saved plan.
    async fn update_last_cooked(
        &self,
        cooked: &[(String, NaiveDate)],
    ) -> weeknight_shared::Result<()>;
}

/// Recipe collection kept in memory and mirrored to a JSON file when a path
/// is set.
pub struct JsonRecipeStore {
    path: Option<PathBuf>,
    recipes: RwLock<Vec<Recipe>>,
}

impl JsonRecipeStore {
    pub async fn open(path: impl AsRef<Path>) -> weeknight_shared::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let recipes: Vec<Recipe> = json::load(&path).await?;

        tracing::debug!(path = %path.display(), count = recipes.len(), "recipes loaded");

        Ok(Self {
            path: Some(path),
            recipes: RwLock::new(recipes),
        })
    }

    pub fn in_memory(recipes: Vec<Recipe>) -> Self {
        Self {
            path: None,
            recipes: RwLock::new(recipes),
        }
    }

    pub async fn insert(&self, recipe: Recipe) -> weeknight_shared::Result<()> {
        let mut recipes = self.recipes.write().await;
        match recipes.iter_mut().find(|r| r.id == recipe.id) {
            Some(existing) => *existing = recipe,
            None => recipes.push(recipe),
        }

        self.flush(&recipes).await
    }

    async fn flush(&self, recipes: &[Recipe]) -> weeknight_shared::Result<()> {
        match self.path.as_ref() {
            Some(path) => json::persist(path, recipes).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecipeStore for JsonRecipeStore {
    async fn list_candidates(
        &self,
        meal_type: MealType,
        page_size: Option<usize>,
    ) -> weeknight_shared::Result<Vec<Recipe>> {
        let recipes = self.recipes.read().await;

        Ok(recipes
            .iter()
            .filter(|r| r.meal_type == meal_type)
            .take(page_size.unwrap_or(DEFAULT_PAGE_SIZE))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> weeknight_shared::Result<Option<Recipe>> {
        let recipes = self.recipes.read().await;

        Ok(recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn update_last_cooked(
        &self,
        cooked: &[(String, NaiveDate)],
    ) -> weeknight_shared::Result<()> {
        if cooked.is_empty() {
            return Ok(());
        }

        let mut recipes = self.recipes.write().await;
        let mut changed = false;

        for (id, date) in cooked {
            let Some(recipe) = recipes.iter_mut().find(|r| &r.id == id) else {
                tracing::warn!(recipe_id = %id, "cannot record last cooked date, recipe not found");
                continue;
            };

            if recipe.last_cooked_at.is_none_or(|last| last < *date) {
                recipe.last_cooked_at = Some(*date);
                changed = true;
            }
        }

        if !changed {
            return Ok(());
        }

        self.flush(&recipes).await
    }
}
