use std::{collections::HashSet, sync::Arc};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;
use weeknight_recipe::{MealType, Recipe, RecipeStore};

use crate::{
    ExportFormat, GenerateRequest, GenerateResponse, MealPlan, MealPlanEntry, PlanStore,
    PlannerConstraints, RegenerateRequest, RegenerateResponse, RepeatWindow, check_entries, edit,
};

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveInput {
    pub week_start_date: NaiveDate,
    #[validate(range(min = 1, max = 7))]
    pub dinners_per_week: u8,
    #[serde(default)]
    pub constraints: PlannerConstraints,
    pub entries: Vec<MealPlanEntry>,
}

impl SaveInput {
    pub fn from_generated(req: GenerateRequest, res: GenerateResponse) -> Self {
        Self {
            week_start_date: req.week_start_date,
            dinners_per_week: req.dinners_per_week,
            constraints: req.constraints,
            entries: res.entries,
        }
    }
}

/// Partial update of a saved plan. Absent fields are left as they are.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInput {
    #[validate(range(min = 1, max = 7))]
    pub dinners_per_week: Option<u8>,
    pub constraints: Option<PlannerConstraints>,
    pub entries: Option<Vec<MealPlanEntry>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockInput {
    pub entry_dates: Vec<NaiveDate>,
    pub locked: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapOutput {
    pub plan: MealPlan,
    /// False when no other recipe was eligible and the day kept its recipe.
    pub swapped: bool,
}

/// Planner operations backed by the recipe and plan stores.
#[derive(Clone)]
pub struct Command {
    pub recipes: Arc<dyn RecipeStore>,
    pub plans: Arc<dyn PlanStore>,
    pub page_size: usize,
}

impl Command {
    pub fn new(recipes: Arc<dyn RecipeStore>, plans: Arc<dyn PlanStore>) -> Self {
        Self {
            recipes,
            plans,
            page_size: weeknight_recipe::DEFAULT_PAGE_SIZE,
        }
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Proposes a plan without saving it.
    #[tracing::instrument(skip_all, fields(week_start = %req.week_start_date, dinners = req.dinners_per_week))]
    pub async fn generate(&self, req: &GenerateRequest) -> weeknight_shared::Result<GenerateResponse> {
        req.validate()?;

        let candidates = self.candidates().await?;
        let recently_used = self
            .recently_used(req.week_start_date, req.constraints.avoid_repeat_weeks)
            .await?;

        crate::generate(req, &candidates, &recently_used)
    }

    /// Proposes new recipes for the unlocked entries without saving them.
    #[tracing::instrument(skip_all, fields(entries = req.existing_entries.len()))]
    pub async fn regenerate(
        &self,
        req: &RegenerateRequest,
    ) -> weeknight_shared::Result<RegenerateResponse> {
        check_entries(&req.existing_entries)?;

        let candidates = self.candidates().await?;
        let recently_used = self
            .recently_used(req.existing_entries[0].date, req.constraints.avoid_repeat_weeks)
            .await?;

        crate::regenerate(req, &candidates, &recently_used)
    }

    #[tracing::instrument(skip_all, fields(week_start = %input.week_start_date))]
    pub async fn create(&self, input: SaveInput) -> weeknight_shared::Result<MealPlan> {
        input.validate()?;

        let now = chrono::Utc::now();
        let plan = MealPlan {
            id: String::new(),
            week_start_date: input.week_start_date,
            dinners_per_week: input.dinners_per_week,
            constraints: input.constraints,
            entries: input.entries,
            created_at: now,
            updated_at: now,
        };

        self.persist(plan).await
    }

    #[tracing::instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: UpdateInput) -> weeknight_shared::Result<MealPlan> {
        input.validate()?;

        let mut plan = self.load(id).await?;

        if let Some(dinners_per_week) = input.dinners_per_week {
            plan.dinners_per_week = dinners_per_week;
        }

        if let Some(constraints) = input.constraints {
            plan.constraints = constraints;
        }

        if let Some(entries) = input.entries {
            plan.entries = entries;
        }

        self.persist(plan).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn regenerate_plan(
        &self,
        id: &str,
        seed: Option<String>,
    ) -> weeknight_shared::Result<MealPlan> {
        let mut plan = self.load(id).await?;

        let req = RegenerateRequest {
            existing_entries: plan.entries.clone(),
            constraints: plan.constraints.clone(),
            seed,
        };
        plan.entries = self.regenerate(&req).await?.entries;

        self.persist(plan).await
    }

    #[tracing::instrument(skip(self, input), fields(dates = input.entry_dates.len(), locked = input.locked))]
    pub async fn lock(&self, id: &str, input: LockInput) -> weeknight_shared::Result<MealPlan> {
        let mut plan = self.load(id).await?;
        edit::set_locked(&mut plan.entries, &input.entry_dates, input.locked)?;

        self.persist(plan).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn swap(
        &self,
        id: &str,
        date: NaiveDate,
        seed: Option<String>,
    ) -> weeknight_shared::Result<SwapOutput> {
        let mut plan = self.load(id).await?;
        let candidates = self.candidates().await?;
        let recently_used = self
            .recently_used(plan.week_start_date, plan.constraints.avoid_repeat_weeks)
            .await?;

        let swapped = edit::swap(
            &mut plan.entries,
            date,
            &candidates,
            &plan.constraints,
            &recently_used,
            seed.as_deref(),
        )?;

        if swapped.is_none() {
            return Ok(SwapOutput {
                plan,
                swapped: false,
            });
        }

        Ok(SwapOutput {
            plan: self.persist(plan).await?,
            swapped: true,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear(&self, id: &str, date: NaiveDate) -> weeknight_shared::Result<MealPlan> {
        let mut plan = self.load(id).await?;
        edit::clear(&mut plan.entries, date)?;

        self.persist(plan).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn toggle_lock(&self, id: &str, date: NaiveDate) -> weeknight_shared::Result<MealPlan> {
        let mut plan = self.load(id).await?;
        edit::toggle_lock(&mut plan.entries, date)?;

        self.persist(plan).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn select(
        &self,
        id: &str,
        date: NaiveDate,
        recipe_id: &str,
    ) -> weeknight_shared::Result<MealPlan> {
        let mut plan = self.load(id).await?;
        let Some(recipe) = self.recipes.get(recipe_id).await? else {
            return Err(weeknight_shared::Error::NotFound);
        };

        edit::select(&mut plan.entries, date, recipe.id)?;

        self.persist(plan).await
    }

    pub async fn load(&self, id: &str) -> weeknight_shared::Result<MealPlan> {
        self.plans
            .get(id)
            .await?
            .ok_or(weeknight_shared::Error::NotFound)
    }

    pub async fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> weeknight_shared::Result<Vec<MealPlan>> {
        self.plans.list(from, to).await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> weeknight_shared::Result<()> {
        if !self.plans.delete(id).await? {
            return Err(weeknight_shared::Error::NotFound);
        }

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub async fn export(&self, id: &str, format: ExportFormat) -> weeknight_shared::Result<String> {
        let plan = self.load(id).await?;
        let recipes = self.recipes_of(&plan).await?;

        crate::export(&plan, &recipes, format)
    }

    /// Recipes referenced by `plan`, in order of first use.
    pub async fn recipes_of(&self, plan: &MealPlan) -> weeknight_shared::Result<Vec<Recipe>> {
        let mut seen = HashSet::new();
        let mut recipes = vec![];

        for id in plan.recipe_ids() {
            if !seen.insert(id) {
                continue;
            }

            if let Some(recipe) = self.recipes.get(id).await? {
                recipes.push(recipe);
            }
        }

        Ok(recipes)
    }

    /// Validates the entries against the plan header, stores it and records
    /// the planned dates as the recipes' last cooked dates. Once the plan is
    /// stored, a failure to record cooked dates is only logged.
    async fn persist(&self, plan: MealPlan) -> weeknight_shared::Result<MealPlan> {
        check_entries(&plan.entries)?;

        if plan.entries.len() != plan.dinners_per_week as usize {
            weeknight_shared::user!(
                "expected {} entries, got {}",
                plan.dinners_per_week,
                plan.entries.len()
            );
        }

        if plan.entries[0].date != plan.week_start_date {
            weeknight_shared::user!(
                "first entry must be dated {}, got {}",
                plan.week_start_date,
                plan.entries[0].date
            );
        }

        let plan = self.plans.save(plan).await?;
        let cooked = plan
            .entries
            .iter()
            .filter_map(|e| e.recipe_id.clone().map(|id| (id, e.date)))
            .collect::<Vec<_>>();
        tracing::info!(plan_id = %plan.id, "meal plan saved");

        if let Err(e) = self.recipes.update_last_cooked(&cooked).await {
            tracing::warn!(plan_id = %plan.id, error = %e, "failed to record last cooked dates");
        }

        Ok(plan)
    }

    async fn candidates(&self) -> weeknight_shared::Result<Vec<Recipe>> {
        self.recipes
            .list_candidates(MealType::Dinner, Some(self.page_size))
            .await
    }

    async fn recently_used(
        &self,
        week_start: NaiveDate,
        weeks: u32,
    ) -> weeknight_shared::Result<HashSet<String>> {
        let Some(window) = RepeatWindow::new(week_start, weeks) else {
            return Ok(HashSet::new());
        };

        let prior = self.plans.list_prior(week_start, weeks).await?;

        Ok(window.recently_used(&prior))
    }
}
