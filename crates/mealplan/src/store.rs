use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use weeknight_shared::json;

use crate::{MealPlan, RepeatWindow};

#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn get(&self, id: &str) -> weeknight_shared::Result<Option<MealPlan>>;

    /// Stores the whole plan. A plan without an id is given a fresh one and a
    /// creation time; `updated_at` is always refreshed.
    async fn save(&self, plan: MealPlan) -> weeknight_shared::Result<MealPlan>;

    /// Plans whose week starts within the optional bounds, newest first.
    async fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> weeknight_shared::Result<Vec<MealPlan>>;

    async fn delete(&self, id: &str) -> weeknight_shared::Result<bool>;

    /// Plans starting in the `within_weeks` weeks before `before`.
    async fn list_prior(
        &self,
        before: NaiveDate,
        within_weeks: u32,
    ) -> weeknight_shared::Result<Vec<MealPlan>> {
        match RepeatWindow::new(before, within_weeks) {
            Some(window) => self.list(Some(window.from), Some(window.to)).await,
            None => Ok(vec![]),
        }
    }
}

pub struct JsonPlanStore {
    path: Option<PathBuf>,
    plans: RwLock<Vec<MealPlan>>,
}

impl JsonPlanStore {
    pub async fn open(path: impl AsRef<Path>) -> weeknight_shared::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let plans: Vec<MealPlan> = json::load(&path).await?;

        tracing::debug!(path = %path.display(), count = plans.len(), "meal plans loaded");

        Ok(Self {
            path: Some(path),
            plans: RwLock::new(plans),
        })
    }

    pub fn in_memory(plans: Vec<MealPlan>) -> Self {
        Self {
            path: None,
            plans: RwLock::new(plans),
        }
    }

    async fn flush(&self, plans: &[MealPlan]) -> weeknight_shared::Result<()> {
        match self.path.as_ref() {
            Some(path) => json::persist(path, plans).await,
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PlanStore for JsonPlanStore {
    async fn get(&self, id: &str) -> weeknight_shared::Result<Option<MealPlan>> {
        let plans = self.plans.read().await;

        Ok(plans.iter().find(|p| p.id == id).cloned())
    }

    async fn save(&self, mut plan: MealPlan) -> weeknight_shared::Result<MealPlan> {
        let mut plans = self.plans.write().await;
        let now = Utc::now();
        plan.updated_at = now;

        let mut next = plans.clone();
        match next.iter_mut().find(|p| !plan.id.is_empty() && p.id == plan.id) {
            Some(existing) => {
                plan.created_at = existing.created_at;
                *existing = plan.clone();
            }
            None => {
                if plan.id.is_empty() {
                    plan.id = uuid::Uuid::new_v4().to_string();
                }
                plan.created_at = now;
                next.push(plan.clone());
            }
        }

        self.flush(&next).await?;
        *plans = next;

        Ok(plan)
    }

    async fn list(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> weeknight_shared::Result<Vec<MealPlan>> {
        let plans = self.plans.read().await;

        let mut found = plans
            .iter()
            .filter(|p| from.is_none_or(|from| from <= p.week_start_date))
            .filter(|p| to.is_none_or(|to| p.week_start_date <= to))
            .cloned()
            .collect::<Vec<_>>();

        found.sort_by(|a, b| {
            b.week_start_date
                .cmp(&a.week_start_date)
                .then(b.created_at.cmp(&a.created_at))
        });

        Ok(found)
    }

    async fn delete(&self, id: &str) -> weeknight_shared::Result<bool> {
        let mut plans = self.plans.write().await;
        let Some(pos) = plans.iter().position(|p| p.id == id) else {
            return Ok(false);
        };

        let mut next = plans.clone();
        next.remove(pos);

        self.flush(&next).await?;
        *plans = next;

        Ok(true)
    }
}
