use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use crate::MealPlan;

/// Range of week start dates whose recipes should not come back yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RepeatWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl RepeatWindow {
    /// Covers `[week_start - 7 * weeks days, week_start - 1 day]`, with the
    /// lower bound clamped to the earliest representable date. Zero weeks
    /// means there is nothing to avoid.
    pub fn new(week_start: NaiveDate, weeks: u32) -> Option<Self> {
        if weeks == 0 {
            return None;
        }

        let to = week_start.pred_opt()?;
        let from = week_start
            .checked_sub_days(Days::new(7 * u64::from(weeks)))
            .unwrap_or(NaiveDate::MIN);

        Some(Self { from, to })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Recipe ids served by plans starting inside the window.
    pub fn recently_used(&self, plans: &[MealPlan]) -> HashSet<String> {
        plans
            .iter()
            .filter(|plan| self.contains(plan.week_start_date))
            .flat_map(|plan| plan.recipe_ids())
            .map(str::to_owned)
            .collect()
    }
}
