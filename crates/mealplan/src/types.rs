use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use weeknight_shared::{DayLabel, WeekStart};

use crate::PlannerConstraints;

/// One planned day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanEntry {
    pub date: NaiveDate,
    /// `None` means no meal assigned for the day.
    #[serde(default)]
    pub recipe_id: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Locked entries survive regeneration untouched.
    #[serde(default)]
    pub locked: bool,
}

impl MealPlanEntry {
    pub fn new(date: NaiveDate, recipe_id: Option<String>) -> Self {
        Self {
            date,
            recipe_id,
            notes: None,
            locked: false,
        }
    }

    pub fn label(&self, start_on: WeekStart) -> DayLabel {
        DayLabel::new(self.date, start_on)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    #[serde(default)]
    pub id: String,
    pub week_start_date: NaiveDate,
    pub dinners_per_week: u8,
    #[serde(default)]
    pub constraints: PlannerConstraints,
    pub entries: Vec<MealPlanEntry>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl MealPlan {
    pub fn recipe_ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|e| e.recipe_id.as_deref())
    }
}

/// Checks that `entries` hold one entry per day, contiguous from their first
/// date, and that there are between 1 and 7 of them.
pub fn check_entries(entries: &[MealPlanEntry]) -> weeknight_shared::Result<()> {
    let Some(first) = entries.first() else {
        weeknight_shared::user!("a meal plan needs at least one entry");
    };

    if entries.len() > 7 {
        weeknight_shared::user!("a meal plan holds at most 7 entries, got {}", entries.len());
    }

    for (offset, entry) in entries.iter().enumerate() {
        let Some(expected) = first.date.checked_add_days(Days::new(offset as u64)) else {
            weeknight_shared::user!("entry {offset} falls past the last supported date");
        };
        if entry.date != expected {
            weeknight_shared::user!(
                "entry {offset} is dated {} but {expected} was expected",
                entry.date
            );
        }
    }

    Ok(())
}
