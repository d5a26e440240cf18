use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use weeknight_recipe::{MealType, Recipe};
use weeknight_shared::WeekStart;

pub const DEFAULT_AVOID_REPEAT_WEEKS: u32 = 4;

/// User preferences applied when picking recipes for a week.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerConstraints {
    /// Ingredient fragments to avoid, matched case-insensitively against
    /// ingredient lines. Blank fragments are ignored.
    pub exclude_ingredients: Vec<String>,
    pub include_tags: BTreeSet<String>,
    pub exclude_tags: BTreeSet<String>,
    pub avoid_repeat_weeks: u32,
    pub balance_protein_types: bool,
    pub max_cook_time_min: Option<u32>,
    /// Pinned to the first days of the plan, in order.
    pub required_recipes: Vec<String>,
    pub start_week_on: WeekStart,
}

impl Default for PlannerConstraints {
    fn default() -> Self {
        Self {
            exclude_ingredients: vec![],
            include_tags: BTreeSet::new(),
            exclude_tags: BTreeSet::new(),
            avoid_repeat_weeks: DEFAULT_AVOID_REPEAT_WEEKS,
            balance_protein_types: true,
            max_cook_time_min: None,
            required_recipes: vec![],
            start_week_on: WeekStart::default(),
        }
    }
}

impl PlannerConstraints {
    pub fn has_tag_rules(&self) -> bool {
        !self.include_tags.is_empty() || !self.exclude_tags.is_empty()
    }

    /// Required recipe ids with duplicates removed, first occurrence wins.
    pub fn required_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();

        self.required_recipes
            .iter()
            .map(|id| id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// A single rule a recipe must satisfy to enter the candidate pool.
pub trait Constraint {
    fn allows(&self, recipe: &Recipe) -> bool;
}

pub struct MealTypeConstraint(pub MealType);

impl Constraint for MealTypeConstraint {
    fn allows(&self, recipe: &Recipe) -> bool {
        recipe.meal_type == self.0
    }
}

/// Recipe must carry at least one of the tags. An empty set allows everything.
pub struct IncludeTagsConstraint<'a>(pub &'a BTreeSet<String>);

impl Constraint for IncludeTagsConstraint<'_> {
    fn allows(&self, recipe: &Recipe) -> bool {
        self.0.is_empty() || recipe.has_any_tag(self.0)
    }
}

pub struct ExcludeTagsConstraint<'a>(pub &'a BTreeSet<String>);

impl Constraint for ExcludeTagsConstraint<'_> {
    fn allows(&self, recipe: &Recipe) -> bool {
        !recipe.has_any_tag(self.0)
    }
}

/// Inclusive upper bound on cook time. Recipes without a cook time pass.
pub struct MaxCookTimeConstraint(pub u32);

impl Constraint for MaxCookTimeConstraint {
    fn allows(&self, recipe: &Recipe) -> bool {
        recipe.cook_time_min.is_none_or(|min| min <= self.0)
    }
}

pub struct ExcludeIngredientsConstraint<'a>(pub &'a [String]);

impl Constraint for ExcludeIngredientsConstraint<'_> {
    fn allows(&self, recipe: &Recipe) -> bool {
        !self.0.iter().any(|needle| recipe.mentions_ingredient(needle))
    }
}

/// Rejects recipes served in recent weeks.
pub struct RepeatAvoidanceConstraint<'a>(pub &'a HashSet<String>);

impl Constraint for RepeatAvoidanceConstraint<'_> {
    fn allows(&self, recipe: &Recipe) -> bool {
        !self.0.contains(&recipe.id)
    }
}
