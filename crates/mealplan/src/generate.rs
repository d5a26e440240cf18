use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;
use weeknight_recipe::{ProteinType, Recipe};
use weeknight_shared::week_dates;

use crate::{CandidateFilter, MealPlanEntry, PlannerConstraints, Relaxation, Selector};

pub const EMPTY_MESSAGE: &str = "No recipes found matching the constraints";

#[derive(Clone, Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub week_start_date: NaiveDate,
    #[validate(range(min = 1, max = 7))]
    pub dinners_per_week: u8,
    #[serde(default)]
    pub constraints: PlannerConstraints,
    #[serde(default)]
    pub seed: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub entries: Vec<MealPlanEntry>,
    /// Every recipe referenced by `entries`, in order of first use.
    pub recipes: Vec<Recipe>,
    pub relaxations: Vec<Relaxation>,
    pub message: String,
}

/// Builds a week of dinners out of `recipes`.
///
/// Required recipes take the first days, the rest are drawn from the
/// filtered pool. An empty recipe list yields entries without a recipe.
pub fn generate(
    req: &GenerateRequest,
    recipes: &[Recipe],
    recently_used: &HashSet<String>,
) -> weeknight_shared::Result<GenerateResponse> {
    req.validate()?;

    let constraints = &req.constraints;
    let pool = CandidateFilter::new(constraints, recently_used).apply(recipes);
    let required = resolve_required(constraints, recipes);
    let mut selector = Selector::seeded(req.week_start_date, req.seed.as_deref())
        .balance_protein(constraints.balance_protein_types);

    let mut used = HashSet::new();
    let mut previous: Option<ProteinType> = None;
    let mut picked: Vec<&Recipe> = vec![];
    let mut entries = Vec::with_capacity(req.dinners_per_week as usize);

    for (day, date) in week_dates(req.week_start_date, req.dinners_per_week as usize)?
        .into_iter()
        .enumerate()
    {
        let recipe = match required.get(day) {
            Some(recipe) => Some(*recipe),
            None => selector.pick(&pool.recipes, &used, previous),
        };

        if let Some(recipe) = recipe {
            tracing::debug!(%date, recipe_id = %recipe.id, "dinner selected");

            if used.insert(recipe.id.clone()) {
                picked.push(recipe);
            }
        }

        previous = recipe.and_then(|r| r.protein_type);
        entries.push(MealPlanEntry::new(date, recipe.map(|r| r.id.clone())));
    }

    let message = if picked.is_empty() {
        EMPTY_MESSAGE.to_owned()
    } else {
        format!("Generated meal plan with {} recipes", picked.len())
    };

    Ok(GenerateResponse {
        entries,
        recipes: picked.into_iter().cloned().collect(),
        relaxations: pool.relaxations,
        message,
    })
}

/// Looks required ids up in the whole input, ignoring every filter.
fn resolve_required<'a>(constraints: &PlannerConstraints, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    let by_id = recipes
        .iter()
        .map(|r| (r.id.as_str(), r))
        .collect::<HashMap<_, _>>();

    constraints
        .required_ids()
        .into_iter()
        .filter_map(|id| {
            let recipe = by_id.get(id).copied();
            if recipe.is_none() {
                tracing::warn!(recipe_id = %id, "required recipe not found, skipping");
            }
            recipe
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(dinners: u8) -> GenerateRequest {
        GenerateRequest {
            week_start_date: NaiveDate::from_ymd_opt(2025, 10, 20).unwrap(),
            dinners_per_week: dinners,
            constraints: PlannerConstraints::default(),
            seed: Some("unit".to_owned()),
        }
    }

    #[test]
    fn test_rejects_dinner_count_out_of_range() {
        let recipes = vec![Recipe::new("1", "Tacos")];
        assert!(generate(&request(0), &recipes, &HashSet::new()).is_err());
        assert!(generate(&request(8), &recipes, &HashSet::new()).is_err());
    }

    #[test]
    fn test_empty_input_gives_empty_days() {
        let res = generate(&request(3), &[], &HashSet::new()).unwrap();
        assert_eq!(res.entries.len(), 3);
        assert!(res.entries.iter().all(|e| e.recipe_id.is_none() && !e.locked));
        assert!(res.recipes.is_empty());
        assert!(res.relaxations.is_empty());
        assert_eq!(res.message, EMPTY_MESSAGE);
    }

    #[test]
    fn test_unknown_required_recipe_is_skipped() {
        let recipes = vec![Recipe::new("1", "Tacos"), Recipe::new("2", "Curry")];
        let mut req = request(2);
        req.constraints.required_recipes = vec!["missing".into(), "2".into()];

        let res = generate(&req, &recipes, &HashSet::new()).unwrap();
        assert_eq!(res.entries[0].recipe_id.as_deref(), Some("2"));
        assert_eq!(res.entries[1].recipe_id.as_deref(), Some("1"));
        assert_eq!(res.message, "Generated meal plan with 2 recipes");
    }
}
