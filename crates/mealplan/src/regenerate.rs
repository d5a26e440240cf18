use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use weeknight_recipe::Recipe;

use crate::{
    CandidateFilter, MealPlanEntry, PlannerConstraints, Relaxation, Selector, check_entries,
};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateRequest {
    pub existing_entries: Vec<MealPlanEntry>,
    #[serde(default)]
    pub constraints: PlannerConstraints,
    #[serde(default)]
    pub seed: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateResponse {
    pub entries: Vec<MealPlanEntry>,
    pub relaxations: Vec<Relaxation>,
}

/// Picks new recipes for every unlocked entry. Locked entries come back
/// untouched and their recipes are avoided where possible.
pub fn regenerate(
    req: &RegenerateRequest,
    recipes: &[Recipe],
    recently_used: &HashSet<String>,
) -> weeknight_shared::Result<RegenerateResponse> {
    check_entries(&req.existing_entries)?;

    if req.existing_entries.iter().all(|e| e.locked) {
        return Ok(RegenerateResponse {
            entries: req.existing_entries.clone(),
            relaxations: vec![],
        });
    }

    let week_start = req.existing_entries[0].date;
    let constraints = &req.constraints;
    let pool = CandidateFilter::new(constraints, recently_used).apply(recipes);
    let by_id = recipes
        .iter()
        .map(|r| (r.id.as_str(), r))
        .collect::<HashMap<_, _>>();
    let mut selector = Selector::seeded(week_start, req.seed.as_deref())
        .balance_protein(constraints.balance_protein_types);

    let mut used = req
        .existing_entries
        .iter()
        .filter(|e| e.locked)
        .filter_map(|e| e.recipe_id.clone())
        .collect::<HashSet<_>>();

    let mut previous = None;
    let mut entries = Vec::with_capacity(req.existing_entries.len());

    for entry in &req.existing_entries {
        if entry.locked {
            previous = entry
                .recipe_id
                .as_deref()
                .and_then(|id| by_id.get(id))
                .and_then(|r| r.protein_type);
            entries.push(entry.clone());
            continue;
        }

        let recipe = selector.pick(&pool.recipes, &used, previous);
        if let Some(recipe) = recipe {
            tracing::debug!(date = %entry.date, recipe_id = %recipe.id, "dinner regenerated");
            used.insert(recipe.id.clone());
        }

        previous = recipe.and_then(|r| r.protein_type);
        entries.push(MealPlanEntry {
            recipe_id: recipe.map(|r| r.id.clone()),
            locked: false,
            ..entry.clone()
        });
    }

    Ok(RegenerateResponse {
        entries,
        relaxations: pool.relaxations,
    })
}
