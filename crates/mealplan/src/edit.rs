//! Edits touching a single day of a plan. Days are addressed by date and an
//! unknown date is a caller error.

use std::collections::HashSet;

use chrono::NaiveDate;
use weeknight_recipe::Recipe;

use crate::{CandidateFilter, MealPlanEntry, PlannerConstraints, Selector};

fn position(entries: &[MealPlanEntry], date: NaiveDate) -> weeknight_shared::Result<usize> {
    match entries.iter().position(|e| e.date == date) {
        Some(pos) => Ok(pos),
        None => weeknight_shared::user!("no entry for {date}"),
    }
}

/// Replaces the recipe of the entry on `date` with a different one.
///
/// Returns the new recipe id, or `None` when no other recipe is eligible, in
/// which case the entry is left as it was.
pub fn swap(
    entries: &mut [MealPlanEntry],
    date: NaiveDate,
    recipes: &[Recipe],
    constraints: &PlannerConstraints,
    recently_used: &HashSet<String>,
    seed: Option<&str>,
) -> weeknight_shared::Result<Option<String>> {
    let pos = position(entries, date)?;
    let current = entries[pos].recipe_id.clone();

    let pool = CandidateFilter::new(constraints, recently_used)
        .excluding(current.as_deref())
        .apply(recipes);

    let used = entries
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != pos)
        .filter_map(|(_, e)| e.recipe_id.clone())
        .collect::<HashSet<_>>();

    let previous = match pos.checked_sub(1) {
        Some(prev) => entries[prev]
            .recipe_id
            .as_deref()
            .and_then(|id| recipes.iter().find(|r| r.id == id))
            .and_then(|r| r.protein_type),
        None => None,
    };

    let mut selector =
        Selector::seeded(date, seed).balance_protein(constraints.balance_protein_types);

    let Some(recipe) = selector.pick(&pool.recipes, &used, previous) else {
        tracing::info!(%date, "no alternative recipe to swap in");
        return Ok(None);
    };

    entries[pos].recipe_id = Some(recipe.id.clone());

    Ok(Some(recipe.id.clone()))
}

/// Removes the recipe but keeps the day.
pub fn clear(entries: &mut [MealPlanEntry], date: NaiveDate) -> weeknight_shared::Result<()> {
    let pos = position(entries, date)?;
    entries[pos].recipe_id = None;

    Ok(())
}

/// Flips the lock of the entry on `date` and returns the new state.
pub fn toggle_lock(entries: &mut [MealPlanEntry], date: NaiveDate) -> weeknight_shared::Result<bool> {
    let pos = position(entries, date)?;
    entries[pos].locked = !entries[pos].locked;

    Ok(entries[pos].locked)
}

/// Locks or unlocks every listed date. Nothing changes if one date is unknown.
pub fn set_locked(
    entries: &mut [MealPlanEntry],
    dates: &[NaiveDate],
    locked: bool,
) -> weeknight_shared::Result<()> {
    let positions = dates
        .iter()
        .map(|date| position(entries, *date))
        .collect::<weeknight_shared::Result<Vec<_>>>()?;

    for pos in positions {
        entries[pos].locked = locked;
    }

    Ok(())
}

pub fn select(
    entries: &mut [MealPlanEntry],
    date: NaiveDate,
    recipe_id: impl Into<String>,
) -> weeknight_shared::Result<()> {
    let pos = position(entries, date)?;
    entries[pos].recipe_id = Some(recipe_id.into());

    Ok(())
}
