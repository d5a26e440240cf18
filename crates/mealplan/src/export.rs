//! Printable and spreadsheet renderings of a saved plan.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use weeknight_recipe::Recipe;

use crate::{MealPlan, MealPlanEntry};

const NO_RECIPE: &str = "No recipe planned";
const RULE_WIDTH: usize = 60;

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
    Txt,
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Json => "application/json",
            ExportFormat::Txt => "text/plain; charset=utf-8",
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanExport<'a> {
    meal_plan: PlanHeader<'a>,
    entries: Vec<EntryExport<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanHeader<'a> {
    id: &'a str,
    week_start_date: NaiveDate,
    dinners_per_week: u8,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EntryExport<'a> {
    date: NaiveDate,
    notes: Option<&'a str>,
    locked: bool,
    recipe: Option<&'a Recipe>,
}

/// Renders `plan` in `format`. `recipes` should hold every recipe the plan
/// references; entries whose recipe is missing render as unplanned.
pub fn export(
    plan: &MealPlan,
    recipes: &[Recipe],
    format: ExportFormat,
) -> weeknight_shared::Result<String> {
    let by_id = recipes
        .iter()
        .map(|r| (r.id.as_str(), r))
        .collect::<HashMap<_, _>>();

    match format {
        ExportFormat::Csv => to_csv(plan, &by_id),
        ExportFormat::Json => to_json(plan, &by_id),
        ExportFormat::Txt => Ok(to_txt(plan, &by_id)),
    }
}

fn lookup<'a>(by_id: &HashMap<&str, &'a Recipe>, entry: &MealPlanEntry) -> Option<&'a Recipe> {
    entry
        .recipe_id
        .as_deref()
        .and_then(|id| by_id.get(id).copied())
}

fn to_csv(plan: &MealPlan, by_id: &HashMap<&str, &Recipe>) -> weeknight_shared::Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer
        .write_record(["Date", "Recipe", "Ingredients", "Notes"])
        .map_err(anyhow::Error::from)?;

    for entry in &plan.entries {
        let recipe = lookup(by_id, entry);
        writer
            .write_record([
                entry.date.format("%Y-%m-%d (%A)").to_string(),
                recipe.map_or_else(|| NO_RECIPE.to_owned(), |r| r.title.clone()),
                recipe.map(|r| r.ingredients.join("; ")).unwrap_or_default(),
                entry.notes.clone().unwrap_or_default(),
            ])
            .map_err(anyhow::Error::from)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("failed to flush csv export: {e}"))?;

    Ok(String::from_utf8(bytes).map_err(anyhow::Error::from)?)
}

fn to_json(plan: &MealPlan, by_id: &HashMap<&str, &Recipe>) -> weeknight_shared::Result<String> {
    let export = PlanExport {
        meal_plan: PlanHeader {
            id: &plan.id,
            week_start_date: plan.week_start_date,
            dinners_per_week: plan.dinners_per_week,
            created_at: plan.created_at,
        },
        entries: plan
            .entries
            .iter()
            .map(|entry| EntryExport {
                date: entry.date,
                notes: entry.notes.as_deref(),
                locked: entry.locked,
                recipe: lookup(by_id, entry),
            })
            .collect(),
    };

    Ok(serde_json::to_string_pretty(&export)?)
}

fn timing(recipe: &Recipe) -> Option<String> {
    match (recipe.prep_time_min, recipe.cook_time_min) {
        (Some(prep), Some(cook)) => Some(format!("{prep} min prep, {cook} min cook")),
        (Some(prep), None) => Some(format!("{prep} min prep")),
        (None, Some(cook)) => Some(format!("{cook} min cook")),
        (None, None) => None,
    }
}

/// Day-by-day menu followed by a shopping list grouped by recipe.
fn to_txt(plan: &MealPlan, by_id: &HashMap<&str, &Recipe>) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut lines = vec![
        format!(
            "MEAL PLAN - Week of {}",
            plan.week_start_date.format("%B %d, %Y")
        ),
        rule.clone(),
        String::new(),
    ];

    let mut shopping: Vec<&Recipe> = vec![];

    for entry in &plan.entries {
        lines.push(format!("{}:", entry.date.format("%A, %B %d")));

        match lookup(by_id, entry) {
            Some(recipe) => {
                match timing(recipe) {
                    Some(timing) => lines.push(format!("  {} ({timing})", recipe.title)),
                    None => lines.push(format!("  {}", recipe.title)),
                }

                if !shopping.iter().any(|r| r.id == recipe.id) {
                    shopping.push(recipe);
                }
            }
            None => lines.push(format!("  {NO_RECIPE}")),
        }

        if let Some(notes) = &entry.notes {
            lines.push(format!("  Notes: {notes}"));
        }

        lines.push(String::new());
    }

    lines.push("SHOPPING LIST".to_owned());
    lines.push(rule);
    lines.push(String::new());

    for recipe in shopping.iter().filter(|r| !r.ingredients.is_empty()) {
        lines.push(format!("{}:", recipe.title));
        lines.extend(recipe.ingredients.iter().map(|i| format!("  - {i}")));
        lines.push(String::new());
    }

    lines.join("\n")
}
