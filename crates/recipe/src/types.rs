use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MealType {
    #[default]
    Dinner,
    Lunch,
    Breakfast,
    Snack,
    Misc,
}

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
    Hash,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProteinType {
    Beef,
    Chicken,
    Pork,
    Fish,
    Seafood,
    Vegetarian,
    Vegan,
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub meal_type: MealType,
    #[serde(default)]
    pub protein_type: Option<ProteinType>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Free-text ingredient lines, e.g. "200 g peeled shrimp".
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub prep_time_min: Option<u32>,
    #[serde(default)]
    pub cook_time_min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_cooked_at: Option<NaiveDate>,
}

impl Recipe {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn has_any_tag(&self, tags: &BTreeSet<String>) -> bool {
        !self.tags.is_disjoint(tags)
    }

    /// Case-insensitive search through ingredient lines.
    pub fn mentions_ingredient(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }

        self.ingredients
            .iter()
            .any(|line| line.to_lowercase().contains(&needle))
    }
}
