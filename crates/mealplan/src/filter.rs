use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};
use weeknight_recipe::{MealType, Recipe};

use crate::constraints::{
    Constraint, ExcludeIngredientsConstraint, ExcludeTagsConstraint, IncludeTagsConstraint,
    MaxCookTimeConstraint, MealTypeConstraint, PlannerConstraints, RepeatAvoidanceConstraint,
};

/// A constraint dropped because nothing satisfied the stricter rule set.
#[derive(Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Relaxation {
    RepeatAvoidance,
    MaxCookTime,
    Tags,
    /// Every filter dropped; the pool is the whole input.
    All,
}

const LADDER: [Relaxation; 3] = [
    Relaxation::RepeatAvoidance,
    Relaxation::MaxCookTime,
    Relaxation::Tags,
];

#[derive(Debug)]
pub struct CandidatePool<'a> {
    pub recipes: Vec<&'a Recipe>,
    pub relaxations: Vec<Relaxation>,
}

impl CandidatePool<'_> {
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

pub struct CandidateFilter<'a> {
    constraints: &'a PlannerConstraints,
    recently_used: &'a HashSet<String>,
    excluded: Option<&'a str>,
}

impl<'a> CandidateFilter<'a> {
    pub fn new(constraints: &'a PlannerConstraints, recently_used: &'a HashSet<String>) -> Self {
        Self {
            constraints,
            recently_used,
            excluded: None,
        }
    }

    /// Keeps `id` out of the pool at every relaxation level.
    pub fn excluding(mut self, id: Option<&'a str>) -> Self {
        self.excluded = id;
        self
    }

    pub fn apply(&self, recipes: &'a [Recipe]) -> CandidatePool<'a> {
        let mut relaxations = vec![];
        let mut pool = self.select(recipes, &relaxations);

        for step in LADDER {
            if !pool.is_empty() {
                break;
            }

            if !self.is_active(step) {
                continue;
            }

            relaxations.push(step);
            pool = self.select(recipes, &relaxations);

            tracing::warn!(
                relaxation = %step,
                candidates = pool.len(),
                "no recipes satisfied the constraints, relaxing"
            );
        }

        if pool.is_empty() {
            pool = recipes
                .iter()
                .filter(|r| self.excluded != Some(r.id.as_str()))
                .collect();

            if !pool.is_empty() {
                relaxations.push(Relaxation::All);
                tracing::warn!(
                    relaxation = %Relaxation::All,
                    candidates = pool.len(),
                    "no recipes satisfied the constraints, using every recipe"
                );
            }
        }

        CandidatePool {
            recipes: pool,
            relaxations,
        }
    }

    fn is_active(&self, step: Relaxation) -> bool {
        match step {
            Relaxation::RepeatAvoidance => !self.recently_used.is_empty(),
            Relaxation::MaxCookTime => self.constraints.max_cook_time_min.is_some(),
            Relaxation::Tags => self.constraints.has_tag_rules(),
            Relaxation::All => true,
        }
    }

    fn rules(&self, relaxed: &[Relaxation]) -> Vec<Box<dyn Constraint + 'a>> {
        let c = self.constraints;
        let mut rules: Vec<Box<dyn Constraint + 'a>> = vec![
            Box::new(MealTypeConstraint(MealType::Dinner)),
            Box::new(ExcludeIngredientsConstraint(&c.exclude_ingredients)),
        ];

        if !relaxed.contains(&Relaxation::Tags) {
            rules.push(Box::new(IncludeTagsConstraint(&c.include_tags)));
            rules.push(Box::new(ExcludeTagsConstraint(&c.exclude_tags)));
        }

        if let Some(max) = c.max_cook_time_min
            && !relaxed.contains(&Relaxation::MaxCookTime)
        {
            rules.push(Box::new(MaxCookTimeConstraint(max)));
        }

        if !relaxed.contains(&Relaxation::RepeatAvoidance) {
            rules.push(Box::new(RepeatAvoidanceConstraint(self.recently_used)));
        }

        rules
    }

    fn select(&self, recipes: &'a [Recipe], relaxed: &[Relaxation]) -> Vec<&'a Recipe> {
        let rules = self.rules(relaxed);

        recipes
            .iter()
            .filter(|r| self.excluded != Some(r.id.as_str()))
            .filter(|r| rules.iter().all(|rule| rule.allows(r)))
            .collect()
    }
}
