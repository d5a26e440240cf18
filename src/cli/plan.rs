use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use weeknight::config::Config;
use weeknight_mealplan::{
    ExportFormat, GenerateRequest, LockInput, MealPlan, PlannerConstraints, SaveInput,
};
use weeknight_shared::WeekStart;

#[derive(Args, Debug)]
pub struct ConstraintArgs {
    /// Skip recipes whose ingredients mention this text (repeatable)
    #[arg(long = "exclude-ingredient")]
    pub exclude_ingredients: Vec<String>,

    /// Only recipes carrying one of these tags (repeatable)
    #[arg(long = "include-tag")]
    pub include_tags: Vec<String>,

    /// Skip recipes carrying any of these tags (repeatable)
    #[arg(long = "exclude-tag")]
    pub exclude_tags: Vec<String>,

    #[arg(long, default_value_t = weeknight_mealplan::DEFAULT_AVOID_REPEAT_WEEKS)]
    pub avoid_repeat_weeks: u32,

    /// Allow the same protein on consecutive days
    #[arg(long)]
    pub no_protein_balance: bool,

    #[arg(long)]
    pub max_cook_time: Option<u32>,

    /// Recipe ids pinned to the first days, in order (repeatable)
    #[arg(long = "require")]
    pub required_recipes: Vec<String>,

    #[arg(long, default_value = "monday")]
    pub start_week_on: WeekStart,
}

impl From<ConstraintArgs> for PlannerConstraints {
    fn from(args: ConstraintArgs) -> Self {
        Self {
            exclude_ingredients: args.exclude_ingredients,
            include_tags: args.include_tags.into_iter().collect(),
            exclude_tags: args.exclude_tags.into_iter().collect(),
            avoid_repeat_weeks: args.avoid_repeat_weeks,
            balance_protein_types: !args.no_protein_balance,
            max_cook_time_min: args.max_cook_time,
            required_recipes: args.required_recipes,
            start_week_on: args.start_week_on,
        }
    }
}

pub async fn generate(
    config: Config,
    week: Option<NaiveDate>,
    dinners: Option<u8>,
    seed: Option<String>,
    constraints: ConstraintArgs,
    save: bool,
) -> Result<()> {
    let command = weeknight::open_command(&config).await?;
    let week = week.unwrap_or_else(|| {
        let today = chrono::Local::now().date_naive();
        constraints.start_week_on.week_of(today) + chrono::Duration::days(7)
    });
    let req = GenerateRequest {
        week_start_date: week,
        dinners_per_week: dinners.unwrap_or(config.planner.dinners_per_week),
        constraints: constraints.into(),
        seed,
    };

    let res = command.generate(&req).await?;
    for relaxation in &res.relaxations {
        tracing::warn!(%relaxation, "constraint relaxed");
    }

    if !save {
        println!("{}", serde_json::to_string_pretty(&res)?);
        return Ok(());
    }

    let plan = command.create(SaveInput::from_generated(req, res)).await?;
    print_plan(&plan);

    Ok(())
}

pub async fn regenerate(config: Config, id: String, seed: Option<String>) -> Result<()> {
    let command = weeknight::open_command(&config).await?;
    let plan = command.regenerate_plan(&id, seed).await?;
    print_plan(&plan);

    Ok(())
}

pub async fn lock(config: Config, id: String, dates: Vec<NaiveDate>, unlock: bool) -> Result<()> {
    let command = weeknight::open_command(&config).await?;
    let plan = command
        .lock(
            &id,
            LockInput {
                entry_dates: dates,
                locked: !unlock,
            },
        )
        .await?;
    print_plan(&plan);

    Ok(())
}

pub async fn swap(config: Config, id: String, date: NaiveDate, seed: Option<String>) -> Result<()> {
    let command = weeknight::open_command(&config).await?;
    let output = command.swap(&id, date, seed).await?;

    if !output.swapped {
        println!("No other recipe fits {date}, the plan is unchanged.");
    }
    print_plan(&output.plan);

    Ok(())
}

pub async fn export(config: Config, id: String, format: ExportFormat) -> Result<()> {
    let command = weeknight::open_command(&config).await?;
    println!("{}", command.export(&id, format).await?);

    Ok(())
}

pub async fn list(config: Config, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<()> {
    let command = weeknight::open_command(&config).await?;
    let plans = command.list(from, to).await?;

    if plans.is_empty() {
        println!("No meal plans.");
    }

    for plan in &plans {
        print_plan(plan);
    }

    Ok(())
}

fn print_plan(plan: &MealPlan) {
    println!("{} (week of {})", plan.id, plan.week_start_date);

    for entry in &plan.entries {
        let label = entry.label(plan.constraints.start_week_on);
        println!(
            "  {} {:<9} day {} {} {}",
            entry.date,
            label.weekday,
            label.day_of_week,
            if entry.locked { "[locked]" } else { "        " },
            entry.recipe_id.as_deref().unwrap_or("-"),
        );
    }
}
