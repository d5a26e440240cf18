//! JSON API over the meal planner.

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use weeknight_mealplan::{
    ExportFormat, GenerateRequest, GenerateResponse, LockInput, MealPlan, RegenerateRequest,
    RegenerateResponse, SaveInput, SwapOutput, UpdateInput,
};
use weeknight_recipe::Recipe;

use crate::{
    error::AppError,
    routes::{
        AppState,
        extract::{JsonBody, PathParams, QueryParams},
    },
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct SeedQuery {
    pub seed: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectInput {
    pub recipe_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanDetail {
    #[serde(flatten)]
    pub plan: MealPlan,
    pub recipes: Vec<Recipe>,
}

/// POST /api/mealplans/generate - Propose a week without saving it
pub async fn generate(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    Ok(Json(state.command.generate(&req).await?))
}

/// POST /api/mealplans/regenerate - Refill unlocked entries without saving
pub async fn regenerate(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegenerateRequest>,
) -> Result<Json<RegenerateResponse>, AppError> {
    Ok(Json(state.command.regenerate(&req).await?))
}

/// POST /api/mealplans
pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<SaveInput>,
) -> Result<(StatusCode, Json<MealPlan>), AppError> {
    let plan = state.command.create(input).await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// GET /api/mealplans?from&to
pub async fn list(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ListQuery>,
) -> Result<Json<Vec<MealPlan>>, AppError> {
    Ok(Json(state.command.list(query.from, query.to).await?))
}

/// GET /api/mealplans/{id} - Plan with the recipes it references
pub async fn detail(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<Json<PlanDetail>, AppError> {
    let plan = state.command.load(&id).await?;
    let recipes = state.command.recipes_of(&plan).await?;

    Ok(Json(PlanDetail { plan, recipes }))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<StatusCode, AppError> {
    state.command.delete(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/mealplans/{id} - Change constraints, dinner count or entries
pub async fn update(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
    JsonBody(input): JsonBody<UpdateInput>,
) -> Result<Json<MealPlan>, AppError> {
    Ok(Json(state.command.update(&id, input).await?))
}

async fn export(
    state: AppState,
    id: String,
    format: ExportFormat,
) -> Result<impl IntoResponse, AppError> {
    let body = state.command.export(&id, format).await?;

    Ok(([(header::CONTENT_TYPE, format.content_type())], body))
}

/// GET /api/mealplans/{id}/export.csv
pub async fn export_csv(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<impl IntoResponse, AppError> {
    export(state, id, ExportFormat::Csv).await
}

/// GET /api/mealplans/{id}/export.json
pub async fn export_json(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<impl IntoResponse, AppError> {
    export(state, id, ExportFormat::Json).await
}

/// GET /api/mealplans/{id}/export.txt - Menu and shopping list
pub async fn export_txt(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
) -> Result<impl IntoResponse, AppError> {
    export(state, id, ExportFormat::Txt).await
}

pub async fn regenerate_plan(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
    QueryParams(query): QueryParams<SeedQuery>,
) -> Result<Json<MealPlan>, AppError> {
    Ok(Json(state.command.regenerate_plan(&id, query.seed).await?))
}

pub async fn lock(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
    JsonBody(input): JsonBody<LockInput>,
) -> Result<Json<MealPlan>, AppError> {
    Ok(Json(state.command.lock(&id, input).await?))
}

/// POST /api/mealplans/{id}/entries/{date}/swap - `swapped` is false when no
/// other recipe could replace the current one
pub async fn swap(
    State(state): State<AppState>,
    PathParams((id, date)): PathParams<(String, NaiveDate)>,
    QueryParams(query): QueryParams<SeedQuery>,
) -> Result<Json<SwapOutput>, AppError> {
    Ok(Json(state.command.swap(&id, date, query.seed).await?))
}

pub async fn clear(
    State(state): State<AppState>,
    PathParams((id, date)): PathParams<(String, NaiveDate)>,
) -> Result<Json<MealPlan>, AppError> {
    Ok(Json(state.command.clear(&id, date).await?))
}

pub async fn toggle_lock(
    State(state): State<AppState>,
    PathParams((id, date)): PathParams<(String, NaiveDate)>,
) -> Result<Json<MealPlan>, AppError> {
    Ok(Json(state.command.toggle_lock(&id, date).await?))
}

/// PUT /api/mealplans/{id}/entries/{date} - Assign a recipe by hand
pub async fn select(
    State(state): State<AppState>,
    PathParams((id, date)): PathParams<(String, NaiveDate)>,
    JsonBody(input): JsonBody<SelectInput>,
) -> Result<Json<MealPlan>, AppError> {
    Ok(Json(
        state.command.select(&id, date, &input.recipe_id).await?,
    ))
}
