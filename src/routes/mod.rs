use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use weeknight_mealplan::Command;

mod extract;
mod health;
mod meal_plan;

#[derive(Clone)]
pub struct AppState {
    pub command: Command,
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/mealplans/generate", post(meal_plan::generate))
        .route("/api/mealplans/regenerate", post(meal_plan::regenerate))
        .route(
            "/api/mealplans",
            get(meal_plan::list).post(meal_plan::create),
        )
        .route(
            "/api/mealplans/{id}",
            get(meal_plan::detail)
                .patch(meal_plan::update)
                .delete(meal_plan::delete),
        )
        .route("/api/mealplans/{id}/export.csv", get(meal_plan::export_csv))
        .route("/api/mealplans/{id}/export.json", get(meal_plan::export_json))
        .route("/api/mealplans/{id}/export.txt", get(meal_plan::export_txt))
        .route(
            "/api/mealplans/{id}/regenerate",
            post(meal_plan::regenerate_plan),
        )
        .route("/api/mealplans/{id}/lock", post(meal_plan::lock))
        .route(
            "/api/mealplans/{id}/entries/{date}",
            axum::routing::put(meal_plan::select),
        )
        .route(
            "/api/mealplans/{id}/entries/{date}/swap",
            post(meal_plan::swap),
        )
        .route(
            "/api/mealplans/{id}/entries/{date}/clear",
            post(meal_plan::clear),
        )
        .route(
            "/api/mealplans/{id}/entries/{date}/toggle-lock",
            post(meal_plan::toggle_lock),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
