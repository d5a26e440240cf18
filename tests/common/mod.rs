#![allow(dead_code)]

use std::sync::Arc;

use axum::{Router, body::Body, http::Request, response::Response};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use weeknight::{AppState, router};
use weeknight_mealplan::{Command, JsonPlanStore};
use weeknight_recipe::{JsonRecipeStore, ProteinType, Recipe};

pub struct TestApp {
    pub router: Router,
    pub recipes: Arc<JsonRecipeStore>,
}

pub fn sample_recipes() -> Vec<Recipe> {
    let proteins = [
        ProteinType::Chicken,
        ProteinType::Beef,
        ProteinType::Fish,
        ProteinType::Vegetarian,
    ];

    (0..8)
        .map(|i| {
            let mut recipe = Recipe::new(format!("r{i}"), format!("Dinner {i}"));
            recipe.protein_type = Some(proteins[i % proteins.len()]);
            recipe.cook_time_min = Some(20 + 5 * i as u32);
            recipe
        })
        .collect()
}

pub async fn create_test_app(dir: &temp_dir::TempDir) -> anyhow::Result<TestApp> {
    let recipes = Arc::new(JsonRecipeStore::open(dir.child("recipes.json")).await?);
    for recipe in sample_recipes() {
        recipes.insert(recipe).await?;
    }

    let plans = Arc::new(JsonPlanStore::open(dir.child("plans.json")).await?);
    let command = Command::new(recipes.clone(), plans);

    Ok(TestApp {
        router: router(AppState { command }),
        recipes,
    })
}

pub async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn text_body(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
