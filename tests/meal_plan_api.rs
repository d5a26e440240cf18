use axum::http::StatusCode;
use serde_json::{Value, json};
use temp_dir::TempDir;
use weeknight_recipe::RecipeStore;

mod common;
use common::{create_test_app, json_body, send, text_body};

fn generate_body(seed: &str) -> Value {
    json!({
        "weekStartDate": "2025-10-20",
        "dinnersPerWeek": 4,
        "constraints": { "excludeTags": [], "balanceProteinTypes": true },
        "seed": seed,
    })
}

async fn save_plan(app: &common::TestApp) -> Value {
    let generated = json_body(send(app, "POST", "/api/mealplans/generate", Some(generate_body("save"))).await).await;

    let response = send(
        app,
        "POST",
        "/api/mealplans",
        Some(json!({
            "weekStartDate": "2025-10-20",
            "dinnersPerWeek": 4,
            "entries": generated["entries"],
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    json_body(response).await
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = create_test_app(&dir).await?;

    let response = send(&app, "GET", "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "ok");

    Ok(())
}

#[tokio::test]
async fn test_generate_returns_camel_case_plan() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = create_test_app(&dir).await?;

    let response = send(&app, "POST", "/api/mealplans/generate", Some(generate_body("api"))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["date"], "2025-10-20");
    assert_eq!(entries[3]["date"], "2025-10-23");
    assert!(entries.iter().all(|e| e["recipeId"].is_string() && e["locked"] == false));
    assert_eq!(body["recipes"].as_array().unwrap().len(), 4);
    assert_eq!(body["relaxations"], json!([]));
    assert_eq!(body["message"], "Generated meal plan with 4 recipes");

    let again = json_body(send(&app, "POST", "/api/mealplans/generate", Some(generate_body("api"))).await).await;
    assert_eq!(again["entries"], body["entries"]);

    Ok(())
}

#[tokio::test]
async fn test_generate_rejects_bad_dinner_count() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = create_test_app(&dir).await?;

    let mut body = generate_body("bad");
    body["dinnersPerWeek"] = json!(8);
    let response = send(&app, "POST", "/api/mealplans/generate", Some(body)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"], "validation");

    Ok(())
}

#[tokio::test]
async fn test_regenerate_dry_run_keeps_locked_entry() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = create_test_app(&dir).await?;

    let response = send(
        &app,
        "POST",
        "/api/mealplans/regenerate",
        Some(json!({
            "existingEntries": [
                { "date": "2025-10-20", "recipeId": "r1", "locked": true, "notes": "birthday" },
                { "date": "2025-10-21", "recipeId": "r2" },
                { "date": "2025-10-22", "recipeId": null },
            ],
            "seed": "dry",
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries[0]["recipeId"], "r1");
    assert_eq!(entries[0]["notes"], "birthday");
    assert!(entries[1..].iter().all(|e| e["recipeId"].is_string() && e["recipeId"] != "r1"));

    let response = send(
        &app,
        "POST",
        "/api/mealplans/regenerate",
        Some(json!({
            "existingEntries": [
                { "date": "2025-10-20" },
                { "date": "2025-10-23" },
            ],
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn test_saved_plan_lifecycle() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = create_test_app(&dir).await?;

    let plan = save_plan(&app).await;
    let id = plan["id"].as_str().unwrap().to_owned();
    let first_recipe = plan["entries"][0]["recipeId"].as_str().unwrap().to_owned();

    let cooked = app.recipes.get(&first_recipe).await?.unwrap();
    assert_eq!(cooked.last_cooked_at.map(|d| d.to_string()).as_deref(), Some("2025-10-20"));

    let detail = json_body(send(&app, "GET", &format!("/api/mealplans/{id}"), None).await).await;
    assert_eq!(detail["id"], id.as_str());
    assert_eq!(detail["recipes"].as_array().unwrap().len(), 4);

    let locked = json_body(
        send(
            &app,
            "POST",
            &format!("/api/mealplans/{id}/lock"),
            Some(json!({ "entryDates": ["2025-10-20"], "locked": true })),
        )
        .await,
    )
    .await;
    assert_eq!(locked["entries"][0]["locked"], true);

    let response = send(&app, "POST", &format!("/api/mealplans/{id}/regenerate?seed=x"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let regenerated = json_body(response).await;
    assert_eq!(regenerated["entries"][0]["recipeId"], first_recipe.as_str());

    let swapped = json_body(
        send(&app, "POST", &format!("/api/mealplans/{id}/entries/2025-10-21/swap?seed=s"), None).await,
    )
    .await;
    assert_eq!(swapped["swapped"], true);
    assert_ne!(swapped["plan"]["entries"][1]["recipeId"], regenerated["entries"][1]["recipeId"]);

    let cleared = json_body(
        send(&app, "POST", &format!("/api/mealplans/{id}/entries/2025-10-21/clear"), None).await,
    )
    .await;
    assert_eq!(cleared["entries"][1]["recipeId"], Value::Null);

    let toggled = json_body(
        send(&app, "POST", &format!("/api/mealplans/{id}/entries/2025-10-21/toggle-lock"), None).await,
    )
    .await;
    assert_eq!(toggled["entries"][1]["locked"], true);

    let selected = json_body(
        send(
            &app,
            "PUT",
            &format!("/api/mealplans/{id}/entries/2025-10-21"),
            Some(json!({ "recipeId": "r7" })),
        )
        .await,
    )
    .await;
    assert_eq!(selected["entries"][1]["recipeId"], "r7");

    let response = send(&app, "POST", &format!("/api/mealplans/{id}/entries/2025-11-30/clear"), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let listed = json_body(send(&app, "GET", "/api/mealplans?from=2025-10-01&to=2025-10-31", None).await).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let response = send(&app, "DELETE", &format!("/api/mealplans/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, "GET", &format!("/api/mealplans/{id}"), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"], "not_found");

    Ok(())
}

#[tokio::test]
async fn test_update_and_export_saved_plan() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = create_test_app(&dir).await?;

    let plan = save_plan(&app).await;
    let id = plan["id"].as_str().unwrap().to_owned();

    let response = send(
        &app,
        "PATCH",
        &format!("/api/mealplans/{id}"),
        Some(json!({ "constraints": { "maxCookTimeMin": 30, "excludeTags": ["spicy"] } })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["constraints"]["maxCookTimeMin"], 30);
    assert_eq!(updated["constraints"]["excludeTags"], json!(["spicy"]));
    assert_eq!(updated["entries"], plan["entries"]);

    let response = send(
        &app,
        "PATCH",
        &format!("/api/mealplans/{id}"),
        Some(json!({ "dinnersPerWeek": 5 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", &format!("/api/mealplans/{id}/export.csv"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/csv; charset=utf-8"
    );
    let csv = text_body(response).await;
    let lines = csv.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "Date,Recipe,Ingredients,Notes");
    assert!(lines[1].starts_with("2025-10-20 (Monday),Dinner "));
    assert_eq!(lines.len(), 5);

    let response = send(&app, "GET", &format!("/api/mealplans/{id}/export.txt"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(text_body(response).await.starts_with("MEAL PLAN - Week of October 20, 2025"));

    let exported = json_body(send(&app, "GET", &format!("/api/mealplans/{id}/export.json"), None).await).await;
    assert_eq!(exported["mealPlan"]["id"], id.as_str());
    assert_eq!(exported["entries"].as_array().unwrap().len(), 4);

    let response = send(&app, "GET", "/api/mealplans/missing/export.csv", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let app = create_test_app(&dir).await?;

    let response = send(&app, "POST", "/api/mealplans/some-id/entries/not-a-date/clear", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].is_string());

    let response = send(&app, "GET", "/api/mealplans?from=yesterday", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "bad_request");

    let response = send(
        &app,
        "POST",
        "/api/mealplans/generate",
        Some(json!({ "weekStartDate": "2025-13-40", "dinnersPerWeek": 3 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"], "validation");

    let response = send(&app, "POST", "/api/mealplans/generate", None).await;
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(json_body(response).await["error"], "bad_request");

    Ok(())
}
