//! Tests for configuration system

use temp_dir::TempDir;
use weeknight::Config;

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.store.recipes_path.to_str(), Some("data/recipes.json"));
    assert_eq!(config.store.plans_path.to_str(), Some("data/mealplans.json"));
    assert_eq!(config.planner.dinners_per_week, 5);
    assert_eq!(config.planner.page_size, 1000);
    assert_eq!(config.observability.log_level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_file_overrides_defaults() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("custom.toml");
    std::fs::write(
        &path,
        r#"
[server]
host = "0.0.0.0"
port = 8080

[store]
recipes_path = "/var/lib/weeknight/recipes.json"
plans_path = "/var/lib/weeknight/plans.json"

[planner]
dinners_per_week = 7
"#,
    )?;

    let config = Config::load(Some(path.to_string_lossy().into_owned()))?;

    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.planner.dinners_per_week, 7);
    assert_eq!(config.planner.page_size, 1000);
    assert_eq!(config.observability.log_level, "info");

    Ok(())
}

#[test]
fn test_invalid_planner_settings_fail_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.child("invalid.toml");
    std::fs::write(&path, "[planner]\ndinners_per_week = 9\n")?;

    let config = Config::load(Some(path.to_string_lossy().into_owned()))?;
    assert!(config.validate().is_err());

    Ok(())
}
