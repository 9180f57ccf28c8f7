// Catalog store tests: file formats, SQLite, validation

use neko_match::config::CatalogSettings;
use neko_match::services::{load_catalog, open_store, CatalogError, CatalogStore, FileCatalog, SqliteCatalog};
use sqlx::sqlite::SqlitePoolOptions;
use std::io::Write;

const BREEDS_JSON: &str = r#"[
  {"id": 2, "name": "Scottish Fold", "origin": "Scotland", "temperament": "Gentle",
   "description": "Calm.", "indoorOutdoor": "indoor", "sheddingLevel": 3, "friendlinessLevel": 5,
   "energyLevel": 2, "healthIssuesLevel": 4, "groomingNeeds": 2, "goodWithChildrenScore": 4,
   "goodWithOtherPetsScore": 4, "priceMin": 100000, "priceMax": 300000,
   "size": "small-to-medium", "furLength": "short/long"},
  {"id": 1, "name": "Maine Coon", "origin": "United States", "temperament": "Sociable",
   "description": "Big.", "indoorOutdoor": "indoor/outdoor", "sheddingLevel": 4, "friendlinessLevel": 5,
   "energyLevel": 4, "healthIssuesLevel": 3, "groomingNeeds": 4, "goodWithChildrenScore": 5,
   "goodWithOtherPetsScore": 5, "priceMin": 150000, "priceMax": 400000,
   "size": "large", "furLength": "long"}
]"#;

const BREEDS_TOML: &str = r#"
[[breeds]]
id = 7
name = "British Shorthair"
origin = "United Kingdom"
temperament = "Independent"
description = "Calm."
indoorOutdoor = "indoor"
sheddingLevel = 3
friendlinessLevel = 3
energyLevel = 2
healthIssuesLevel = 2
groomingNeeds = 2
goodWithChildrenScore = 4
goodWithOtherPetsScore = 4
priceMin = 100000
priceMax = 300000
size = "medium-to-large"
furLength = "short"
"#;

fn temp_file(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_json_file_keeps_file_order() {
    let file = temp_file(".json", BREEDS_JSON);

    let catalog = load_catalog(&FileCatalog::new(file.path())).await.unwrap();

    let names: Vec<&str> = catalog.breeds().iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Scottish Fold", "Maine Coon"]);
}

#[tokio::test]
async fn test_toml_file() {
    let file = temp_file(".toml", BREEDS_TOML);

    let catalog = load_catalog(&FileCatalog::new(file.path())).await.unwrap();

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.breeds()[0].size, "medium-to-large");
}

#[tokio::test]
async fn test_unsupported_extension() {
    let file = temp_file(".csv", "id,name\n");

    let result = FileCatalog::new(file.path()).load().await;

    assert!(matches!(result, Err(CatalogError::UnsupportedFormat(ext)) if ext == "csv"));
}

#[tokio::test]
async fn test_missing_file() {
    let result = FileCatalog::new("does/not/exist.json").load().await;
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[tokio::test]
async fn test_open_store_uses_path() {
    let file = temp_file(".json", BREEDS_JSON);
    let settings = CatalogSettings {
        path: Some(file.path().to_string_lossy().into_owned()),
        database_url: None,
    };

    let store = open_store(&settings).await.unwrap();
    let catalog = load_catalog(store.as_ref()).await.unwrap();

    assert_eq!(catalog.len(), 2);
}

#[tokio::test]
async fn test_sqlite_catalog_reads_ordered_by_id() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::query(
        r#"
        CREATE TABLE breeds (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            origin TEXT NOT NULL DEFAULT '',
            temperament TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            indoor_outdoor TEXT NOT NULL DEFAULT '',
            shedding_level INTEGER NOT NULL,
            friendliness_level INTEGER NOT NULL,
            energy_level INTEGER NOT NULL,
            health_issues_level INTEGER NOT NULL,
            grooming_needs INTEGER NOT NULL,
            good_with_children_score INTEGER NOT NULL,
            good_with_other_pets_score INTEGER NOT NULL,
            price_min INTEGER NOT NULL,
            price_max INTEGER NOT NULL,
            size TEXT NOT NULL,
            fur_length TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    for (id, name, energy) in [(3_i64, "Siamese", 5_i64), (1, "Russian Blue", 3)] {
        sqlx::query(
            r#"
            INSERT INTO breeds (id, name, origin, temperament, description, indoor_outdoor,
                shedding_level, friendliness_level, energy_level, health_issues_level, grooming_needs,
                good_with_children_score, good_with_other_pets_score, price_min, price_max, size, fur_length)
            VALUES (?, ?, 'Test', 'calm', '', 'indoor', 2, 4, ?, 2, 1, 3, 3, 80000, 250000, 'medium', 'short')
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(energy)
        .execute(&pool)
        .await
        .unwrap();
    }

    let store = SqliteCatalog::from_pool(pool, "sqlite::memory:");
    let catalog = load_catalog(&store).await.unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.breeds()[0].name, "Russian Blue");
    assert_eq!(catalog.breeds()[1].energy_level, 5);
    assert_eq!(catalog.breeds()[1].price_max, 250_000);
}

#[tokio::test]
async fn test_sqlite_out_of_range_value_rejected() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::query(
        r#"
        CREATE TABLE breeds (
            id INTEGER, name TEXT, origin TEXT, temperament TEXT, description TEXT,
            indoor_outdoor TEXT, shedding_level INTEGER, friendliness_level INTEGER,
            energy_level INTEGER, health_issues_level INTEGER, grooming_needs INTEGER,
            good_with_children_score INTEGER, good_with_other_pets_score INTEGER,
            price_min INTEGER, price_max INTEGER, size TEXT, fur_length TEXT
        );
        INSERT INTO breeds VALUES (1, 'Odd', '', '', '', '', 3, 3, 3, 3, 3, 3, 3, -1, 10, 'small', 'short');
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let result = SqliteCatalog::from_pool(pool, "memory").load().await;

    assert!(matches!(result, Err(CatalogError::Invalid(_))));
}
