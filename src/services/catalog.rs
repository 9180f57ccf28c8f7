use crate::config::CatalogSettings;
use crate::models::BreedRecord;
use async_trait::async_trait;
use serde::Deserialize;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

/// Bundled seed catalog, used when no source is configured
const EMBEDDED_BREEDS: &str = include_str!("../../data/breeds.json");

/// Errors that can occur while loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unsupported catalog file type: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

/// Read-only source of breed records
///
/// Populated out-of-band; the pipeline only ever reads it, once per session.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Read the full list of breeds in catalog iteration order
    async fn load(&self) -> Result<Vec<BreedRecord>, CatalogError>;

    /// Human-readable label for logs
    fn describe(&self) -> String;
}

/// Immutable catalog snapshot shared by every request
///
/// Cloning only bumps a reference count.
#[derive(Debug, Clone)]
pub struct Catalog {
    breeds: Arc<[BreedRecord]>,
}

impl Catalog {
    /// Validate and freeze a list of breeds
    pub fn new(breeds: Vec<BreedRecord>) -> Result<Self, CatalogError> {
        validate_catalog(&breeds)?;
        Ok(Self {
            breeds: breeds.into(),
        })
    }

    pub fn breeds(&self) -> &[BreedRecord] {
        &self.breeds
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }
}

impl AsRef<[BreedRecord]> for Catalog {
    fn as_ref(&self) -> &[BreedRecord] {
        &self.breeds
    }
}

/// Check scores, price ranges and id uniqueness
pub fn validate_catalog(breeds: &[BreedRecord]) -> Result<(), CatalogError> {
    let mut seen_ids = HashSet::with_capacity(breeds.len());

    for breed in breeds {
        if let Err(errors) = breed.validate() {
            return Err(CatalogError::Invalid(format!(
                "breed {} ({}): {}",
                breed.id, breed.name, errors
            )));
        }

        if !breed.has_valid_price_range() {
            return Err(CatalogError::Invalid(format!(
                "breed {} ({}): priceMin {} exceeds priceMax {}",
                breed.id, breed.name, breed.price_min, breed.price_max
            )));
        }

        if !seen_ids.insert(breed.id) {
            return Err(CatalogError::Invalid(format!("duplicate breed id {}", breed.id)));
        }
    }

    Ok(())
}

/// Load a store and freeze the result
pub async fn load_catalog(store: &dyn CatalogStore) -> Result<Catalog, CatalogError> {
    let breeds = store.load().await?;
    let catalog = Catalog::new(breeds)?;

    tracing::info!("Loaded {} breeds from {}", catalog.len(), store.describe());

    Ok(catalog)
}

/// Pick a store from configuration
///
/// `database_url` wins over `path`; with neither, the embedded seed is used.
pub async fn open_store(settings: &CatalogSettings) -> Result<Box<dyn CatalogStore>, CatalogError> {
    if let Some(url) = settings.database_url.as_deref().filter(|u| !u.is_empty()) {
        return Ok(Box::new(SqliteCatalog::connect(url).await?));
    }

    if let Some(path) = settings.path.as_deref().filter(|p| !p.is_empty()) {
        return Ok(Box::new(FileCatalog::new(path)));
    }

    Ok(Box::new(EmbeddedCatalog))
}

/// Parse a JSON array of breeds
pub fn parse_json_catalog(contents: &str) -> Result<Vec<BreedRecord>, CatalogError> {
    Ok(serde_json::from_str(contents)?)
}

#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    breeds: Vec<BreedRecord>,
}

/// Parse a TOML document with a `[[breeds]]` array
pub fn parse_toml_catalog(contents: &str) -> Result<Vec<BreedRecord>, CatalogError> {
    let parsed: TomlCatalog = toml::from_str(contents)?;
    Ok(parsed.breeds)
}

/// Catalog stored in a JSON or TOML file
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl CatalogStore for FileCatalog {
    async fn load(&self) -> Result<Vec<BreedRecord>, CatalogError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })?;

        let extension = self
            .path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => parse_json_catalog(&contents),
            "toml" => parse_toml_catalog(&contents),
            other => Err(CatalogError::UnsupportedFormat(other.to_string())),
        }
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// The bundled seed catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedCatalog;

#[async_trait]
impl CatalogStore for EmbeddedCatalog {
    async fn load(&self) -> Result<Vec<BreedRecord>, CatalogError> {
        parse_json_catalog(EMBEDDED_BREEDS)
    }

    fn describe(&self) -> String {
        "embedded seed catalog".to_string()
    }
}

/// Catalog stored in a SQLite `breeds` table
///
/// Expected schema:
/// ```sql
/// CREATE TABLE breeds (
///     id INTEGER PRIMARY KEY,
///     name TEXT NOT NULL,
///     origin TEXT NOT NULL DEFAULT '',
///     temperament TEXT NOT NULL DEFAULT '',
///     description TEXT NOT NULL DEFAULT '',
///     indoor_outdoor TEXT NOT NULL DEFAULT '',
///     shedding_level INTEGER NOT NULL,
///     friendliness_level INTEGER NOT NULL,
///     energy_level INTEGER NOT NULL,
///     health_issues_level INTEGER NOT NULL,
///     grooming_needs INTEGER NOT NULL,
///     good_with_children_score INTEGER NOT NULL,
///     good_with_other_pets_score INTEGER NOT NULL,
///     price_min INTEGER NOT NULL,
///     price_max INTEGER NOT NULL,
///     size TEXT NOT NULL,
///     fur_length TEXT NOT NULL
/// );
/// ```
pub struct SqliteCatalog {
    pool: SqlitePool,
    label: String,
}

impl SqliteCatalog {
    /// Connect to a SQLite database
    pub async fn connect(database_url: &str) -> Result<Self, CatalogError> {
        tracing::info!("Connecting to catalog database: {}", database_url);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        Ok(Self::from_pool(pool, database_url))
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool, label: &str) -> Self {
        Self {
            pool,
            label: label.to_string(),
        }
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    async fn load(&self) -> Result<Vec<BreedRecord>, CatalogError> {
        let query = r#"
            SELECT id, name, origin, temperament, description, indoor_outdoor,
                   shedding_level, friendliness_level, energy_level, health_issues_level,
                   grooming_needs, good_with_children_score, good_with_other_pets_score,
                   price_min, price_max, size, fur_length
            FROM breeds
            ORDER BY id
        "#;

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        rows.iter()
            .map(|row| -> Result<BreedRecord, CatalogError> {
                Ok(BreedRecord {
                    id: int_column(row, "id")?,
                    name: row.try_get("name")?,
                    origin: row.try_get("origin")?,
                    temperament: row.try_get("temperament")?,
                    description: row.try_get("description")?,
                    indoor_outdoor: row.try_get("indoor_outdoor")?,
                    shedding_level: int_column(row, "shedding_level")?,
                    friendliness_level: int_column(row, "friendliness_level")?,
                    energy_level: int_column(row, "energy_level")?,
                    health_issues_level: int_column(row, "health_issues_level")?,
                    grooming_needs: int_column(row, "grooming_needs")?,
                    good_with_children_score: int_column(row, "good_with_children_score")?,
                    good_with_other_pets_score: int_column(row, "good_with_other_pets_score")?,
                    price_min: int_column(row, "price_min")?,
                    price_max: int_column(row, "price_max")?,
                    size: row.try_get("size")?,
                    fur_length: row.try_get("fur_length")?,
                })
            })
            .collect()
    }

    fn describe(&self) -> String {
        format!("sqlite {}", self.label)
    }
}

/// SQLite integers are i64; narrow them with a range check
fn int_column<T>(row: &sqlx::sqlite::SqliteRow, column: &str) -> Result<T, CatalogError>
where
    T: TryFrom<i64>,
{
    let value: i64 = row.try_get(column)?;
    T::try_from(value)
        .map_err(|_| CatalogError::Invalid(format!("column {} out of range: {}", column, value)))
}
