//! Ingredient catalog import.
//!
//! # Usage
//!
//! ```bash
//! foodgram-cli import-ingredients data/ingredients.csv
//! foodgram-cli import-ingredients --format json data/ingredients.json
//! ```
//!
//! CSV files have no header and one `name,measurement_unit` pair per row:
//!
//! ```text
//! абрикосовое варенье,г
//! анис,по вкусу
//! ```
//!
//! JSON files hold an array of `{"name", "measurement_unit"}` objects.
//!
//! Rows are inserted in batches. Pairs already in the catalog are skipped,
//! so the import can be re-run safely.

use std::path::Path;

use clap::ValueEnum;

use foodgram_api::db::{IngredientRepository, NewIngredient};

use super::{CommandError, connect};

/// Rows per `INSERT` statement.
pub const BATCH_SIZE: usize = 999;

/// Longest ingredient name the catalog accepts.
const MAX_NAME_LENGTH: usize = 200;

/// Longest measurement unit the catalog accepts.
const MAX_UNIT_LENGTH: usize = 10;

/// Layout of the catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CatalogFormat {
    /// Headerless `name,measurement_unit` rows.
    #[default]
    Csv,
    /// Array of `{"name", "measurement_unit"}` objects.
    Json,
}

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportSummary {
    /// Rows newly added to the catalog.
    pub inserted: u64,
    /// Rows that were already present.
    pub skipped: u64,
}

/// Import ingredients from a catalog file.
///
/// # Errors
///
/// Returns `CommandError::Io` if the file cannot be read,
/// `CommandError::InvalidInput` if it is not a valid catalog, or a database
/// error if an insert fails. Batches inserted before a failure stay committed.
pub async fn ingredients(path: &Path, format: CatalogFormat) -> Result<ImportSummary, CommandError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CommandError::Io {
            path: path.display().to_string(),
            source,
        })?;
    let rows = parse_catalog(&raw, format)?;
    tracing::info!(rows = rows.len(), "Catalog file parsed");

    let pool = connect().await?;
    let repo = IngredientRepository::new(&pool);

    let mut summary = ImportSummary::default();
    for batch in rows.chunks(BATCH_SIZE) {
        let inserted = repo.insert_batch(batch).await?;
        summary.inserted += inserted;
        summary.skipped += batch.len() as u64 - inserted;
    }

    Ok(summary)
}

/// Parse and validate the catalog file contents.
///
/// Names and units are trimmed.
///
/// # Errors
///
/// Returns `CommandError::InvalidInput` for a malformed file or a row with an
/// empty or overlong field.
pub fn parse_catalog(raw: &str, format: CatalogFormat) -> Result<Vec<NewIngredient>, CommandError> {
    let rows = match format {
        CatalogFormat::Csv => read_csv(raw)?,
        CatalogFormat::Json => {
            serde_json::from_str(raw).map_err(|e| CommandError::InvalidInput(e.to_string()))?
        }
    };

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| validate_row(index, row))
        .collect()
}

fn read_csv(raw: &str) -> Result<Vec<NewIngredient>, CommandError> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(raw.as_bytes())
        .deserialize::<(String, String)>()
        .map(|row| {
            row.map(|(name, measurement_unit)| NewIngredient {
                name,
                measurement_unit,
            })
            .map_err(|e| CommandError::InvalidInput(e.to_string()))
        })
        .collect()
}

fn validate_row(index: usize, row: NewIngredient) -> Result<NewIngredient, CommandError> {
    let name = row.name.trim().to_string();
    let measurement_unit = row.measurement_unit.trim().to_string();

    check_field(index, "name", &name, MAX_NAME_LENGTH)?;
    check_field(index, "measurement_unit", &measurement_unit, MAX_UNIT_LENGTH)?;

    Ok(NewIngredient {
        name,
        measurement_unit,
    })
}

fn check_field(index: usize, field: &str, value: &str, max: usize) -> Result<(), CommandError> {
    if value.is_empty() {
        return Err(CommandError::InvalidInput(format!(
            "row {index}: {field} is empty"
        )));
    }
    if value.chars().count() > max {
        return Err(CommandError::InvalidInput(format!(
            "row {index}: {field} is longer than {max} characters"
        )));
    }
    Ok(())
}
