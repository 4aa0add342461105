//! Seed catalog loading.

use std::path::Path;

use thiserror::Error;
use threadline_core::seed::SeedCatalog;

/// Seed shipped with the binary, used when no seed path is configured.
pub const EMBEDDED_SEED: &str = include_str!("../data/seed.json");

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid seed data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load the seed catalog from `path`, or the embedded seed when `None`.
///
/// # Errors
///
/// Returns `SeedError` if the file cannot be read or is not a valid seed.
pub async fn load_seed(path: Option<&Path>) -> Result<SeedCatalog, SeedError> {
    let Some(path) = path else {
        return Ok(SeedCatalog::from_json(EMBEDDED_SEED)?);
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let seed = SeedCatalog::from_json(&raw)?;
    tracing::info!(
        path = %path.display(),
        products = seed.products.len(),
        categories = seed.categories.len(),
        "Loaded seed catalog"
    );
    Ok(seed)
}
