//! Data file commands.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use harborview_server::models::{MessageStats, TestimonialStats};
use harborview_server::store::{JsonStore, MessageRepository, StoreError, TestimonialRepository};

/// Combined counters printed by `store stats`.
#[derive(Debug, Serialize)]
pub struct StoreStats {
    pub messages: MessageStats,
    pub testimonials: TestimonialStats,
}

/// Create the data file if it does not exist yet.
///
/// An existing file is left untouched but must parse.
///
/// # Errors
///
/// Returns an error if the file cannot be created or is corrupt.
pub async fn init(data_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let existed = tokio::fs::try_exists(data_file).await?;
    let store = JsonStore::open(data_file).await?;

    if existed {
        info!(path = %store.path().display(), "Data file already exists");
    } else {
        info!(path = %store.path().display(), "Data file created");
    }
    Ok(())
}

/// Print message and testimonial counters as JSON.
///
/// # Errors
///
/// Returns an error if the data file cannot be read.
pub async fn stats(data_file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonStore::open(data_file).await?;
    let stats = collect(&store).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(())
}

async fn collect(store: &JsonStore) -> Result<StoreStats, StoreError> {
    Ok(StoreStats {
        messages: MessageRepository::new(store).stats().await?,
        testimonials: TestimonialRepository::new(store).stats().await?,
    })
}
