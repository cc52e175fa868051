//! Seed the catalog from static documents.
//!
//! Reads `products.json` and `categories.json` from the configured seed
//! directory and loads them into empty collections. Collections that already
//! hold records are left untouched, so the command is safe to re-run.

use tracing::info;

use stylehub_storefront::state::AppState;

/// Seed the catalog.
///
/// # Errors
///
/// Returns an error if a seed document cannot be read, fails validation, or
/// the store write fails.
pub async fn run(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let seed_dir = state.config().seed_dir.clone();

    if !seed_dir.exists() {
        return Err(format!("Seed directory not found: {}", seed_dir.display()).into());
    }

    info!(dir = %seed_dir.display(), "Seeding catalog");
    let summary = state.catalog().seed_from_dir(&seed_dir).await?;

    info!("Seeding complete!");
    if summary.products_seeded == 0 {
        info!("  Products: skipped (collection already has data)");
    } else {
        info!("  Products seeded: {}", summary.products_seeded);
    }
    if summary.categories_seeded == 0 {
        info!("  Categories: skipped (collection already has data)");
    } else {
        info!("  Categories seeded: {}", summary.categories_seeded);
    }

    Ok(())
}
