//! Wishlist management commands.
//!
//! Toggle is composed here from the engine's two idempotent primitives:
//! check membership, then add or remove.

use tracing::info;

use stylehub_storefront::state::AppState;

/// Save a product to the wishlist.
///
/// # Errors
///
/// Returns an error if the product is unknown or the write fails.
pub async fn add(state: &AppState, product_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let product = state.catalog().get_product(product_id.into()).await?;
    state.wishlist().add(product.id).await?;
    info!("'{}' saved to wishlist", product.name);
    Ok(())
}

/// Remove a product from the wishlist.
///
/// # Errors
///
/// Returns an error if the write fails.
pub async fn remove(state: &AppState, product_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    state.wishlist().remove(product_id.into()).await?;
    info!("Product #{product_id} removed from wishlist");
    Ok(())
}

/// Add the product if absent, remove it if present.
///
/// # Errors
///
/// Returns an error if the product is unknown or a write fails.
pub async fn toggle(state: &AppState, product_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let product = state.catalog().get_product(product_id.into()).await?;

    if state.wishlist().contains(product.id).await? {
        state.wishlist().remove(product.id).await?;
        info!("'{}' removed from wishlist", product.name);
    } else {
        state.wishlist().add(product.id).await?;
        info!("'{}' saved to wishlist", product.name);
    }
    Ok(())
}

/// Show saved products, enriched with catalog details.
///
/// # Errors
///
/// Returns an error if a read fails.
pub async fn show(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let entries = state.wishlist().get_entries().await?;

    if entries.is_empty() {
        info!("Your wishlist is empty");
        return Ok(());
    }

    for entry in &entries {
        let label = match state.catalog().get_product(entry.product_id).await {
            Ok(product) => format!("{} (₹{})", product.name, product.effective_price()),
            Err(_) => format!("product #{}", entry.product_id),
        };
        info!(
            "#{:<4} {label} - saved {}",
            entry.id,
            entry.added_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}
