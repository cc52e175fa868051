//! Cart management commands.

use tracing::info;

use stylehub_storefront::cart;
use stylehub_storefront::state::AppState;

/// Add a product to the cart at its current effective price.
///
/// Validates the product and size against the catalog before handing the
/// snapshot price to the cart engine.
///
/// # Errors
///
/// Returns an error if the product is unknown, the size is not offered, or
/// the write fails.
pub async fn add(
    state: &AppState,
    product_id: i64,
    size: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let product = state.catalog().get_product(product_id.into()).await?;

    if !product.sizes.iter().any(|s| s == size) {
        return Err(format!(
            "size '{size}' is not offered for '{}' (available: {})",
            product.name,
            product.sizes.join(", ")
        )
        .into());
    }

    let line = state
        .cart()
        .add(product.id, quantity, size, product.effective_price())
        .await?;

    info!(
        "Added {} x '{}' ({size}) - line #{} now holds {}",
        quantity, product.name, line.id, line.quantity
    );
    Ok(())
}

/// Replace a line's quantity.
///
/// # Errors
///
/// Returns an error if the line is unknown, the quantity is below 1, or the
/// write fails.
pub async fn update(
    state: &AppState,
    line_id: i64,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let line = state.cart().update_quantity(line_id.into(), quantity).await?;
    info!("Line #{} updated to quantity {}", line.id, line.quantity);
    Ok(())
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if the line is unknown or the write fails.
pub async fn remove(state: &AppState, line_id: i64) -> Result<(), Box<dyn std::error::Error>> {
    state.cart().remove(line_id.into()).await?;
    info!("Line #{line_id} removed");
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the write fails.
pub async fn clear(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    state.cart().clear().await?;
    info!("Cart cleared");
    Ok(())
}

/// Show cart lines, enriched with product names, and the derived totals.
///
/// # Errors
///
/// Returns an error if a read fails.
pub async fn show(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let lines = state.cart().get_lines().await?;

    if lines.is_empty() {
        info!("Your cart is empty");
        return Ok(());
    }

    for line in &lines {
        // Enrich with the catalog name; the line itself only references the
        // product identity.
        let name = match state.catalog().get_product(line.product_id).await {
            Ok(product) => product.name,
            Err(_) => format!("product #{}", line.product_id),
        };
        info!(
            "#{:<4} {:<28} size {:<4} x{:<3} @ ₹{} = ₹{}",
            line.id,
            name,
            line.size,
            line.quantity,
            line.price,
            line.line_total()
        );
    }

    let totals = cart::totals(&lines);
    info!("Subtotal: ₹{}", totals.subtotal);
    if totals.shipping.is_zero() {
        info!("Shipping: free");
    } else {
        info!("Shipping: ₹{}", totals.shipping);
    }
    info!("Total:    ₹{}", totals.total);
    Ok(())
}
