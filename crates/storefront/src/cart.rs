//! Cart engine.
//!
//! Line items are keyed by (product, size): adding a pair that already has a
//! line merges by summing quantity instead of creating a duplicate. Unit
//! prices are snapshots taken at add time and never re-fetched from the
//! catalog. Totals are a pure function over the lines.

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::instrument;

use stylehub_core::{CartLine, CartLineId, CartTotals, ProductId};

use crate::error::{AppError, Result};
use crate::store::{Store, collections};

/// Subtotal above which shipping is free. Business rule, not configurable.
const FREE_SHIPPING_THRESHOLD: i64 = 1000;
/// Flat shipping fee charged below the threshold.
const FLAT_SHIPPING_FEE: i64 = 99;

/// Service over the cart collection.
#[derive(Clone)]
pub struct CartService {
    inner: Arc<CartServiceInner>,
}

struct CartServiceInner {
    store: Store,
    // Serializes read-modify-write cycles so the one-line-per-(product, size)
    // invariant holds even under concurrent callers.
    write_lock: Mutex<()>,
}

impl CartService {
    /// Create a cart service over a store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(CartServiceInner {
                store,
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// All cart lines.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the read fails.
    pub async fn get_lines(&self) -> Result<Vec<CartLine>> {
        Ok(self.inner.store.load(collections::CART).await?)
    }

    /// One cart line by identity.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no line has that identity.
    pub async fn get_line(&self, line_id: CartLineId) -> Result<CartLine> {
        self.get_lines()
            .await?
            .into_iter()
            .find(|line| line.id == line_id)
            .ok_or_else(|| AppError::not_found(collections::CART, line_id.as_i64()))
    }

    /// Add `quantity` of a (product, size) pair at a snapshot unit price.
    ///
    /// Merges into an existing line for the pair by summing quantity;
    /// otherwise allocates a new line. The product identity is trusted - the
    /// caller validates it against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `quantity` is 0, or `Storage` if the
    /// write fails.
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        product_id: ProductId,
        quantity: u32,
        size: &str,
        unit_price: Decimal,
    ) -> Result<CartLine> {
        check_quantity(quantity)?;

        let _guard = self.inner.write_lock.lock().await;
        let mut lines: Vec<CartLine> = self.inner.store.load(collections::CART).await?;

        let line = if let Some(line) = lines
            .iter_mut()
            .find(|line| line.product_id == product_id && line.size == size)
        {
            // No upper bound on the merged quantity.
            line.quantity = line.quantity.saturating_add(quantity);
            line.clone()
        } else {
            let id = self.inner.store.next_id(collections::CART).await?;
            let line = CartLine {
                id: CartLineId::new(id),
                product_id,
                size: size.to_string(),
                quantity,
                price: unit_price,
            };
            lines.push(line.clone());
            line
        };

        self.inner.store.save(collections::CART, &lines).await?;
        Ok(line)
    }

    /// Replace a line's quantity.
    ///
    /// Strict policy: a quantity below 1 is rejected and the line is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `quantity` is 0, `NotFound` if no line
    /// has that identity, or `Storage` if the write fails.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, line_id: CartLineId, quantity: u32) -> Result<CartLine> {
        check_quantity(quantity)?;

        let _guard = self.inner.write_lock.lock().await;
        let mut lines: Vec<CartLine> = self.inner.store.load(collections::CART).await?;
        let line = lines
            .iter_mut()
            .find(|line| line.id == line_id)
            .ok_or_else(|| AppError::not_found(collections::CART, line_id.as_i64()))?;
        line.quantity = quantity;
        let updated = line.clone();

        self.inner.store.save(collections::CART, &lines).await?;
        Ok(updated)
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no line has that identity, or `Storage` if the
    /// write fails.
    #[instrument(skip(self))]
    pub async fn remove(&self, line_id: CartLineId) -> Result<()> {
        let _guard = self.inner.write_lock.lock().await;
        let mut lines: Vec<CartLine> = self.inner.store.load(collections::CART).await?;
        let before = lines.len();
        lines.retain(|line| line.id != line_id);
        if lines.len() == before {
            return Err(AppError::not_found(collections::CART, line_id.as_i64()));
        }
        self.inner.store.save(collections::CART, &lines).await?;
        Ok(())
    }

    /// Empty the cart unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the write fails.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.inner.write_lock.lock().await;
        let empty: Vec<CartLine> = Vec::new();
        self.inner.store.save(collections::CART, &empty).await?;
        Ok(())
    }
}

fn check_quantity(quantity: u32) -> Result<()> {
    if quantity < 1 {
        return Err(AppError::InvalidArgument(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Compute the derived totals for a set of cart lines.
///
/// Pure: `subtotal` is the sum of unit price x quantity, shipping is free
/// above the threshold and a flat fee below it.
#[must_use]
pub fn totals(lines: &[CartLine]) -> CartTotals {
    let subtotal: Decimal = lines.iter().map(CartLine::line_total).sum();
    let shipping = if subtotal > Decimal::from(FREE_SHIPPING_THRESHOLD) {
        Decimal::ZERO
    } else {
        Decimal::from(FLAT_SHIPPING_FEE)
    };
    CartTotals {
        subtotal,
        shipping,
        total: subtotal + shipping,
    }
}

/// Total item count across all lines, for the cart badge.
#[must_use]
pub fn item_count(lines: &[CartLine]) -> u32 {
    lines.iter().map(|line| line.quantity).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> CartService {
        CartService::new(Store::new(MemoryStore::new()))
    }

    fn line(quantity: u32, price: Decimal) -> CartLine {
        CartLine {
            id: CartLineId::new(1),
            product_id: ProductId::new(1),
            size: "M".to_string(),
            quantity,
            price,
        }
    }

    #[tokio::test]
    async fn test_repeated_add_merges_by_product_and_size() {
        let cart = service();
        let product = ProductId::new(7);
        let price = Decimal::from(499);

        cart.add(product, 1, "M", price).await.expect("add");
        cart.add(product, 2, "M", price).await.expect("add");
        cart.add(product, 4, "M", price).await.expect("add");

        let lines = cart.get_lines().await.expect("lines");
        assert_eq!(lines.len(), 1);
        let merged = lines.first().expect("line");
        assert_eq!(merged.quantity, 7);
        assert_eq!(merged.id, CartLineId::new(1));
    }

    #[tokio::test]
    async fn test_distinct_sizes_get_distinct_lines() {
        let cart = service();
        let product = ProductId::new(7);
        let price = Decimal::from(499);

        cart.add(product, 1, "M", price).await.expect("add");
        cart.add(product, 1, "L", price).await.expect("add");
        cart.add(ProductId::new(8), 1, "M", price).await.expect("add");

        let lines = cart.get_lines().await.expect("lines");
        assert_eq!(lines.len(), 3);
    }

    #[tokio::test]
    async fn test_add_rejects_zero_quantity() {
        let cart = service();
        let err = cart
            .add(ProductId::new(1), 0, "M", Decimal::from(100))
            .await
            .expect_err("invalid");
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_update_quantity_zero_rejected_and_line_untouched() {
        let cart = service();
        let added = cart
            .add(ProductId::new(1), 3, "M", Decimal::from(100))
            .await
            .expect("add");

        let err = cart.update_quantity(added.id, 0).await.expect_err("invalid");
        assert!(matches!(err, AppError::InvalidArgument(_)));

        let fetched = cart.get_line(added.id).await.expect("line");
        assert_eq!(fetched.quantity, 3);
    }

    #[tokio::test]
    async fn test_update_quantity_replaces() {
        let cart = service();
        let added = cart
            .add(ProductId::new(1), 3, "M", Decimal::from(100))
            .await
            .expect("add");

        let updated = cart.update_quantity(added.id, 5).await.expect("update");
        assert_eq!(updated.quantity, 5);
    }

    #[tokio::test]
    async fn test_remove_unknown_line_not_found() {
        let cart = service();
        let err = cart.remove(CartLineId::new(42)).await.expect_err("absent");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_clear_empties_cart() {
        let cart = service();
        cart.add(ProductId::new(1), 1, "M", Decimal::from(100))
            .await
            .expect("add");
        cart.clear().await.expect("clear");
        assert!(cart.get_lines().await.expect("lines").is_empty());
    }

    #[test]
    fn test_totals_shipping_boundaries() {
        // 1000.01 clears the threshold.
        let t = totals(&[line(1, Decimal::new(100_001, 2))]);
        assert_eq!(t.shipping, Decimal::ZERO);
        assert_eq!(t.total, Decimal::new(100_001, 2));

        // Exactly 1000.00 does not.
        let t = totals(&[line(1, Decimal::from(1000))]);
        assert_eq!(t.shipping, Decimal::from(99));
        assert_eq!(t.total, Decimal::from(1099));

        // 500 pays the flat fee: total 599.
        let t = totals(&[line(1, Decimal::from(500))]);
        assert_eq!(t.subtotal, Decimal::from(500));
        assert_eq!(t.shipping, Decimal::from(99));
        assert_eq!(t.total, Decimal::from(599));
    }

    #[test]
    fn test_totals_sum_over_quantities() {
        let lines = vec![line(3, Decimal::from(200)), {
            let mut other = line(2, Decimal::from(350));
            other.id = CartLineId::new(2);
            other.size = "L".to_string();
            other
        }];
        let t = totals(&lines);
        assert_eq!(t.subtotal, Decimal::from(1300));
        assert_eq!(t.shipping, Decimal::ZERO);
        assert_eq!(item_count(&lines), 5);
    }

    #[test]
    fn test_totals_empty_cart() {
        let t = totals(&[]);
        assert_eq!(t.subtotal, Decimal::ZERO);
        assert_eq!(t.shipping, Decimal::from(99));
        assert_eq!(t.total, Decimal::from(99));
    }
}
