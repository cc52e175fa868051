//! Cart records and derived totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CartLineId, ProductId};

/// One entry in the cart: a specific product + size + quantity.
///
/// Invariant (maintained by the cart engine): at most one line exists per
/// (`product_id`, `size`) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(rename = "Id")]
    pub id: CartLineId,
    pub product_id: ProductId,
    /// One of the product's size labels.
    pub size: String,
    /// Always >= 1.
    pub quantity: u32,
    /// Effective price snapshot taken when the line was added; never
    /// re-fetched from the catalog.
    pub price: Decimal,
}

impl CartLine {
    /// Line total: unit price x quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Totals derived from the cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = CartLine {
            id: CartLineId::new(1),
            product_id: ProductId::new(9),
            size: "L".to_string(),
            quantity: 3,
            price: Decimal::from(250),
        };
        assert_eq!(line.line_total(), Decimal::from(750));
    }

    #[test]
    fn test_serde_shape_matches_store_records() {
        let line = CartLine {
            id: CartLineId::new(4),
            product_id: ProductId::new(9),
            size: "L".to_string(),
            quantity: 2,
            price: Decimal::from(499),
        };
        let json = serde_json::to_value(&line).expect("serialize");
        assert_eq!(json["Id"], 4);
        assert_eq!(json["productId"], 9);
        assert_eq!(json["price"], "499");
    }
}
