//! Catalog records: products and categories.
//!
//! Records are serialized in the same shape the persisted store and the
//! remote record service use: camelCase fields with a capitalized `Id`
//! identity field.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId};

/// A catalog product.
///
/// Immutable from the cart and wishlist engines' perspective - they only
/// reference a product's identity and snapshot its effective price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "Id")]
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    /// Base price in the store currency.
    pub price: Decimal,
    /// Discounted price, when on sale. Always <= `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<Decimal>,
    /// Available size labels. Never empty.
    pub sizes: Vec<String>,
    pub images: Vec<String>,
    /// Average review rating on a 0-5 scale.
    pub rating: f64,
    pub review_count: u32,
}

impl Product {
    /// The price the customer actually pays: the discounted price when the
    /// product is on sale, the base price otherwise.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discounted_price.unwrap_or(self.price)
    }

    /// Discount percentage relative to the base price, when on sale.
    #[must_use]
    pub fn discount_percentage(&self) -> Option<u32> {
        let discounted = self.discounted_price?;
        if self.price.is_zero() {
            return None;
        }
        let fraction = (self.price - discounted) / self.price;
        (fraction * Decimal::from(100)).round().to_u32()
    }
}

/// A navigation category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(rename = "Id")]
    pub id: CategoryId,
    pub name: String,
    pub image: String,
    /// Number of products in the category, for display.
    pub product_count: u32,
}
