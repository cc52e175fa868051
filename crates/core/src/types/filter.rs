//! Catalog narrowing criteria selected by the customer.

use std::collections::BTreeSet;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An optionally bounded price interval over effective prices.
///
/// An absent bound imposes no constraint on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// Whether `price` falls within the bounds.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        self.min.is_none_or(|min| price >= min) && self.max.is_none_or(|max| price <= max)
    }

    /// Whether both bounds are absent.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// The full set of user-selected narrowing criteria.
///
/// Empty sets mean "no restriction". Products carry no color attribute, so
/// color selections are carried for the UI but narrow nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    #[serde(default)]
    pub price_range: PriceRange,
    #[serde(default)]
    pub categories: BTreeSet<String>,
    #[serde(default)]
    pub brands: BTreeSet<String>,
    #[serde(default)]
    pub sizes: BTreeSet<String>,
    #[serde(default)]
    pub colors: BTreeSet<String>,
}

impl FilterState {
    /// Whether no criterion is set at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.price_range.is_unbounded()
            && self.categories.is_empty()
            && self.brands.is_empty()
            && self.sizes.is_empty()
            && self.colors.is_empty()
    }
}

/// Sort order applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Descending identity, a newest-first proxy.
    Newest,
    /// Ascending effective price.
    PriceLow,
    /// Descending effective price.
    PriceHigh,
    /// Descending rating.
    Rating,
}

impl SortKey {
    /// The wire/CLI spelling of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }
}

/// Error parsing a [`SortKey`] from its wire spelling.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct SortKeyParseError(pub String);

impl FromStr for SortKey {
    type Err = SortKeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            other => Err(SortKeyParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_range_contains() {
        let range = PriceRange {
            min: Some(Decimal::from(100)),
            max: Some(Decimal::from(500)),
        };
        assert!(range.contains(Decimal::from(100)));
        assert!(range.contains(Decimal::from(500)));
        assert!(!range.contains(Decimal::from(99)));
        assert!(!range.contains(Decimal::from(501)));

        let open_min = PriceRange {
            min: None,
            max: Some(Decimal::from(500)),
        };
        assert!(open_min.contains(Decimal::from(1)));
        assert!(PriceRange::default().contains(Decimal::from(1_000_000)));
    }

    #[test]
    fn test_filter_state_is_empty() {
        assert!(FilterState::default().is_empty());

        let mut state = FilterState::default();
        state.brands.insert("Nike".to_string());
        assert!(!state.is_empty());
    }

    #[test]
    fn test_sort_key_roundtrip() {
        for key in [
            SortKey::Newest,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Rating,
        ] {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert!("price".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_serde_spelling() {
        let json = serde_json::to_string(&SortKey::PriceLow).expect("serialize");
        assert_eq!(json, "\"price-low\"");
    }
}
