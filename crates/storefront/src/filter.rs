//! Filter & sort engine.
//!
//! Pure function over a product collection. Each filtering step narrows the
//! working set; the steps are independent conjunctions, so their order does
//! not affect the final result. Sorting is stable and applied last.

use stylehub_core::{FilterState, Product, SortKey};

use crate::error::{AppError, Result};

/// A complete catalog query: route context, free-text search, the
/// multi-select filter state, and an optional sort order.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Single category from route context (case-insensitive equality).
    /// Distinct from `filters.categories`, which is an additional
    /// multi-select refinement.
    pub category: Option<String>,
    /// Free-text query matched against name or brand (case-insensitive
    /// substring).
    pub search: Option<String>,
    pub filters: FilterState,
    /// No sort key preserves the filter order.
    pub sort: Option<SortKey>,
}

/// Apply a query to a product collection.
///
/// # Errors
///
/// Returns `InvalidArgument` if the price bounds are inverted (min > max).
pub fn apply(products: Vec<Product>, query: &ProductQuery) -> Result<Vec<Product>> {
    let range = query.filters.price_range;
    if let (Some(min), Some(max)) = (range.min, range.max)
        && min > max
    {
        return Err(AppError::InvalidArgument(format!(
            "price range min {min} exceeds max {max}"
        )));
    }

    // Empty strings behave like absent criteria, same as empty sets.
    let category = query.category.as_deref().filter(|c| !c.is_empty());
    let search = query
        .search
        .as_deref()
        .filter(|q| !q.is_empty())
        .map(str::to_lowercase);

    let mut filtered: Vec<Product> = products
        .into_iter()
        .filter(|product| {
            category.is_none_or(|c| product.category.eq_ignore_ascii_case(c))
        })
        .filter(|product| {
            search.as_deref().is_none_or(|q| {
                product.name.to_lowercase().contains(q)
                    || product.brand.to_lowercase().contains(q)
            })
        })
        .filter(|product| range.contains(product.effective_price()))
        .filter(|product| {
            query.filters.categories.is_empty()
                || query.filters.categories.contains(&product.category)
        })
        .filter(|product| {
            query.filters.brands.is_empty() || query.filters.brands.contains(&product.brand)
        })
        .filter(|product| {
            query.filters.sizes.is_empty()
                || product
                    .sizes
                    .iter()
                    .any(|size| query.filters.sizes.contains(size))
        })
        .collect();

    if let Some(sort) = query.sort {
        sort_products(&mut filtered, sort);
    }

    Ok(filtered)
}

/// Stable sort by the given key.
fn sort_products(products: &mut [Product], sort: SortKey) {
    match sort {
        SortKey::PriceLow => {
            products.sort_by(|a, b| a.effective_price().cmp(&b.effective_price()));
        }
        SortKey::PriceHigh => {
            products.sort_by(|a, b| b.effective_price().cmp(&a.effective_price()));
        }
        SortKey::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Newest => products.sort_by(|a, b| b.id.cmp(&a.id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use stylehub_core::{PriceRange, ProductId};

    fn product(id: i64, name: &str, brand: &str, category: &str, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            price: Decimal::from(price),
            discounted_price: None,
            sizes: vec!["M".to_string()],
            images: vec![],
            rating: 4.0,
            review_count: 10,
        }
    }

    fn ids(products: &[Product]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let products = vec![
            product(1, "Tee", "Nike", "Men", 500),
            product(2, "Dress", "Zara", "Women", 1500),
        ];
        let result = apply(products.clone(), &ProductQuery::default()).expect("apply");
        assert_eq!(result, products);
    }

    #[test]
    fn test_min_price_bound() {
        let products = vec![
            product(1, "Tee", "Nike", "Men", 500),
            product(2, "Dress", "Zara", "Women", 1500),
        ];
        let query = ProductQuery {
            filters: FilterState {
                price_range: PriceRange {
                    min: Some(Decimal::from(600)),
                    max: None,
                },
                ..FilterState::default()
            },
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(products, &query).expect("apply")), vec![2]);
    }

    #[test]
    fn test_price_range_uses_effective_price() {
        let mut discounted = product(1, "Tee", "Nike", "Men", 900);
        discounted.discounted_price = Some(Decimal::from(450));
        let products = vec![discounted, product(2, "Dress", "Zara", "Women", 800)];

        let query = ProductQuery {
            filters: FilterState {
                price_range: PriceRange {
                    min: Some(Decimal::from(500)),
                    max: None,
                },
                ..FilterState::default()
            },
            ..ProductQuery::default()
        };
        // Product 1's effective price is 450, so only product 2 survives.
        assert_eq!(ids(&apply(products, &query).expect("apply")), vec![2]);
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let query = ProductQuery {
            filters: FilterState {
                price_range: PriceRange {
                    min: Some(Decimal::from(900)),
                    max: Some(Decimal::from(100)),
                },
                ..FilterState::default()
            },
            ..ProductQuery::default()
        };
        let err = apply(vec![], &query).expect_err("invalid bounds");
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn test_route_category_is_case_insensitive() {
        let products = vec![
            product(1, "Tee", "Nike", "Men", 500),
            product(2, "Dress", "Zara", "Women", 1500),
        ];
        let query = ProductQuery {
            category: Some("men".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(products, &query).expect("apply")), vec![1]);
    }

    #[test]
    fn test_search_matches_name_or_brand() {
        let products = vec![
            product(1, "Running Shoes", "Nike", "Men", 2500),
            product(2, "Summer Dress", "Zara", "Women", 1500),
            product(3, "Denim Jacket", "Levi's", "Men", 3000),
        ];

        let by_name = ProductQuery {
            search: Some("dress".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(products.clone(), &by_name).expect("apply")), vec![2]);

        let by_brand = ProductQuery {
            search: Some("NIKE".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(products, &by_brand).expect("apply")), vec![1]);
    }

    #[test]
    fn test_brand_and_category_sets() {
        let products = vec![
            product(1, "Tee", "Nike", "Men", 500),
            product(2, "Dress", "Zara", "Women", 1500),
            product(3, "Hoodie", "Nike", "Women", 2000),
        ];
        let query = ProductQuery {
            filters: FilterState {
                brands: ["Nike".to_string()].into(),
                categories: ["Women".to_string()].into(),
                ..FilterState::default()
            },
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(products, &query).expect("apply")), vec![3]);
    }

    #[test]
    fn test_size_set_intersects() {
        let mut small = product(1, "Tee", "Nike", "Men", 500);
        small.sizes = vec!["XS".to_string(), "S".to_string()];
        let mut large = product(2, "Tee XL", "Nike", "Men", 500);
        large.sizes = vec!["XL".to_string(), "XXL".to_string()];

        let query = ProductQuery {
            filters: FilterState {
                sizes: ["S".to_string(), "M".to_string()].into(),
                ..FilterState::default()
            },
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(vec![small, large], &query).expect("apply")), vec![1]);
    }

    #[test]
    fn test_color_selection_narrows_nothing() {
        let products = vec![product(1, "Tee", "Nike", "Men", 500)];
        let query = ProductQuery {
            filters: FilterState {
                colors: ["Red".to_string()].into(),
                ..FilterState::default()
            },
            ..ProductQuery::default()
        };
        assert_eq!(apply(products.clone(), &query).expect("apply"), products);
    }

    #[test]
    fn test_sort_price_low_is_stable() {
        // Products 3 and 4 tie on price; 3 must stay ahead of 4.
        let products = vec![
            product(1, "A", "Nike", "Men", 300),
            product(2, "B", "Nike", "Men", 100),
            product(3, "C", "Nike", "Men", 200),
            product(4, "D", "Nike", "Men", 200),
        ];

        let query = ProductQuery {
            sort: Some(SortKey::PriceLow),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(products, &query).expect("apply")), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_sort_price_high() {
        let products = vec![
            product(1, "A", "Nike", "Men", 300),
            product(2, "B", "Nike", "Men", 100),
            product(3, "C", "Nike", "Men", 200),
        ];
        let query = ProductQuery {
            sort: Some(SortKey::PriceHigh),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(products, &query).expect("apply")), vec![1, 3, 2]);
    }

    #[test]
    fn test_sort_newest_is_descending_identity() {
        let products = vec![
            product(2, "B", "Nike", "Men", 100),
            product(9, "C", "Nike", "Men", 200),
            product(4, "A", "Nike", "Men", 300),
        ];
        let query = ProductQuery {
            sort: Some(SortKey::Newest),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(products, &query).expect("apply")), vec![9, 4, 2]);
    }

    #[test]
    fn test_sort_rating_descending() {
        let mut low = product(1, "A", "Nike", "Men", 100);
        low.rating = 3.1;
        let mut high = product(2, "B", "Nike", "Men", 100);
        high.rating = 4.8;

        let query = ProductQuery {
            sort: Some(SortKey::Rating),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(vec![low, high], &query).expect("apply")), vec![2, 1]);
    }

    #[test]
    fn test_filters_compound_as_conjunction() {
        let products = vec![
            product(1, "Running Shoes", "Nike", "Men", 2500),
            product(2, "Running Shorts", "Nike", "Men", 800),
            product(3, "Running Shoes", "Adidas", "Men", 2200),
        ];
        let query = ProductQuery {
            category: Some("Men".to_string()),
            search: Some("running".to_string()),
            filters: FilterState {
                brands: ["Nike".to_string()].into(),
                price_range: PriceRange {
                    min: Some(Decimal::from(1000)),
                    max: None,
                },
                ..FilterState::default()
            },
            sort: Some(SortKey::PriceLow),
            ..ProductQuery::default()
        };
        assert_eq!(ids(&apply(products, &query).expect("apply")), vec![1]);
    }
}
