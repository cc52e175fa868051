//! Catalog browsing commands.

use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use stylehub_core::{FilterState, PriceRange, SortKey};
use stylehub_storefront::filter::{self, ProductQuery};
use stylehub_storefront::state::AppState;

/// Filtering and sorting options for the product listing.
#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Category route context (single, case-insensitive)
    #[arg(long)]
    pub category: Option<String>,

    /// Free-text search over name and brand
    #[arg(long)]
    pub search: Option<String>,

    /// Multi-select category refinement (repeatable)
    #[arg(long = "filter-category", value_name = "CATEGORY")]
    pub filter_categories: Vec<String>,

    /// Brand refinement (repeatable)
    #[arg(long = "brand", value_name = "BRAND")]
    pub brands: Vec<String>,

    /// Size refinement (repeatable)
    #[arg(long = "size", value_name = "SIZE")]
    pub sizes: Vec<String>,

    /// Lower bound on the effective price
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Upper bound on the effective price
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// Sort order: newest | price-low | price-high | rating
    #[arg(long)]
    pub sort: Option<SortKey>,
}

impl ProductsArgs {
    fn into_query(self) -> ProductQuery {
        ProductQuery {
            category: self.category,
            search: self.search,
            filters: FilterState {
                price_range: PriceRange {
                    min: self.min_price,
                    max: self.max_price,
                },
                categories: self.filter_categories.into_iter().collect(),
                brands: self.brands.into_iter().collect(),
                sizes: self.sizes.into_iter().collect(),
                colors: std::collections::BTreeSet::new(),
            },
            sort: self.sort,
        }
    }
}

/// List products matching the query.
///
/// # Errors
///
/// Returns an error if the catalog read fails or the query is malformed.
pub async fn products(
    state: &AppState,
    args: ProductsArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = args.into_query();
    let all = state.catalog().get_products().await?;
    let matched = filter::apply(all, &query)?;

    if matched.is_empty() {
        info!("No products matched");
        return Ok(());
    }

    for product in &matched {
        let price = product.effective_price();
        let sale = product
            .discount_percentage()
            .map(|p| format!(" (-{p}%)"))
            .unwrap_or_default();
        info!(
            "#{:<4} {:<28} {:<10} {:<8} ₹{price}{sale}",
            product.id, product.name, product.brand, product.category
        );
    }
    info!("{} product(s)", matched.len());
    Ok(())
}

/// Show one product in detail.
///
/// # Errors
///
/// Returns an error if no product has that identity.
pub async fn product(state: &AppState, id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let product = state.catalog().get_product(id.into()).await?;

    info!("#{} {}", product.id, product.name);
    info!("  Brand:    {}", product.brand);
    info!("  Category: {}", product.category);
    info!("  Price:    ₹{}", product.price);
    if let Some(discounted) = product.discounted_price {
        info!("  On sale:  ₹{discounted}");
    }
    info!("  Sizes:    {}", product.sizes.join(", "));
    info!("  Rating:   {} ({} reviews)", product.rating, product.review_count);
    Ok(())
}

/// List categories.
///
/// # Errors
///
/// Returns an error if the catalog read fails.
pub async fn categories(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let categories = state.catalog().get_categories().await?;

    if categories.is_empty() {
        info!("No categories (run `stylehub seed` first?)");
        return Ok(());
    }

    for category in &categories {
        info!(
            "#{:<4} {:<12} {} products",
            category.id, category.name, category.product_count
        );
    }
    Ok(())
}
