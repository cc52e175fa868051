//! Ingress validation for catalog records.
//!
//! Records arriving from the persisted store, the remote record service, or
//! a seed document are loosely shaped JSON. They are deserialized into
//! explicit raw structs (required/optional fields, default-fill rules) and
//! validated once here, at the boundary, instead of being checked ad hoc at
//! each call site.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use stylehub_core::{Category, CategoryId, Product, ProductId};

use crate::error::{AppError, Result};
use crate::store::{collections, record_id};

/// Raw product record as stored or served.
///
/// `name`, `brand`, `category`, `price`, and `sizes` are required;
/// everything else is filled with defaults when absent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(rename = "Id", alias = "id")]
    id: i64,
    name: String,
    brand: String,
    category: String,
    price: Decimal,
    #[serde(default)]
    discounted_price: Option<Decimal>,
    sizes: Vec<String>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    review_count: u32,
}

/// Raw category record as stored or served.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCategory {
    #[serde(rename = "Id", alias = "id")]
    id: i64,
    name: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    product_count: u32,
}

/// Field-level constraints a product must satisfy.
///
/// Also applied to administratively created/updated products, so the same
/// rules hold no matter which way a record enters the catalog.
pub(crate) fn check_product(product: &Product) -> std::result::Result<(), String> {
    if product.id.as_i64() < 1 {
        return Err("identity must be a positive integer".to_string());
    }
    if product.name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    if product.price < Decimal::ZERO {
        return Err("price must not be negative".to_string());
    }
    if let Some(discounted) = product.discounted_price {
        if discounted < Decimal::ZERO {
            return Err("discounted price must not be negative".to_string());
        }
        if discounted > product.price {
            return Err("discounted price must not exceed the base price".to_string());
        }
    }
    if product.sizes.is_empty() {
        return Err("sizes must not be empty".to_string());
    }
    if !(0.0..=5.0).contains(&product.rating) {
        return Err("rating must be between 0 and 5".to_string());
    }
    Ok(())
}

/// Field-level constraints a category must satisfy.
pub(crate) fn check_category(category: &Category) -> std::result::Result<(), String> {
    if category.id.as_i64() < 1 {
        return Err("identity must be a positive integer".to_string());
    }
    if category.name.trim().is_empty() {
        return Err("name must not be empty".to_string());
    }
    Ok(())
}

fn invalid(collection: &'static str, value: &Value, reason: impl Into<String>) -> AppError {
    AppError::InvalidRecord {
        collection,
        id: record_id(value).unwrap_or(0),
        reason: reason.into(),
    }
}

fn parse_product(value: Value) -> Result<Product> {
    let raw: RawProduct = serde_json::from_value(value.clone())
        .map_err(|e| invalid(collections::PRODUCTS, &value, e.to_string()))?;
    let product = Product {
        id: ProductId::new(raw.id),
        name: raw.name,
        brand: raw.brand,
        category: raw.category,
        price: raw.price,
        discounted_price: raw.discounted_price,
        sizes: raw.sizes,
        images: raw.images,
        rating: raw.rating,
        review_count: raw.review_count,
    };
    check_product(&product).map_err(|reason| invalid(collections::PRODUCTS, &value, reason))?;
    Ok(product)
}

fn parse_category(value: Value) -> Result<Category> {
    let raw: RawCategory = serde_json::from_value(value.clone())
        .map_err(|e| invalid(collections::CATEGORIES, &value, e.to_string()))?;
    let category = Category {
        id: CategoryId::new(raw.id),
        name: raw.name,
        image: raw.image,
        product_count: raw.product_count,
    };
    check_category(&category).map_err(|reason| invalid(collections::CATEGORIES, &value, reason))?;
    Ok(category)
}

/// Parse and validate a full product collection.
pub(crate) fn parse_products(values: Vec<Value>) -> Result<Vec<Product>> {
    values.into_iter().map(parse_product).collect()
}

/// Parse and validate a full category collection.
pub(crate) fn parse_categories(values: Vec<Value>) -> Result<Vec<Category>> {
    values.into_iter().map(parse_category).collect()
}
