//! Catalog repository: read/write access to product and category records.
//!
//! Reads are snapshot copies served through a short-lived `moka` cache;
//! administrative writes invalidate it. Listing reads are lenient (a storage
//! failure degrades to an empty sequence with a warning) while item reads
//! and every mutation are strict.

mod ingress;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{instrument, warn};

use stylehub_core::{Category, CategoryId, Product, ProductId};

use crate::error::{AppError, Result};
use crate::store::{Store, collections};

const CACHE_CAPACITY: u64 = 8;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Cache key for catalog collections.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
enum CacheKey {
    Products,
    Categories,
}

/// Cached value types.
#[derive(Clone)]
enum CacheValue {
    Products(Arc<Vec<Product>>),
    Categories(Arc<Vec<Category>>),
}

/// Fields of a product record, minus the store-allocated identity.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Decimal,
    pub discounted_price: Option<Decimal>,
    pub sizes: Vec<String>,
    pub images: Vec<String>,
    pub rating: f64,
    pub review_count: u32,
}

impl NewProduct {
    fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            brand: self.brand,
            category: self.category,
            price: self.price,
            discounted_price: self.discounted_price,
            sizes: self.sizes,
            images: self.images,
            rating: self.rating,
            review_count: self.review_count,
        }
    }
}

/// Fields of a category record, minus the store-allocated identity.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub image: String,
    pub product_count: u32,
}

impl NewCategory {
    fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            image: self.image,
            product_count: self.product_count,
        }
    }
}

/// Outcome of seeding the catalog from static documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedSummary {
    /// Products written, 0 when the collection already had data.
    pub products_seeded: usize,
    /// Categories written, 0 when the collection already had data.
    pub categories_seeded: usize,
}

/// Repository over the product and category collections.
#[derive(Clone)]
pub struct CatalogRepository {
    store: Store,
    cache: Cache<CacheKey, CacheValue>,
    // Serializes administrative read-modify-write cycles.
    write_lock: Arc<Mutex<()>>,
}

impl CatalogRepository {
    /// Create a repository over a store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            store,
            cache,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// List all products.
    ///
    /// Lenient read: a storage failure degrades to an empty sequence so a
    /// listing surface can still render; invalid records propagate.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if a stored record fails ingress validation.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>> {
        match self.load_products().await {
            Ok(products) => Ok(products),
            Err(AppError::Storage(err)) => {
                warn!(error = %err, "degrading product listing to empty after storage failure");
                Ok(Vec::new())
            }
            Err(other) => Err(other),
        }
    }

    /// Fetch one product by identity. Strict read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no product has that identity.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product> {
        self.load_products()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(collections::PRODUCTS, id.as_i64()))
    }

    /// Create a product record (administrative).
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if the fields fail validation, or
    /// `Storage` if the write fails.
    #[instrument(skip(self, fields), fields(name = %fields.name))]
    pub async fn create_product(&self, fields: NewProduct) -> Result<Product> {
        let _guard = self.write_lock.lock().await;
        let id = self.store.next_id(collections::PRODUCTS).await?;
        let product = fields.into_product(ProductId::new(id));
        check_new_product(&product)?;

        let mut products = self.load_products_uncached().await?;
        products.push(product.clone());
        self.store.save(collections::PRODUCTS, &products).await?;
        self.cache.invalidate(&CacheKey::Products).await;
        Ok(product)
    }

    /// Replace a product record's fields (administrative).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no product has that identity, `InvalidRecord`
    /// if the fields fail validation, or `Storage` if the write fails.
    #[instrument(skip(self, fields))]
    pub async fn update_product(&self, id: ProductId, fields: NewProduct) -> Result<Product> {
        let _guard = self.write_lock.lock().await;
        let updated = fields.into_product(id);
        check_new_product(&updated)?;

        let mut products = self.load_products_uncached().await?;
        let slot = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::not_found(collections::PRODUCTS, id.as_i64()))?;
        *slot = updated.clone();
        self.store.save(collections::PRODUCTS, &products).await?;
        self.cache.invalidate(&CacheKey::Products).await;
        Ok(updated)
    }

    /// Delete a product record (administrative).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no product has that identity, or `Storage` if
    /// the write fails.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: ProductId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut products = self.load_products_uncached().await?;
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() == before {
            return Err(AppError::not_found(collections::PRODUCTS, id.as_i64()));
        }
        self.store.save(collections::PRODUCTS, &products).await?;
        self.cache.invalidate(&CacheKey::Products).await;
        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories. Lenient read, like `get_products`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if a stored record fails ingress validation.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>> {
        match self.load_categories().await {
            Ok(categories) => Ok(categories),
            Err(AppError::Storage(err)) => {
                warn!(error = %err, "degrading category listing to empty after storage failure");
                Ok(Vec::new())
            }
            Err(other) => Err(other),
        }
    }

    /// Fetch one category by identity. Strict read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no category has that identity.
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: CategoryId) -> Result<Category> {
        self.load_categories()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(collections::CATEGORIES, id.as_i64()))
    }

    /// Create a category record (administrative).
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if the fields fail validation, or
    /// `Storage` if the write fails.
    #[instrument(skip(self, fields), fields(name = %fields.name))]
    pub async fn create_category(&self, fields: NewCategory) -> Result<Category> {
        let _guard = self.write_lock.lock().await;
        let id = self.store.next_id(collections::CATEGORIES).await?;
        let category = fields.into_category(CategoryId::new(id));
        check_new_category(&category)?;

        let mut categories = self.load_categories_uncached().await?;
        categories.push(category.clone());
        self.store.save(collections::CATEGORIES, &categories).await?;
        self.cache.invalidate(&CacheKey::Categories).await;
        Ok(category)
    }

    /// Replace a category record's fields (administrative).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no category has that identity, `InvalidRecord`
    /// if the fields fail validation, or `Storage` if the write fails.
    #[instrument(skip(self, fields))]
    pub async fn update_category(&self, id: CategoryId, fields: NewCategory) -> Result<Category> {
        let _guard = self.write_lock.lock().await;
        let updated = fields.into_category(id);
        check_new_category(&updated)?;

        let mut categories = self.load_categories_uncached().await?;
        let slot = categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(collections::CATEGORIES, id.as_i64()))?;
        *slot = updated.clone();
        self.store.save(collections::CATEGORIES, &categories).await?;
        self.cache.invalidate(&CacheKey::Categories).await;
        Ok(updated)
    }

    /// Delete a category record (administrative).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no category has that identity, or `Storage` if
    /// the write fails.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut categories = self.load_categories_uncached().await?;
        let before = categories.len();
        categories.retain(|c| c.id != id);
        if categories.len() == before {
            return Err(AppError::not_found(collections::CATEGORIES, id.as_i64()));
        }
        self.store.save(collections::CATEGORIES, &categories).await?;
        self.cache.invalidate(&CacheKey::Categories).await;
        Ok(())
    }

    // =========================================================================
    // Seeding
    // =========================================================================

    /// Load the static seed documents into empty collections.
    ///
    /// Collections that already hold records are left untouched, so the
    /// command is safe to run repeatedly.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if a seed document cannot be read, or
    /// `InvalidRecord` if one fails ingress validation.
    #[instrument(skip(self))]
    pub async fn seed_from_dir(&self, seed_dir: &Path) -> Result<SeedSummary> {
        let _guard = self.write_lock.lock().await;
        let mut summary = SeedSummary::default();

        if self.store.load_raw(collections::PRODUCTS).await?.is_empty() {
            let raw = read_seed_document(&seed_dir.join("products.json")).await?;
            let products = ingress::parse_products(raw)?;
            summary.products_seeded = products.len();
            self.store.save(collections::PRODUCTS, &products).await?;
            self.cache.invalidate(&CacheKey::Products).await;
        }

        if self.store.load_raw(collections::CATEGORIES).await?.is_empty() {
            let raw = read_seed_document(&seed_dir.join("categories.json")).await?;
            let categories = ingress::parse_categories(raw)?;
            summary.categories_seeded = categories.len();
            self.store.save(collections::CATEGORIES, &categories).await?;
            self.cache.invalidate(&CacheKey::Categories).await;
        }

        Ok(summary)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn load_products(&self) -> Result<Vec<Product>> {
        if let Some(CacheValue::Products(products)) = self.cache.get(&CacheKey::Products).await {
            return Ok(products.as_ref().clone());
        }
        let products = self.load_products_uncached().await?;
        self.cache
            .insert(
                CacheKey::Products,
                CacheValue::Products(Arc::new(products.clone())),
            )
            .await;
        Ok(products)
    }

    async fn load_products_uncached(&self) -> Result<Vec<Product>> {
        let raw = self.store.load_raw(collections::PRODUCTS).await?;
        ingress::parse_products(raw)
    }

    async fn load_categories(&self) -> Result<Vec<Category>> {
        if let Some(CacheValue::Categories(categories)) = self.cache.get(&CacheKey::Categories).await
        {
            return Ok(categories.as_ref().clone());
        }
        let categories = self.load_categories_uncached().await?;
        self.cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(Arc::new(categories.clone())),
            )
            .await;
        Ok(categories)
    }

    async fn load_categories_uncached(&self) -> Result<Vec<Category>> {
        let raw = self.store.load_raw(collections::CATEGORIES).await?;
        ingress::parse_categories(raw)
    }
}

fn check_new_product(product: &Product) -> Result<()> {
    ingress::check_product(product).map_err(|reason| AppError::InvalidRecord {
        collection: collections::PRODUCTS,
        id: product.id.as_i64(),
        reason,
    })
}

fn check_new_category(category: &Category) -> Result<()> {
    ingress::check_category(category).map_err(|reason| AppError::InvalidRecord {
        collection: collections::CATEGORIES,
        id: category.id.as_i64(),
        reason,
    })
}

async fn read_seed_document(path: &Path) -> Result<Vec<serde_json::Value>> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(crate::store::StoreError::from)?;
    let records = serde_json::from_slice(&bytes).map_err(crate::store::StoreError::from)?;
    Ok(records)
}
