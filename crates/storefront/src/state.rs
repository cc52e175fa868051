//! Application state shared across front ends.

use std::sync::Arc;

use crate::cart::CartService;
use crate::catalog::CatalogRepository;
use crate::config::{StoreBackend, StorefrontConfig};
use crate::store::{JsonFileStore, RemoteRecordStore, Store};
use crate::wishlist::WishlistService;

/// Application state shared across all front ends.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configured store backend and the engines built on top of it.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Store,
    catalog: CatalogRepository,
    cart: CartService,
    wishlist: WishlistService,
}

impl AppState {
    /// Create application state with the backend the configuration selects.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let store = match &config.backend {
            StoreBackend::Local => Store::new(JsonFileStore::new(&config.data_dir)),
            StoreBackend::Remote(remote) => Store::new(RemoteRecordStore::new(remote)),
        };
        Self::with_store(config, store)
    }

    /// Create application state over an explicit store (tests, embeddings).
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: Store) -> Self {
        let catalog = CatalogRepository::new(store.clone());
        let cart = CartService::new(store.clone());
        let wishlist = WishlistService::new(store.clone());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                catalog,
                cart,
                wishlist,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a handle to the underlying store.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Get a reference to the catalog repository.
    #[must_use]
    pub fn catalog(&self) -> &CatalogRepository {
        &self.inner.catalog
    }

    /// Get a reference to the cart engine.
    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }

    /// Get a reference to the wishlist engine.
    #[must_use]
    pub fn wishlist(&self) -> &WishlistService {
        &self.inner.wishlist
    }
}
