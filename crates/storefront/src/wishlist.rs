//! Wishlist engine.
//!
//! A set of product references with idempotent add/remove primitives.
//! Toggle is composed by the caller: check membership, then add or remove.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::instrument;

use stylehub_core::{ProductId, WishlistEntry, WishlistEntryId};

use crate::error::Result;
use crate::store::{Store, collections};

/// Service over the wishlist collection.
#[derive(Clone)]
pub struct WishlistService {
    inner: Arc<WishlistServiceInner>,
}

struct WishlistServiceInner {
    store: Store,
    // Serializes read-modify-write cycles so the one-entry-per-product
    // invariant holds even under concurrent callers.
    write_lock: Mutex<()>,
}

impl WishlistService {
    /// Create a wishlist service over a store.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(WishlistServiceInner {
                store,
                write_lock: Mutex::new(()),
            }),
        }
    }

    /// All wishlist entries.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the read fails.
    pub async fn get_entries(&self) -> Result<Vec<WishlistEntry>> {
        Ok(self.inner.store.load(collections::WISHLIST).await?)
    }

    /// Whether an entry exists for the product.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the read fails.
    pub async fn contains(&self, product_id: ProductId) -> Result<bool> {
        Ok(self
            .get_entries()
            .await?
            .iter()
            .any(|entry| entry.product_id == product_id))
    }

    /// Save a product reference. Idempotent: an existing entry is returned
    /// unchanged, keeping its original timestamp.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the write fails.
    #[instrument(skip(self))]
    pub async fn add(&self, product_id: ProductId) -> Result<WishlistEntry> {
        let _guard = self.inner.write_lock.lock().await;
        let mut entries: Vec<WishlistEntry> = self.inner.store.load(collections::WISHLIST).await?;

        if let Some(existing) = entries.iter().find(|entry| entry.product_id == product_id) {
            return Ok(existing.clone());
        }

        let id = self.inner.store.next_id(collections::WISHLIST).await?;
        let entry = WishlistEntry {
            id: WishlistEntryId::new(id),
            product_id,
            added_at: Utc::now(),
        };
        entries.push(entry.clone());
        self.inner.store.save(collections::WISHLIST, &entries).await?;
        Ok(entry)
    }

    /// Remove a product reference. Idempotent: removing a non-member is a
    /// successful no-op.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the write fails.
    #[instrument(skip(self))]
    pub async fn remove(&self, product_id: ProductId) -> Result<()> {
        let _guard = self.inner.write_lock.lock().await;
        let mut entries: Vec<WishlistEntry> = self.inner.store.load(collections::WISHLIST).await?;
        let before = entries.len();
        entries.retain(|entry| entry.product_id != product_id);
        if entries.len() == before {
            return Ok(());
        }
        self.inner.store.save(collections::WISHLIST, &entries).await?;
        Ok(())
    }

    /// Empty the wishlist unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the write fails.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        let _guard = self.inner.write_lock.lock().await;
        let empty: Vec<WishlistEntry> = Vec::new();
        self.inner.store.save(collections::WISHLIST, &empty).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> WishlistService {
        WishlistService::new(Store::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let wishlist = service();
        let first = wishlist.add(ProductId::new(5)).await.expect("add");
        let second = wishlist.add(ProductId::new(5)).await.expect("add");

        assert_eq!(first, second);
        let entries = wishlist.get_entries().await.expect("entries");
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_non_member_is_ok() {
        let wishlist = service();
        wishlist.remove(ProductId::new(99)).await.expect("no-op remove");
    }

    #[tokio::test]
    async fn test_add_then_remove() {
        let wishlist = service();
        wishlist.add(ProductId::new(5)).await.expect("add");
        assert!(wishlist.contains(ProductId::new(5)).await.expect("contains"));

        wishlist.remove(ProductId::new(5)).await.expect("remove");
        assert!(!wishlist.contains(ProductId::new(5)).await.expect("contains"));
    }

    #[tokio::test]
    async fn test_entries_get_distinct_ids() {
        let wishlist = service();
        let first = wishlist.add(ProductId::new(1)).await.expect("add");
        let second = wishlist.add(ProductId::new(2)).await.expect("add");
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_clear_empties_wishlist() {
        let wishlist = service();
        wishlist.add(ProductId::new(1)).await.expect("add");
        wishlist.add(ProductId::new(2)).await.expect("add");
        wishlist.clear().await.expect("clear");
        assert!(wishlist.get_entries().await.expect("entries").is_empty());
    }
}
