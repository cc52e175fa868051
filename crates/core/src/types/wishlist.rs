//! Wishlist records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ProductId, WishlistEntryId};

/// A saved product reference.
///
/// Invariant (maintained by the wishlist engine): at most one entry exists
/// per product identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    #[serde(rename = "Id")]
    pub id: WishlistEntryId,
    pub product_id: ProductId,
    pub added_at: DateTime<Utc>,
}
