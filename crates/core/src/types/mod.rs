//! Core types for StyleHub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod catalog;
pub mod filter;
pub mod id;
pub mod wishlist;

pub use cart::{CartLine, CartTotals};
pub use catalog::{Category, Product};
pub use filter::{FilterState, PriceRange, SortKey, SortKeyParseError};
pub use id::*;
pub use wishlist::WishlistEntry;
