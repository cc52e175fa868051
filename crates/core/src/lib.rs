//! StyleHub Core - Shared types library.
//!
//! This crate provides common types used across all StyleHub components:
//! - `storefront` - Headless storefront engines (catalog, cart, wishlist)
//! - `cli` - Command-line front end for browsing and cart management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs plus the catalog, cart,
//!   wishlist, and filter data model

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
