//! StyleHub Storefront library.
//!
//! Headless storefront engines: a persisted record store, the catalog
//! repository, the cart and wishlist engines, and the pure filter & sort
//! engine. No UI lives here; front ends (the CLI, or an embedding server)
//! drive these services through [`state::AppState`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod filter;
pub mod state;
pub mod store;
pub mod wishlist;
