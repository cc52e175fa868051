//! Integration tests for StyleHub.
//!
//! Each test builds an [`AppState`] over a file store in a fresh temp
//! directory and exercises full flows (seed, browse, cart, wishlist) the way
//! the CLI does. Rebuilding the state over the same directory verifies
//! persistence across sessions.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p stylehub-integration-tests
//! ```

use std::path::{Path, PathBuf};

use stylehub_storefront::config::{StoreBackend, StorefrontConfig};
use stylehub_storefront::state::AppState;

/// Workspace `seeds/` directory with the static catalog documents.
#[must_use]
pub fn seed_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../seeds")
}

/// Build application state over a file store rooted at `data_dir`.
///
/// Rebuilding over the same directory simulates a new session against the
/// same persisted data.
#[must_use]
pub fn state_at(data_dir: &Path) -> AppState {
    let config = StorefrontConfig {
        data_dir: data_dir.to_path_buf(),
        seed_dir: seed_dir(),
        backend: StoreBackend::Local,
    };
    AppState::new(config)
}

/// Build application state over a fresh temp directory.
///
/// The returned `TempDir` guard must be kept alive for the duration of the
/// test.
#[must_use]
pub fn temp_state() -> (tempfile::TempDir, AppState) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let state = state_at(dir.path());
    (dir, state)
}

/// Build application state over a fresh temp directory with the seed catalog
/// loaded.
pub async fn seeded_state() -> (tempfile::TempDir, AppState) {
    let (dir, state) = temp_state();
    state
        .catalog()
        .seed_from_dir(&seed_dir())
        .await
        .expect("seed catalog");
    (dir, state)
}
