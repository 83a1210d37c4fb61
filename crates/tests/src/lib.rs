//! Shared fixtures for the workspace integration tests.

use std::path::PathBuf;

pub fn fixture_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/content-db.json")
}
