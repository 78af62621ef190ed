//! Shared helpers for the integration test crates.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;

/// Path of a file under `tests/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a fixture as UTF-8 text.
///
/// Panics naming the fixture if it is missing or unreadable.
pub fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to load fixture {name} ({}): {e}", path.display()))
}

/// Load a fixture and deserialize it.
pub fn parse_fixture<T: DeserializeOwned>(name: &str) -> T {
    serde_json::from_str(&load_fixture(name))
        .unwrap_or_else(|e| panic!("fixture {name} does not match the target type: {e}"))
}
