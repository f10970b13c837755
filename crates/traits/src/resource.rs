//! Where the report engine gets its static assets.
//!
//! The engine needs exactly one asset, the company logo. Hosts decide where
//! it comes from: a directory next to the binary, bytes compiled into the
//! application, or anything else implementing [`ResourceProvider`].

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset path '{0}' leaves the asset directory")]
    OutsideAssetDir(String),

    #[error("Failed to read asset '{path}': {message}")]
    Unreadable { path: String, message: String },

    #[error("Asset store is unavailable (lock poisoned)")]
    Poisoned,
}

/// Asset bytes, shared between the provider and the logo cache.
pub type SharedResourceData = Arc<Vec<u8>>;

/// Loads raw asset bytes by relative path.
///
/// The logo cache holds its provider behind an `Arc` for the lifetime of the
/// engine and may call it from any thread.
pub trait ResourceProvider: Send + Sync + Debug {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError>;

    /// Short label used in log lines.
    fn name(&self) -> &'static str;
}

/// Assets held in memory, keyed by path.
///
/// Used by hosts that embed the logo in the binary, and by tests.
#[derive(Debug, Default)]
pub struct InMemoryResourceProvider {
    assets: RwLock<HashMap<String, SharedResourceData>>,
}

impl InMemoryResourceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(path: impl Into<String>, data: Vec<u8>) -> Self {
        let assets = HashMap::from([(path.into(), Arc::new(data))]);
        Self {
            assets: RwLock::new(assets),
        }
    }

    /// Stores `data` under `path`, replacing any previous asset.
    pub fn insert(&self, path: impl Into<String>, data: Vec<u8>) -> Result<(), ResourceError> {
        self.assets
            .write()
            .map_err(|_| ResourceError::Poisoned)?
            .insert(path.into(), Arc::new(data));
        Ok(())
    }
}

impl ResourceProvider for InMemoryResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        self.assets
            .read()
            .map_err(|_| ResourceError::Poisoned)?
            .get(path)
            .cloned()
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_load() {
        let provider = InMemoryResourceProvider::new();
        provider.insert("logo.png", b"\x89PNG".to_vec()).unwrap();

        assert_eq!(&*provider.load("logo.png").unwrap(), b"\x89PNG");
    }

    #[test]
    fn test_missing_asset() {
        let provider = InMemoryResourceProvider::new();
        assert_eq!(
            provider.load("logo.png"),
            Err(ResourceError::NotFound("logo.png".to_string()))
        );
    }

    #[test]
    fn test_insert_replaces() {
        let provider = InMemoryResourceProvider::with_resource("logo.png", vec![1, 2, 3]);
        provider.insert("logo.png", vec![4]).unwrap();
        assert_eq!(&*provider.load("logo.png").unwrap(), &[4]);
    }

    #[test]
    fn test_error_mentions_path() {
        let err = ResourceError::Unreadable {
            path: "brand/logo.png".to_string(),
            message: "permission denied".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("brand/logo.png"));
        assert!(text.contains("permission denied"));
    }
}
