//! The metadata lookup seam between the resolver and a package registry.

use std::collections::HashMap;
use std::sync::Mutex;

use deptrace_util::errors::DepTraceError;

use crate::metadata::PackageMetadata;
use crate::package::PackageId;

/// Answers "what does package `id` contain and depend on?".
///
/// Implementations own retries, timeouts, caching and network selection; the
/// resolver awaits one lookup at a time and propagates any error unchanged.
/// Errors should name `id` (see [`DepTraceError::for_package`]).
#[allow(async_fn_in_trait)]
pub trait MetadataProvider {
    async fn fetch(&self, id: &PackageId) -> Result<PackageMetadata, DepTraceError>;
}

impl<P: MetadataProvider + ?Sized> MetadataProvider for &P {
    async fn fetch(&self, id: &PackageId) -> Result<PackageMetadata, DepTraceError> {
        (**self).fetch(id).await
    }
}

/// A provider backed by a fixed map of packages. Records every lookup.
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    packages: HashMap<PackageId, PackageMetadata>,
    fetched: Mutex<Vec<String>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `metadata` under `address::metadata.name`.
    pub fn with_package(mut self, address: &str, metadata: PackageMetadata) -> Self {
        self.insert(address, metadata);
        self
    }

    pub fn insert(&mut self, address: &str, metadata: PackageMetadata) {
        let id = PackageId::new(address, metadata.name.clone());
        self.packages.insert(id, metadata);
    }

    /// Identifiers looked up so far, in lookup order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.lock().map(|f| f.clone()).unwrap_or_default()
    }
}

impl MetadataProvider for InMemoryProvider {
    async fn fetch(&self, id: &PackageId) -> Result<PackageMetadata, DepTraceError> {
        if let Ok(mut fetched) = self.fetched.lock() {
            fetched.push(id.to_string());
        }
        if let Some(meta) = self.packages.get(id) {
            return Ok(meta.clone());
        }

        let mut available: Vec<String> = self
            .packages
            .keys()
            .filter(|k| k.address == id.address)
            .map(|k| k.name.clone())
            .collect();
        if available.is_empty() {
            return Err(DepTraceError::Lookup {
                id: id.to_string(),
                message: "address has no package registry".to_string(),
            });
        }
        available.sort();
        Err(DepTraceError::NotFoundInRegistry {
            id: id.to_string(),
            available,
        })
    }
}
