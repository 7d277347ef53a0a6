//! On-disk package metadata cache.
//!
//! A single JSON object keyed `"<network>::<address>::<name>"`, each value
//! being the package metadata plus the address it was published at. The
//! file is read once when opened and written back in one piece by
//! [`MetadataCache::save`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use deptrace_core::metadata::PackageMetadata;
use deptrace_core::network::Network;
use deptrace_util::errors::DepTraceError;
use serde::{Deserialize, Serialize};

/// Package metadata together with the address it lives at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedPackage {
    pub address: String,
    #[serde(flatten)]
    pub metadata: PackageMetadata,
}

#[derive(Debug, Clone)]
pub struct MetadataCache {
    path: PathBuf,
    entries: BTreeMap<String, CachedPackage>,
    dirty: bool,
}

impl MetadataCache {
    /// Open the cache at `path`. A missing or unreadable file yields an
    /// empty cache; it is replaced on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable metadata cache {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        tracing::debug!("Loaded {} cached packages from {}", entries.len(), path.display());
        Self {
            path,
            entries,
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn key(network: Network, address: &str, name: &str) -> String {
        format!("{network}::{address}::{name}")
    }

    pub fn get(&self, network: Network, address: &str, name: &str) -> Option<&CachedPackage> {
        self.entries.get(&Self::key(network, address, name))
    }

    pub fn insert(&mut self, network: Network, address: &str, metadata: PackageMetadata) {
        let key = Self::key(network, address, &metadata.name);
        self.entries.insert(
            key,
            CachedPackage {
                address: address.to_string(),
                metadata,
            },
        );
        self.dirty = true;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of cached packages per network.
    pub fn count_by_network(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for key in self.entries.keys() {
            let network = key.split("::").next().unwrap_or_default();
            *counts.entry(network.to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Write the cache back to disk if anything was inserted since opening.
    pub fn save(&mut self) -> Result<(), DepTraceError> {
        if !self.dirty {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| DepTraceError::Cache {
            message: format!("Failed to serialize metadata cache: {e}"),
        })?;
        deptrace_util::fs::write_atomic(&self.path, json.as_bytes()).map_err(|e| {
            DepTraceError::Cache {
                message: format!("Failed to write {}: {e}", self.path.display()),
            }
        })?;
        self.dirty = false;
        tracing::debug!("Saved {} cached packages to {}", self.len(), self.path.display());
        Ok(())
    }

    /// Delete the cache file. Returns the number of bytes freed.
    pub fn clear(path: &Path) -> Result<u64, DepTraceError> {
        if !path.is_file() {
            return Ok(0);
        }
        let size = deptrace_util::fs::file_size(path);
        std::fs::remove_file(path)?;
        Ok(size)
    }
}
