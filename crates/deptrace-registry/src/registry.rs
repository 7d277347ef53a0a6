//! A [`MetadataProvider`] backed by a fullnode and the on-disk cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use deptrace_core::metadata::{PackageMetadata, PackageRegistry};
use deptrace_core::package::PackageId;
use deptrace_core::provider::MetadataProvider;
use deptrace_util::errors::DepTraceError;
use reqwest::Client;

use crate::cache::MetadataCache;
use crate::download::{self, RetryPolicy};
use crate::node::FullNode;

/// Looks packages up in the metadata cache first, then on the fullnode.
///
/// Each address's registry is requested at most once per run; every
/// package it contains is cached, not only the one asked for.
pub struct CachedRegistry {
    client: Client,
    node: FullNode,
    cache: Option<Mutex<MetadataCache>>,
    offline: bool,
    retry: RetryPolicy,
    registries: Mutex<HashMap<String, Option<PackageRegistry>>>,
    requests: AtomicUsize,
}

impl CachedRegistry {
    pub fn new(client: Client, node: FullNode) -> Self {
        Self {
            client,
            node,
            cache: None,
            offline: false,
            retry: RetryPolicy::default(),
            registries: Mutex::new(HashMap::new()),
            requests: AtomicUsize::new(0),
        }
    }

    pub fn with_cache(mut self, cache: MetadataCache) -> Self {
        self.cache = Some(Mutex::new(cache));
        self
    }

    /// Never touch the network; cache misses become lookup errors.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn node(&self) -> &FullNode {
        &self.node
    }

    /// Number of registry requests sent to the fullnode so far.
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::Relaxed)
    }

    /// Persist newly fetched packages, if a cache is attached.
    pub fn save_cache(&self) -> Result<(), DepTraceError> {
        let Some(cache) = &self.cache else {
            return Ok(());
        };
        let mut cache = cache.lock().map_err(|_| DepTraceError::Cache {
            message: "metadata cache lock poisoned".to_string(),
        })?;
        cache.save()
    }

    fn cached(&self, id: &PackageId) -> Option<PackageMetadata> {
        let cache = self.cache.as_ref()?.lock().ok()?;
        cache
            .get(self.node.network, &id.address, &id.name)
            .map(|hit| hit.metadata.clone())
    }

    fn remember(&self, address: &str, registry: &Option<PackageRegistry>) {
        if let Some(registry) = registry {
            if let Some(Ok(mut cache)) = self.cache.as_ref().map(|c| c.lock()) {
                for package in &registry.packages {
                    cache.insert(self.node.network, address, package.clone());
                }
            }
        }
        if let Ok(mut registries) = self.registries.lock() {
            registries.insert(address.to_string(), registry.clone());
        }
    }

    fn fetched_registry(&self, address: &str) -> Option<Option<PackageRegistry>> {
        self.registries.lock().ok()?.get(address).cloned()
    }

    async fn registry_for(&self, id: &PackageId) -> Result<Option<PackageRegistry>, DepTraceError> {
        if let Some(registry) = self.fetched_registry(&id.address) {
            return Ok(registry);
        }
        if self.offline {
            return Err(DepTraceError::Lookup {
                id: id.to_string(),
                message: "not in the local metadata cache (offline)".to_string(),
            });
        }

        tracing::debug!("Fetching package registry for {}", id.address);
        self.requests.fetch_add(1, Ordering::Relaxed);
        let registry =
            download::fetch_registry(&self.client, &self.node, &id.address, self.retry).await?;
        self.remember(&id.address, &registry);
        Ok(registry)
    }
}

impl MetadataProvider for CachedRegistry {
    async fn fetch(&self, id: &PackageId) -> Result<PackageMetadata, DepTraceError> {
        if let Some(hit) = self.cached(id) {
            tracing::debug!("Cache hit for {id}");
            return Ok(hit);
        }

        let registry = self
            .registry_for(id)
            .await
            .map_err(|e| e.for_package(&id.to_string()))?;
        let Some(registry) = registry else {
            return Err(DepTraceError::Lookup {
                id: id.to_string(),
                message: "address has no package registry".to_string(),
            });
        };

        match registry.find(&id.name) {
            Some(meta) => Ok(meta.clone()),
            None => Err(DepTraceError::NotFoundInRegistry {
                id: id.to_string(),
                available: registry.names(),
            }),
        }
    }
}
