//! On-chain package metadata as returned by the `0x1::code::PackageRegistry`
//! resource.
//!
//! Only `name`, `modules` and `deps` are interpreted; everything else is
//! carried through untouched so cached entries round-trip.

use serde::{Deserialize, Serialize};

/// The package registry resource stored at an account address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageRegistry {
    #[serde(default)]
    pub packages: Vec<PackageMetadata>,
}

impl PackageRegistry {
    /// Find a package by exact name.
    pub fn find(&self, name: &str) -> Option<&PackageMetadata> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Names of all packages in this registry, in registry order.
    pub fn names(&self) -> Vec<String> {
        self.packages.iter().map(|p| p.name.clone()).collect()
    }
}

/// Metadata for one published package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    #[serde(default)]
    pub modules: Vec<ModuleMetadata>,
    #[serde(default)]
    pub deps: Vec<PackageDep>,
    #[serde(default)]
    pub upgrade_policy: UpgradePolicy,
    /// u64 encoded as a decimal string by the REST API.
    #[serde(default)]
    pub upgrade_number: String,
    #[serde(default)]
    pub source_digest: String,
    /// Hex-encoded, gzipped `Move.toml`.
    #[serde(default)]
    pub manifest: String,
    #[serde(default)]
    pub extension: serde_json::Value,
}

impl PackageMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a module with empty source fields.
    pub fn with_module(mut self, name: impl Into<String>) -> Self {
        self.modules.push(ModuleMetadata::new(name));
        self
    }

    /// Append a dependency on `account::package_name`.
    pub fn with_dep(mut self, account: impl Into<String>, package_name: impl Into<String>) -> Self {
        self.deps.push(PackageDep {
            account: account.into(),
            package_name: package_name.into(),
        });
        self
    }

    /// Declared dependency identifiers in declaration order.
    pub fn dependency_ids(&self) -> impl Iterator<Item = String> + '_ {
        self.deps.iter().map(PackageDep::package_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradePolicy {
    #[serde(default)]
    pub policy: u8,
}

/// A dependency reference: the owning address plus the package name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PackageDep {
    pub account: String,
    pub package_name: String,
}

impl PackageDep {
    pub fn package_id(&self) -> String {
        format!("{}::{}", self.account, self.package_name)
    }
}

/// A module descriptor. Only `name` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    pub name: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub source_map: String,
    #[serde(default)]
    pub extension: serde_json::Value,
}

impl ModuleMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
