//! Aptos package registry access: fullnode endpoints, HTTP lookups with
//! retries, the on-disk metadata cache, and the caching
//! [`deptrace_core::provider::MetadataProvider`] built from them.

pub mod cache;
pub mod download;
pub mod node;
pub mod registry;
