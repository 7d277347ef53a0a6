//! Core data types for deptrace.
//!
//! This crate defines the vocabulary shared by the resolver, the registry
//! client, the layout engine, and the CLI: package identifiers, on-chain
//! package metadata, dependency and module trees, networks, global
//! configuration, and the [`provider::MetadataProvider`] seam.
//!
//! This crate is intentionally free of network I/O.

pub mod config;
pub mod metadata;
pub mod network;
pub mod package;
pub mod provider;
pub mod tree;
