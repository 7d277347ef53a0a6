//! Shared utilities for deptrace.
//!
//! This crate provides cross-cutting concerns used by all other deptrace
//! crates: the unified error type, filesystem helpers, and terminal progress
//! indicators.

pub mod errors;
pub mod fs;
pub mod progress;
