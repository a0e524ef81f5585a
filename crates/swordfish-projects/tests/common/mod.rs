//! Shared test utilities for the projects view integration tests.
//!
//! This module provides:
//! - `ViewHarness` wiring a view to an in-memory store channel and mount
//! - `ProjectBuilder` for building pushed project records

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::ViewHarness;
