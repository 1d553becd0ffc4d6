//! Shared test utilities for plint.

pub mod fixtures;
