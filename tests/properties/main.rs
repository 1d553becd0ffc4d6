//! Property tests for the check engine.

mod determinism_tests;
mod integrity_tests;
