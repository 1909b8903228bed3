//! Shared fixtures and helpers for integration tests.

pub mod fixtures;
