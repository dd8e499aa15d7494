//! Property-based tests for ordering guarantees
