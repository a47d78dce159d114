//! Property-based tests for tree determinism and incremental repair

mod incremental;
