//! Integration test binary
//!
//! Cargo picks up tests/integration/main.rs as a single target; the
//! suite itself lives in the modules below.

mod api_tests;
