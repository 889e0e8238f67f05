//! Fuzzing library for chemnet-explorer.
//!
//! Targets feed arbitrary backend payloads through deserialization and view
//! building, which must never panic.
//!
//! # Usage
//!
//! ```bash
//! cd crates/chemnet-fuzz
//! cargo +nightly fuzz run fuzz_search_response -- -max_total_time=60
//! ```

pub use chemnet_explorer::{models, views};
