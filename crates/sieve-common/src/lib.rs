//! Common utilities for the Sieve selector engine.
//!
//! This crate provides shared infrastructure used by all Sieve components:
//! - **Warning System** - deduplicated diagnostics routed through `tracing`

pub mod warning;
