//! Common utilities for css2xpath.
//!
//! This crate provides shared infrastructure used by the translator and its CLI:
//! - **Warning System** - colored terminal output for tolerated selector quirks

pub mod warning;
