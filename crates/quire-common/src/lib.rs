//! Common utilities for the Quire layout engine.
//!
//! This crate provides shared infrastructure used by the layout crates:
//! - **Warning System** - deduplicated, colored terminal output for degenerate
//!   inputs that layout works around instead of rejecting

pub mod warning;
