//! Integration test suite for javadoc-links
//!
//! End-to-end tests of link generation through the library API and of the
//! `javadoc-links` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **scenarios**: link generation from resolved artifacts, with a scripted
//!   transport standing in for documentation hosts
//! - **cli**: the binary, driven with `assert_cmd` against resolution files on
//!   disk (availability checks disabled, no network)

mod common;

mod cli;
mod scenarios;
