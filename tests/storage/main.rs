//! Storage Integration Tests
//!
//! End-to-end behavior of dumpstore over a real directory tree: listing and
//! compat synthesis, retention backfill, classification and secure access.

#[path = "../common/mod.rs"]
mod common;

mod artifacts;
mod compat;
mod listing;
mod retention;
