//! Relayout: batch layout-mode migration for canvas content documents
//!
//! Walks a directory of canvas page folders, finds each content document, and
//! applies a fixed set of idempotent layout-mode field insertions, rewriting
//! files in place only when something actually changed.

pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod logging;
pub mod patch;
pub mod run;
