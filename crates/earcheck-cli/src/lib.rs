//! earcheck CLI library.
//!
//! This crate provides the command implementations behind the `earcheck`
//! binary: interactive sessions, offline stimulus generation, melody and scale
//! lookups, and configuration loading.

pub mod commands;
pub mod input;
pub mod notes;
