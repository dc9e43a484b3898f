//! earcheck End-to-End Test Infrastructure
//!
//! This crate holds integration tests that drive whole sessions and check
//! generator invariants over many seeds:
//!
//! - Sessions: every task run to completion with scripted answers
//! - Determinism: identical seeds produce identical reports and recordings
//! - Generators: property tests over arbitrary seeds and lengths
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p earcheck-tests
//! ```
//!
//! Session tests run on tokio's paused clock, so a full battery completes
//! without waiting for real playback time.

pub mod determinism;
pub mod harness;

pub use determinism::{hash_json, verify_determinism, DeterminismResult};
pub use harness::{run_scripted, AnswerPolicy, Oracle, ScriptedRun};
