//! Determinism checks over serializable outputs.
//!
//! Outputs are hashed with BLAKE3 after JSON serialization; two runs are
//! considered identical when their hashes match.

use serde_json::Value;

/// Result of a determinism verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// Hash of the first run.
    pub hash: String,
    /// Index of the first run whose hash differed.
    pub first_mismatch: Option<usize>,
}

impl DeterminismResult {
    /// Panic with a detailed message if not deterministic.
    pub fn assert_deterministic(&self) {
        if let Some(run) = self.first_mismatch {
            panic!(
                "Non-deterministic output detected!\n\
                 Runs: {}\n\
                 Reference hash: {}\n\
                 First differing run: {}",
                self.runs, self.hash, run
            );
        }
    }
}

/// BLAKE3 hash of a JSON value's compact serialization.
pub fn hash_json(value: &Value) -> String {
    blake3::hash(value.to_string().as_bytes())
        .to_hex()
        .to_string()
}

/// Runs `generate_fn` `runs` times and compares the hashes of the outputs.
///
/// # Example
///
/// ```
/// use earcheck_tests::verify_determinism;
///
/// let result = verify_determinism(|| serde_json::json!({ "seed": 7 }), 3);
/// assert!(result.is_deterministic);
/// ```
pub fn verify_determinism<F>(generate_fn: F, runs: usize) -> DeterminismResult
where
    F: Fn() -> Value,
{
    assert!(runs >= 2, "Must run at least 2 times to verify determinism");

    let hash = hash_json(&generate_fn());
    let first_mismatch = (1..runs).find(|_| hash_json(&generate_fn()) != hash);

    DeterminismResult {
        is_deterministic: first_mismatch.is_none(),
        runs,
        hash,
        first_mismatch,
    }
}
