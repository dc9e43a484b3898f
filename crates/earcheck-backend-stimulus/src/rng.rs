//! Seeded RNG using PCG32 with BLAKE3 seed derivation.
//!
//! All stimulus randomness flows through generators built here so a battery
//! seed reproduces every trial. Each task draws from its own stream, derived
//! from the battery seed and the task name.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The 32-bit seed is expanded to 64 bits by duplicating the value in both
/// halves, as required by PCG32's state initialization.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives a seed for a named component from the base seed.
///
/// Uses BLAKE3 over the little-endian base seed followed by the UTF-8 key and
/// keeps the first four bytes of the digest.
///
/// # Arguments
/// * `base_seed` - The battery seed
/// * `key` - Component name (e.g., "melody", "rhythm")
pub fn derive_component_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Creates the RNG for a named component.
pub fn create_component_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_component_seed(base_seed, key))
}

/// Draws a fresh battery seed from the thread RNG.
pub fn fresh_seed() -> u32 {
    rand::random()
}
