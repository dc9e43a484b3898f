//! Rhythm pair generation.
//!
//! A rhythm is a sequence of inter-onset intervals drawn from a palette. A
//! "different" variant is produced by a swap of two positions, a rotation, or
//! both (swap first), retried a bounded number of times until the result
//! actually differs.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace};

use earcheck_spec::{RhythmConfig, MIN_RHYTHM_LENGTH};

use crate::error::{StimulusError, StimulusResult};

/// Inter-onset intervals in milliseconds.
pub type Rhythm = Vec<u32>;

/// Swap/rotate draws per call to [`RhythmGenerator::modify`].
pub const MODIFY_ATTEMPTS: usize = 10;

/// Probabilities of the three modification kinds.
///
/// A uniform draw below `rotate_only` rotates, below
/// `rotate_only + swap_only` swaps, and otherwise does both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ModificationMix {
    /// Probability of rotating without swapping.
    pub rotate_only: f64,
    /// Probability of swapping without rotating.
    pub swap_only: f64,
}

impl Default for ModificationMix {
    fn default() -> Self {
        Self {
            rotate_only: 0.4,
            swap_only: 0.4,
        }
    }
}

/// Which transformations one draw applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modification {
    Rotate,
    Swap,
    SwapThenRotate,
}

impl ModificationMix {
    fn pick(&self, draw: f64) -> Modification {
        if draw < self.rotate_only {
            Modification::Rotate
        } else if draw < self.rotate_only + self.swap_only {
            Modification::Swap
        } else {
            Modification::SwapThenRotate
        }
    }
}

/// An original rhythm and the rhythm played after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RhythmPair {
    /// Rhythm played first.
    pub original: Rhythm,
    /// Rhythm played second; equal to `original` for a "same" trial.
    pub modified: Rhythm,
    /// Rhythm draws before this pair was accepted.
    pub attempts: u64,
}

impl RhythmPair {
    /// Returns true if the two rhythms are identical.
    pub fn is_same(&self) -> bool {
        self.original == self.modified
    }
}

/// Generates rhythm pairs from an interval palette.
#[derive(Debug, Clone, PartialEq)]
pub struct RhythmGenerator {
    palette: Vec<u32>,
    same_probability: f64,
    mix: ModificationMix,
}

impl RhythmGenerator {
    /// Creates a generator.
    ///
    /// The palette needs at least two distinct intervals, otherwise no rhythm
    /// can ever be modified.
    pub fn new(
        palette: Vec<u32>,
        same_probability: f64,
        mix: ModificationMix,
    ) -> StimulusResult<Self> {
        let mut distinct = palette.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() < 2 {
            return Err(StimulusError::invalid_param(
                "palette_ms",
                "needs at least two distinct intervals",
            ));
        }
        check_probability("same_probability", same_probability)?;
        check_probability("rotate_only_probability", mix.rotate_only)?;
        check_probability("swap_only_probability", mix.swap_only)?;
        if mix.rotate_only + mix.swap_only > 1.0 {
            return Err(StimulusError::invalid_param(
                "swap_only_probability",
                "rotate-only and swap-only probabilities sum above 1",
            ));
        }

        Ok(Self {
            palette,
            same_probability,
            mix,
        })
    }

    /// Creates a generator from a rhythm task configuration.
    pub fn from_config(config: &RhythmConfig) -> StimulusResult<Self> {
        Self::new(
            config.palette_ms.clone(),
            config.same_probability,
            ModificationMix {
                rotate_only: config.rotate_only_probability,
                swap_only: config.swap_only_probability,
            },
        )
    }

    /// Interval palette.
    pub fn palette(&self) -> &[u32] {
        &self.palette
    }

    /// Rejects lengths too short to modify.
    pub fn check_length(&self, length: usize) -> StimulusResult<()> {
        check_length(length)
    }

    /// Draws `length` intervals uniformly from the palette.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, length: usize) -> Rhythm {
        (0..length)
            .filter_map(|_| self.palette.choose(rng).copied())
            .collect()
    }

    /// Returns a variant that differs from `rhythm`.
    ///
    /// Fails with [`StimulusError::ModificationExhausted`] when
    /// [`MODIFY_ATTEMPTS`] draws all reproduce the input.
    pub fn modify<R: Rng + ?Sized>(&self, rng: &mut R, rhythm: &[u32]) -> StimulusResult<Rhythm> {
        let length = rhythm.len();
        check_length(length)?;

        for _ in 0..MODIFY_ATTEMPTS {
            let mut candidate = rhythm.to_vec();
            let modification = self.mix.pick(rng.gen::<f64>());

            if modification != Modification::Rotate {
                let i = rng.gen_range(0..length);
                let j = rng.gen_range(0..length);
                candidate.swap(i, j);
            }
            if modification != Modification::Swap {
                let offset = rng.gen_range(1..length);
                candidate.rotate_left(offset);
            }

            if candidate != rhythm {
                return Ok(candidate);
            }
            trace!(?modification, "modification reproduced the rhythm");
        }

        Err(StimulusError::ModificationExhausted { length })
    }

    /// Produces a pair using the configured "same" probability.
    pub fn generate_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> StimulusResult<RhythmPair> {
        self.generate_pair_with(rng, length, self.same_probability)
    }

    /// Produces a pair; with probability `same_probability` both rhythms are
    /// identical, otherwise the second is a modification of the first.
    ///
    /// The same/different draw happens once; only "different" pairs redraw
    /// the rhythm when it cannot be modified.
    ///
    /// # Example
    /// ```
    /// use earcheck_backend_stimulus::{create_rng, ModificationMix, RhythmGenerator};
    ///
    /// let generator =
    ///     RhythmGenerator::new(vec![150, 300, 450, 600], 0.5, ModificationMix::default()).unwrap();
    /// let pair = generator.generate_pair_with(&mut create_rng(1), 5, 0.0).unwrap();
    /// assert!(!pair.is_same());
    /// ```
    pub fn generate_pair_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
        same_probability: f64,
    ) -> StimulusResult<RhythmPair> {
        check_length(length)?;
        check_probability("same_probability", same_probability)?;

        if rng.gen_bool(same_probability) {
            let original = self.generate(rng, length);
            debug!(length, "generated same rhythm pair");
            return Ok(RhythmPair {
                modified: original.clone(),
                original,
                attempts: 1,
            });
        }

        let mut attempts = 0u64;
        loop {
            attempts += 1;
            let original = self.generate(rng, length);
            match self.modify(rng, &original) {
                Ok(modified) => {
                    debug!(length, attempts, "generated different rhythm pair");
                    return Ok(RhythmPair {
                        original,
                        modified,
                        attempts,
                    });
                }
                Err(err) => trace!(%err, ?original, "redrawing rhythm"),
            }
        }
    }
}

fn check_length(length: usize) -> StimulusResult<()> {
    if length < MIN_RHYTHM_LENGTH {
        return Err(StimulusError::InvalidLength {
            length,
            min: MIN_RHYTHM_LENGTH,
            max: usize::MAX,
        });
    }
    Ok(())
}

fn check_probability(name: &str, value: f64) -> StimulusResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(StimulusError::invalid_param(
            name,
            format!("must be within [0, 1], got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    fn generator() -> RhythmGenerator {
        RhythmGenerator::new(vec![150, 300, 450, 600], 0.5, ModificationMix::default()).unwrap()
    }

    #[test]
    fn test_generate_uses_palette() {
        let generator = generator();
        let rhythm = generator.generate(&mut create_rng(5), 7);
        assert_eq!(rhythm.len(), 7);
        assert!(rhythm.iter().all(|ioi| generator.palette().contains(ioi)));
    }

    #[test]
    fn test_modify_preserves_multiset() {
        let generator = generator();
        let mut rng = create_rng(11);
        let original = vec![150, 300, 450, 600, 150];
        for _ in 0..50 {
            let modified = generator.modify(&mut rng, &original).unwrap();
            assert_ne!(modified, original);
            let mut a = original.clone();
            let mut b = modified.clone();
            a.sort_unstable();
            b.sort_unstable();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_uniform_rhythm_cannot_be_modified() {
        let generator = generator();
        let result = generator.modify(&mut create_rng(2), &[300, 300, 300]);
        assert_eq!(
            result,
            Err(StimulusError::ModificationExhausted { length: 3 })
        );
    }

    #[test]
    fn test_same_probability_one_always_same() {
        let generator = generator();
        let mut rng = create_rng(8);
        for _ in 0..20 {
            assert!(generator.generate_pair_with(&mut rng, 5, 1.0).unwrap().is_same());
        }
    }

    #[test]
    fn test_same_probability_zero_always_different() {
        let generator = generator();
        let mut rng = create_rng(9);
        for _ in 0..20 {
            let pair = generator.generate_pair_with(&mut rng, 5, 0.0).unwrap();
            assert!(!pair.is_same());
            assert_eq!(pair.original.len(), pair.modified.len());
        }
    }

    #[test]
    fn test_same_rate_ignores_failed_modifications() {
        // Two-interval rhythms from a two-entry palette are uniform half the time.
        let generator =
            RhythmGenerator::new(vec![150, 300], 0.5, ModificationMix::default()).unwrap();
        let mut rng = create_rng(21);
        let trials = 20_000;
        let same = (0..trials)
            .filter(|_| generator.generate_pair(&mut rng, 2).unwrap().is_same())
            .count();
        let rate = same as f64 / trials as f64;
        assert!((rate - 0.5).abs() < 0.02, "same rate {}", rate);
    }

    #[test]
    fn test_mix_selection() {
        let mix = ModificationMix::default();
        assert_eq!(mix.pick(0.1), Modification::Rotate);
        assert_eq!(mix.pick(0.5), Modification::Swap);
        assert_eq!(mix.pick(0.9), Modification::SwapThenRotate);
    }

    #[test]
    fn test_rejects_degenerate_palette() {
        assert!(RhythmGenerator::new(vec![300, 300], 0.5, ModificationMix::default()).is_err());
        assert!(RhythmGenerator::new(vec![], 0.5, ModificationMix::default()).is_err());
    }

    #[test]
    fn test_rejects_short_length() {
        let generator = generator();
        assert!(matches!(
            generator.generate_pair(&mut create_rng(0), 1),
            Err(StimulusError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let generator = generator();
        assert!(generator.generate_pair_with(&mut create_rng(0), 4, 1.5).is_err());
        let mix = ModificationMix {
            rotate_only: 0.7,
            swap_only: 0.7,
        };
        assert!(RhythmGenerator::new(vec![150, 300], 0.5, mix).is_err());
    }
}
