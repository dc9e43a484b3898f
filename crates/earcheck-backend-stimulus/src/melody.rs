//! Atonal melody pair generation.
//!
//! A pair is produced by rejection sampling: draw a random walk of distinct
//! notes with steps under an octave, keep it if it is valid, then search for a
//! single-note change that keeps the contour and validity. Failed draws are
//! discarded and retried; the retry loop ends with probability one for every
//! supported length.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace};

use earcheck_spec::{MAX_MELODY_LENGTH, MAX_OCTAVES, MIN_MELODY_LENGTH};

use crate::error::{StimulusError, StimulusResult};
use crate::note::{Melody, Note, OCTAVE_SEMITONES};
use crate::validator::{first_difference, MelodyValidator};

/// Widest step allowed between consecutive notes.
const MAX_STEP: i32 = OCTAVE_SEMITONES as i32 - 1;

/// An original melody and its single-note variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MelodyPair {
    /// Melody played first.
    pub original: Melody,
    /// Melody played second, differing at `changed_index`.
    pub modified: Melody,
    /// Position of the changed note.
    pub changed_index: usize,
    /// Candidates drawn before this pair was accepted.
    pub attempts: u64,
}

/// Counters describing the rejection sampler's work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenerationStats {
    /// Pairs produced.
    pub pairs: u64,
    /// Candidate walks drawn.
    pub candidates: u64,
    /// Walks abandoned because a window ran empty.
    pub exhausted: u64,
    /// Complete walks rejected by the validator.
    pub rejected: u64,
    /// Valid walks that had no acceptable modification.
    pub unmodifiable: u64,
}

impl GenerationStats {
    /// Share of candidate walks that became pairs.
    pub fn success_rate(&self) -> Option<f64> {
        if self.candidates == 0 {
            None
        } else {
            Some(self.pairs as f64 / self.candidates as f64)
        }
    }
}

/// Generates atonal melody pairs over a fixed note range.
#[derive(Debug, Clone)]
pub struct MelodyGenerator<'a> {
    validator: MelodyValidator<'a>,
    note_count: u8,
    stats: GenerationStats,
}

impl MelodyGenerator<'static> {
    /// Creates a generator over `octaves` octaves using the global scale index.
    ///
    /// # Example
    /// ```
    /// use earcheck_backend_stimulus::{create_rng, MelodyGenerator, MelodyValidator};
    ///
    /// let mut generator = MelodyGenerator::new(2).unwrap();
    /// let mut rng = create_rng(42);
    /// let pair = generator.generate_pair(&mut rng, 6).unwrap();
    ///
    /// let validator = MelodyValidator::new();
    /// assert!(validator.is_single_difference_contour_match(&pair.original, &pair.modified));
    /// ```
    pub fn new(octaves: u8) -> StimulusResult<Self> {
        Self::with_validator(MelodyValidator::new(), octaves)
    }
}

impl<'a> MelodyGenerator<'a> {
    /// Creates a generator with an explicit validator.
    pub fn with_validator(validator: MelodyValidator<'a>, octaves: u8) -> StimulusResult<Self> {
        if !(1..=MAX_OCTAVES).contains(&octaves) {
            return Err(StimulusError::invalid_param(
                "octaves",
                format!("must be between 1 and {}, got {}", MAX_OCTAVES, octaves),
            ));
        }
        Ok(Self {
            validator,
            note_count: octaves * OCTAVE_SEMITONES,
            stats: GenerationStats::default(),
        })
    }

    /// Number of notes the generator draws from.
    pub fn note_count(&self) -> u8 {
        self.note_count
    }

    /// Work done so far.
    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// Largest length this generator accepts.
    pub fn max_length(&self) -> usize {
        MAX_MELODY_LENGTH.min(self.note_count as usize)
    }

    /// Rejects lengths that cannot yield a valid pair.
    pub fn check_length(&self, length: usize) -> StimulusResult<()> {
        let max = self.max_length();
        if (MIN_MELODY_LENGTH..=max).contains(&length) {
            Ok(())
        } else {
            Err(StimulusError::InvalidLength {
                length,
                min: MIN_MELODY_LENGTH,
                max,
            })
        }
    }

    /// Draws one random walk of distinct notes.
    ///
    /// The first note is uniform over the range; each further note is uniform
    /// over the unused notes within an octave of the previous one. The result
    /// is not checked against the atonality rules.
    pub fn generate_candidate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> StimulusResult<Melody> {
        self.check_length(length)?;

        let top = self.note_count as i32 - 1;
        let mut used = 0u64;
        let mut melody = Vec::with_capacity(length);
        let mut window: Vec<Note> = Vec::with_capacity(2 * MAX_STEP as usize + 1);

        let first = rng.gen_range(0..self.note_count);
        melody.push(first);
        used |= 1u64 << first;

        for position in 1..length {
            let prev = melody[position - 1] as i32;
            let low = (prev - MAX_STEP).max(0);
            let high = (prev + MAX_STEP).min(top);

            window.clear();
            window.extend(
                (low..=high)
                    .map(|n| n as Note)
                    .filter(|&n| used & (1u64 << n) == 0),
            );

            let next = *window
                .choose(rng)
                .ok_or(StimulusError::GenerationExhausted { length, position })?;
            melody.push(next);
            used |= 1u64 << next;
        }

        Ok(melody)
    }

    /// Finds a variant of `original` differing in one note with the same
    /// contour, both melodies valid.
    ///
    /// Positions are tried in random order, and for each position the values
    /// that keep the neighbouring steps in direction and under an octave are
    /// tried in random order.
    pub fn modify<R: Rng + ?Sized>(&self, rng: &mut R, original: &[Note]) -> StimulusResult<Melody> {
        self.modify_indexed(rng, original).map(|(melody, _)| melody)
    }

    fn modify_indexed<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        original: &[Note],
    ) -> StimulusResult<(Melody, usize)> {
        let length = original.len();
        let mut positions: Vec<usize> = (0..length).collect();
        positions.shuffle(rng);

        let mut candidate = original.to_vec();
        let mut values: Vec<Note> = Vec::new();

        for index in positions {
            let current = original[index] as i32;
            let mut low = 0;
            let mut high = self.note_count as i32 - 1;

            let neighbours = [
                index.checked_sub(1).map(|i| original[i]),
                original.get(index + 1).copied(),
            ];
            for neighbour in neighbours.into_iter().flatten() {
                let neighbour = neighbour as i32;
                if neighbour > current {
                    high = high.min(neighbour - 1);
                    low = low.max(neighbour - MAX_STEP);
                } else {
                    low = low.max(neighbour + 1);
                    high = high.min(neighbour + MAX_STEP);
                }
            }

            values.clear();
            values.extend((low..=high).filter(|&v| v != current).map(|v| v as Note));
            values.shuffle(rng);

            for &value in &values {
                candidate[index] = value;
                if self
                    .validator
                    .is_single_difference_contour_match(original, &candidate)
                {
                    return Ok((candidate, index));
                }
            }
            candidate[index] = original[index];
        }

        Err(StimulusError::ModificationExhausted { length })
    }

    /// Produces a valid pair of the requested length.
    ///
    /// Only an unsupported length is an error; exhausted walks and
    /// unmodifiable melodies are retried.
    pub fn generate_pair<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        length: usize,
    ) -> StimulusResult<MelodyPair> {
        self.check_length(length)?;

        let mut attempts = 0u64;
        loop {
            attempts += 1;
            self.stats.candidates += 1;

            let original = match self.generate_candidate(rng, length) {
                Ok(melody) => melody,
                Err(err) => {
                    self.stats.exhausted += 1;
                    trace!(%err, "discarding melody walk");
                    continue;
                }
            };

            if let Err(violation) = self.validator.check_melody(&original) {
                self.stats.rejected += 1;
                trace!(%violation, ?original, "rejecting melody candidate");
                continue;
            }

            match self.modify_indexed(rng, &original) {
                Ok((modified, changed_index)) => {
                    self.stats.pairs += 1;
                    debug!(length, attempts, changed_index, "generated melody pair");
                    return Ok(MelodyPair {
                        original,
                        modified,
                        changed_index,
                        attempts,
                    });
                }
                Err(err) => {
                    self.stats.unmodifiable += 1;
                    trace!(%err, ?original, "no modification found");
                }
            }
        }
    }
}

impl MelodyPair {
    /// Recomputes the changed position from the melodies themselves.
    pub fn difference(&self) -> Option<usize> {
        first_difference(&self.original, &self.modified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::create_rng;

    #[test]
    fn test_candidate_steps_and_range() {
        let generator = MelodyGenerator::new(2).unwrap();
        let mut rng = create_rng(7);
        let mut produced = 0;
        for _ in 0..200 {
            let Ok(melody) = generator.generate_candidate(&mut rng, 9) else {
                continue;
            };
            produced += 1;
            assert_eq!(melody.len(), 9);
            assert!(melody.iter().all(|&n| n < 24));
            for pair in melody.windows(2) {
                assert!(pair[0].abs_diff(pair[1]) <= 11);
            }
            let mut sorted = melody.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 9);
        }
        assert!(produced > 0);
    }

    #[test]
    fn test_pairs_are_valid() {
        let mut generator = MelodyGenerator::new(2).unwrap();
        let validator = MelodyValidator::new();
        let mut rng = create_rng(1234);
        for length in MIN_MELODY_LENGTH..=MAX_MELODY_LENGTH {
            for _ in 0..5 {
                let pair = generator.generate_pair(&mut rng, length).unwrap();
                assert_eq!(pair.original.len(), length);
                assert_eq!(
                    validator.check_pair(&pair.original, &pair.modified),
                    Ok(pair.changed_index)
                );
                assert_eq!(pair.difference(), Some(pair.changed_index));
            }
        }
        let stats = generator.stats();
        assert_eq!(stats.pairs, 30);
        assert_eq!(
            stats.candidates,
            stats.pairs + stats.exhausted + stats.rejected + stats.unmodifiable
        );
    }

    #[test]
    fn test_pair_generation_is_deterministic() {
        let mut a = MelodyGenerator::new(2).unwrap();
        let mut b = MelodyGenerator::new(2).unwrap();
        let pair_a = a.generate_pair(&mut create_rng(99), 7).unwrap();
        let pair_b = b.generate_pair(&mut create_rng(99), 7).unwrap();
        assert_eq!(pair_a, pair_b);
    }

    #[test]
    fn test_modify_chromatic_run() {
        let generator = MelodyGenerator::new(2).unwrap();
        let validator = MelodyValidator::new();
        let original = [0, 1, 2, 3];
        let modified = generator.modify(&mut create_rng(3), &original).unwrap();
        assert!(validator.is_single_difference_contour_match(&original, &modified));
    }

    #[test]
    fn test_unsupported_lengths() {
        let mut generator = MelodyGenerator::new(2).unwrap();
        let mut rng = create_rng(0);
        for length in [0, 1, 2, 3, 10] {
            assert!(matches!(
                generator.generate_pair(&mut rng, length),
                Err(StimulusError::InvalidLength { .. })
            ));
        }
    }

    #[test]
    fn test_single_octave_caps_length() {
        let generator = MelodyGenerator::new(1).unwrap();
        assert_eq!(generator.max_length(), 9);
        assert!(MelodyGenerator::new(0).is_err());
    }
}
