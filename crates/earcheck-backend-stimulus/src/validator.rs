//! Atonality and contour rules for melodies and melody pairs.
//!
//! A melody is valid when its notes are distinct, no interval between
//! consecutive notes reaches an octave, and no registered scale contains every
//! note. A pair is acceptable when both melodies are valid, they differ in
//! exactly one position, and their up/down contours agree at every step.

use std::cmp::Ordering;
use std::fmt;

use crate::note::{Note, OCTAVE_SEMITONES};
use crate::scale::{ScaleIndex, ScaleLabel};

/// Why a melody is not valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MelodyViolation {
    /// The melody has no notes.
    Empty,
    /// A note appears twice.
    RepeatedNote {
        /// The repeated note.
        note: Note,
        /// Index of the first occurrence.
        first: usize,
        /// Index of the repeat.
        second: usize,
    },
    /// Every note belongs to at least one common scale.
    Tonal {
        /// One scale containing every note.
        scale: ScaleLabel,
        /// Number of scales containing every note.
        count: usize,
    },
    /// Consecutive notes are an octave or more apart.
    WideLeap {
        /// Index of the second note of the leap.
        index: usize,
        /// Leap size in semitones.
        semitones: u8,
    },
}

impl fmt::Display for MelodyViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MelodyViolation::Empty => write!(f, "melody is empty"),
            MelodyViolation::RepeatedNote {
                note,
                first,
                second,
            } => write!(
                f,
                "note {} repeats at positions {} and {}",
                note, first, second
            ),
            MelodyViolation::Tonal { scale, count } => {
                write!(f, "all notes fit {} ({} scale(s) in common)", scale, count)
            }
            MelodyViolation::WideLeap { index, semitones } => write!(
                f,
                "leap of {} semitones into position {}",
                semitones, index
            ),
        }
    }
}

/// Why a pair of melodies is not an acceptable comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairViolation {
    /// The melodies have different lengths.
    LengthMismatch {
        /// Original length.
        original: usize,
        /// Modified length.
        modified: usize,
    },
    /// The original melody is not valid.
    InvalidOriginal(MelodyViolation),
    /// The modified melody is not valid.
    InvalidModified(MelodyViolation),
    /// The melodies move in different directions at a step.
    ContourMismatch {
        /// Index of the second note of the step.
        index: usize,
    },
    /// More than one position differs.
    MultipleDifferences {
        /// First differing position.
        first: usize,
        /// Second differing position.
        second: usize,
    },
    /// The melodies are identical.
    Identical,
}

impl fmt::Display for PairViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairViolation::LengthMismatch { original, modified } => write!(
                f,
                "length mismatch: {} vs {} notes",
                original, modified
            ),
            PairViolation::InvalidOriginal(violation) => {
                write!(f, "original melody: {}", violation)
            }
            PairViolation::InvalidModified(violation) => {
                write!(f, "modified melody: {}", violation)
            }
            PairViolation::ContourMismatch { index } => {
                write!(f, "contour differs at step into position {}", index)
            }
            PairViolation::MultipleDifferences { first, second } => {
                write!(f, "positions {} and {} both differ", first, second)
            }
            PairViolation::Identical => write!(f, "melodies are identical"),
        }
    }
}

/// Checks melodies against the atonality rules.
#[derive(Debug, Clone, Copy)]
pub struct MelodyValidator<'a> {
    scales: &'a ScaleIndex,
}

impl MelodyValidator<'static> {
    /// Creates a validator over the process-wide scale index.
    pub fn new() -> Self {
        Self {
            scales: ScaleIndex::global(),
        }
    }
}

impl Default for MelodyValidator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> MelodyValidator<'a> {
    /// Creates a validator over a caller-owned scale index.
    pub fn with_index(scales: &'a ScaleIndex) -> Self {
        Self { scales }
    }

    /// Returns the scale index in use.
    pub fn scales(&self) -> &'a ScaleIndex {
        self.scales
    }

    /// Checks a melody, reporting the first rule it breaks.
    ///
    /// Rules are checked in order: repeated notes, shared scale, wide leaps.
    pub fn check_melody(&self, melody: &[Note]) -> Result<(), MelodyViolation> {
        if melody.is_empty() {
            return Err(MelodyViolation::Empty);
        }

        let mut seen = [0u64; 4];
        for (second, &note) in melody.iter().enumerate() {
            let (word, bit) = ((note / 64) as usize, note % 64);
            if seen[word] & (1u64 << bit) != 0 {
                let first = melody.iter().position(|&n| n == note).unwrap_or(0);
                return Err(MelodyViolation::RepeatedNote {
                    note,
                    first,
                    second,
                });
            }
            seen[word] |= 1u64 << bit;
        }

        let common = self.scales.common_scales(melody);
        if let Some(scale) = common.iter().next() {
            return Err(MelodyViolation::Tonal {
                scale,
                count: common.len(),
            });
        }

        for (i, pair) in melody.windows(2).enumerate() {
            let semitones = pair[0].abs_diff(pair[1]);
            if semitones >= OCTAVE_SEMITONES {
                return Err(MelodyViolation::WideLeap {
                    index: i + 1,
                    semitones,
                });
            }
        }

        Ok(())
    }

    /// Returns true if the melody is atonal, leap-bounded, and repeat-free.
    ///
    /// # Example
    /// ```
    /// use earcheck_backend_stimulus::MelodyValidator;
    ///
    /// let validator = MelodyValidator::new();
    /// assert!(validator.is_valid_melody(&[0, 1, 2, 3]));
    /// assert!(!validator.is_valid_melody(&[0, 2, 4, 5]));
    /// ```
    pub fn is_valid_melody(&self, melody: &[Note]) -> bool {
        self.check_melody(melody).is_ok()
    }

    /// Checks a pair, returning the single differing position on success.
    pub fn check_pair(&self, original: &[Note], modified: &[Note]) -> Result<usize, PairViolation> {
        if original.len() != modified.len() {
            return Err(PairViolation::LengthMismatch {
                original: original.len(),
                modified: modified.len(),
            });
        }
        self.check_melody(original)
            .map_err(PairViolation::InvalidOriginal)?;
        self.check_melody(modified)
            .map_err(PairViolation::InvalidModified)?;

        let mut changed = (original[0] != modified[0]).then_some(0);
        for i in 1..original.len() {
            if contour(original[i - 1], original[i]) != contour(modified[i - 1], modified[i]) {
                return Err(PairViolation::ContourMismatch { index: i });
            }
            if original[i] != modified[i] {
                if let Some(first) = changed {
                    return Err(PairViolation::MultipleDifferences { first, second: i });
                }
                changed = Some(i);
            }
        }

        changed.ok_or(PairViolation::Identical)
    }

    /// Returns true if both melodies are valid, differ in exactly one
    /// position, and share the same contour.
    pub fn is_single_difference_contour_match(&self, original: &[Note], modified: &[Note]) -> bool {
        self.check_pair(original, modified).is_ok()
    }
}

fn contour(from: Note, to: Note) -> Ordering {
    to.cmp(&from)
}

/// First position where two sequences differ.
pub fn first_difference<T: PartialEq>(a: &[T], b: &[T]) -> Option<usize> {
    a.iter().zip(b).position(|(x, y)| x != y)
}
