//! Scale membership index over the twelve pitch classes.
//!
//! Scales are registered by walking the circle of fifths: for `k` in `0..8`
//! the sharp-side root is `7k mod 12` and the flat-side root `5k mod 12`, the
//! flat side being skipped whenever it lands on the sharp root (k = 0 and
//! k = 6). Each root contributes one major scale and three minor scales rooted
//! a major sixth above it, giving 56 labels.
//!
//! Membership for a pitch class is a [`ScaleSet`] bitmask, so the scales
//! shared by a whole melody is a chain of bitwise ANDs.

use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

use crate::note::{pitch_class, Note, OCTAVE_SEMITONES};

/// Number of circle-of-fifths steps walked per direction.
const CIRCLE_STEPS: u8 = 8;

/// Bit position stride per circle slot (one bit per scale type).
const TYPES_PER_SLOT: u8 = 4;

/// Scale interval pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleType {
    /// 2 2 1 2 2 2 1
    Major,
    /// 2 1 2 2 1 2 2
    NaturalMinor,
    /// 2 1 2 2 1 3 1
    HarmonicMinor,
    /// 2 1 2 2 2 2 1
    MelodicMinor,
}

impl ScaleType {
    /// All scale types in bit order.
    pub const ALL: [ScaleType; 4] = [
        ScaleType::Major,
        ScaleType::NaturalMinor,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
    ];

    /// Semitone steps between consecutive degrees.
    pub fn steps(&self) -> [u8; 7] {
        match self {
            ScaleType::Major => [2, 2, 1, 2, 2, 2, 1],
            ScaleType::NaturalMinor => [2, 1, 2, 2, 1, 2, 2],
            ScaleType::HarmonicMinor => [2, 1, 2, 2, 1, 3, 1],
            ScaleType::MelodicMinor => [2, 1, 2, 2, 2, 2, 1],
        }
    }

    /// Semitone offsets of the seven degrees above the root.
    pub fn degree_offsets(&self) -> [u8; 7] {
        let mut offsets = [0u8; 7];
        let mut acc = 0;
        for (offset, step) in offsets.iter_mut().zip(self.steps()) {
            *offset = acc;
            acc += step;
        }
        offsets
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::NaturalMinor => "natural minor",
            ScaleType::HarmonicMinor => "harmonic minor",
            ScaleType::MelodicMinor => "melodic minor",
        }
    }

    fn bit_index(self) -> u8 {
        match self {
            ScaleType::Major => 0,
            ScaleType::NaturalMinor => 1,
            ScaleType::HarmonicMinor => 2,
            ScaleType::MelodicMinor => 3,
        }
    }

    fn from_bit_index(index: u8) -> Self {
        Self::ALL[(index % TYPES_PER_SLOT) as usize]
    }
}

/// Side of the circle of fifths a scale was registered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Ascending fifths (key signatures with sharps).
    Sharp,
    /// Descending fifths (key signatures with flats).
    Flat,
}

/// Identifies one registered scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScaleLabel {
    /// Circle side.
    pub direction: Direction,
    /// Steps walked around the circle (0-7).
    pub steps: u8,
    /// Interval pattern.
    pub scale_type: ScaleType,
}

impl ScaleLabel {
    /// Pitch class of the relative major's root.
    pub fn major_root(&self) -> u8 {
        let step = match self.direction {
            Direction::Sharp => 7,
            Direction::Flat => 5,
        };
        (step * self.steps) % OCTAVE_SEMITONES
    }

    /// Pitch class of this scale's root.
    pub fn root(&self) -> u8 {
        match self.scale_type {
            ScaleType::Major => self.major_root(),
            _ => (self.major_root() + 9) % OCTAVE_SEMITONES,
        }
    }

    /// Pitch classes of the seven degrees.
    pub fn pitch_classes(&self) -> [u8; 7] {
        let root = self.root();
        self.scale_type
            .degree_offsets()
            .map(|offset| (root + offset) % OCTAVE_SEMITONES)
    }

    fn bit(&self) -> u8 {
        let slot = match self.direction {
            Direction::Sharp => self.steps,
            Direction::Flat => CIRCLE_STEPS + self.steps,
        };
        slot * TYPES_PER_SLOT + self.scale_type.bit_index()
    }

    fn from_bit(bit: u8) -> Self {
        let slot = bit / TYPES_PER_SLOT;
        let direction = if slot < CIRCLE_STEPS {
            Direction::Sharp
        } else {
            Direction::Flat
        };
        Self {
            direction,
            steps: slot % CIRCLE_STEPS,
            scale_type: ScaleType::from_bit_index(bit),
        }
    }
}

impl fmt::Display for ScaleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const SHARP_NAMES: [&str; 12] = [
            "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
        ];
        const FLAT_NAMES: [&str; 12] = [
            "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
        ];
        let names = match self.direction {
            Direction::Sharp => &SHARP_NAMES,
            Direction::Flat => &FLAT_NAMES,
        };
        write!(
            f,
            "{} {}",
            names[self.root() as usize],
            self.scale_type.name()
        )
    }
}

/// Set of scale labels as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ScaleSet(u64);

impl ScaleSet {
    /// The empty set.
    pub const EMPTY: ScaleSet = ScaleSet(0);

    /// Returns true if no scale is in the set.
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of scales in the set.
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns true if the label is in the set.
    pub fn contains(&self, label: ScaleLabel) -> bool {
        self.0 & (1u64 << label.bit()) != 0
    }

    /// Adds a label.
    pub fn insert(&mut self, label: ScaleLabel) {
        self.0 |= 1u64 << label.bit();
    }

    /// Scales present in both sets.
    pub fn intersection(self, other: ScaleSet) -> ScaleSet {
        ScaleSet(self.0 & other.0)
    }

    /// Iterates labels in bit order.
    pub fn iter(&self) -> impl Iterator<Item = ScaleLabel> + '_ {
        (0..64u8)
            .filter(move |bit| self.0 & (1u64 << bit) != 0)
            .map(ScaleLabel::from_bit)
    }
}

/// Precomputed pitch-class to scale membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleIndex {
    membership: [ScaleSet; 12],
    registered: ScaleSet,
}

impl ScaleIndex {
    /// Builds the index by walking the circle of fifths.
    pub fn build() -> Self {
        let mut index = Self {
            membership: [ScaleSet::EMPTY; 12],
            registered: ScaleSet::EMPTY,
        };

        for steps in 0..CIRCLE_STEPS {
            let sharp = ScaleLabel {
                direction: Direction::Sharp,
                steps,
                scale_type: ScaleType::Major,
            };
            let flat = ScaleLabel {
                direction: Direction::Flat,
                ..sharp
            };
            index.register_root(sharp);
            if flat.major_root() != sharp.major_root() {
                index.register_root(flat);
            }
        }

        index
    }

    /// Process-wide index, built on first use.
    pub fn global() -> &'static ScaleIndex {
        static INDEX: OnceLock<ScaleIndex> = OnceLock::new();
        INDEX.get_or_init(ScaleIndex::build)
    }

    fn register_root(&mut self, base: ScaleLabel) {
        for scale_type in ScaleType::ALL {
            let label = ScaleLabel { scale_type, ..base };
            self.registered.insert(label);
            for pc in label.pitch_classes() {
                self.membership[pc as usize].insert(label);
            }
        }
    }

    /// Every registered scale.
    pub fn registered(&self) -> ScaleSet {
        self.registered
    }

    /// Scales containing a pitch class; notes are reduced mod 12.
    pub fn scales_containing(&self, note: Note) -> ScaleSet {
        self.membership[pitch_class(note) as usize]
    }

    /// Scales containing every note. An empty slice yields every scale.
    pub fn common_scales(&self, notes: &[Note]) -> ScaleSet {
        notes
            .iter()
            .fold(self.registered, |acc, &note| {
                acc.intersection(self.scales_containing(note))
            })
    }
}

impl Default for ScaleIndex {
    fn default() -> Self {
        Self::build()
    }
}
