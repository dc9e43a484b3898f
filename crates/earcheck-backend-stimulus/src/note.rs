//! Notes, pitch classes, and the note frequency table.
//!
//! A note is a semitone offset above C4. The table starts from the twelve
//! equal-tempered frequencies of the C4 octave and doubles them for every
//! further octave.

use earcheck_spec::MAX_OCTAVES;

use crate::error::{StimulusError, StimulusResult};

/// Semitone offset above C4.
pub type Note = u8;

/// Ordered note sequence.
pub type Melody = Vec<Note>;

/// Semitones per octave.
pub const OCTAVE_SEMITONES: u8 = 12;

/// Frequencies of C4 through B4 in Hz.
pub const C4_OCTAVE_HZ: [f64; 12] = [
    261.6256, 277.1826, 293.6648, 311.1270, 329.6276, 349.2282, 369.9944, 391.9954, 415.3047,
    440.0000, 466.1638, 493.8833,
];

/// Pitch class names, sharps for black keys.
pub const PITCH_CLASS_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Reduces a note to its pitch class (0-11).
pub fn pitch_class(note: Note) -> u8 {
    note % OCTAVE_SEMITONES
}

/// Formats a note as name plus octave (0 -> "C4", 13 -> "C#5").
pub fn note_name(note: Note) -> String {
    let octave = 4 + (note / OCTAVE_SEMITONES) as u32;
    format!("{}{}", PITCH_CLASS_NAMES[pitch_class(note) as usize], octave)
}

/// Lookup table of ascending note frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteTable {
    frequencies: Vec<f64>,
}

impl NoteTable {
    /// Builds a table spanning `octaves` octaves starting at C4.
    ///
    /// # Example
    /// ```
    /// use earcheck_backend_stimulus::NoteTable;
    ///
    /// let table = NoteTable::new(2).unwrap();
    /// assert_eq!(table.len(), 24);
    /// assert_eq!(table.frequency(9), Some(440.0));
    /// assert_eq!(table.frequency(21), Some(880.0));
    /// assert_eq!(table.frequency(24), None);
    /// ```
    pub fn new(octaves: u8) -> StimulusResult<Self> {
        if !(1..=MAX_OCTAVES).contains(&octaves) {
            return Err(StimulusError::invalid_param(
                "octaves",
                format!("must be between 1 and {}, got {}", MAX_OCTAVES, octaves),
            ));
        }

        let frequencies = (0..octaves)
            .flat_map(|octave| {
                let factor = f64::from(1u32 << octave);
                C4_OCTAVE_HZ.iter().map(move |hz| hz * factor)
            })
            .collect();
        Ok(Self { frequencies })
    }

    /// Number of notes in the table.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Always false; a table has at least one octave.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Number of notes as a `Note`-sized count.
    pub fn note_count(&self) -> u8 {
        self.frequencies.len() as u8
    }

    /// Frequency of a note, `None` if it lies outside the table.
    pub fn frequency(&self, note: Note) -> Option<f64> {
        self.frequencies.get(note as usize).copied()
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        Self::new(2).unwrap_or_else(|_| unreachable!("two octaves are always in range"))
    }
}
