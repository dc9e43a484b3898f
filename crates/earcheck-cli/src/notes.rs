//! Parsing of note and pitch class arguments.
//!
//! Notes are accepted either as semitone offsets above C4 or as names with an
//! octave number (`C4`, `F#4`, `Bb5`). Pitch classes take the same names
//! without the octave.

use anyhow::{bail, Result};
use earcheck_backend_stimulus::{Note, OCTAVE_SEMITONES};

/// Parses a pitch class name such as `C`, `F#`, or `Bb`, or a number 0-11.
pub fn parse_pitch_class(input: &str) -> Result<u8> {
    let input = input.trim();
    if let Ok(number) = input.parse::<u8>() {
        if number < OCTAVE_SEMITONES {
            return Ok(number);
        }
        bail!("pitch class {} is out of range (0-11)", number);
    }
    match parse_name(input)? {
        (pc, "") => Ok(pc),
        _ => bail!("invalid pitch class: {}", input),
    }
}

/// Parses a note given as a semitone offset above C4 or a name with octave.
///
/// # Example
/// ```
/// use earcheck_cli::notes::parse_note;
///
/// assert_eq!(parse_note("7").unwrap(), 7);
/// assert_eq!(parse_note("C#5").unwrap(), 13);
/// assert_eq!(parse_note("Bb4").unwrap(), 10);
/// assert!(parse_note("B3").is_err());
/// ```
pub fn parse_note(input: &str) -> Result<Note> {
    let input = input.trim();
    if let Ok(number) = input.parse::<Note>() {
        return Ok(number);
    }
    let (pc, rest) = parse_name(input)?;
    let octave: u8 = rest
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid octave in note: {}", input))?;
    if octave < 4 {
        bail!("note {} is below C4", input);
    }
    let note = (octave - 4) as u16 * OCTAVE_SEMITONES as u16 + pc as u16;
    Note::try_from(note).map_err(|_| anyhow::anyhow!("note {} is out of range", input))
}

/// Splits a leading note name off `input`, returning its pitch class and the rest.
fn parse_name(input: &str) -> Result<(u8, &str)> {
    let mut chars = input.chars();
    let letter = chars
        .next()
        .ok_or_else(|| anyhow::anyhow!("empty note name"))?;
    let natural: i8 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => bail!("invalid note name: {}", input),
    };
    let rest = chars.as_str();
    let (accidental, rest) = if let Some(rest) = rest.strip_prefix('#') {
        (1, rest)
    } else if let Some(rest) = rest.strip_prefix('b') {
        (-1, rest)
    } else {
        (0, rest)
    };
    let pc = (natural + accidental).rem_euclid(OCTAVE_SEMITONES as i8) as u8;
    Ok((pc, rest))
}
