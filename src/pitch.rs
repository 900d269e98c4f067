//! Pitch classes and enharmonic spelling.
//!
//! A pitch class is one of the 12 chromatic tones, independent of octave,
//! with C = 0. Equality and arithmetic always happen at the pitch-class
//! level; choosing between sharp and flat names is a separate rendering
//! concern driven by a [`Spelling`].

use serde::{Deserialize, Serialize};

/// Chromatic note names using sharps.
/// 0=C, 1=C#, 2=D, 3=D#, 4=E, 5=F, 6=F#, 7=G, 8=G#, 9=A, 10=A#, 11=B
const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Chromatic note names using flats.
const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Accidental preference when rendering a pitch class as text.
///
/// The same pitch class has two valid names on the black keys (F# vs Gb).
/// Sharp keys on the circle of fifths spell sharps, flat keys spell flats.
/// Absent a key context, sharps are the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

/// One of the 12 chromatic tones, C = 0.
///
/// Construction normalizes into the 0..12 range, so negative transposition
/// offsets behave correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PitchClass(u8);

impl PitchClass {
    pub fn new(semitones: i32) -> Self {
        Self(semitones.rem_euclid(12) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Shift by a semitone count, wrapping around the chromatic circle.
    pub fn transposed(self, semitones: i32) -> Self {
        Self::new(self.0 as i32 + semitones)
    }

    /// Render with the given accidental preference.
    pub fn name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharps => NOTE_NAMES_SHARP[self.0 as usize],
            Spelling::Flats => NOTE_NAMES_FLAT[self.0 as usize],
        }
    }

    /// Parse a complete note name like "C", "F#" or "Bb".
    pub fn from_name(s: &str) -> Option<Self> {
        match parse_note_prefix(s) {
            Some((pitch, consumed)) if consumed == s.len() => Some(pitch),
            _ => None,
        }
    }
}

/// Semitone offset from C for a note letter.
fn letter_semitone(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Parse a note letter plus optional accidental at the start of a string.
/// Returns the pitch class and the number of bytes consumed.
pub(crate) fn parse_note_prefix(s: &str) -> Option<(PitchClass, usize)> {
    let mut chars = s.chars();
    let base = letter_semitone(chars.next()?)?;
    match chars.next() {
        Some('#') => Some((PitchClass::new(base + 1), 2)),
        Some('b') => Some((PitchClass::new(base - 1), 2)),
        _ => Some((PitchClass::new(base), 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_normalizes_mod_12() {
        assert_eq!(PitchClass::new(12), PitchClass::new(0));
        assert_eq!(PitchClass::new(-1), PitchClass::new(11));
        assert_eq!(PitchClass::new(-12), PitchClass::new(0));
        assert_eq!(PitchClass::new(25).value(), 1);
    }

    #[test]
    fn transposition_wraps() {
        let b = PitchClass::new(11);
        assert_eq!(b.transposed(1).value(), 0);
        assert_eq!(b.transposed(-11).value(), 0);
        assert_eq!(b.transposed(12), b);
    }

    #[test]
    fn names_follow_spelling() {
        let f_sharp = PitchClass::new(6);
        assert_eq!(f_sharp.name(Spelling::Sharps), "F#");
        assert_eq!(f_sharp.name(Spelling::Flats), "Gb");
        // Naturals are spelled the same either way
        assert_eq!(PitchClass::new(7).name(Spelling::Flats), "G");
    }

    #[test]
    fn from_name_accepts_accidentals() {
        assert_eq!(PitchClass::from_name("C"), Some(PitchClass::new(0)));
        assert_eq!(PitchClass::from_name("F#"), Some(PitchClass::new(6)));
        assert_eq!(PitchClass::from_name("Gb"), Some(PitchClass::new(6)));
        assert_eq!(PitchClass::from_name("Bb"), Some(PitchClass::new(10)));
        // Cb wraps down to B
        assert_eq!(PitchClass::from_name("Cb"), Some(PitchClass::new(11)));
    }

    #[test]
    fn from_name_rejects_garbage() {
        assert_eq!(PitchClass::from_name(""), None);
        assert_eq!(PitchClass::from_name("H"), None);
        assert_eq!(PitchClass::from_name("c"), None);
        assert_eq!(PitchClass::from_name("C##"), None);
        assert_eq!(PitchClass::from_name("Cx"), None);
    }
}
