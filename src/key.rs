//! Keys and key detection.
//!
//! The canonical reference set is the 12 major keys in chromatic order from
//! C. Detection scores each candidate by how many input chords are diatonic
//! to it, with tie-breaks that weight the first and last chord double and
//! prefer the key whose tonic is the most frequent chord root.

use serde::{Deserialize, Serialize};

use crate::chord::{parse_chord, ChordQuality, ParsedChord};
use crate::pitch::{PitchClass, Spelling};

/// Major-key roots conventionally spelled with flats: Db, Eb, F, Ab, Bb.
/// Everything else, including C and F#, spells sharps.
const FLAT_MAJOR_ROOTS: [u8; 5] = [1, 3, 5, 8, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    Major,
    Minor,
}

impl std::fmt::Display for KeyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyMode::Major => write!(f, "major"),
            KeyMode::Minor => write!(f, "minor"),
        }
    }
}

/// A key: tonic pitch class plus mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub root: PitchClass,
    pub mode: KeyMode,
}

impl Key {
    pub fn major(root: PitchClass) -> Self {
        Self {
            root,
            mode: KeyMode::Major,
        }
    }

    pub fn minor(root: PitchClass) -> Self {
        Self {
            root,
            mode: KeyMode::Minor,
        }
    }

    /// Parse a key name like "G", "Bb" or "F#m".
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        let (name, mode) = match trimmed.strip_suffix('m') {
            Some(rest) if !rest.is_empty() => (rest, KeyMode::Minor),
            _ => (trimmed, KeyMode::Major),
        };
        let root = PitchClass::from_name(name)?;
        Some(Self { root, mode })
    }

    /// Accidental convention for this key.
    ///
    /// Minor keys take the convention of their relative major (a minor third
    /// up), so A minor spells like C major and G minor spells like Bb major.
    pub fn spelling(&self) -> Spelling {
        let major_root = match self.mode {
            KeyMode::Major => self.root,
            KeyMode::Minor => self.root.transposed(3),
        };
        if FLAT_MAJOR_ROOTS.contains(&major_root.value()) {
            Spelling::Flats
        } else {
            Spelling::Sharps
        }
    }

    /// Shift the tonic by a semitone count. Mode is unchanged.
    pub fn transposed(&self, semitones: i32) -> Self {
        Self {
            root: self.root.transposed(semitones),
            mode: self.mode,
        }
    }

    pub fn name(&self) -> String {
        let mut out = self.root.name(self.spelling()).to_string();
        if self.mode == KeyMode::Minor {
            out.push('m');
        }
        out
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Shift a key by a semitone count. `transpose_key(k, 12) == k`.
pub fn transpose_key(key: &Key, semitones: i32) -> Key {
    key.transposed(semitones)
}

/// The canonical reference keys: the 12 major keys in chromatic order from C.
pub fn all_keys() -> [Key; 12] {
    std::array::from_fn(|i| Key::major(PitchClass::new(i as i32)))
}

/// Result of key detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyDetection {
    pub key: Key,
    /// Fraction of parsable input chords diatonic to the detected key.
    pub confidence: f64,
}

/// Diatonic chords of a major key: the seven scale-degree triads plus the
/// standard sevenths on degrees I, ii, iii, IV, V and vi.
fn diatonic_entries(tonic: PitchClass) -> [(PitchClass, ChordQuality); 13] {
    let deg = |offset: i32| tonic.transposed(offset);
    [
        (deg(0), ChordQuality::Major),
        (deg(2), ChordQuality::Minor),
        (deg(4), ChordQuality::Minor),
        (deg(5), ChordQuality::Major),
        (deg(7), ChordQuality::Major),
        (deg(9), ChordQuality::Minor),
        (deg(11), ChordQuality::Diminished),
        (deg(0), ChordQuality::Major7),
        (deg(2), ChordQuality::Minor7),
        (deg(4), ChordQuality::Minor7),
        (deg(5), ChordQuality::Major7),
        (deg(7), ChordQuality::Dominant7),
        (deg(9), ChordQuality::Minor7),
    ]
}

/// The single most frequent chord root, if one root strictly dominates.
fn modal_root(parsed: &[(usize, ParsedChord)]) -> Option<PitchClass> {
    let mut counts = [0usize; 12];
    for (_, chord) in parsed {
        counts[chord.root.value() as usize] += 1;
    }
    let max = *counts.iter().max()?;
    if max == 0 || counts.iter().filter(|&&c| c == max).count() != 1 {
        return None;
    }
    counts
        .iter()
        .position(|&c| c == max)
        .map(|i| PitchClass::new(i as i32))
}

/// Detect the most likely key of a chord set.
///
/// Each of the 12 canonical major keys is scored by the number of input
/// chords diatonic to it. Ties are broken by a weighted count with the first
/// and last chord of the sequence doubled (these usually anchor the tonic),
/// then by preferring the key whose tonic equals the single most frequent
/// chord root, then by canonical key order for determinism.
///
/// Unparsable entries contribute no evidence. Returns `None` when nothing
/// scores, rather than a low-confidence guess.
pub fn detect_key<S: AsRef<str>>(chords: &[S]) -> Option<KeyDetection> {
    let parsed: Vec<(usize, ParsedChord)> = chords
        .iter()
        .enumerate()
        .filter_map(|(i, token)| parse_chord(token.as_ref()).ok().map(|c| (i, c)))
        .collect();
    if parsed.is_empty() {
        return None;
    }

    let last = chords.len() - 1;
    let modal = modal_root(&parsed);

    let mut best: Option<((usize, usize, bool), Key)> = None;
    for key in all_keys() {
        let entries = diatonic_entries(key.root);
        let mut count = 0usize;
        let mut weighted = 0usize;
        for (i, chord) in &parsed {
            if entries.contains(&(chord.root, chord.quality)) {
                count += 1;
                weighted += if *i == 0 || *i == last { 2 } else { 1 };
            }
        }
        if count == 0 {
            continue;
        }
        let score = (count, weighted, modal == Some(key.root));
        // Strict comparison keeps the earliest canonical key on full ties
        if best.as_ref().map_or(true, |(s, _)| score > *s) {
            best = Some((score, key));
        }
    }

    best.map(|((count, _, _), key)| KeyDetection {
        key,
        confidence: count as f64 / parsed.len() as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_canonical_keys_no_duplicate_roots() {
        let keys = all_keys();
        assert_eq!(keys.len(), 12);
        for (i, key) in keys.iter().enumerate() {
            assert_eq!(key.root.value() as usize, i);
            assert_eq!(key.mode, KeyMode::Major);
        }
    }

    #[test]
    fn transpose_key_full_octave_is_identity() {
        for key in all_keys() {
            assert_eq!(transpose_key(&key, 12), key);
            assert_eq!(transpose_key(&key, 0), key);
        }
        let em = Key::minor(PitchClass::new(4));
        assert_eq!(transpose_key(&em, 12), em);
        assert_eq!(transpose_key(&em, 2), Key::minor(PitchClass::new(6)));
    }

    #[test]
    fn key_parsing_and_names() {
        assert_eq!(Key::parse("G"), Some(Key::major(PitchClass::new(7))));
        assert_eq!(Key::parse("Bb"), Some(Key::major(PitchClass::new(10))));
        assert_eq!(Key::parse("F#m"), Some(Key::minor(PitchClass::new(6))));
        assert_eq!(Key::parse("H"), None);
        assert_eq!(Key::parse("m"), None);

        assert_eq!(Key::major(PitchClass::new(10)).name(), "Bb");
        assert_eq!(Key::major(PitchClass::new(6)).name(), "F#");
        assert_eq!(Key::minor(PitchClass::new(7)).name(), "Gm");
    }

    #[test]
    fn spelling_follows_circle_of_fifths() {
        // Flat side
        for name in ["F", "Bb", "Eb", "Ab", "Db"] {
            assert_eq!(Key::parse(name).unwrap().spelling(), Spelling::Flats, "{}", name);
        }
        // Sharp side, plus C and F# by convention
        for name in ["C", "G", "D", "A", "E", "B", "F#"] {
            assert_eq!(Key::parse(name).unwrap().spelling(), Spelling::Sharps, "{}", name);
        }
        // G minor spells like Bb major
        assert_eq!(Key::parse("Gm").unwrap().spelling(), Spelling::Flats);
        // A minor spells like C major
        assert_eq!(Key::parse("Am").unwrap().spelling(), Spelling::Sharps);
    }

    #[test]
    fn detects_obvious_major_key() {
        let detection = detect_key(&["C", "F", "G7", "C"]).unwrap();
        assert_eq!(detection.key, Key::major(PitchClass::new(0)));
        assert_eq!(detection.confidence, 1.0);
    }

    #[test]
    fn tonic_frequency_breaks_ties() {
        // C major and G major both contain G, Am and C. G appears twice,
        // so the G-rooted candidate wins.
        let detection = detect_key(&["G", "Am", "C", "G"]).unwrap();
        assert_eq!(detection.key, Key::major(PitchClass::new(7)));
    }

    #[test]
    fn first_and_last_chords_anchor_the_tonic() {
        // C major matches G, Am and F (weights 2+1+2 = 5); G major matches
        // G, Am and Bm (weights 2+1+1 = 4). Plain counts tie at 3, the
        // bookend weighting decides.
        let detection = detect_key(&["G", "Am", "Bm", "F"]).unwrap();
        assert_eq!(detection.key, Key::major(PitchClass::new(0)));
    }

    #[test]
    fn canonical_order_settles_full_ties() {
        // Em7 and G fit C major and G major equally (count 2, same weights,
        // no dominant root), so the chromatically first candidate is kept.
        let detection = detect_key(&["Em7", "G", "Cadd9", "Dsus4"]).unwrap();
        assert_eq!(detection.key, Key::major(PitchClass::new(0)));
        assert_eq!(detection.confidence, 0.5);
    }

    #[test]
    fn undetermined_when_nothing_scores() {
        assert!(detect_key(&["Intro", "Chorus"]).is_none());
        assert!(detect_key::<&str>(&[]).is_none());
        // Parsable but never diatonic to any major key
        assert!(detect_key(&["Caug"]).is_none());
    }

    #[test]
    fn unparsable_entries_are_skipped_not_fatal() {
        let detection = detect_key(&["[?]", "C", "F", "G7"]).unwrap();
        assert_eq!(detection.key, Key::major(PitchClass::new(0)));
        assert_eq!(detection.confidence, 1.0);
    }
}
