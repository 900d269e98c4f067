//! Beginner-friendliness and difficulty labeling.
//!
//! The beginner set is the fixed table of open-position chords commonly
//! taught first. Membership is checked at the pitch-class level, so
//! enharmonic respellings of the same chord agree.

use serde::{Deserialize, Serialize};

use crate::chord::{parse_chord, ChordFamily, ChordQuality, ParsedChord};
use crate::key::Key;

/// Open-position chords commonly taught first:
/// C, G, D, A, E, Am, Em, Dm, G7, D7.
const BEGINNER_CHORDS: [(u8, ChordQuality); 10] = [
    (0, ChordQuality::Major),
    (7, ChordQuality::Major),
    (2, ChordQuality::Major),
    (9, ChordQuality::Major),
    (4, ChordQuality::Major),
    (9, ChordQuality::Minor),
    (4, ChordQuality::Minor),
    (2, ChordQuality::Minor),
    (7, ChordQuality::Dominant7),
    (2, ChordQuality::Dominant7),
];

/// Suggestions are capped to a short list.
const MAX_SUGGESTIONS: usize = 3;

/// Difficulty tier for a chord family, as shown in the chord library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyDifficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl FamilyDifficulty {
    pub fn for_family(family: ChordFamily) -> Self {
        match family {
            ChordFamily::Major | ChordFamily::Minor | ChordFamily::Suspended => {
                FamilyDifficulty::Beginner
            }
            ChordFamily::Seventh
            | ChordFamily::MajorSeventh
            | ChordFamily::MinorSeventh
            | ChordFamily::Add => FamilyDifficulty::Intermediate,
            ChordFamily::Diminished | ChordFamily::Augmented => FamilyDifficulty::Advanced,
        }
    }
}

fn chord_in_beginner_set(chord: &ParsedChord) -> bool {
    // Slash voicings are not open-position shapes
    chord.bass.is_none()
        && BEGINNER_CHORDS.contains(&(chord.root.value(), chord.quality))
}

/// Whether a chord token is in the beginner set.
///
/// Membership is structural, so `Gb` and `F#` agree. Tokens that do not
/// parse are simply not beginner-friendly.
pub fn is_beginner_friendly(token: &str) -> bool {
    parse_chord(token)
        .map(|chord| chord_in_beginner_set(&chord))
        .unwrap_or(false)
}

/// Whether a key works for beginners given the chords a song actually uses.
///
/// True when every parsable chord in the song is itself beginner-friendly.
/// Non-chord tokens carry no evidence either way.
pub fn is_beginner_friendly_key<S: AsRef<str>>(_key: &Key, chords: &[S]) -> bool {
    chords
        .iter()
        .filter_map(|token| parse_chord(token.as_ref()).ok())
        .all(|chord| chord_in_beginner_set(&chord))
}

/// Suggest keys that make a song playable with beginner chords.
///
/// Tries all 12 semitone shifts (including 0), keeps the shifts where every
/// parsable chord lands in the beginner set, and returns the resulting keys
/// ordered by beginner coverage. Capped at a short fixed length. Keys are
/// pitch-class values, so two spellings of the same shift cannot both
/// appear.
pub fn suggest_easy_mode_keys<S: AsRef<str>>(original_key: &Key, chords: &[S]) -> Vec<Key> {
    let parsed: Vec<ParsedChord> = chords
        .iter()
        .filter_map(|token| parse_chord(token.as_ref()).ok())
        .collect();
    if parsed.is_empty() {
        return Vec::new();
    }

    let mut candidates: Vec<(usize, Key)> = Vec::new();
    for shift in 0..12 {
        let count = parsed
            .iter()
            .filter(|chord| chord_in_beginner_set(&chord.transposed(shift)))
            .count();
        if count == parsed.len() {
            candidates.push((count, original_key.transposed(shift)));
        }
    }

    // Stable sort keeps smaller shifts first among equal coverage
    candidates.sort_by(|a, b| b.0.cmp(&a.0));
    candidates
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, key)| key)
        .collect()
}
