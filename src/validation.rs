//! # Song Validation Module
//!
//! This module checks a song record before the surrounding application
//! accepts it.
//!
//! ## Purpose
//! Lyrics pulled from external sources mix real chords with section labels
//! and free-text annotations, all in the same bracket syntax. Validation
//! classifies every bracketed token and reports anything unrecognized as a
//! soft warning, never a hard failure.
//!
//! ## Token Classes
//! - **Chord** - token matches the chord grammar (`[Em7]`, `[Cadd9]`)
//! - **SectionLabel** - a known structural label, optionally numbered
//!   (`[Intro]`, `[Verse 2]`)
//! - **Unknown** - anything else (`[riff]`, `[x4]`), reported as a warning
//!
//! ## Metadata Checks
//! `validate_song` additionally flags a capo beyond the 12th fret, a tempo
//! outside the plausible 20-400 BPM range, and a declared key that disagrees
//! with the key detected from the song's own chords.
//!
//! ## Entry Points
//! - `validate_lyrics(text) -> LyricsReport`
//! - `validate_song(&Song) -> SongReport`

use serde::{Deserialize, Serialize};

use crate::chord::is_chord;
use crate::key::detect_key;
use crate::song::Song;

/// Structural labels that commonly appear bracketed in lyrics.
const SECTION_LABELS: [&str; 12] = [
    "intro",
    "verse",
    "chorus",
    "pre-chorus",
    "bridge",
    "outro",
    "instrumental",
    "interlude",
    "solo",
    "refrain",
    "coda",
    "tag",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenClass {
    Chord,
    SectionLabel,
    Unknown,
}

/// One bracketed token and how it was classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenReport {
    pub token: String,
    pub class: TokenClass,
}

/// Classification of every bracketed token in a lyrics block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsReport {
    pub tokens: Vec<TokenReport>,
    pub warnings: Vec<String>,
}

impl LyricsReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// The chord tokens, in order of appearance.
    pub fn chord_tokens(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter(|t| t.class == TokenClass::Chord)
            .map(|t| t.token.as_str())
            .collect()
    }
}

/// Lyrics classification plus metadata warnings for a whole song record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongReport {
    pub lyrics: LyricsReport,
    pub warnings: Vec<String>,
}

impl SongReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.lyrics.is_clean()
    }
}

/// Whether a token is a known section label, optionally numbered.
fn is_section_label(token: &str) -> bool {
    let lowered = token.trim().to_ascii_lowercase();
    let base = lowered
        .trim_end_matches(|c: char| c.is_ascii_digit())
        .trim_end();
    SECTION_LABELS.contains(&base)
}

/// Classify a single bracket-delimited token.
pub fn classify_token(token: &str) -> TokenClass {
    if is_chord(token) {
        TokenClass::Chord
    } else if is_section_label(token) {
        TokenClass::SectionLabel
    } else {
        TokenClass::Unknown
    }
}

/// All bracketed tokens in order of appearance.
fn bracketed_tokens(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        rest = &rest[open + 1..];
        let Some(close) = rest.find(']') else {
            break;
        };
        tokens.push(&rest[..close]);
        rest = &rest[close + 1..];
    }
    tokens
}

/// Classify every bracketed token in a lyrics block.
///
/// Unknown tokens produce one warning each. Chords and section labels are
/// both considered recognized.
pub fn validate_lyrics(text: &str) -> LyricsReport {
    let mut tokens = Vec::new();
    let mut warnings = Vec::new();
    for token in bracketed_tokens(text) {
        let class = classify_token(token);
        if class == TokenClass::Unknown {
            warnings.push(format!("unrecognized token '[{}]'", token));
        }
        tokens.push(TokenReport {
            token: token.to_string(),
            class,
        });
    }
    LyricsReport { tokens, warnings }
}

/// Validate a parsed song record.
///
/// All findings are soft warnings. A song with warnings is still usable;
/// the caller decides whether to surface them.
pub fn validate_song(song: &Song) -> SongReport {
    let lyrics = validate_lyrics(&song.lyrics);
    let mut warnings = Vec::new();

    if let Some(capo) = song.metadata.capo {
        if capo > 12 {
            warnings.push(format!("capo {} is beyond the 12th fret", capo));
        }
    }
    if let Some(tempo) = song.metadata.tempo {
        if !(20..=400).contains(&tempo) {
            warnings.push(format!("tempo {} BPM is out of the plausible range", tempo));
        }
    }
    if let Some(declared) = song.metadata.key {
        if let Some(detection) = detect_key(&lyrics.chord_tokens()) {
            // Declared minor keys share chords with their relative major,
            // so only flag a tonic mismatch at the pitch-class level.
            if detection.key.root != declared.root
                && detection.key.root != declared.root.transposed(3)
            {
                warnings.push(format!(
                    "declared key {} disagrees with detected key {}",
                    declared,
                    detection.key
                ));
            }
        }
    }

    SongReport { lyrics, warnings }
}
