//! Chord symbol parsing and rendering.
//!
//! Parses chord symbols (C, Am, G7, Dm7/F#, etc.) into structured chords
//! that can be transposed and re-rendered with either sharp or flat spelling.
//!
//! ## Grammar
//! - Note letter `A`-`G`
//! - Optional accidental `#` or `b`
//! - Optional quality suffix from the supported set below
//! - Optional `/` followed by a bass note (letter plus optional accidental)
//!
//! ## Supported Chord Qualities
//! - **Major**: `C`, `Cmaj`, `CM`
//! - **Minor**: `Cm`, `Cmin`
//! - **Dominant 7th**: `C7`
//! - **Major 7th**: `Cmaj7`, `CM7`
//! - **Minor 7th**: `Cm7`, `Cmin7`
//! - **Suspended**: `Csus2`, `Csus4`
//! - **Diminished**: `Cdim`
//! - **Augmented**: `Caug`, `C+`
//! - **Added tone**: `Cadd9`, `Cadd2`
//!
//! Anything else is a parse failure, never a silent default. A token like
//! `Cmaj13` fails with `UnsupportedQuality`; a token like `Chorus` fails the
//! same way, which is how section labels in lyrics are told apart from chords.

use serde::{Deserialize, Serialize};

use crate::error::ChordError;
use crate::key::Key;
use crate::pitch::{parse_note_prefix, PitchClass, Spelling};

/// Closed set of supported chord qualities.
///
/// Modeled as an enum rather than a string so an unsupported suffix is a
/// parse failure instead of a silently matched default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordQuality {
    Major,
    Minor,
    Dominant7,
    Major7,
    Minor7,
    Sus2,
    Sus4,
    Diminished,
    Augmented,
    Add9,
    Add2,
}

impl ChordQuality {
    /// Canonical suffix for chord symbol display.
    pub fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Major7 => "maj7",
            ChordQuality::Minor7 => "m7",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Diminished => "dim",
            ChordQuality::Augmented => "aug",
            ChordQuality::Add9 => "add9",
            ChordQuality::Add2 => "add2",
        }
    }

    /// Match a suffix against the supported set, including common aliases.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" | "maj" | "M" => Some(ChordQuality::Major),
            "m" | "min" => Some(ChordQuality::Minor),
            "7" => Some(ChordQuality::Dominant7),
            "maj7" | "M7" => Some(ChordQuality::Major7),
            "m7" | "min7" => Some(ChordQuality::Minor7),
            "sus2" => Some(ChordQuality::Sus2),
            "sus4" => Some(ChordQuality::Sus4),
            "dim" => Some(ChordQuality::Diminished),
            "aug" | "+" => Some(ChordQuality::Augmented),
            "add9" => Some(ChordQuality::Add9),
            "add2" => Some(ChordQuality::Add2),
            _ => None,
        }
    }

    /// Display family this quality belongs to.
    pub fn family(&self) -> ChordFamily {
        match self {
            ChordQuality::Major => ChordFamily::Major,
            ChordQuality::Minor => ChordFamily::Minor,
            ChordQuality::Dominant7 => ChordFamily::Seventh,
            ChordQuality::Major7 => ChordFamily::MajorSeventh,
            ChordQuality::Minor7 => ChordFamily::MinorSeventh,
            ChordQuality::Sus2 | ChordQuality::Sus4 => ChordFamily::Suspended,
            ChordQuality::Diminished => ChordFamily::Diminished,
            ChordQuality::Augmented => ChordFamily::Augmented,
            ChordQuality::Add9 | ChordQuality::Add2 => ChordFamily::Add,
        }
    }
}

/// Display family for grouping chords in a chord library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordFamily {
    Major,
    Minor,
    Seventh,
    MajorSeventh,
    MinorSeventh,
    Suspended,
    Diminished,
    Augmented,
    Add,
}

impl std::fmt::Display for ChordFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ChordFamily::Major => "major",
            ChordFamily::Minor => "minor",
            ChordFamily::Seventh => "7th",
            ChordFamily::MajorSeventh => "major 7th",
            ChordFamily::MinorSeventh => "minor 7th",
            ChordFamily::Suspended => "suspended",
            ChordFamily::Diminished => "diminished",
            ChordFamily::Augmented => "augmented",
            ChordFamily::Add => "add",
        };
        write!(f, "{}", label)
    }
}

/// A chord as structure: root, quality, optional slash bass.
///
/// The textual spelling is not part of the structure. Rendering with any
/// spelling and re-parsing yields an identical `ParsedChord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedChord {
    pub root: PitchClass,
    pub quality: ChordQuality,
    pub bass: Option<PitchClass>,
}

impl ParsedChord {
    /// Shift root and bass by a semitone count. Quality is preserved.
    pub fn transposed(&self, semitones: i32) -> Self {
        Self {
            root: self.root.transposed(semitones),
            quality: self.quality,
            bass: self.bass.map(|b| b.transposed(semitones)),
        }
    }

    /// Render with an explicit accidental preference.
    ///
    /// The bass note is spelled with the same preference as the root, so one
    /// symbol never mixes sharp and flat names.
    pub fn render(&self, spelling: Spelling) -> String {
        let mut out = String::new();
        out.push_str(self.root.name(spelling));
        out.push_str(self.quality.suffix());
        if let Some(bass) = self.bass {
            out.push('/');
            out.push_str(bass.name(spelling));
        }
        out
    }

    /// Render using the spelling convention of a key context, or the sharp
    /// default when no key is known.
    pub fn render_in_key(&self, key: Option<&Key>) -> String {
        let spelling = key.map(|k| k.spelling()).unwrap_or_default();
        self.render(spelling)
    }
}

fn invalid(token: &str, message: &str) -> ChordError {
    ChordError::InvalidChord {
        token: token.to_string(),
        message: message.to_string(),
    }
}

/// Parse a chord symbol into its structure.
///
/// # Examples
/// ```
/// use chordshift::{parse_chord, ChordQuality};
///
/// let chord = parse_chord("F#m7").unwrap();
/// assert_eq!(chord.root.value(), 6);
/// assert_eq!(chord.quality, ChordQuality::Minor7);
/// assert_eq!(chord.bass, None);
///
/// let slash = parse_chord("C/G").unwrap();
/// assert_eq!(slash.bass.map(|b| b.value()), Some(7));
///
/// assert!(parse_chord("Chorus").is_err());
/// ```
///
/// # Errors
/// - [`ChordError::InvalidChord`] when the note letter is missing or invalid,
///   or the bass note after `/` is malformed
/// - [`ChordError::UnsupportedQuality`] when the suffix is not a supported
///   quality
pub fn parse_chord(token: &str) -> Result<ParsedChord, ChordError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(invalid(token, "empty token"));
    }

    let (head, bass_part) = match trimmed.split_once('/') {
        Some((head, bass)) => (head, Some(bass)),
        None => (trimmed, None),
    };

    let (root, consumed) =
        parse_note_prefix(head).ok_or_else(|| invalid(token, "expected a note letter A-G"))?;

    let suffix = &head[consumed..];
    let quality = ChordQuality::from_suffix(suffix).ok_or_else(|| ChordError::UnsupportedQuality {
        token: token.to_string(),
        suffix: suffix.to_string(),
    })?;

    let bass = match bass_part {
        Some(b) => Some(
            PitchClass::from_name(b).ok_or_else(|| invalid(token, "invalid bass note after '/'"))?,
        ),
        None => None,
    };

    Ok(ParsedChord {
        root,
        quality,
        bass,
    })
}

/// Grammar check that never fails.
///
/// Used to tell real chords apart from section labels like `Intro` or
/// `Chorus` that also appear bracketed in lyrics.
pub fn is_chord(token: &str) -> bool {
    parse_chord(token).is_ok()
}

/// Parse a chord and report its display family.
pub fn chord_family(token: &str) -> Result<ChordFamily, ChordError> {
    Ok(parse_chord(token)?.quality.family())
}
