//! # Error Types
//!
//! This module defines all error types for the chordshift engine.
//!
//! Errors carry the offending token so callers can report exactly which part
//! of a lyrics sheet failed to parse.
//!
//! ## Error Types
//! - `InvalidChord` - token does not match the chord grammar at all
//! - `UnsupportedQuality` - chord-shaped token with an unrecognized quality suffix
//! - `InvalidMetadata` - invalid YAML frontmatter in a song file
//!
//! ## Propagation Policy
//! Single-token operations (`parse_chord`, `transpose_chord`, `chord_family`)
//! surface these errors to the caller. Batch and text operations
//! (`transpose_chords`, `transpose_lyrics`) recover locally by passing the
//! unrecognized token through unchanged, because lyrics legitimately mix
//! chords with section labels and free-text annotations.
//!
//! ## Usage
//! ```rust
//! use chordshift::{parse_chord, ChordError};
//!
//! match parse_chord("Hm7") {
//!     Ok(chord) => println!("parsed {:?}", chord),
//!     Err(ChordError::InvalidChord { token, message }) => {
//!         eprintln!("'{}' is not a chord: {}", token, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    /// Token does not match the chord grammar.
    ///
    /// The grammar is: note letter A-G, optional `#` or `b`, optional quality
    /// suffix, optional `/` plus bass note.
    ///
    /// # Example
    /// ```
    /// # use chordshift::ChordError;
    /// let err = ChordError::InvalidChord {
    ///     token: "sus4".to_string(),
    ///     message: "expected a note letter A-G".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Invalid chord 'sus4': expected a note letter A-G");
    /// ```
    #[error("Invalid chord '{token}': {message}")]
    InvalidChord { token: String, message: String },

    /// Chord-shaped token whose quality suffix is not in the supported set.
    ///
    /// This is distinct from `InvalidChord` so callers can tell "not a chord
    /// at all" apart from "a chord we do not handle yet".
    ///
    /// # Example
    /// ```
    /// # use chordshift::ChordError;
    /// let err = ChordError::UnsupportedQuality {
    ///     token: "Cmaj13".to_string(),
    ///     suffix: "maj13".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Unsupported chord quality 'maj13' in 'Cmaj13'");
    /// ```
    #[error("Unsupported chord quality '{suffix}' in '{token}'")]
    UnsupportedQuality { token: String, suffix: String },

    /// Invalid song metadata.
    ///
    /// Occurs when YAML frontmatter is malformed or declares an unknown key.
    ///
    /// # Example
    /// ```
    /// # use chordshift::ChordError;
    /// let err = ChordError::InvalidMetadata("unknown key: H".to_string());
    /// assert_eq!(err.to_string(), "Invalid metadata: unknown key: H");
    /// ```
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),
}
