use crate::chord::parse_chord;
use crate::error::ChordError;
use crate::key::Key;

/// Transpose a single chord symbol by a semitone count.
///
/// The root (and bass, for slash chords) moves by `semitones` around the
/// chromatic circle; negative offsets work. Quality is preserved. Rendering
/// uses the default sharp spelling.
///
/// # Examples
/// ```
/// use chordshift::transpose_chord;
///
/// assert_eq!(transpose_chord("Em7", 2).unwrap(), "F#m7");
/// assert_eq!(transpose_chord("C/G", -2).unwrap(), "A#/F");
/// assert!(transpose_chord("Intro", 2).is_err());
/// ```
///
/// # Errors
/// Malformed input surfaces the parse error. Transposition never guesses a
/// chord from a token that does not parse.
pub fn transpose_chord(token: &str, semitones: i32) -> Result<String, ChordError> {
    transpose_chord_in_key(token, semitones, None)
}

/// Transpose a chord symbol, spelling the result for a target key.
pub fn transpose_chord_in_key(
    token: &str,
    semitones: i32,
    target_key: Option<&Key>,
) -> Result<String, ChordError> {
    let chord = parse_chord(token)?;
    Ok(chord.transposed(semitones).render_in_key(target_key))
}

/// Transpose a list of chord symbols, best-effort.
///
/// Entries that fail to parse are passed through unchanged rather than
/// aborting the batch, since chord lists pulled from lyrics frequently
/// interleave section labels and other non-chord tokens.
pub fn transpose_chords<S: AsRef<str>>(chords: &[S], semitones: i32) -> Vec<String> {
    chords
        .iter()
        .map(|token| {
            let token = token.as_ref();
            transpose_chord(token, semitones).unwrap_or_else(|_| token.to_string())
        })
        .collect()
}

/// Transpose every bracketed chord token in a lyrics sheet.
///
/// Scans for `[...]` tokens. Tokens that parse as chords are transposed;
/// everything else, including section labels like `[Chorus]` and all text
/// outside brackets, is copied through byte-for-byte.
pub fn transpose_lyrics(text: &str, semitones: i32) -> String {
    transpose_lyrics_in_key(text, semitones, None)
}

/// Transpose bracketed chord tokens, spelling results for a target key.
pub fn transpose_lyrics_in_key(text: &str, semitones: i32, target_key: Option<&Key>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('[') {
        out.push_str(&rest[..=open]);
        rest = &rest[open + 1..];
        let Some(close) = rest.find(']') else {
            // Unclosed bracket: copy the remainder verbatim
            break;
        };
        let token = &rest[..close];
        match transpose_chord_in_key(token, semitones, target_key) {
            Ok(transposed) => out.push_str(&transposed),
            Err(_) => out.push_str(token),
        }
        out.push(']');
        rest = &rest[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::ParsedChord;
    use crate::pitch::PitchClass;

    #[test]
    fn transposes_root_and_preserves_quality() {
        assert_eq!(transpose_chord("Em7", 2).unwrap(), "F#m7");
        assert_eq!(transpose_chord("Cadd9", 2).unwrap(), "Dadd9");
        assert_eq!(transpose_chord("G", 5).unwrap(), "C");
    }

    #[test]
    fn transposes_slash_bass_with_root() {
        assert_eq!(transpose_chord("C/G", 2).unwrap(), "D/A");
        assert_eq!(transpose_chord("D/F#", 1).unwrap(), "D#/G");
    }

    #[test]
    fn negative_offsets_normalize() {
        assert_eq!(transpose_chord("C", -1).unwrap(), "B");
        assert_eq!(transpose_chord("Dm", -14).unwrap(), "Cm");
    }

    #[test]
    fn zero_offset_preserves_structure() {
        for token in ["C", "F#m7", "Bb/D", "Gsus4"] {
            let rendered = transpose_chord(token, 0).unwrap();
            assert_eq!(parse_chord(&rendered).unwrap(), parse_chord(token).unwrap());
        }
    }

    #[test]
    fn up_then_complement_restores_root() {
        for n in 0..12 {
            let original = parse_chord("Em7").unwrap();
            let there = transpose_chord("Em7", n).unwrap();
            let back = transpose_chord(&there, 12 - n).unwrap();
            assert_eq!(parse_chord(&back).unwrap(), original, "offset {}", n);
        }
    }

    #[test]
    fn root_arithmetic_is_mod_12() {
        for n in [-3, 0, 2, 7, 13] {
            let rendered = transpose_chord("Em7", n).unwrap();
            let expected = PitchClass::new(4 + n);
            assert_eq!(parse_chord(&rendered).unwrap().root, expected, "offset {}", n);
        }
    }

    #[test]
    fn target_key_governs_spelling() {
        let f_major = Key::parse("F").unwrap();
        assert_eq!(
            transpose_chord_in_key("A", 1, Some(&f_major)).unwrap(),
            "Bb"
        );
        let e_major = Key::parse("E").unwrap();
        assert_eq!(
            transpose_chord_in_key("A", 1, Some(&e_major)).unwrap(),
            "A#"
        );
    }

    #[test]
    fn batch_passes_unparsable_entries_through() {
        let result = transpose_chords(&["Em7", "Intro", "G", "sus4"], 2);
        assert_eq!(result, vec!["F#m7", "Intro", "A", "sus4"]);
    }

    #[test]
    fn lyrics_transpose_chords_only() {
        let result = transpose_lyrics("[Em7] [G] [sus4] [Cadd9]", 2);
        assert_eq!(result, "[F#m7] [A] [sus4] [Dadd9]");
    }

    #[test]
    fn lyrics_keep_surrounding_text_verbatim() {
        let text = "Verse 1:\n[G]Hello my [D/F#]friend\n  [Em]again\n";
        let result = transpose_lyrics(text, 2);
        assert_eq!(result, "Verse 1:\n[A]Hello my [E/G#]friend\n  [F#m]again\n");
    }

    #[test]
    fn lyrics_leave_section_labels_unchanged() {
        for n in [0, 3, 7, 11] {
            assert_eq!(transpose_lyrics("[Intro]", n), "[Intro]");
        }
    }

    #[test]
    fn lyrics_with_unclosed_bracket_copy_through() {
        assert_eq!(transpose_lyrics("la la [G] oh [unfinished", 2), "la la [A] oh [unfinished");
        assert_eq!(transpose_lyrics("[", 5), "[");
    }

    #[test]
    fn lyrics_zero_offset_is_identity_for_sharp_spellings() {
        let text = "[C] some [F#m7] words [Chorus]\n[A#]";
        assert_eq!(transpose_lyrics(text, 0), text);
    }

    #[test]
    fn lyrics_round_trip_at_pitch_class_level() {
        let text = "[Bb] mid [Em7] end [G/B]";
        let there = transpose_lyrics(text, 5);
        let back = transpose_lyrics(&there, 7);
        // Spelling may shift on enharmonic boundaries, structure may not
        let originals: Vec<ParsedChord> = ["Bb", "Em7", "G/B"]
            .iter()
            .map(|t| parse_chord(t).unwrap())
            .collect();
        let roundtripped: Vec<ParsedChord> = ["A#", "Em7", "G/B"]
            .iter()
            .map(|t| parse_chord(t).unwrap())
            .collect();
        assert_eq!(originals, roundtripped);
        assert_eq!(back, "[A#] mid [Em7] end [G/B]");
    }
}
