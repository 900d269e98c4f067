pub mod chord;
pub mod difficulty;
pub mod error;
pub mod key;
pub mod pitch;
pub mod song;
pub mod transpose;
pub mod validation;

pub use chord::{chord_family, is_chord, parse_chord, ChordFamily, ChordQuality, ParsedChord};
pub use difficulty::{
    is_beginner_friendly, is_beginner_friendly_key, suggest_easy_mode_keys, FamilyDifficulty,
};
pub use error::ChordError;
pub use key::{all_keys, detect_key, transpose_key, Key, KeyDetection, KeyMode};
pub use pitch::{PitchClass, Spelling};
pub use song::{parse_song, Song, SongMetadata};
pub use transpose::{
    transpose_chord, transpose_chord_in_key, transpose_chords, transpose_lyrics,
    transpose_lyrics_in_key,
};
pub use validation::{
    classify_token, validate_lyrics, validate_song, LyricsReport, SongReport, TokenClass,
};

/// Transpose a whole song file by a semitone count.
/// This is the main entry point for the library.
pub fn transpose_song(source: &str, semitones: i32) -> Result<String, ChordError> {
    let song = parse_song(source)?;
    Ok(song.transposed(semitones).render())
}

/// Transpose a song file into a named target key (e.g. "Bb", "Em").
///
/// The current key is taken from the frontmatter when declared, otherwise
/// detected from the song's own chords. The target key governs the
/// enharmonic spelling of the rewritten chords.
pub fn transpose_song_to_key(source: &str, target: &str) -> Result<String, ChordError> {
    let song = parse_song(source)?;
    let target_key = Key::parse(target)
        .ok_or_else(|| ChordError::InvalidMetadata(format!("unknown target key: {}", target)))?;

    let current = match song.metadata.key {
        Some(key) => key,
        None => {
            let report = validate_lyrics(&song.lyrics);
            detect_key(&report.chord_tokens())
                .map(|d| d.key)
                .ok_or_else(|| {
                    ChordError::InvalidMetadata(
                        "cannot determine the song's current key".to_string(),
                    )
                })?
        }
    };

    let semitones = target_key.root.value() as i32 - current.root.value() as i32;
    let metadata_key = song.metadata.key.map(|k| k.transposed(semitones));
    let lyrics = transpose_lyrics_in_key(&song.lyrics, semitones, Some(&target_key));
    let transposed = Song {
        metadata: SongMetadata {
            key: metadata_key,
            ..song.metadata
        },
        lyrics,
    };
    Ok(transposed.render())
}
