//! Song records: YAML frontmatter metadata plus a lyrics body.
//!
//! A song file carries its metadata between `---` markers, followed by
//! lyrics with bracketed chord tokens:
//!
//! ```text
//! ---
//! title: Greensleeves
//! key: Em
//! capo: 2
//! ---
//! [Em]Alas my [D]love...
//! ```
//!
//! Frontmatter is optional. Everything outside the frontmatter block is the
//! lyrics body and is preserved verbatim.

use serde::{Deserialize, Serialize};

use crate::error::ChordError;
use crate::key::Key;
use crate::transpose::transpose_lyrics_in_key;

/// Raw metadata for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case")]
struct RawMetadata {
    title: Option<String>,
    artist: Option<String>,
    key: Option<String>,
    capo: Option<u8>,
    tempo: Option<u16>,
}

/// Typed song metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SongMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub key: Option<Key>,
    pub capo: Option<u8>,
    pub tempo: Option<u16>,
}

impl SongMetadata {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.artist.is_none()
            && self.key.is_none()
            && self.capo.is_none()
            && self.tempo.is_none()
    }
}

/// A song: metadata plus lyrics with inline chord tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Song {
    pub metadata: SongMetadata,
    pub lyrics: String,
}

impl Song {
    /// Shift the declared key and every chord token by a semitone count.
    ///
    /// The transposed key (when one is declared) governs the enharmonic
    /// spelling of the rewritten chords.
    pub fn transposed(&self, semitones: i32) -> Song {
        let key = self.metadata.key.map(|k| k.transposed(semitones));
        let lyrics = transpose_lyrics_in_key(&self.lyrics, semitones, key.as_ref());
        Song {
            metadata: SongMetadata {
                key,
                ..self.metadata.clone()
            },
            lyrics,
        }
    }

    /// Re-emit the song as frontmatter plus lyrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.metadata.is_empty() {
            out.push_str("---\n");
            if let Some(title) = &self.metadata.title {
                out.push_str(&format!("title: {}\n", title));
            }
            if let Some(artist) = &self.metadata.artist {
                out.push_str(&format!("artist: {}\n", artist));
            }
            if let Some(key) = &self.metadata.key {
                out.push_str(&format!("key: {}\n", key));
            }
            if let Some(capo) = self.metadata.capo {
                out.push_str(&format!("capo: {}\n", capo));
            }
            if let Some(tempo) = self.metadata.tempo {
                out.push_str(&format!("tempo: {}\n", tempo));
            }
            out.push_str("---\n");
        }
        out.push_str(&self.lyrics);
        out
    }
}

/// Returns (metadata_content, remaining_source)
fn extract_frontmatter(source: &str) -> (Option<String>, String) {
    let lines: Vec<&str> = source.lines().collect();

    let mut start_idx = None;
    let mut end_idx = None;
    for (i, line) in lines.iter().enumerate() {
        if line.trim() == "---" {
            if start_idx.is_none() {
                start_idx = Some(i);
            } else {
                end_idx = Some(i);
                break;
            }
        }
    }

    match (start_idx, end_idx) {
        (Some(start), Some(end)) => {
            let metadata_content: String = lines[start + 1..end].join("\n");
            let remaining: Vec<&str> = lines[..start]
                .iter()
                .chain(lines[end + 1..].iter())
                .copied()
                .collect();
            (Some(metadata_content), remaining.join("\n"))
        }
        _ => (None, source.to_string()),
    }
}

/// Parse a song file into metadata and lyrics.
///
/// # Errors
/// Returns [`ChordError::InvalidMetadata`] when the frontmatter is not valid
/// YAML or declares a key that does not parse.
pub fn parse_song(source: &str) -> Result<Song, ChordError> {
    let (frontmatter, lyrics) = extract_frontmatter(source);

    let metadata = match frontmatter {
        Some(content) if !content.trim().is_empty() => {
            let raw: RawMetadata = serde_yaml::from_str(&content)
                .map_err(|e| ChordError::InvalidMetadata(e.to_string()))?;
            let key = match &raw.key {
                Some(name) => Some(Key::parse(name).ok_or_else(|| {
                    ChordError::InvalidMetadata(format!("unknown key: {}", name))
                })?),
                None => None,
            };
            SongMetadata {
                title: raw.title,
                artist: raw.artist,
                key,
                capo: raw.capo,
                tempo: raw.tempo,
            }
        }
        _ => SongMetadata::default(),
    };

    Ok(Song { metadata, lyrics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyMode;
    use crate::pitch::PitchClass;

    #[test]
    fn parses_frontmatter_and_body() {
        let source = "---\ntitle: Greensleeves\nkey: Em\ncapo: 2\n---\n[Em]Alas my [D]love";
        let song = parse_song(source).unwrap();
        assert_eq!(song.metadata.title.as_deref(), Some("Greensleeves"));
        assert_eq!(
            song.metadata.key,
            Some(Key {
                root: PitchClass::new(4),
                mode: KeyMode::Minor
            })
        );
        assert_eq!(song.metadata.capo, Some(2));
        assert_eq!(song.metadata.tempo, None);
        assert_eq!(song.lyrics, "[Em]Alas my [D]love");
    }

    #[test]
    fn missing_frontmatter_is_all_defaults() {
        let song = parse_song("[C]just lyrics").unwrap();
        assert_eq!(song.metadata, SongMetadata::default());
        assert_eq!(song.lyrics, "[C]just lyrics");
    }

    #[test]
    fn rejects_bad_yaml_and_bad_key() {
        assert!(matches!(
            parse_song("---\ntitle: [unterminated\n---\nbody"),
            Err(ChordError::InvalidMetadata(_))
        ));
        assert!(matches!(
            parse_song("---\nkey: H\n---\nbody"),
            Err(ChordError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn render_parse_round_trip() {
        let source = "---\ntitle: Test Song\nartist: Somebody\nkey: Bb\ncapo: 1\ntempo: 96\n---\n[Bb]la [Eb]la";
        let song = parse_song(source).unwrap();
        let rendered = song.render();
        assert_eq!(parse_song(&rendered).unwrap(), song);
        assert_eq!(rendered, source);
    }

    #[test]
    fn transposed_song_moves_key_and_chords() {
        let source = "---\nkey: G\n---\n[G]down [Em]the [C]road [D7]again";
        let transposed = parse_song(source).unwrap().transposed(3);
        assert_eq!(
            transposed.metadata.key,
            Some(Key::major(PitchClass::new(10)))
        );
        // Bb is a flat key, so the rewritten chords spell flats
        assert_eq!(transposed.lyrics, "[Bb]down [Gm]the [Eb]road [F7]again");
    }
}
