use std::path::Path;

use color_eyre::eyre::{Context, Result};

use crate::models::{PlaylistEntry, Song};

const BREAK_MARKER: &str = "Break";

/// Read the tab separated input list from disk.
pub fn read_playlist(path: &Path) -> Result<Vec<PlaylistEntry>> {
    let contents = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read input list: {}", path.display()))?;
    Ok(parse_playlist(&contents))
}

/// Parse the input list.
///
/// Each line is either a `Break` marker or a song record with the fields
/// title, artist, GEMA number and leader separated by tabs. Blank lines are
/// ignored and lines with too few fields are skipped.
pub fn parse_playlist(contents: &str) -> Vec<PlaylistEntry> {
    let mut entries = Vec::new();

    for (line_number, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split('\t').map(str::trim).collect();

        if parts[0] == BREAK_MARKER {
            entries.push(PlaylistEntry::Break);
            continue;
        }

        if let [title, artist, gema_number, leader, ..] = parts.as_slice() {
            entries.push(PlaylistEntry::Song(Song {
                title: title.to_string(),
                artist: artist.to_string(),
                gema_number: gema_number.to_string(),
                leader: leader.to_string(),
            }));
        } else {
            log::warn!(
                "Skipping input line {}: expected 4 tab separated fields, found {}",
                line_number + 1,
                parts.len()
            );
        }
    }

    entries
}
