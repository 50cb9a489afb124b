use std::fmt;

/// A song line from the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub title: String,
    pub artist: String,
    pub gema_number: String,
    /// The performer leading the song
    pub leader: String,
}

impl Song {
    /// Query string used to look the song up in the songbook.
    ///
    /// Uses the same "Title - Artist" shape the songbook displays.
    pub fn query(&self) -> String {
        if self.artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}

/// One line of the playlist, in performance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistEntry {
    Song(Song),
    Break,
}

impl PlaylistEntry {
    pub fn as_song(&self) -> Option<&Song> {
        match self {
            PlaylistEntry::Song(song) => Some(song),
            PlaylistEntry::Break => None,
        }
    }
}

impl fmt::Display for PlaylistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistEntry::Song(song) => write!(f, "{}", song.query()),
            PlaylistEntry::Break => write!(f, "Break"),
        }
    }
}

/// A song listed on the songbook website.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub artist: String,
    /// Link to the song page, as found in the songbook (usually relative)
    pub href: String,
    /// Position in the songbook listing
    pub position: usize,
}

impl Candidate {
    pub fn display_name(&self) -> String {
        if self.artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", self.title, self.artist)
        }
    }
}
