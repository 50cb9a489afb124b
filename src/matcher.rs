//! Fuzzy matching of playlist songs against the songbook listing.
//!
//! Input lists are typed by hand, so titles and artists rarely match the
//! songbook exactly ("Beatles" vs "The Beatles", missing apostrophes, accents).
//! Every candidate is scored and returned; the operator makes the final call.

use std::collections::HashSet;

use unaccent::unaccent;

use crate::models::{Candidate, Song};

/// Weight of the title similarity in the overall score
const TITLE_WEIGHT: f64 = 0.7;
/// Weight of the artist similarity in the overall score
const ARTIST_WEIGHT: f64 = 0.3;

/// Separator between title and artist in a query string
const QUERY_SEPARATOR: &str = " - ";

/// A song query split into its title and artist parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongQuery {
    pub title: String,
    pub artist: String,
}

impl SongQuery {
    /// Split a raw "Title - Artist" query at its last separator.
    ///
    /// A query without a separator is treated as a bare title.
    pub fn parse(query: &str) -> Self {
        match query.rsplit_once(QUERY_SEPARATOR) {
            Some((title, artist)) => Self {
                title: title.to_string(),
                artist: artist.to_string(),
            },
            None => Self {
                title: query.to_string(),
                artist: String::new(),
            },
        }
    }
}

impl From<&str> for SongQuery {
    fn from(query: &str) -> Self {
        Self::parse(query)
    }
}

/// Playlist songs already carry title and artist separately, no parsing needed
impl From<&Song> for SongQuery {
    fn from(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchConfidence {
    /// Almost certainly the right song
    High,
    /// Likely the right song
    Medium,
    /// Possible match, check it
    Low,
    /// Not a plausible match
    NoMatch,
}

impl MatchConfidence {
    fn from_score(score: f64) -> Self {
        if score >= 0.85 {
            MatchConfidence::High
        } else if score >= 0.70 {
            MatchConfidence::Medium
        } else if score >= 0.50 {
            MatchConfidence::Low
        } else {
            MatchConfidence::NoMatch
        }
    }
}

/// A songbook candidate together with how well it matches the query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub title_similarity: f64,
    pub artist_similarity: f64,
    /// Overall score from 0.0 to 1.0
    pub score: f64,
    pub confidence: MatchConfidence,
}

impl ScoredCandidate {
    /// Score as a whole percentage, for display
    pub fn percent(&self) -> u8 {
        (self.score * 100.0).round() as u8
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Normalize a string for comparison
///
/// Applies: diacritic removal, lowercase, punctuation removal, whitespace collapse
pub fn normalize_string(s: &str) -> String {
    unaccent(s)
        .to_lowercase()
        .chars()
        .filter(|&c| c != '\'' && c != '’')
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalize an artist name, dropping a leading "the"
pub fn normalize_artist(s: &str) -> String {
    let normalized = normalize_string(s);
    match normalized.strip_prefix("the ") {
        Some(rest) => rest.to_string(),
        None => normalized,
    }
}

// =============================================================================
// String Similarity
// =============================================================================

/// Token-based similarity - handles word reordering
///
/// "Quick Brown Fox" vs "Brown Fox Quick" scores 1.0
pub fn token_similarity(s1: &str, s2: &str) -> f64 {
    let tokens1: HashSet<&str> = s1.split_whitespace().collect();
    let tokens2: HashSet<&str> = s2.split_whitespace().collect();

    if tokens1.is_empty() || tokens2.is_empty() {
        return 0.0;
    }

    let intersection = tokens1.intersection(&tokens2).count();
    let union = tokens1.union(&tokens2).count();

    intersection as f64 / union as f64
}

/// Similarity of two normalized strings from 0.0 to 1.0
///
/// Empty input never matches anything.
pub fn string_similarity(s1: &str, s2: &str) -> f64 {
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }
    if s1 == s2 {
        return 1.0;
    }

    let jw = jaro_winkler::jaro_winkler(s1, s2);
    let token = token_similarity(s1, s2);

    // Jaro-Winkler wins ties for character-level accuracy
    jw.max(token * 0.95).clamp(0.0, 1.0)
}

// =============================================================================
// Ranking
// =============================================================================

fn score_candidate(query_title: &str, query_artist: &str, candidate: Candidate) -> ScoredCandidate {
    let title_similarity = string_similarity(query_title, &normalize_string(&candidate.title));
    let artist_similarity = string_similarity(query_artist, &normalize_artist(&candidate.artist));

    let score = if query_artist.is_empty() {
        title_similarity
    } else {
        title_similarity * TITLE_WEIGHT + artist_similarity * ARTIST_WEIGHT
    };

    ScoredCandidate {
        candidate,
        title_similarity,
        artist_similarity,
        score,
        confidence: MatchConfidence::from_score(score),
    }
}

/// Rank candidates against a query, either a raw "Title - Artist" string or a
/// playlist song.
///
/// Returns every candidate sorted by score descending. Candidates with equal
/// scores keep their songbook order.
pub fn rank(query: impl Into<SongQuery>, candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
    let query = query.into();
    let query_title = normalize_string(&query.title);
    let query_artist = normalize_artist(&query.artist);

    let mut results: Vec<ScoredCandidate> = candidates
        .into_iter()
        .map(|candidate| score_candidate(&query_title, &query_artist, candidate))
        .collect();

    // sort_by is stable, ties keep their input order
    results.sort_by(|a, b| b.score.total_cmp(&a.score));

    results
}

/// True when no candidate is a plausible match
pub fn is_degenerate(choices: &[ScoredCandidate]) -> bool {
    choices
        .iter()
        .all(|choice| choice.confidence == MatchConfidence::NoMatch)
}

// =============================================================================
// Tests
// =============================================================================
