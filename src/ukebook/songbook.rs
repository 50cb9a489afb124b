use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Client;
use reqwest::header::ACCEPT_ENCODING;

use crate::models::Candidate;
use crate::ports::catalogue::ClientError;
use crate::ukebook::SiteUrls;

static SONG_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<ol\b[^>]*\bclass\s*=\s*"[^"]*\bsongList\b[^"]*"[^>]*>(.*?)</ol>"#)
        .expect("song list pattern is valid")
});
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b([^>]*)>(.*?)</a>"#).expect("link pattern is valid")
});
static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("href pattern is valid")
});
static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<strong\b[^>]*\bclass\s*=\s*"[^"]*\bsongTitle\b[^"]*"[^>]*>(.*?)</strong>"#)
        .expect("title pattern is valid")
});
static ARTIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<em\b[^>]*\bclass\s*=\s*"[^"]*\bsongArtist\b[^"]*"[^>]*>(.*?)</em>"#)
        .expect("artist pattern is valid")
});
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

/// Fetch the songbook page and list its songs
pub async fn fetch_songbook(client: &Client, urls: &SiteUrls) -> Result<Vec<Candidate>, ClientError> {
    let html = client
        .get(urls.songbook()?)
        .header(ACCEPT_ENCODING, "identity")
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let songs = parse_song_list(&html);
    log::debug!("Songbook lists {} songs", songs.len());
    Ok(songs)
}

/// Extract the songs from the `songList` element of the songbook page.
///
/// Links without a title are ignored. A link listed twice is kept once, at its
/// first position.
pub fn parse_song_list(html: &str) -> Vec<Candidate> {
    let Some(list) = SONG_LIST.captures(html).and_then(|caps| caps.get(1)) else {
        log::warn!("No songList element found in the songbook page");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut songs = Vec::new();

    for link in LINK.captures_iter(list.as_str()) {
        let attributes = link.get(1).map_or("", |m| m.as_str());
        let body = link.get(2).map_or("", |m| m.as_str());

        let Some(title) = TITLE.captures(body).and_then(|caps| caps.get(1)) else {
            continue;
        };
        let title = element_text(title.as_str());
        if title.is_empty() {
            continue;
        }
        let artist = ARTIST
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| element_text(m.as_str()))
            .unwrap_or_default();
        let href = HREF
            .captures(attributes)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| decode_entities(m.as_str().trim()))
            .unwrap_or_default();

        if !href.is_empty() && !seen.insert(href.clone()) {
            log::debug!("Ignoring duplicate songbook link {}", href);
            continue;
        }

        songs.push(Candidate {
            title,
            artist,
            href,
            position: songs.len(),
        });
    }

    songs
}

/// Text content of an element: tags removed, entities decoded, whitespace collapsed
fn element_text(inner_html: &str) -> String {
    let text = TAG.replace_all(inner_html, " ");
    decode_entities(&text)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('&') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];

        let decoded = rest.find(';').and_then(|end| {
            let entity = &rest[1..end];
            decode_entity(entity).map(|c| (c, end + 1))
        });
        match decoded {
            Some((c, consumed)) => {
                out.push(c);
                rest = &rest[consumed..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)
        }
    }
}
