use url::Url;

use crate::ports::catalogue::ClientError;

const LOGIN_PATH: &str = "/songbook/login/";
const SONGBOOK_PATH: &str = "/songbook/";

/// The pages of one songbook website
#[derive(Debug, Clone)]
pub struct SiteUrls {
    host: Url,
    break_page: Option<Url>,
}

impl SiteUrls {
    pub fn new(host: Url, break_url: Option<&str>) -> Result<Self, ClientError> {
        let break_page = break_url.map(|path| resolve(&host, path)).transpose()?;
        Ok(Self { host, break_page })
    }

    pub fn home(&self) -> &Url {
        &self.host
    }

    pub fn login(&self) -> Result<Url, ClientError> {
        resolve(&self.host, LOGIN_PATH)
    }

    pub fn songbook(&self) -> Result<Url, ClientError> {
        resolve(&self.host, SONGBOOK_PATH)
    }

    pub fn break_page(&self) -> Option<&Url> {
        self.break_page.as_ref()
    }

    /// Resolve a song link from the songbook listing
    pub fn song(&self, href: &str) -> Result<Url, ClientError> {
        if href.trim().is_empty() {
            return Err(ClientError::InvalidReference {
                reference: href.to_string(),
            });
        }
        resolve(&self.host, href)
    }
}

fn resolve(base: &Url, reference: &str) -> Result<Url, ClientError> {
    base.join(reference.trim())
        .map_err(|_| ClientError::InvalidReference {
            reference: reference.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(break_url: Option<&str>) -> SiteUrls {
        SiteUrls::new(Url::parse("https://uke.example.org/").unwrap(), break_url).unwrap()
    }

    #[test]
    fn test_fixed_pages() {
        let urls = urls(None);
        assert_eq!(urls.login().unwrap().as_str(), "https://uke.example.org/songbook/login/");
        assert_eq!(urls.songbook().unwrap().as_str(), "https://uke.example.org/songbook/");
        assert!(urls.break_page().is_none());
    }

    #[test]
    fn test_relative_and_absolute_links() {
        let urls = urls(Some("/songbook/pause/"));
        assert_eq!(
            urls.break_page().unwrap().as_str(),
            "https://uke.example.org/songbook/pause/"
        );
        assert_eq!(
            urls.song("/songbook/song/42/").unwrap().as_str(),
            "https://uke.example.org/songbook/song/42/"
        );
        assert_eq!(
            urls.song("https://mirror.example.org/song/1").unwrap().as_str(),
            "https://mirror.example.org/song/1"
        );
    }

    #[test]
    fn test_empty_song_link_is_invalid() {
        let result = urls(None).song("  ");
        assert!(matches!(result, Err(ClientError::InvalidReference { .. })));
    }
}
