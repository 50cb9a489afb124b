use color_eyre::eyre::{Context, Result};
use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::models::Candidate;
use crate::ports::catalogue::{CatalogueClient, ClientError};
use crate::ukebook::songbook::fetch_songbook;
use crate::ukebook::{SiteUrls, auth, build_http_client};

/// Songbook website client that opens pages in the system browser.
pub struct UkebookHttpAdapter {
    client: Client,
    urls: SiteUrls,
}

impl UkebookHttpAdapter {
    /// Build the client and log in with the configured credentials.
    pub async fn connect(config: &Config) -> Result<Self> {
        let urls = SiteUrls::new(config.host_url()?, config.break_url())
            .wrap_err("Invalid break_url in config")?;
        let client = build_http_client().wrap_err("Failed to build HTTP client")?;

        auth::login(&client, &urls, &config.username, &config.password)
            .await
            .wrap_err_with(|| format!("Login to {} failed", urls.home()))?;
        log::info!("Logged in to {} as {}", urls.home(), config.username);

        Ok(Self { client, urls })
    }

    async fn open_url(&self, url: &Url) -> Result<(), ClientError> {
        log::debug!("Opening {} in the browser", url);
        let target = url.to_string();
        let opened = tokio::task::spawn_blocking(move || open::that(&target)).await;

        match opened {
            Ok(Ok(())) => Ok(()),
            Ok(Err(source)) => Err(ClientError::Browser {
                url: url.to_string(),
                source,
            }),
            Err(join_error) => Err(ClientError::Browser {
                url: url.to_string(),
                source: std::io::Error::other(join_error),
            }),
        }
    }
}

#[async_trait::async_trait]
impl CatalogueClient for UkebookHttpAdapter {
    async fn open_entry_announcement(&self) -> Result<(), ClientError> {
        if let Some(break_page) = self.urls.break_page() {
            self.open_url(break_page).await?;
        }
        self.open_url(&self.urls.songbook()?).await
    }

    async fn fetch_candidates(&self, query: &str) -> Result<Vec<Candidate>, ClientError> {
        log::debug!("Fetching songbook for '{}'", query);
        fetch_songbook(&self.client, &self.urls).await
    }

    async fn open_candidate_page(&self, candidate: &Candidate) -> Result<(), ClientError> {
        let url = self.urls.song(&candidate.href)?;
        self.open_url(&url).await
    }

    async fn open_break_page(&self) -> Result<(), ClientError> {
        match self.urls.break_page() {
            Some(break_page) => self.open_url(break_page).await,
            None => {
                log::debug!("No break page configured");
                Ok(())
            }
        }
    }

    async fn open_home_page(&self) -> Result<(), ClientError> {
        let page = self.urls.break_page().unwrap_or(self.urls.home());
        self.open_url(page).await
    }
}
