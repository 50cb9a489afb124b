use crate::models::Candidate;

/// Failures talking to the songbook website or opening its pages.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Login rejected by the songbook (status {status})")]
    LoginRejected { status: u16 },
    #[error("Invalid page reference: {reference}")]
    InvalidReference { reference: String },
    #[error("Failed to open {url} in the browser: {source}")]
    Browser {
        url: String,
        #[source]
        source: std::io::Error,
    },
}

/// Port trait wrapping the songbook website capabilities used by the selection flow.
///
/// Implementations live in `services::catalogue` (production) or test mocks.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogueClient: Send + Sync {
    /// Open the pages shown while the session starts.
    async fn open_entry_announcement(&self) -> Result<(), ClientError>;

    /// Songbook entries to match `query` against. An empty list is not an error.
    async fn fetch_candidates(&self, query: &str) -> Result<Vec<Candidate>, ClientError>;

    async fn open_candidate_page(&self, candidate: &Candidate) -> Result<(), ClientError>;

    /// Open the break page, if one is configured.
    async fn open_break_page(&self) -> Result<(), ClientError>;

    async fn open_home_page(&self) -> Result<(), ClientError>;
}
