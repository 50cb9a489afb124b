pub mod auth;
pub mod songbook;
pub mod urls;

pub use urls::SiteUrls;

/// HTTP client shared by all songbook requests.
///
/// Keeps the session cookie from login and does not follow redirects, the
/// login redirect is what signals success.
pub fn build_http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
}
