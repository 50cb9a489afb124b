use reqwest::{Client, StatusCode};

use crate::ports::catalogue::ClientError;
use crate::ukebook::SiteUrls;

/// Log in to the songbook website.
///
/// The site answers a successful login with a redirect; anything else means the
/// credentials were rejected. The session cookie stays in `client`.
pub async fn login(
    client: &Client,
    urls: &SiteUrls,
    username: &str,
    password: &str,
) -> Result<(), ClientError> {
    let form = [
        ("username", username),
        ("password", password),
        ("loginBtn", "Login"),
    ];

    let response = client.post(urls.login()?).form(&form[..]).send().await?;
    let status = response.status();
    log::debug!("Login response status: {}", status);

    if is_login_redirect(status) {
        Ok(())
    } else {
        Err(ClientError::LoginRejected {
            status: status.as_u16(),
        })
    }
}

fn is_login_redirect(status: StatusCode) -> bool {
    matches!(status, StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_statuses() {
        assert!(is_login_redirect(StatusCode::FOUND));
        assert!(is_login_redirect(StatusCode::MOVED_PERMANENTLY));
        assert!(!is_login_redirect(StatusCode::OK));
        assert!(!is_login_redirect(StatusCode::SEE_OTHER));
        assert!(!is_login_redirect(StatusCode::UNAUTHORIZED));
    }
}
