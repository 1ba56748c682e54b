// OAuth redirect helpers: building the authorize link and cleaning the return URL

use issuethread_types::{OAuthConfig, Result, ThreadError};
use url::{form_urlencoded, Url};

pub const OAUTH_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
pub const OAUTH_SCOPE: &str = "repo";

/// Build the provider authorize link.
///
/// The redirect defaults to `current_url`. The client secret is never part of the link.
pub fn login_link(oauth: &OAuthConfig, current_url: &str) -> Result<Url> {
    if oauth.client_id.is_empty() {
        return Err(ThreadError::Config("oauth.client_id is required to log in".to_string()));
    }
    let redirect_uri = oauth.redirect_uri.as_deref().unwrap_or(current_url);

    Url::parse_with_params(
        OAUTH_AUTHORIZE_URL,
        &[
            ("client_id", oauth.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("scope", OAUTH_SCOPE),
        ],
    )
    .map_err(|e| ThreadError::Config(format!("Invalid authorize URL: {}", e)))
}

/// Remove the `code` query parameter from a returning redirect.
///
/// Returns the code and the URL without it (other parameters and the fragment
/// are kept), or `None` when the URL carries no code.
pub fn strip_code(url: &Url) -> Option<(String, Url)> {
    let mut code = None;
    let mut kept = Vec::new();
    for segment in url.query()?.split('&').filter(|s| !s.is_empty()) {
        match form_urlencoded::parse(segment.as_bytes()).next() {
            Some((key, value)) if key == "code" => {
                if code.is_none() && !value.is_empty() {
                    code = Some(value.into_owned());
                }
            }
            _ => kept.push(segment),
        }
    }
    let code = code?;

    // Kept segments are reused verbatim, never re-encoded
    let mut cleaned = url.clone();
    if kept.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned.set_query(Some(&kept.join("&")));
    }

    Some((code, cleaned))
}
