//! Addressing of one JIRA session.

use tracing::warn;

use crate::config::ApiVersion;

/// Base address and sub-API prefixes of one login session.
///
/// The session cookies themselves live in the HTTP client's cookie store.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    api_prefix: &'static str,
    auth_prefix: &'static str,
}

impl Session {
    /// Resolve the URLs for `version` under `base_url`.
    pub fn new(base_url: &str, version: ApiVersion) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_prefix: version.api_prefix(),
            auth_prefix: version.auth_prefix(),
        }
    }

    /// Full URL of a path under the general API.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    /// Full URL of a path under the authentication API.
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.auth_prefix, path)
    }
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") {
        warn!("URL does not use HTTPS: {}. Credentials are sent in clear text.", url);
    }

    url.to_string()
}
