//! The merged, validated configuration and its value types.

use std::fmt;
use std::str::FromStr;

use super::CustomFieldMapping;

/// Supported JIRA REST schema versions.
///
/// Each version maps to a pair of URL path prefixes: one for the general
/// resource set (issues, versions, ...) and one for the session resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    /// JIRA 4.4, which only exposed the alpha REST API.
    V4_4,
    /// JIRA 5 and later.
    #[default]
    V5,
}

impl ApiVersion {
    /// Path prefix of the general REST API.
    pub fn api_prefix(&self) -> &'static str {
        match self {
            ApiVersion::V4_4 => "/rest/api/2.0.alpha1",
            ApiVersion::V5 => "/rest/api/2",
        }
    }

    /// Path prefix of the authentication REST API.
    pub fn auth_prefix(&self) -> &'static str {
        match self {
            ApiVersion::V4_4 | ApiVersion::V5 => "/rest/auth/1",
        }
    }

    /// The name used in the configuration file and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V4_4 => "4.4",
            ApiVersion::V5 => "5",
        }
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "4.4" => Ok(ApiVersion::V4_4),
            "5" => Ok(ApiVersion::V5),
            other => Err(format!(
                "unsupported JIRA version '{}' (expected 4.4 or 5)",
                other
            )),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that must not show up in logs or debug output.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a secret value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the raw value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Whether the secret is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Configuration after all sources have been merged and validated.
///
/// Address, username and password are guaranteed to be non-empty.
#[derive(Debug, Clone)]
pub struct EffectiveConfiguration {
    /// Base address of the JIRA instance.
    pub address: String,
    /// User name for the session login.
    pub username: String,
    /// Password for the session login.
    pub password: Secret,
    /// Which REST schema to talk.
    pub api_version: ApiVersion,
    /// Mapping from short custom field keys to request fields.
    pub custom_fields: CustomFieldMapping,
    /// Whether debug logging was requested.
    pub debug: bool,
}

impl EffectiveConfiguration {
    /// Browser URL of an issue on the configured server.
    pub fn issue_url(&self, issue_key: &str) -> String {
        format!("{}/browse/{}", self.address.trim_end_matches('/'), issue_key)
    }
}
