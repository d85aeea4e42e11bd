//! Centralized error types for jiracli.
//!
//! This module provides the application-level error that commands return,
//! with user-friendly messages and the mapping to process exit behavior.

use thiserror::Error;

use crate::api::error::ApiError;
use crate::config::ConfigError;

/// Error returned by a command when it cannot run to completion.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is incomplete.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Login, transport or decoding failure.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Local file access failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid command-line usage detected after parsing.
    #[error("{0}")]
    Usage(String),
}

impl AppError {
    /// Create a usage error.
    pub fn usage(msg: impl Into<String>) -> Self {
        AppError::Usage(msg.into())
    }

    /// Whether the error should be reported as a command-line usage error.
    ///
    /// These are detected before any request is sent.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            AppError::Usage(_) | AppError::Config(ConfigError::Missing { .. })
        )
    }

    /// Message shown to the operator.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoHomeDir => {
                    "Could not find your home directory to read ~/.jiracli.".to_string()
                }
                ConfigError::ReadError(_) => {
                    "Could not read the configuration file. Please check file permissions."
                        .to_string()
                }
                ConfigError::ParseError(detail) => {
                    format!("Configuration file is invalid: {}", detail)
                }
                ConfigError::Format(_) | ConfigError::Missing { .. } => e.to_string(),
            },
            AppError::Api(e) => match e {
                ApiError::Authentication { status } => format!(
                    "Login failed (HTTP {}). Please check your user name and password.",
                    status
                ),
                ApiError::Network(_) => {
                    "Connection failed. Please check the server address and your network."
                        .to_string()
                }
                ApiError::Decode(_) => {
                    "Unexpected response from JIRA: the body was not valid JSON.".to_string()
                }
                ApiError::Io(err) => format!("Could not read file: {}", err),
            },
            AppError::Io(_) => "A local file could not be accessed. Please check its path and permissions.".to_string(),
            AppError::Usage(msg) => msg.clone(),
        }
    }

    /// A hint on how to fix the problem, where one exists.
    pub fn suggested_action(&self) -> Option<&'static str> {
        match self {
            AppError::Config(ConfigError::ParseError(_)) => {
                Some("Fix the syntax of ~/.jiracli (INI format with [server], [misc] and [customField] sections).")
            }
            AppError::Api(ApiError::Authentication { .. }) => {
                Some("Pass credentials with -u/-p or set them in the [server] section of ~/.jiracli.")
            }
            AppError::Api(ApiError::Network(_)) => {
                Some("Check the server address given with -a or in ~/.jiracli.")
            }
            _ => None,
        }
    }
}

/// Result type for commands.
pub type Result<T> = std::result::Result<T, AppError>;
