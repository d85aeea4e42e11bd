//! JIRA API client and types.
//!
//! This module provides the session-scoped client for the JIRA REST API
//! and the uniform result every call returns.

mod client;
pub mod error;
mod result;
mod session;
pub mod types;

pub use client::JiraClient;
pub use error::ApiError;
pub use result::{ErrorPayload, OperationResult};
pub use session::Session;
pub use types::{NewVersion, VersionUpdate};
