//! jiracli - command-line tools for the JIRA REST API
//!
//! Creates issues and versions, transitions issues and searches with JQL,
//! using one authenticated session per invocation.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
