//! `search`: list issues matching a JQL query.

use clap::Args;
use tracing::info;

use super::session::{close_session, open_session};
use crate::api::types::SearchResult;
use crate::api::ApiError;
use crate::config::EffectiveConfiguration;
use crate::error::Result;

const DEFAULT_FIELDS: &[&str] = &["summary"];

#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// JQL query, e.g. "project = OPS AND status = Open"
    pub jql: String,

    /// Index of the first issue to return
    #[arg(long, default_value_t = 0)]
    pub start_at: u32,

    /// Maximum number of issues to return
    #[arg(long, default_value_t = 50)]
    pub max_results: u32,

    /// Fields to fetch (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,
}

impl SearchArgs {
    fn requested_fields(&self) -> Vec<String> {
        if self.fields.is_empty() {
            DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()
        } else {
            self.fields.clone()
        }
    }
}

/// Run `search`. Returns whether the search succeeded.
pub async fn search(args: &SearchArgs, config: &EffectiveConfiguration) -> Result<bool> {
    let client = open_session(config).await?;
    let result = client
        .search(
            &args.jql,
            args.start_at,
            args.max_results,
            &args.requested_fields(),
        )
        .await;
    close_session(client).await;
    let result = result?;

    if result.is_error() {
        result.log_errors(Some("Search failed!"));
        return Ok(false);
    }

    let found: SearchResult = result.parse().map_err(ApiError::from)?;
    for issue in &found.issues {
        info!("{}: {}", issue.key, issue.summary());
    }
    info!(
        "Showing {} of {} issues starting at {}",
        found.issues.len(),
        found.total,
        found.start_at
    );
    Ok(true)
}
