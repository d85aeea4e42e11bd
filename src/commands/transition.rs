//! `transition`: move an existing issue to a named status.

use clap::Args;
use tracing::info;

use super::session::{close_session, open_session};
use crate::config::EffectiveConfiguration;
use crate::error::Result;

#[derive(Debug, Clone, Args)]
pub struct TransitionArgs {
    /// Issue key, e.g. OPS-42
    pub issue: String,

    /// Name of the target status, e.g. "In Progress"
    pub status: String,
}

/// Run `transition`. Returns whether the server accepted the transition.
pub async fn transition(args: &TransitionArgs, config: &EffectiveConfiguration) -> Result<bool> {
    let client = open_session(config).await?;
    info!("Trying to move ticket {} to {}...", args.issue, args.status);
    let result = client
        .transition_issue_by_name(&args.issue, &args.status)
        .await;
    close_session(client).await;
    let result = result?;

    if result.is_success() {
        info!("Transition of {} to {} successful.", args.issue, args.status);
    } else {
        result.log_errors(Some(&format!(
            "Transition of issue {} to {} failed!",
            args.issue, args.status
        )));
    }
    Ok(result.is_success())
}
