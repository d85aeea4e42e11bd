//! Configuration and session glue shared by all commands.

use tracing::warn;

use super::ConnectionArgs;
use crate::api::JiraClient;
use crate::config::{ConfigResolver, EffectiveConfiguration};
use crate::error::Result;
use crate::logging::{component_span, LogHandle};

/// Resolve the effective configuration for a command.
///
/// Switches logging to debug when requested by file or flag. Fails before
/// any request is made when connection settings are missing.
pub fn resolve_configuration(
    args: &ConnectionArgs,
    log: &LogHandle,
) -> Result<(ConfigResolver, EffectiveConfiguration)> {
    let mut resolver = ConfigResolver::new(component_span("config"));
    resolver.load()?;
    resolver.apply_command_line_overrides(&args.overrides());

    if resolver.debug() {
        if let Err(e) = log.set_debug(true) {
            warn!("Could not enable debug logging: {}", e);
        }
    }

    let config = resolver.validate()?;
    Ok((resolver, config))
}

/// Log in. A rejected login is fatal for the command.
pub async fn open_session(config: &EffectiveConfiguration) -> Result<JiraClient> {
    Ok(JiraClient::connect(config, component_span("api")).await?)
}

/// Log out. Failures are logged and otherwise ignored.
pub async fn close_session(client: JiraClient) {
    if let Err(e) = client.logout().await {
        warn!("Error during logging out: {}", e);
    }
}
