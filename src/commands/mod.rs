//! Command-line surface.
//!
//! Every sub-command follows the same sequence: resolve configuration,
//! log in, run its requests, log out. The exit status reflects whether the
//! command's primary request succeeded.

mod create_issue;
mod create_version;
mod search;
mod session;
mod transition;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use crate::config::{ApiVersion, ConfigOverrides};
use crate::error::Result;
use crate::logging::LogHandle;

pub use create_issue::{additional_fields, create_issue, CreateIssueArgs};
pub use create_version::{create_version, new_version, CreateVersionArgs};
pub use search::{search, SearchArgs};
pub use session::{close_session, open_session, resolve_configuration};
pub use transition::{transition, TransitionArgs};

/// Command-line client for the JIRA REST API.
#[derive(Debug, Parser)]
#[command(name = "jiracli", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// Base address of Jira instance
    #[arg(short = 'a', long, global = true)]
    pub address: Option<String>,

    /// User name for Jira
    #[arg(short = 'u', long, global = true)]
    pub username: Option<String>,

    /// Password for Jira
    #[arg(short = 'p', long, global = true)]
    pub password: Option<String>,

    /// Use debug mode for logging
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// JIRA REST schema version (4.4 or 5)
    #[arg(long, global = true)]
    pub api_version: Option<ApiVersion>,
}

impl ConnectionArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            address: self.address.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            debug: self.debug,
            api_version: self.api_version,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an issue, optionally moving it to another status
    CreateIssue(CreateIssueArgs),
    /// Create a version in a project
    CreateVersion(CreateVersionArgs),
    /// Move an issue to the status with the given name
    Transition(TransitionArgs),
    /// Search issues with JQL
    Search(SearchArgs),
}

/// Run the parsed command line.
///
/// Commands report whether their primary request succeeded; errors are
/// configuration, login, transport or decoding failures.
pub async fn run(cli: Cli, log: &LogHandle) -> Result<ExitCode> {
    let (resolver, config) = resolve_configuration(&cli.connection, log)?;

    let success = match cli.command {
        Command::CreateIssue(args) => create_issue(&args, &resolver, &config).await?,
        Command::CreateVersion(args) => create_version(&args, &config).await?,
        Command::Transition(args) => transition(&args, &config).await?,
        Command::Search(args) => search(&args, &config).await?,
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
