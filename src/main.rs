//! jiracli - command-line client for the JIRA REST API.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use jiracli::commands::{self, Cli};
use jiracli::logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log = match logging::init() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let code = match commands::run(cli, &log).await {
        Ok(code) => code,
        Err(err) if err.is_usage_error() => {
            Cli::command()
                .error(ErrorKind::MissingRequiredArgument, err.user_message())
                .exit();
        }
        Err(err) => {
            tracing::error!("{}", err.user_message());
            tracing::debug!("{:?}", err);
            if let Some(action) = err.suggested_action() {
                tracing::info!("{}", action);
            }
            ExitCode::FAILURE
        }
    };

    logging::shutdown();
    code
}
