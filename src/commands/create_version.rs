//! `create-version`: create a version in a project.

use clap::Args;
use tracing::{debug, error, info};

use super::session::{close_session, open_session};
use crate::api::NewVersion;
use crate::config::EffectiveConfiguration;
use crate::error::{AppError, Result};

#[derive(Debug, Clone, Default, Args)]
pub struct CreateVersionArgs {
    /// Project key the version belongs to
    pub project: String,

    /// Name of the new version
    pub version_name: String,

    /// Description for this version
    #[arg(short = 'e', long)]
    pub description: Option<String>,

    /// Planned release date for this version
    #[arg(short = 'r', long)]
    pub release_date: Option<String>,
}

/// Build the version to create from the command arguments.
///
/// # Errors
///
/// Returns a usage error when the project or version name is empty.
pub fn new_version(args: &CreateVersionArgs) -> Result<NewVersion> {
    if args.project.is_empty() {
        return Err(AppError::usage("Please specify a project to use!"));
    }
    if args.version_name.is_empty() {
        return Err(AppError::usage("Please specify a version name to use!"));
    }

    Ok(NewVersion::new(&args.version_name, &args.project)
        .description(args.description.as_deref())
        .release_date(args.release_date.as_deref()))
}

/// Run `create-version`. Returns whether the version was created.
pub async fn create_version(args: &CreateVersionArgs, config: &EffectiveConfiguration) -> Result<bool> {
    let version = new_version(args)?;

    let client = open_session(config).await?;
    debug!(
        "Trying to create version {} for project {} with release date {:?} and description: {:?}",
        version.name, version.project, version.release_date, version.description
    );
    let result = client.create_project_version(&version).await;
    close_session(client).await;
    let result = result?;

    if result.is_success() {
        info!(
            "Creation of version {} for {} was successful!",
            version.name, version.project
        );
        Ok(true)
    } else {
        error!("Error while trying to create version!");
        result.log_errors(None);
        Ok(false)
    }
}
