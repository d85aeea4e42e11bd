//! `create-issue`: create an issue and optionally transition it.

use clap::Args;
use serde_json::Value;
use tracing::{debug, error, info};

use super::session::{close_session, open_session};
use crate::api::types::CreatedIssue;
use crate::api::JiraClient;
use crate::config::{compose_nested_field, ConfigResolver, EffectiveConfiguration, FieldMap};
use crate::error::Result;

#[derive(Debug, Clone, Default, Args)]
pub struct CreateIssueArgs {
    /// Project to use
    #[arg(short = 'j', long)]
    pub project: String,

    /// Title to use
    #[arg(short = 's', long)]
    pub summary: String,

    /// Type of issue to use (e.g. "Bug", "Improvement")
    #[arg(short = 't', long = "type", default_value = "Bug")]
    pub issue_type: String,

    /// Assignee to set the issue to
    #[arg(short = 'n', long)]
    pub assignee: Option<String>,

    /// Reporter to set the issue to
    #[arg(short = 'r', long)]
    pub reporter: Option<String>,

    /// Labels to add to the issue (comma separated)
    #[arg(short = 'l', long)]
    pub labels: Option<String>,

    /// Environment to set the issue to
    #[arg(short = 'e', long)]
    pub environment: Option<String>,

    /// Fix versions to set the issue to (comma separated)
    #[arg(short = 'f', long)]
    pub fix_versions: Option<String>,

    /// Priority to set the issue to
    #[arg(short = 'o', long)]
    pub priority: Option<String>,

    /// Due date to set the issue to
    #[arg(long)]
    pub due_date: Option<String>,

    /// Description to set the issue to
    #[arg(long)]
    pub description: Option<String>,

    /// Components to set the issue to (comma separated)
    #[arg(short = 'c', long)]
    pub components: Option<String>,

    /// Original estimate to set the issue to
    #[arg(long)]
    pub original_estimate: Option<String>,

    /// Move the issue to this status after creation
    #[arg(long)]
    pub transition_to: Option<String>,

    /// Custom fields as key=value, resolved through ~/.jiracli
    #[arg(value_name = "CUSTOM_FIELDS")]
    pub custom_fields: Vec<String>,
}

/// Build the optional issue fields from the command arguments.
///
/// Custom fields go in first; malformed or unknown ones are logged and
/// skipped. Built-in options are applied afterwards.
pub fn additional_fields(args: &CreateIssueArgs, resolver: &ConfigResolver) -> FieldMap {
    let mut fields = FieldMap::new();

    for argument in &args.custom_fields {
        resolver.resolve_custom_field_argument(argument, &mut fields);
    }

    let nested = [
        ("assignee", "name", &args.assignee),
        ("reporter", "name", &args.reporter),
        ("priority", "name", &args.priority),
        ("timetracking", "originalEstimate", &args.original_estimate),
    ];
    for (field, sub_field, value) in nested {
        if let Some(value) = value {
            compose_nested_field(&mut fields, field, sub_field, value);
        }
    }

    let simple = [
        ("duedate", &args.due_date),
        ("description", &args.description),
        ("environment", &args.environment),
    ];
    for (field, value) in simple {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            fields.insert(field.to_string(), Value::String(value.to_string()));
        }
    }

    if let Some(labels) = non_empty(&args.labels) {
        let labels = labels
            .split(',')
            .map(|label| Value::String(label.to_string()))
            .collect();
        fields.insert("labels".to_string(), Value::Array(labels));
    }
    if let Some(versions) = non_empty(&args.fix_versions) {
        fields.insert("fixVersions".to_string(), named_list(versions));
    }
    if let Some(components) = non_empty(&args.components) {
        fields.insert("components".to_string(), named_list(components));
    }

    fields
}

/// Run `create-issue`. Returns whether the issue was created.
///
/// A requested transition is best effort: its failure is logged but does
/// not change the result.
pub async fn create_issue(
    args: &CreateIssueArgs,
    resolver: &ConfigResolver,
    config: &EffectiveConfiguration,
) -> Result<bool> {
    let fields = additional_fields(args, resolver);
    let options = Value::Object(fields.clone());
    debug!("Additional options: {}", options);

    let client = open_session(config).await?;
    let outcome = submit(args, &fields, &client, config).await;
    close_session(client).await;
    outcome
}

async fn submit(
    args: &CreateIssueArgs,
    fields: &FieldMap,
    client: &JiraClient,
    config: &EffectiveConfiguration,
) -> Result<bool> {
    debug!(
        "Creating issue of type \"{}\" for project \"{}\" with summary \"{}\"...",
        args.issue_type, args.project, args.summary
    );
    let result = client
        .create_issue(&args.project, &args.summary, &args.issue_type, fields)
        .await?;

    if result.is_error() {
        result.log_errors(Some("Unable to create issue!"));
        return Ok(false);
    }

    let created: CreatedIssue = result.parse().map_err(crate::api::ApiError::from)?;
    info!(url = %config.issue_url(&created.key), "Issue created: {}.", created.key);

    if let Some(status) = non_empty(&args.transition_to) {
        info!("Trying to move ticket to {}...", status);
        match client.transition_issue_by_name(&created.key, status).await {
            Ok(transition) if transition.is_success() => {
                info!("Transition of {} to {} successful.", created.key, status);
            }
            Ok(transition) => {
                transition.log_errors(Some(&format!(
                    "Transition of issue {} to {} failed!",
                    created.key, status
                )));
            }
            Err(e) => error!("Transition of issue {} to {} failed: {}", created.key, status, e),
        }
    }

    Ok(true)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn named_list(csv: &str) -> Value {
    Value::Array(
        csv.split(',')
            .map(|name| serde_json::json!({ "name": name }))
            .collect(),
    )
}
