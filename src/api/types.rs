//! JIRA REST request and response types.
//!
//! Request bodies are modelled as serde structs so the wire shape is
//! visible in one place; responses are only typed where the client
//! itself needs to look inside them.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::config::FieldMap;

/// Body of `POST /rest/auth/1/session`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Build the body of `POST /issue/`.
///
/// `extra` may override or extend the three required fields but cannot
/// remove them.
pub fn new_issue_body(project: &str, summary: &str, issue_type: &str, extra: &FieldMap) -> Value {
    let mut fields = Map::new();
    fields.insert("project".to_string(), serde_json::json!({ "key": project }));
    fields.insert("summary".to_string(), Value::String(summary.to_string()));
    fields.insert("issuetype".to_string(), serde_json::json!({ "name": issue_type }));
    for (name, value) in extra {
        fields.insert(name.clone(), value.clone());
    }
    serde_json::json!({ "fields": Value::Object(fields) })
}

/// Response of a successful issue creation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedIssue {
    #[serde(default)]
    pub id: Option<String>,
    /// The issue key (e.g. "PROJ-123").
    pub key: String,
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

/// Target status of a transition.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionTarget {
    pub name: String,
}

/// One workflow transition available on an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    pub id: String,
    /// The transition's own label, e.g. "Resolve Issue".
    #[serde(default)]
    pub name: Option<String>,
    /// The status the issue ends up in.
    pub to: TransitionTarget,
}

/// Response of `GET /issue/{key}/transitions`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransitionList {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

/// Id of the transition to perform.
///
/// Ids found on the server are strings; when nothing matched, the number
/// `-1` is sent instead and the server's rejection is passed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TransitionId<'a> {
    Found(&'a str),
    Unmatched(i32),
}

/// Transition id sent when no transition matched the requested status.
pub const UNKNOWN_TRANSITION_ID: TransitionId<'static> = TransitionId::Unmatched(-1);

impl fmt::Display for TransitionId<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionId::Found(id) => f.write_str(id),
            TransitionId::Unmatched(id) => write!(f, "{}", id),
        }
    }
}

/// Find the id of the transition whose target status is exactly `status`.
pub fn find_transition_id<'a>(transitions: &'a [Transition], status: &str) -> Option<&'a str> {
    transitions
        .iter()
        .find(|t| t.to.name == status)
        .map(|t| t.id.as_str())
}

#[derive(Debug, Serialize)]
pub struct TransitionRef<'a> {
    pub id: TransitionId<'a>,
}

/// Body of `POST /issue/{key}/transitions`.
#[derive(Debug, Serialize)]
pub struct TransitionRequest<'a> {
    pub transition: TransitionRef<'a>,
}

#[derive(Debug, Serialize)]
pub struct Named<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Keyed<'a> {
    pub key: &'a str,
}

/// Body of `POST /issueLink`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLinkRequest<'a> {
    #[serde(rename = "type")]
    pub link_type: Named<'a>,
    pub inward_issue: Keyed<'a>,
    pub outward_issue: Keyed<'a>,
}

/// A new project version.
///
/// Optional members are only sent when set; `released` and `archived`
/// are always sent, as the strings `"true"`/`"false"`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewVersion {
    pub name: String,
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(serialize_with = "bool_as_string")]
    pub released: bool,
    #[serde(serialize_with = "bool_as_string")]
    pub archived: bool,
}

impl NewVersion {
    pub fn new(name: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
            ..Self::default()
        }
    }

    /// Set the description; empty strings are ignored.
    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = non_empty(description);
        self
    }

    /// Set the planned release date; empty strings are ignored.
    pub fn release_date(mut self, date: Option<&str>) -> Self {
        self.release_date = non_empty(date);
        self
    }

    /// Set the release date in the user's date format; empty strings are ignored.
    pub fn user_release_date(mut self, date: Option<&str>) -> Self {
        self.user_release_date = non_empty(date);
        self
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn bool_as_string<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *value { "true" } else { "false" })
}

/// Body of `PUT /version/{id}`. Every member is sent, `null` when unset.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionUpdate {
    pub description: Option<String>,
    pub name: Option<String>,
    pub overdue: Option<bool>,
    pub user_release_date: Option<String>,
    pub release_date: Option<String>,
    pub released: Option<bool>,
    pub archived: Option<bool>,
}

/// Body of `POST /version/{id}/move`.
#[derive(Debug, Serialize)]
pub struct MoveVersionRequest<'a> {
    pub position: &'a str,
}

/// Body of `POST /component` and `PUT /component/{id}`.
#[derive(Debug, Serialize)]
pub struct ComponentRequest<'a> {
    pub project: &'a str,
    pub name: &'a str,
    pub description: &'a str,
}

/// Body of `POST /search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub jql: &'a str,
    pub start_at: u32,
    pub max_results: u32,
    pub fields: &'a [String],
}

/// Body of `PUT /filter/{id}`.
#[derive(Debug, Serialize)]
pub struct FilterUpdate<'a> {
    pub jql: &'a str,
}

/// One issue of a search response; only the key and summary are read.
#[derive(Debug, Clone, Deserialize)]
pub struct FoundIssue {
    pub key: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl FoundIssue {
    pub fn summary(&self) -> &str {
        self.fields
            .get("summary")
            .and_then(Value::as_str)
            .unwrap_or("")
    }
}

/// Response of `POST /search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub start_at: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub issues: Vec<FoundIssue>,
}
