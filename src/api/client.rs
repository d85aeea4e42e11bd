//! JIRA API client implementation.
//!
//! The client owns one authenticated session. It is only obtainable through
//! a successful login and is consumed by [`JiraClient::logout`], so calls
//! on an unauthenticated or closed session cannot be written.
//!
//! Every call issues exactly one request and wraps the response in an
//! [`OperationResult`]. Nothing is retried; transport and JSON decoding
//! failures are returned as errors for the caller to propagate.

use std::borrow::Cow;
use std::path::Path;

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn, Instrument, Span};

use super::error::{ApiError, Result};
use super::result::OperationResult;
use super::session::Session;
use super::types::{
    find_transition_id, new_issue_body, ComponentRequest, FilterUpdate, IssueLinkRequest, Keyed,
    LoginRequest, MoveVersionRequest, Named, NewVersion, SearchRequest, TransitionId,
    TransitionList, TransitionRef, TransitionRequest, VersionUpdate, UNKNOWN_TRANSITION_ID,
};
use crate::config::{ApiVersion, EffectiveConfiguration, FieldMap};

const JSON_CONTENT_TYPE: &str = "application/json";

/// An authenticated JIRA REST session.
#[derive(Debug)]
pub struct JiraClient {
    /// The HTTP client; its cookie store holds the session cookies.
    client: Client,
    /// Base address and sub-API prefixes.
    session: Session,
    /// Every log event of the client is emitted inside this span.
    span: Span,
}

impl JiraClient {
    /// Log in with the credentials of a validated configuration.
    pub async fn connect(config: &EffectiveConfiguration, span: Span) -> Result<Self> {
        Self::login(
            &config.address,
            config.api_version,
            &config.username,
            config.password.expose(),
            span,
        )
        .await
    }

    /// Open a session by posting the credentials to the session resource.
    ///
    /// The cookies returned by the server are attached to every later call.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Authentication` when the server answers with a
    /// status of 300 or above; the server's error messages are logged first.
    /// Transport and decoding failures are returned as-is.
    pub async fn login(
        base_url: &str,
        version: ApiVersion,
        username: &str,
        password: &str,
        span: Span,
    ) -> Result<Self> {
        let login_span = span.clone();
        async move {
            let client = build_http_client()?;
            let session = Session::new(base_url, version);

            let url = session.auth_url("/session");
            debug!("LOGIN");
            debug!("Request: ({}) {}", Method::POST, url);

            let body = serde_json::to_string(&LoginRequest { username, password })?;
            let response = client
                .post(&url)
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body)
                .send()
                .await?;

            let result = read_result(response).await?;

            if result.is_error() {
                result.log_errors(Some("Error during login!"));
                return Err(ApiError::Authentication {
                    status: result.status_code(),
                });
            }

            debug!("Login successful");
            Ok(Self {
                client,
                session,
                span,
            })
        }
        .instrument(login_span)
        .await
    }

    /// Close the session.
    ///
    /// Returns the status of the `DELETE` on the session resource. A status
    /// other than 204 is logged as a warning but is not an error.
    pub async fn logout(self) -> Result<u16> {
        let span = self.span.clone();
        async move {
            debug!("LOGOUT");
            let request = self.client.delete(self.session.auth_url("/session"));
            let status = request.send().await?.status().as_u16();

            if status == 204 {
                debug!("Logout successful!");
            } else {
                warn!("Error during logging out (status {})!", status);
            }
            Ok(status)
        }
        .instrument(span)
        .await
    }

    // ---- issues ----

    /// Create an issue.
    ///
    /// `additional_fields` extend the required project, summary and type
    /// and may override them.
    pub async fn create_issue(
        &self,
        project: &str,
        summary: &str,
        issue_type: &str,
        additional_fields: &FieldMap,
    ) -> Result<OperationResult> {
        self.in_span(|| debug!("CREATE_ISSUE"));
        let body = new_issue_body(project, summary, issue_type, additional_fields);
        self.api_post("/issue/", Some(body)).await
    }

    /// Link two issues with the named link type.
    pub async fn create_issue_link(
        &self,
        link_type: &str,
        from_issue_key: &str,
        to_issue_key: &str,
    ) -> Result<OperationResult> {
        let body = to_body(&IssueLinkRequest {
            link_type: Named { name: link_type },
            inward_issue: Keyed { key: from_issue_key },
            outward_issue: Keyed { key: to_issue_key },
        })?;
        self.api_post("/issueLink", Some(body)).await
    }

    pub async fn get_issue_info(&self, issue_key: &str) -> Result<OperationResult> {
        self.api_get(&format!("/issue/{}", issue_key)).await
    }

    /// List the transitions currently available on an issue.
    pub async fn get_issue_transitions(&self, issue_key: &str) -> Result<OperationResult> {
        self.api_get(&format!("/issue/{}/transitions", issue_key))
            .await
    }

    /// Move an issue into the status named `status`.
    ///
    /// Looks up the available transitions and picks the one whose target
    /// status name equals `status` exactly. When none matches, the request
    /// is still sent with id `-1` and the server's rejection is returned.
    pub async fn transition_issue_by_name(
        &self,
        issue_key: &str,
        status: &str,
    ) -> Result<OperationResult> {
        let transitions = self.get_issue_transitions(issue_key).await?;
        self.in_span(|| debug!("Trying to find possible transition to {}...", status));

        let list: TransitionList = if transitions.is_success() {
            transitions.parse()?
        } else {
            TransitionList::default()
        };

        let transition_id = match find_transition_id(&list.transitions, status) {
            Some(id) => {
                self.in_span(|| info!("Found transition {}.", id));
                TransitionId::Found(id)
            }
            None => {
                self.in_span(|| {
                    warn!(
                        "No transition of {} leads to {}; sending it to the server anyway",
                        issue_key, status
                    )
                });
                UNKNOWN_TRANSITION_ID
            }
        };

        self.send_transition(issue_key, transition_id).await
    }

    /// Perform the transition with the given id.
    pub async fn transition_issue_by_id(
        &self,
        issue_key: &str,
        transition_id: &str,
    ) -> Result<OperationResult> {
        self.send_transition(issue_key, TransitionId::Found(transition_id))
            .await
    }

    async fn send_transition(
        &self,
        issue_key: &str,
        transition_id: TransitionId<'_>,
    ) -> Result<OperationResult> {
        self.in_span(|| debug!("Trying to transition to {}...", transition_id));
        let path = format!("/issue/{}/transitions?{}", issue_key, transition_id);
        let body = to_body(&TransitionRequest {
            transition: TransitionRef { id: transition_id },
        })?;
        self.api_post(&path, Some(body)).await
    }

    pub async fn get_issue_votes(&self, issue_key: &str) -> Result<OperationResult> {
        self.api_get(&format!("/issue/{}/votes", issue_key)).await
    }

    pub async fn cast_issue_vote(&self, issue_key: &str) -> Result<OperationResult> {
        self.api_post(&format!("/issue/{}/votes", issue_key), None)
            .await
    }

    pub async fn remove_issue_vote(&self, issue_key: &str) -> Result<OperationResult> {
        self.api_delete(&format!("/issue/{}/votes", issue_key))
            .await
    }

    pub async fn get_issue_watchers(&self, issue_key: &str) -> Result<OperationResult> {
        self.api_get(&format!("/issue/{}/watchers", issue_key))
            .await
    }

    /// Add a watcher; without a user name the session user is added.
    pub async fn add_issue_watcher(
        &self,
        issue_key: &str,
        username: Option<&str>,
    ) -> Result<OperationResult> {
        let body = username.map(|name| Value::String(name.to_string()));
        self.api_post(&format!("/issue/{}/watchers", issue_key), body)
            .await
    }

    pub async fn remove_issue_watcher(
        &self,
        issue_key: &str,
        username: &str,
    ) -> Result<OperationResult> {
        let path = format!(
            "/issue/{}/watchers?username={}",
            issue_key,
            encode(username)
        );
        self.api_delete(&path).await
    }

    /// Upload a file as an attachment of an issue.
    pub async fn add_issue_attachment(
        &self,
        issue_key: &str,
        file: &Path,
    ) -> Result<OperationResult> {
        let bytes = tokio::fs::read(file).await?;
        let file_name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let url = self
            .session
            .api_url(&format!("/issue/{}/attachments", issue_key));

        async {
            debug!("Request: ({}) {} [multipart]", Method::POST, url);
            let request = self
                .client
                .post(&url)
                .header("X-Atlassian-Token", "no-check")
                .multipart(form);
            let response = request.send().await?;
            read_result(response).await
        }
        .instrument(self.span.clone())
        .await
    }

    // ---- session user and server ----

    /// Information about the logged-in user, from the session resource.
    pub async fn current_user(&self) -> Result<OperationResult> {
        let url = self.session.auth_url("/session");
        self.perform(Method::GET, url, None).await
    }

    pub async fn get_user(&self, username: &str) -> Result<OperationResult> {
        self.api_get(&format!("/user?username={}", encode(username)))
            .await
    }

    pub async fn get_server_info(&self) -> Result<OperationResult> {
        self.api_get("/serverInfo").await
    }

    // ---- versions ----

    /// Create a project version.
    pub async fn create_project_version(&self, version: &NewVersion) -> Result<OperationResult> {
        self.api_post("/version", Some(to_body(version)?)).await
    }

    pub async fn get_project_version(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/version/{}", id)).await
    }

    pub async fn modify_project_version(
        &self,
        id: &str,
        update: &VersionUpdate,
    ) -> Result<OperationResult> {
        self.api_put(&format!("/version/{}", id), to_body(update)?)
            .await
    }

    /// Delete a version, moving its fixed and affected issues elsewhere.
    ///
    /// Empty destinations leave the issues without a version.
    pub async fn remove_project_version(
        &self,
        id: &str,
        move_fixed_to: &str,
        move_affected_to: &str,
    ) -> Result<OperationResult> {
        let path = format!(
            "/version/{}?moveFixIssuesTo={}&moveAffectedIssuesTo={}",
            id,
            encode(move_fixed_to),
            encode(move_affected_to)
        );
        self.api_delete(&path).await
    }

    pub async fn get_project_version_related_issue_count(
        &self,
        id: &str,
    ) -> Result<OperationResult> {
        self.api_get(&format!("/version/{}/relatedIssueCounts", id))
            .await
    }

    pub async fn get_project_version_unresolved_issue_count(
        &self,
        id: &str,
    ) -> Result<OperationResult> {
        self.api_get(&format!("/version/{}/unresolvedIssueCount", id))
            .await
    }

    /// Move a version; `position` is one of `First`, `Last`, `Earlier`, `Later`.
    pub async fn move_project_version(&self, id: &str, position: &str) -> Result<OperationResult> {
        let body = to_body(&MoveVersionRequest { position })?;
        self.api_post(&format!("/version/{}/move", id), Some(body))
            .await
    }

    // ---- components ----

    pub async fn create_component(
        &self,
        project: &str,
        name: &str,
        description: &str,
    ) -> Result<OperationResult> {
        let body = to_body(&ComponentRequest {
            project,
            name,
            description,
        })?;
        self.api_post("/component", Some(body)).await
    }

    pub async fn get_component(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/component/{}", id)).await
    }

    pub async fn modify_component(
        &self,
        id: &str,
        project: &str,
        name: &str,
        description: &str,
    ) -> Result<OperationResult> {
        let body = to_body(&ComponentRequest {
            project,
            name,
            description,
        })?;
        self.api_put(&format!("/component/{}", id), body).await
    }

    pub async fn delete_component(&self, id: &str, move_issues_to: &str) -> Result<OperationResult> {
        let path = format!("/component/{}?moveIssuesTo={}", id, encode(move_issues_to));
        self.api_delete(&path).await
    }

    pub async fn get_component_related_issue_count(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/component/{}/relatedIssueCounts", id))
            .await
    }

    // ---- projects ----

    pub async fn get_projects(&self) -> Result<OperationResult> {
        self.api_get("/project").await
    }

    pub async fn get_project(&self, key: &str) -> Result<OperationResult> {
        self.api_get(&format!("/project/{}", key)).await
    }

    pub async fn get_project_versions(&self, key: &str) -> Result<OperationResult> {
        self.api_get(&format!("/project/{}/versions", key)).await
    }

    pub async fn get_project_components(&self, key: &str) -> Result<OperationResult> {
        self.api_get(&format!("/project/{}/components", key))
            .await
    }

    pub async fn get_project_role(&self, project_key: &str, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/project/{}/role/{}", project_key, id))
            .await
    }

    // ---- search and filters ----

    /// Search issues with JQL.
    pub async fn search(
        &self,
        jql: &str,
        start_at: u32,
        max_results: u32,
        fields: &[String],
    ) -> Result<OperationResult> {
        let body = to_body(&SearchRequest {
            jql,
            start_at,
            max_results,
            fields,
        })?;
        self.api_post("/search", Some(body)).await
    }

    pub async fn update_filter(&self, id: &str, jql: &str) -> Result<OperationResult> {
        let body = to_body(&FilterUpdate { jql })?;
        self.api_put(&format!("/filter/{}", id), body).await
    }

    // ---- metadata lookups ----

    pub async fn get_comment(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/comment/{}", id)).await
    }

    pub async fn get_status(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/status/{}", id)).await
    }

    pub async fn get_issue_link_types(&self) -> Result<OperationResult> {
        self.api_get("/issueLinkType").await
    }

    pub async fn get_issue_link_type(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/issueLinkType/{}", id)).await
    }

    pub async fn get_custom_field_option(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/customFieldOption/{}", id)).await
    }

    pub async fn get_resolution(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/resolution/{}", id)).await
    }

    pub async fn get_issue_type(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/issueType/{}", id)).await
    }

    pub async fn get_attachment(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/attachment/{}", id)).await
    }

    pub async fn get_priority(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/priority/{}", id)).await
    }

    pub async fn get_worklog(&self, id: &str) -> Result<OperationResult> {
        self.api_get(&format!("/worklog/{}", id)).await
    }

    /// All system and custom fields known to the server.
    pub async fn get_all_fields(&self) -> Result<OperationResult> {
        self.api_get("/field").await
    }

    // ---- plumbing ----

    async fn api_get(&self, path: &str) -> Result<OperationResult> {
        self.perform(Method::GET, self.session.api_url(path), None)
            .await
    }

    async fn api_post(&self, path: &str, body: Option<Value>) -> Result<OperationResult> {
        self.perform(Method::POST, self.session.api_url(path), body)
            .await
    }

    async fn api_put(&self, path: &str, body: Value) -> Result<OperationResult> {
        self.perform(Method::PUT, self.session.api_url(path), Some(body))
            .await
    }

    async fn api_delete(&self, path: &str) -> Result<OperationResult> {
        self.perform(Method::DELETE, self.session.api_url(path), None)
            .await
    }

    /// Send one JSON request within the session.
    ///
    /// A missing body is sent as `{}`.
    async fn perform(
        &self,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> Result<OperationResult> {
        let body = body.unwrap_or_else(|| Value::Object(Map::new()));
        async {
            debug!("Request: ({}) {}", method, url);
            debug!("JSON parameter: {}", body);

            let request = self
                .client
                .request(method, &url)
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .body(body.to_string());
            let response = request.send().await?;
            read_result(response).await
        }
        .instrument(self.span.clone())
        .await
    }

    fn in_span<F: FnOnce()>(&self, f: F) {
        self.span.in_scope(f)
    }
}

/// Build the HTTP client with a cookie store for the session cookies.
/// No timeout is configured.
fn build_http_client() -> Result<Client> {
    Client::builder()
        .cookie_store(true)
        .build()
        .map_err(ApiError::Network)
}

/// Read the status and body of a response into an `OperationResult`.
async fn read_result(response: Response) -> Result<OperationResult> {
    let status = response.status().as_u16();
    let text = response.text().await?;
    debug!("Status code: {}", status);
    debug!("JSON result: {}", text);
    Ok(OperationResult::from_text(status, &text)?)
}

fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

fn encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
