//! End-to-end flows against an in-process mock JIRA server.

use jiracli::api::{ApiError, JiraClient, VersionUpdate};
use jiracli::commands::{create_issue, create_version, CreateIssueArgs, CreateVersionArgs};
use jiracli::config::{
    ApiVersion, ConfigResolver, CustomFieldMapping, EffectiveConfiguration, FieldMap, Secret,
};
use jiracli::error::AppError;
use serde_json::json;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio_test::{assert_err, assert_ok};
use tracing::subscriber::DefaultGuard;
use tracing::Span;
use wiremock::matchers::{any, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SESSION_COOKIE: &str = "JSESSIONID=abc123";

/// In-memory log output of the current test thread.
#[derive(Clone, Default)]
struct LogSink(Arc<Mutex<Vec<u8>>>);

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogSink {
    /// Route this thread's events into the sink until the guard drops.
    fn install(&self) -> DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

fn config_for(server: &MockServer) -> EffectiveConfiguration {
    EffectiveConfiguration {
        address: server.uri(),
        username: "alice".to_string(),
        password: Secret::new("secret"),
        api_version: ApiVersion::V5,
        custom_fields: CustomFieldMapping::default(),
        debug: false,
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/rest/auth/1/session"))
        .and(body_json(json!({"username": "alice", "password": "secret"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "JSESSIONID=abc123; Path=/; HttpOnly")
                .set_body_json(json!({"session": {"name": "JSESSIONID", "value": "abc123"}})),
        )
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_logout(server: &MockServer, expected_calls: u64) {
    Mock::given(method("DELETE"))
        .and(path("/rest/auth/1/session"))
        .respond_with(ResponseTemplate::new(204))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn connect(server: &MockServer) -> JiraClient {
    assert_ok!(JiraClient::connect(&config_for(server), Span::none()).await)
}

fn issue_args(project: &str, summary: &str) -> CreateIssueArgs {
    CreateIssueArgs {
        project: project.to_string(),
        summary: summary.to_string(),
        issue_type: "Bug".to_string(),
        ..CreateIssueArgs::default()
    }
}

#[tokio::test]
async fn test_session_cookie_is_attached_to_api_calls() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/serverInfo"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "5.2"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_logout(&server, 1).await;

    let client = connect(&server).await;
    let info = assert_ok!(client.get_server_info().await);
    assert!(info.is_success());
    assert_eq!(info.get_str("version"), Some("5.2"));

    let status = assert_ok!(client.logout().await);
    assert_eq!(status, 204);
}

#[tokio::test]
async fn test_failed_login_prevents_any_further_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/auth/1/session"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errorMessages": ["Login failed"],
            "errors": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let resolver = ConfigResolver::new(Span::none());
    let result = create_issue(&issue_args("OPS", "Disk full"), &resolver, &config_for(&server)).await;

    let err = assert_err!(result);
    assert!(matches!(
        err,
        AppError::Api(ApiError::Authentication { status: 401 })
    ));
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn test_create_issue_minimal() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue/"))
        .and(header("cookie", SESSION_COOKIE))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "fields": {"project": {"key": "OPS"}, "summary": "Disk full", "issuetype": {"name": "Bug"}}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"key": "OPS-42"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/rest/api/2/issue/OPS-42/transitions"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_logout(&server, 1).await;

    let sink = LogSink::default();
    let _guard = sink.install();
    let resolver = ConfigResolver::new(Span::none());
    let created = create_issue(&issue_args("OPS", "Disk full"), &resolver, &config_for(&server)).await;

    assert!(assert_ok!(created));
    let logs = sink.contents();
    assert!(logs.contains("Issue created: OPS-42."), "{}", logs);
    assert!(!logs.contains("Trying to move ticket"));
}

#[tokio::test]
async fn test_create_issue_failure_still_logs_out() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorMessages": [],
            "errors": {"project": "project is required"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_logout(&server, 1).await;

    let resolver = ConfigResolver::new(Span::none());
    let created = create_issue(&issue_args("NOPE", "x"), &resolver, &config_for(&server)).await;

    assert!(!assert_ok!(created));
}

#[tokio::test]
async fn test_create_issue_then_transition_by_target_status() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "10042", "key": "OPS-42"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/OPS-42/transitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transitions": [
                {"id": "11", "name": "Closed", "to": {"name": "Done"}},
                {"id": "21", "name": "Finish", "to": {"name": "Closed"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue/OPS-42/transitions"))
        .and(body_json(json!({"transition": {"id": "21"}})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    mount_logout(&server, 1).await;

    let mut args = issue_args("OPS", "Disk full");
    args.transition_to = Some("Closed".to_string());
    let resolver = ConfigResolver::new(Span::none());

    assert!(assert_ok!(create_issue(&args, &resolver, &config_for(&server)).await));

    let requests = server.received_requests().await.unwrap();
    let transition_post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST" && r.url.path().ends_with("/transitions"))
        .unwrap();
    assert_eq!(transition_post.url.query(), Some("21"));
}

#[tokio::test]
async fn test_failed_transition_does_not_fail_creation() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"key": "OPS-43"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/OPS-43/transitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"transitions": []})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue/OPS-43/transitions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorMessages": ["It seems that you have tried to perform an illegal workflow operation."],
            "errors": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_logout(&server, 1).await;

    let mut args = issue_args("OPS", "Disk full");
    args.transition_to = Some("Nowhere".to_string());
    let resolver = ConfigResolver::new(Span::none());

    assert!(assert_ok!(create_issue(&args, &resolver, &config_for(&server)).await));
}

#[tokio::test]
async fn test_unmatched_transition_is_passed_to_server_with_sentinel() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/OPS-1/transitions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transitions": [{"id": "11", "name": "Done", "to": {"name": "Resolved"}}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue/OPS-1/transitions"))
        .and(body_json(json!({"transition": {"id": -1}})))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorMessages": ["Transition id '-1' is not valid for this issue."]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    // "Done" is the transition's label, not its target status.
    let result = assert_ok!(client.transition_issue_by_name("OPS-1", "Done").await);

    assert!(result.is_error());
    assert_eq!(
        result.error_lines(),
        vec!["Transition id '-1' is not valid for this issue.".to_string()]
    );

    let requests = server.received_requests().await.unwrap();
    let post = requests
        .iter()
        .find(|r| r.method.as_str() == "POST" && r.url.path().ends_with("/transitions"))
        .unwrap();
    assert_eq!(post.url.query(), Some("-1"));
}

#[tokio::test]
async fn test_create_version_minimal_body() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/version"))
        .and(body_json(json!({
            "name": "1.2",
            "project": "OPS",
            "released": "false",
            "archived": "false"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "10100", "name": "1.2"})))
        .expect(1)
        .mount(&server)
        .await;
    mount_logout(&server, 1).await;

    let args = CreateVersionArgs {
        project: "OPS".to_string(),
        version_name: "1.2".to_string(),
        ..CreateVersionArgs::default()
    };

    assert!(assert_ok!(create_version(&args, &config_for(&server)).await));
}

#[tokio::test]
async fn test_create_version_rejected() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/version"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errorMessages": ["Version could not be created"],
            "errors": {"name": "A version with this name already exists in this project."}
        })))
        .mount(&server)
        .await;
    mount_logout(&server, 1).await;

    let args = CreateVersionArgs {
        project: "OPS".to_string(),
        version_name: "1.2".to_string(),
        description: Some("Dup".to_string()),
        release_date: None,
    };

    let sink = LogSink::default();
    let _guard = sink.install();
    assert!(!assert_ok!(create_version(&args, &config_for(&server)).await));

    let logs = sink.contents();
    let context = logs.find("Error while trying to create version!").unwrap();
    let message = logs.find("Version could not be created").unwrap();
    let field = logs
        .find("name: A version with this name already exists in this project.")
        .unwrap();
    assert!(context < message && message < field, "{}", logs);
    assert!(!logs.contains("was successful"));
}

#[tokio::test]
async fn test_empty_body_yields_absent_value() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue/OPS-1/votes"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let result = assert_ok!(client.cast_issue_vote("OPS-1").await);
    assert!(result.is_success());
    assert!(result.body().is_none());
}

#[tokio::test]
async fn test_non_json_body_is_fatal() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/issue/OPS-1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad gateway</html>"))
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let err = assert_err!(client.get_issue_info("OPS-1").await);
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_logout_failure_status_is_returned() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/rest/auth/1/session"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let sink = LogSink::default();
    let _guard = sink.install();
    assert_eq!(assert_ok!(client.logout().await), 401);

    let logs = sink.contents();
    assert!(logs.contains("WARN"), "{}", logs);
    assert!(logs.contains("Error during logging out (status 401)!"));
    assert!(!logs.contains("Logout successful!"));
}

#[tokio::test]
async fn test_logout_success_is_logged_at_debug() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_logout(&server, 1).await;

    let client = connect(&server).await;
    let sink = LogSink::default();
    let _guard = sink.install();
    assert_eq!(assert_ok!(client.logout().await), 204);

    let logs = sink.contents();
    assert!(logs.contains("DEBUG"), "{}", logs);
    assert!(logs.contains("Logout successful!"));
    assert!(!logs.contains("WARN"));
}

#[tokio::test]
async fn test_renewed_session_cookie_replaces_the_old_one() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/serverInfo"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "JSESSIONID=renewed; Path=/")
                .set_body_json(json!({"version": "5.2"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/project"))
        .and(header("cookie", "JSESSIONID=renewed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    assert!(assert_ok!(client.get_server_info().await).is_success());
    assert!(assert_ok!(client.get_projects().await).is_success());
}

#[tokio::test]
async fn test_v4_4_uses_alpha_prefix() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2.0.alpha1/project"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"key": "OPS"}])))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.api_version = ApiVersion::V4_4;
    let client = assert_ok!(JiraClient::connect(&config, Span::none()).await);

    let projects = assert_ok!(client.get_projects().await);
    assert_eq!(projects.body(), Some(&json!([{"key": "OPS"}])));
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/rest/api/2/issue/OPS-1/watchers"))
        .and(query_param("username", "john doe"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/rest/api/2/version/10100"))
        .and(query_param("moveFixIssuesTo", "10101"))
        .and(query_param("moveAffectedIssuesTo", ""))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    assert!(assert_ok!(client.remove_issue_watcher("OPS-1", "john doe").await).is_success());
    assert!(assert_ok!(client.remove_project_version("10100", "10101", "").await).is_success());
}

#[tokio::test]
async fn test_search_and_version_update_bodies() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/search"))
        .and(body_json(json!({
            "jql": "project = OPS",
            "startAt": 0,
            "maxResults": 10,
            "fields": ["summary"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 0, "total": 1, "issues": [{"key": "OPS-7", "fields": {"summary": "Broken"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/rest/api/2/version/10100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "10100"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = connect(&server).await;
    let found = assert_ok!(client.search("project = OPS", 0, 10, &["summary".to_string()]).await);
    assert!(found.is_success());

    let update = VersionUpdate {
        released: Some(true),
        ..VersionUpdate::default()
    };
    assert!(assert_ok!(client.modify_project_version("10100", &update).await).is_success());

    let requests = server.received_requests().await.unwrap();
    let put = requests.iter().find(|r| r.method.as_str() == "PUT").unwrap();
    let body: serde_json::Value = serde_json::from_slice(&put.body).unwrap();
    assert_eq!(body["released"], true);
    assert!(body["name"].is_null());
}

#[tokio::test]
async fn test_custom_fields_reach_the_request() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue/"))
        .and(body_json(json!({
            "fields": {
                "project": {"key": "OPS"},
                "summary": "Disk full",
                "issuetype": {"name": "Task"},
                "customfield_10344": {"value": "alice"}
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"key": "OPS-44"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut extra = FieldMap::new();
    let mapping = CustomFieldMapping::from_entries([
        ("devkey.fieldname", "customfield_10344"),
        ("devkey.fieldsubname", "value"),
        ("devkey.type", "additionalHash"),
    ]);
    assert_ok!(mapping.apply("devkey", "alice", &mut extra));

    let client = connect(&server).await;
    let result = assert_ok!(client.create_issue("OPS", "Disk full", "Task", &extra).await);
    assert_eq!(result.get_str("key"), Some("OPS-44"));
}

#[tokio::test]
async fn test_attachment_upload() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/api/2/issue/OPS-1/attachments"))
        .and(header("x-atlassian-token", "no-check"))
        .and(header("cookie", SESSION_COOKIE))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"filename": "log.txt"}])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("log.txt");
    std::fs::write(&file, "disk full at 03:00").unwrap();

    let client = connect(&server).await;
    let result = assert_ok!(client.add_issue_attachment("OPS-1", &file).await);
    assert!(result.is_success());

    let missing = client
        .add_issue_attachment("OPS-1", &dir.path().join("absent.txt"))
        .await;
    assert!(matches!(missing, Err(ApiError::Io(_))));
}

#[tokio::test]
async fn test_lookup_operations_hit_expected_resources() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = connect(&server).await;
    assert_ok!(client.current_user().await);
    assert_ok!(client.get_user("john doe").await);
    assert_ok!(client.get_issue_votes("OPS-1").await);
    assert_ok!(client.remove_issue_vote("OPS-1").await);
    assert_ok!(client.get_issue_watchers("OPS-1").await);
    assert_ok!(client.add_issue_watcher("OPS-1", Some("bob")).await);
    assert_ok!(client.create_issue_link("Blocks", "OPS-1", "OPS-2").await);
    assert_ok!(client.get_project_version("10100").await);
    assert_ok!(client.get_project_version_related_issue_count("10100").await);
    assert_ok!(client.get_project_version_unresolved_issue_count("10100").await);
    assert_ok!(client.move_project_version("10100", "First").await);
    assert_ok!(client.create_component("OPS", "storage", "Disks").await);
    assert_ok!(client.get_component("10200").await);
    assert_ok!(client.modify_component("10200", "OPS", "storage", "Disks and tapes").await);
    assert_ok!(client.delete_component("10200", "10201").await);
    assert_ok!(client.get_component_related_issue_count("10200").await);
    assert_ok!(client.get_project("OPS").await);
    assert_ok!(client.get_project_versions("OPS").await);
    assert_ok!(client.get_project_components("OPS").await);
    assert_ok!(client.get_project_role("OPS", "10002").await);
    assert_ok!(client.update_filter("10300", "project = OPS").await);
    assert_ok!(client.get_comment("1").await);
    assert_ok!(client.get_status("1").await);
    assert_ok!(client.get_issue_link_types().await);
    assert_ok!(client.get_issue_link_type("1").await);
    assert_ok!(client.get_custom_field_option("1").await);
    assert_ok!(client.get_resolution("1").await);
    assert_ok!(client.get_issue_type("1").await);
    assert_ok!(client.get_attachment("1").await);
    assert_ok!(client.get_priority("1").await);
    assert_ok!(client.get_worklog("1").await);
    assert_ok!(client.get_all_fields().await);

    let requests = server.received_requests().await.unwrap();
    let seen: Vec<String> = requests
        .iter()
        .skip(1)
        .map(|r| match r.url.query() {
            Some(query) => format!("{} {}?{}", r.method, r.url.path(), query),
            None => format!("{} {}", r.method, r.url.path()),
        })
        .collect();

    let api = "/rest/api/2";
    let expected: Vec<String> = vec![
        "GET /rest/auth/1/session".to_string(),
        format!("GET {}/user?username=john%20doe", api),
        format!("GET {}/issue/OPS-1/votes", api),
        format!("DELETE {}/issue/OPS-1/votes", api),
        format!("GET {}/issue/OPS-1/watchers", api),
        format!("POST {}/issue/OPS-1/watchers", api),
        format!("POST {}/issueLink", api),
        format!("GET {}/version/10100", api),
        format!("GET {}/version/10100/relatedIssueCounts", api),
        format!("GET {}/version/10100/unresolvedIssueCount", api),
        format!("POST {}/version/10100/move", api),
        format!("POST {}/component", api),
        format!("GET {}/component/10200", api),
        format!("PUT {}/component/10200", api),
        format!("DELETE {}/component/10200?moveIssuesTo=10201", api),
        format!("GET {}/component/10200/relatedIssueCounts", api),
        format!("GET {}/project/OPS", api),
        format!("GET {}/project/OPS/versions", api),
        format!("GET {}/project/OPS/components", api),
        format!("GET {}/project/OPS/role/10002", api),
        format!("PUT {}/filter/10300", api),
        format!("GET {}/comment/1", api),
        format!("GET {}/status/1", api),
        format!("GET {}/issueLinkType", api),
        format!("GET {}/issueLinkType/1", api),
        format!("GET {}/customFieldOption/1", api),
        format!("GET {}/resolution/1", api),
        format!("GET {}/issueType/1", api),
        format!("GET {}/attachment/1", api),
        format!("GET {}/priority/1", api),
        format!("GET {}/worklog/1", api),
        format!("GET {}/field", api),
    ];
    assert_eq!(seen, expected);

    let body = |index: usize| -> serde_json::Value {
        serde_json::from_slice(&requests[index + 1].body).unwrap()
    };
    assert_eq!(body(5), json!("bob"));
    assert_eq!(
        body(6),
        json!({"type": {"name": "Blocks"}, "inwardIssue": {"key": "OPS-1"}, "outwardIssue": {"key": "OPS-2"}})
    );
    assert_eq!(body(10), json!({"position": "First"}));
    assert_eq!(
        body(13),
        json!({"project": "OPS", "name": "storage", "description": "Disks and tapes"})
    );
}
