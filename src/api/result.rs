//! Uniform result of a JIRA API call.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::error;

/// Status code and parsed body of one server call.
///
/// Success is purely status based: anything below 300 is a success.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    status: u16,
    body: Option<Value>,
}

impl OperationResult {
    /// Create a result from an already parsed body.
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    /// Create a result from a raw response body.
    ///
    /// An empty body yields no parsed value; a non-empty body must be JSON.
    pub fn from_text(status: u16, text: &str) -> serde_json::Result<Self> {
        let body = if text.is_empty() {
            None
        } else {
            Some(serde_json::from_str(text)?)
        };
        Ok(Self { status, body })
    }

    /// The HTTP status code.
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// The parsed body, if the response had one.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.status < 300
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    /// Deserialize the body into a typed value.
    ///
    /// An absent body is treated as JSON `null`.
    pub fn parse<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(self.body.as_ref().unwrap_or(&Value::Null))
    }

    /// A top-level string member of the body.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.body.as_ref()?.get(key)?.as_str()
    }

    /// The structured error payload of the body.
    ///
    /// Missing or oddly shaped keys yield an empty payload, never an error.
    pub fn error_payload(&self) -> ErrorPayload {
        self.body
            .as_ref()
            .and_then(|body| ErrorPayload::deserialize(body).ok())
            .unwrap_or_default()
    }

    /// Error lines to show the operator: top-level messages first, then
    /// `field: message` pairs.
    pub fn error_lines(&self) -> Vec<String> {
        let payload = self.error_payload();
        let mut lines: Vec<String> = payload.error_messages.unwrap_or_default();
        if let Some(errors) = payload.errors {
            lines.extend(
                errors
                    .iter()
                    .map(|(field, message)| format!("{}: {}", field, render(message))),
            );
        }
        lines
    }

    /// Log `context` and every error line at error level.
    pub fn log_errors(&self, context: Option<&str>) {
        if let Some(msg) = context {
            error!(status = self.status, "{}", msg);
        }
        for line in self.error_lines() {
            error!("{}", line);
        }
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Some(body) => write!(f, "<{}> <{}>", self.status, body),
            None => write!(f, "<{}> <none>", self.status),
        }
    }
}

/// Error body returned by JIRA on failed calls.
///
/// Both members are optional; JIRA omits them freely.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    #[serde(default)]
    pub error_messages: Option<Vec<String>>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Value>>,
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
