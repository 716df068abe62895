//! The Todoist client and its shared request/response handling.
//!
//! # Design
//! `Todoist` holds the bearer token, the base URL and a `Transport`, and
//! nothing else. It never changes after construction, so sharing one client
//! between callers only requires a `Sync` transport.
//!
//! Each call goes through the same three steps: `build` produces an
//! `HttpRequest` as plain data, the transport executes it, and `interpret`
//! decides whether the response is a payload, an empty success, or an error.
//! Operation modules (`projects`, `sections`, `tasks`) only choose the path,
//! the verb, the query and the body, then reshape the returned payload.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, TodoistError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Query, Transport, UreqTransport};
use crate::projects::Projects;
use crate::sections::Sections;
use crate::tasks::Tasks;

const NO_CONTENT: u16 = 204;

/// Client for the Todoist REST API.
///
/// ```no_run
/// use todoist_core::{Config, Todoist};
///
/// let todoist = Todoist::new(Config::new("0123456789abcdef"))?;
/// let project = todoist.projects().get_project_by_id("2203306141")?;
/// println!("{}", project.name);
/// # Ok::<(), todoist_core::TodoistError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Todoist<T = UreqTransport> {
    api: ApiClient<T>,
}

impl Todoist<UreqTransport> {
    /// Build a client that talks to the API over `ureq`.
    pub fn new(config: Config) -> Result<Self> {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T> Todoist<T> {
    /// Build a client that sends every request through `transport`.
    pub fn with_transport(config: Config, transport: T) -> Result<Self> {
        let token = config.token()?.to_string();
        Ok(Self {
            api: ApiClient {
                base_url: config.resolved_base_url(),
                token,
                transport,
            },
        })
    }

    pub fn projects(&self) -> Projects<'_, T> {
        Projects::new(&self.api)
    }

    pub fn sections(&self) -> Sections<'_, T> {
        Sections::new(&self.api)
    }

    pub fn tasks(&self) -> Tasks<'_, T> {
        Tasks::new(&self.api)
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }
}

#[derive(Clone)]
pub(crate) struct ApiClient<T> {
    base_url: String,
    token: String,
    transport: T,
}

impl<T> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl<T> ApiClient<T> {
    pub(crate) fn build(
        &self,
        method: HttpMethod,
        path: &str,
        query: &Query,
        body: Option<String>,
    ) -> HttpRequest {
        let mut url = format!("{}{path}", self.base_url);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.encode());
        }
        HttpRequest {
            method,
            url,
            headers: vec![
                ("Authorization".to_string(), format!("Bearer {}", self.token)),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body,
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub(crate) fn get(&self, path: &str, query: &Query) -> Result<Option<Value>> {
        self.execute(self.build(HttpMethod::Get, path, query, None))
    }

    pub(crate) fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Option<Value>> {
        let body = serde_json::to_string(body).map_err(TodoistError::call)?;
        self.execute(self.build(HttpMethod::Post, path, &Query::new(), Some(body)))
    }

    pub(crate) fn post_empty(&self, path: &str) -> Result<Option<Value>> {
        self.execute(self.build(HttpMethod::Post, path, &Query::new(), None))
    }

    pub(crate) fn delete(&self, path: &str) -> Result<Option<Value>> {
        self.execute(self.build(HttpMethod::Delete, path, &Query::new(), None))
    }

    fn execute(&self, request: HttpRequest) -> Result<Option<Value>> {
        debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.send(&request).map_err(|err| {
            warn!(url = %request.url, error = %err, "request failed");
            TodoistError::call(err)
        })?;
        debug!(status = response.status, "received response");
        interpret(response)
    }
}

/// Turn a response into its JSON payload, `None` for "No Content", or an error.
///
/// A 2xx payload that carries an `error` or `http_code` field is still a
/// rejection: the API reports some failures that way.
pub(crate) fn interpret(response: HttpResponse) -> Result<Option<Value>> {
    if response.status == NO_CONTENT {
        return Ok(None);
    }

    let payload: Value = serde_json::from_str(&response.body).map_err(|err| {
        warn!(status = response.status, error = %err, "response body is not JSON");
        TodoistError::call(err)
    })?;

    let embedded = ["error", "http_code"]
        .iter()
        .filter_map(|key| payload.get(*key))
        .find(|value| is_set(value))
        .map(message_of);

    if response.is_success() && embedded.is_none() {
        return Ok(Some(payload));
    }

    let message = embedded.unwrap_or_else(|| format!("HTTP {}", response.status));
    warn!(status = response.status, %message, "API rejected request");
    Err(TodoistError::rejected(message, response.status, payload))
}

/// Reshape a payload into a wire type. A missing payload fails the same way
/// a malformed one does.
pub(crate) fn decode<W: DeserializeOwned>(payload: Option<Value>) -> Result<W> {
    serde_json::from_value(payload.unwrap_or(Value::Null)).map_err(|err| {
        warn!(error = %err, "response does not match the expected shape");
        TodoistError::call(err)
    })
}

fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64() != Some(0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn message_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
