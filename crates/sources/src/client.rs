use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::record::Record;
use crate::report::ErrorReporter;

/// Which of the three upstream APIs a fetch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Drug,
    Disease,
    Target,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Drug, Role::Disease, Role::Target];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Drug => "drug",
            Role::Disease => "disease",
            Role::Target => "target",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("response is not valid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("unexpected JSON shape: {0}")]
    UnexpectedShape(String),
}

/// Result of one labelled fetch. A failure still reads as zero records.
#[derive(Debug)]
pub enum FetchOutcome {
    Records(Vec<Record>),
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn records(&self) -> &[Record] {
        match self {
            FetchOutcome::Records(records) => records,
            FetchOutcome::Failed(_) => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchOutcome::Failed(e) => Some(e),
            FetchOutcome::Records(_) => None,
        }
    }
}

#[derive(Clone, Default)]
pub struct ApiClient {
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// GET `url` and return its records.
    pub async fn fetch_records(&self, url: &str) -> Result<Vec<Record>, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;

        records_from_value(value)
    }

    /// Labelled fetch. Failures go to `reporter` and yield no records.
    pub async fn fetch(&self, role: Role, url: &str, reporter: &dyn ErrorReporter) -> FetchOutcome {
        match self.fetch_records(url).await {
            Ok(records) => {
                tracing::info!(role = %role, url, records = records.len(), "Fetched records");
                FetchOutcome::Records(records)
            }
            Err(e) => {
                tracing::warn!(role = %role, url, error = %e, "Fetch failed");
                reporter.report(&format!("Error fetching {} data: {}", role, e));
                FetchOutcome::Failed(e)
            }
        }
    }
}

/// An array of objects is the expected payload. A lone object counts as one record.
fn records_from_value(value: Value) -> Result<Vec<Record>, FetchError> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(fields) => Ok(Record::new(fields)),
                other => Err(FetchError::UnexpectedShape(format!(
                    "element {} is {}, expected an object",
                    idx,
                    json_kind(&other)
                ))),
            })
            .collect(),
        Value::Object(fields) => Ok(vec![Record::new(fields)]),
        other => Err(FetchError::UnexpectedShape(format!(
            "root is {}, expected an array of objects",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::CollectingReporter;
    use axum::{http::StatusCode, routing::get, Json, Router};
    use serde_json::json;

    async fn spawn_upstream() -> String {
        let app = Router::new()
            .route("/drugs", get(|| async { Json(json!([{"id": "d1"}, {"id": "d2", "name": "x"}])) }))
            .route("/single", get(|| async { Json(json!({"id": "c1"})) }))
            .route("/empty", get(|| async { Json(json!([])) }))
            .route("/scalar", get(|| async { Json(json!(3)) }))
            .route("/mixed", get(|| async { Json(json!([{"id": "a"}, "b"])) }))
            .route("/garbage", get(|| async { "<html>oops</html>" }))
            .route("/fail", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_fetch_array() {
        let base = spawn_upstream().await;
        let records = ApiClient::default()
            .fetch_records(&format!("{}/drugs", base))
            .await
            .unwrap();

        let ids: Vec<String> = records.iter().map(Record::id).collect();
        assert_eq!(ids, vec!["d1", "d2"]);
    }

    #[tokio::test]
    async fn test_object_root_is_single_record() {
        let base = spawn_upstream().await;
        let records = ApiClient::default()
            .fetch_records(&format!("{}/single", base))
            .await
            .unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "c1");
    }

    #[tokio::test]
    async fn test_bad_shapes_rejected() {
        let base = spawn_upstream().await;
        let client = ApiClient::default();

        let scalar = client.fetch_records(&format!("{}/scalar", base)).await;
        assert!(matches!(scalar, Err(FetchError::UnexpectedShape(_))));

        let mixed = client.fetch_records(&format!("{}/mixed", base)).await;
        assert!(matches!(mixed, Err(FetchError::UnexpectedShape(_))));

        let garbage = client.fetch_records(&format!("{}/garbage", base)).await;
        assert!(matches!(garbage, Err(FetchError::MalformedJson(_))));
    }

    #[tokio::test]
    async fn test_server_error_reported_once() {
        let base = spawn_upstream().await;
        let reporter = CollectingReporter::new();

        let outcome = ApiClient::default()
            .fetch(Role::Drug, &format!("{}/fail", base), &reporter)
            .await;

        assert!(outcome.is_empty());
        assert!(matches!(outcome.error(), Some(FetchError::Status(s)) if s.as_u16() == 500));

        let messages = reporter.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Error fetching drug data:"));
    }

    #[tokio::test]
    async fn test_empty_response_is_not_a_failure() {
        let base = spawn_upstream().await;
        let reporter = CollectingReporter::new();

        let outcome = ApiClient::default()
            .fetch(Role::Target, &format!("{}/empty", base), &reporter)
            .await;

        assert!(outcome.is_empty());
        assert!(outcome.error().is_none());
        assert!(reporter.is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let reporter = CollectingReporter::new();
        let outcome = ApiClient::default()
            .fetch(Role::Disease, &format!("http://{}/diseases", addr), &reporter)
            .await;

        assert!(matches!(outcome.error(), Some(FetchError::Transport(_))));
        assert!(reporter.messages()[0].starts_with("Error fetching disease data:"));
    }
}
