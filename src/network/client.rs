//! Spreadsheet gateway - the four CRUD calls against the remote endpoint

use std::time::{Duration, Instant};

use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Serialize;

use crate::models::Row;

/// Errors returned by [`SheetClient`]
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    /// Short message for the status line
    pub fn summary(&self) -> String {
        match self {
            GatewayError::Transport(e) if e.is_timeout() => String::from("request timed out"),
            GatewayError::Transport(e) if e.is_connect() => String::from("connection failed"),
            GatewayError::Status { status, .. } => format!("server returned {}", status),
            other => other.to_string(),
        }
    }
}

#[derive(Serialize)]
struct CreatePayload<'a> {
    data: [&'a Row; 1],
}

#[derive(Serialize)]
struct UpdatePayload<'a> {
    data: &'a Row,
}

/// HTTP client bound to one spreadsheet endpoint
#[derive(Clone, Debug)]
pub struct SheetClient {
    client: reqwest::Client,
    base: Url,
}

impl SheetClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let base = Url::parse(endpoint).map_err(|e| GatewayError::InvalidUrl(format!("{}: {}", endpoint, e)))?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(endpoint.to_string()));
        }
        Ok(SheetClient {
            client: create_client(timeout),
            base,
        })
    }

    /// `{base}/ID/{key}` with the key percent-encoded as one segment
    pub fn row_url(&self, key: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("ID").push(key);
        }
        url
    }

    /// GET the full row collection
    pub async fn list_rows(&self) -> Result<Vec<Row>, GatewayError> {
        let started = Instant::now();
        let resp = self
            .client
            .get(self.base.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let body = check_status(resp).await?;
        let rows: Vec<Row> = serde_json::from_str(&body)?;
        tracing::debug!(count = rows.len(), elapsed_ms = started.elapsed().as_millis() as u64, "Rows fetched");
        Ok(rows)
    }

    /// POST `{"data": [row]}`
    pub async fn create_row(&self, row: &Row) -> Result<serde_json::Value, GatewayError> {
        let resp = self
            .client
            .post(self.base.clone())
            .header(ACCEPT, "application/json")
            .json(&CreatePayload { data: [row] })
            .send()
            .await?;
        parse_ack(resp).await
    }

    /// PATCH `{"data": row}` to the row addressed by `key`
    pub async fn update_row(&self, key: &str, row: &Row) -> Result<serde_json::Value, GatewayError> {
        let resp = self
            .client
            .patch(self.row_url(key))
            .header(ACCEPT, "application/json")
            .json(&UpdatePayload { data: row })
            .send()
            .await?;
        parse_ack(resp).await
    }

    /// DELETE the row addressed by `key`
    pub async fn delete_row(&self, key: &str) -> Result<serde_json::Value, GatewayError> {
        let resp = self
            .client
            .delete(self.row_url(key))
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        parse_ack(resp).await
    }
}

/// Read the body, turning non-2xx statuses into errors
async fn check_status(resp: reqwest::Response) -> Result<String, GatewayError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

/// Mutation responses are only checked for being JSON
async fn parse_ack(resp: reqwest::Response) -> Result<serde_json::Value, GatewayError> {
    let body = check_status(resp).await?;
    Ok(serde_json::from_str(&body)?)
}

/// Create an HTTP client with the given timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
