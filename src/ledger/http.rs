use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{LedgerClient, LedgerEntry};
use crate::errors::ledger::LedgerError;

/// JSON client for the external append-only ledger service.
///
/// Constructed once at startup from configuration and injected where
/// needed; there is no lazy global connection. All submitting calls hold
/// `submit_lock` across the full round trip: the service account is
/// nonce-sequential and concurrent submissions from one account collide.
pub struct HttpLedgerClient {
    http: reqwest::Client,
    base_url: String,
    account: String,
    submit_lock: Mutex<()>,
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    /// Client-generated id for tracing a submission through the ledger logs
    request_id: String,
    op: &'static str,
    record_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    digest: Option<&'a str>,
    from: &'a str,
}

#[derive(Deserialize)]
struct SubmitResponse {
    tx: String,
}

#[derive(Deserialize)]
struct EntryResponse {
    record_id: i32,
    digest: String,
    timestamp: i64,
    tombstoned: bool,
    owner: String,
}

#[derive(Deserialize)]
struct OwnerRecordsResponse {
    record_ids: Vec<i32>,
}

impl HttpLedgerClient {
    pub fn new(base_url: String, account: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            account,
            submit_lock: Mutex::new(()),
        }
    }

    async fn submit(
        &self,
        op: &'static str,
        record_id: i32,
        digest: Option<&str>,
    ) -> Result<String, LedgerError> {
        let _guard = self.submit_lock.lock().await;

        let body = SubmitRequest {
            request_id: Uuid::new_v4().to_string(),
            op,
            record_id,
            digest,
            from: &self.account,
        };

        let response = self
            .http
            .post(format!("{}/transactions", self.base_url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LedgerError::Rejected {
                operation: op,
                record_id,
                status: response.status().as_u16(),
            });
        }

        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::MalformedResponse(e.to_string()))?;

        Ok(submitted.tx)
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn add(&self, record_id: i32, digest: &str) -> Result<String, LedgerError> {
        self.submit("add", record_id, Some(digest)).await
    }

    async fn update(&self, record_id: i32, digest: &str) -> Result<String, LedgerError> {
        self.submit("update", record_id, Some(digest)).await
    }

    async fn delete(&self, record_id: i32) -> Result<String, LedgerError> {
        self.submit("delete", record_id, None).await
    }

    async fn get(&self, record_id: i32) -> Result<LedgerEntry, LedgerError> {
        let response = self
            .http
            .get(format!("{}/records/{}", self.base_url, record_id))
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LedgerError::NotFound(record_id));
        }

        if !response.status().is_success() {
            return Err(LedgerError::Rejected {
                operation: "get",
                record_id,
                status: response.status().as_u16(),
            });
        }

        let entry: EntryResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::MalformedResponse(e.to_string()))?;

        Ok(LedgerEntry {
            record_id: entry.record_id,
            digest: entry.digest,
            timestamp: entry.timestamp,
            tombstoned: entry.tombstoned,
            owner: entry.owner,
        })
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<i32>, LedgerError> {
        let response = self
            .http
            .get(format!("{}/accounts/{}/records", self.base_url, owner))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LedgerError::Transport(format!(
                "listing records for {} returned status {}",
                owner,
                response.status()
            )));
        }

        let listed: OwnerRecordsResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::MalformedResponse(e.to_string()))?;

        Ok(listed.record_ids)
    }
}

impl fmt::Debug for HttpLedgerClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpLedgerClient")
            .field("base_url", &self.base_url)
            .field("account", &self.account)
            .finish()
    }
}
