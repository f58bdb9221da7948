//! reqwest client implementing the remote document-store contract.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;

use pocketledger_core::errors::RemoteError;
use pocketledger_core::stores::RemoteStore;
use pocketledger_core::sync::Document;

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_LOG_BODY_CHARS: usize = 512;

fn truncate_body(body: &str) -> String {
    let mut preview = body.chars().take(MAX_LOG_BODY_CHARS).collect::<String>();
    if body.chars().count() > MAX_LOG_BODY_CHARS {
        preview.push_str("...");
    }
    preview
}

fn log_response(status: StatusCode, body: &str) {
    if status.is_success() {
        debug!("API response status: {}", status);
        return;
    }
    debug!("API response error ({}): {}", status, truncate_body(body));
}

fn transport_error(err: reqwest::Error) -> RemoteError {
    RemoteError::Transport(err.to_string())
}

/// One owner-scoped remote collection over the REST document API.
#[derive(Debug, Clone)]
pub struct HttpRemoteStore {
    client: reqwest::Client,
    base_url: String,
    collection: String,
    token: String,
}

impl HttpRemoteStore {
    /// Create a store for one collection.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the cloud API (e.g., "https://api.pocketledger.app")
    /// * `collection` - Collection name, e.g. "transactions"
    /// * `token` - Bearer token scoping requests to the signed-in owner
    pub fn new(base_url: &str, collection: &str, token: &str) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            collection: collection.to_string(),
            token: token.to_string(),
        })
    }

    fn headers(&self) -> Result<HeaderMap, RemoteError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let bearer = format!("Bearer {}", self.token);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|_| RemoteError::api(400, "token is not a valid header value"))?,
        );
        Ok(headers)
    }

    fn collection_url(&self, owner_id: &str) -> String {
        format!(
            "{}/owners/{}/{}",
            self.base_url,
            urlencoding::encode(owner_id),
            urlencoding::encode(&self.collection)
        )
    }

    fn document_url(&self, owner_id: &str, key: &str) -> String {
        format!("{}/{}", self.collection_url(owner_id), urlencoding::encode(key))
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<&Document>,
    ) -> Result<String, RemoteError> {
        debug!("{} {}", method, url);
        let mut request = self.client.request(method, url).headers(self.headers()?);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        log_response(status, &text);

        if !status.is_success() {
            return Err(RemoteError::api(status.as_u16(), truncate_body(&text)));
        }
        Ok(text)
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn upsert(
        &self,
        owner_id: &str,
        key: &str,
        document: Document,
    ) -> Result<(), RemoteError> {
        self.send(Method::PUT, self.document_url(owner_id, key), Some(&document))
            .await?;
        Ok(())
    }

    async fn update_fields(
        &self,
        owner_id: &str,
        key: &str,
        fields: Document,
    ) -> Result<(), RemoteError> {
        self.send(Method::PATCH, self.document_url(owner_id, key), Some(&fields))
            .await?;
        Ok(())
    }

    async fn delete(&self, owner_id: &str, key: &str) -> Result<(), RemoteError> {
        match self
            .send(Method::DELETE, self.document_url(owner_id, key), None)
            .await
        {
            Ok(_) => Ok(()),
            // Deleting an absent document is success for the engine.
            Err(RemoteError::Api { status: 404, .. }) => Ok(()),
            Err(err) => Err(err),
        }
    }

    async fn fetch_all(&self, owner_id: &str) -> Result<Vec<Document>, RemoteError> {
        let body = self
            .send(Method::GET, self.collection_url(owner_id), None)
            .await?;
        let parsed: Value = serde_json::from_str(&body)
            .map_err(|err| RemoteError::InvalidDocument(err.to_string()))?;
        let items = parsed
            .as_array()
            .ok_or_else(|| RemoteError::InvalidDocument("expected a JSON array".to_string()))?;

        // Non-object entries are dropped here; per-document mapping issues
        // are the pull pass's concern.
        Ok(items
            .iter()
            .filter_map(|item| item.as_object().cloned())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HttpRemoteStore {
        HttpRemoteStore::new("https://api.pocketledger.app/", "budgets", "tok").expect("client")
    }

    #[test]
    fn urls_are_owner_scoped_and_escaped() {
        let store = store();
        assert_eq!(
            store.collection_url("acct-1"),
            "https://api.pocketledger.app/owners/acct-1/budgets"
        );
        assert_eq!(
            store.document_url("acct-1", "Eating Out_3_2024"),
            "https://api.pocketledger.app/owners/acct-1/budgets/Eating%20Out_3_2024"
        );
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let store = store();
        assert!(!store.base_url.ends_with('/'));
    }

    #[test]
    fn long_error_bodies_are_truncated_for_logs() {
        let body = "x".repeat(MAX_LOG_BODY_CHARS + 10);
        let preview = truncate_body(&body);
        assert_eq!(preview.chars().count(), MAX_LOG_BODY_CHARS + 3);
        assert!(preview.ends_with("..."));
    }
}
