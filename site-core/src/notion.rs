use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use tracing::debug;
use url::Url;

use crate::config::NotionConfig;
use crate::error::{ProxyError, ProxyResult};

/// Thin authenticated wrapper over the Notion REST endpoints the site reads.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: Client,
    base_url: String,
    version: String,
    api_key: String,
}

impl NotionClient {
    pub fn new(http: Client, config: &NotionConfig, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            version: config.notion_version.clone(),
            api_key: api_key.into(),
        }
    }

    /// `base/segments...`, each segment percent-encoded on its own so ids
    /// cannot add path components or a query.
    fn endpoint(&self, segments: &[&str]) -> ProxyResult<Url> {
        if let Some(bad) = segments.iter().find(|s| s.is_empty() || matches!(**s, "." | "..")) {
            return Err(ProxyError::InvalidPageId((*bad).to_string()));
        }
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProxyError::InvalidBaseUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ProxyError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.api_key)
            .header("Notion-Version", &self.version)
    }

    pub async fn retrieve_page(&self, page_id: &str) -> ProxyResult<Value> {
        let url = self.endpoint(&["pages", page_id])?;
        debug!(%url, "retrieving notion page");
        let response = self.authorize(self.http.get(url)).send().await?;
        json_or_status(response).await
    }

    pub async fn list_block_children(&self, block_id: &str, page_size: u32) -> ProxyResult<Vec<Value>> {
        let url = self.endpoint(&["blocks", block_id, "children"])?;
        debug!(%url, page_size, "listing notion block children");
        let response = self
            .authorize(self.http.get(url))
            .query(&[("page_size", page_size)])
            .send()
            .await?;
        let body = json_or_status(response).await?;
        Ok(results(body))
    }

    /// Queries a database newest first.
    ///
    /// The body is parsed before the status is checked, so a non-JSON reply is
    /// reported as [`ProxyError::MalformedBody`] even when the status is an error.
    pub async fn query_database(&self, database_id: &str, page_size: u32) -> ProxyResult<Vec<Value>> {
        let url = self.endpoint(&["databases", database_id, "query"])?;
        debug!(%url, page_size, "querying notion database");
        let body = json!({
            "sorts": [{ "timestamp": "created_time", "direction": "descending" }],
            "page_size": page_size,
        });
        let response = self.authorize(self.http.post(url)).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;
        let data: Value = serde_json::from_str(&text)
            .map_err(|_| ProxyError::MalformedBody { details: text.clone() })?;

        if !status.is_success() {
            let message = data
                .get("message")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
                .unwrap_or(text);
            return Err(ProxyError::Upstream { status, message });
        }

        Ok(results(data))
    }
}

async fn json_or_status(response: Response) -> ProxyResult<Value> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ProxyError::Upstream { status, message });
    }
    Ok(response.json::<Value>().await?)
}

fn results(mut body: Value) -> Vec<Value> {
    match body.get_mut("results").map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}
