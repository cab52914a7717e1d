use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::category::Category;
use crate::error::{ClientError, ClientResult};
use crate::models::{ListItem, PageContent};
use crate::proxy::NotionProxy;

pub const POSTS_ENDPOINT: &str = "/api/get-notion-posts";
pub const CONTENT_ENDPOINT: &str = "/api/get-notion-content";

/// Where the page controller gets category lists and page content from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch_posts(&self, category: Category) -> ClientResult<Vec<ListItem>>;

    async fn fetch_content(&self, page_id: &str) -> ClientResult<PageContent>;
}

/// Talks to the proxy endpoints over HTTP, as the site's pages do.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Reply {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    posts: Vec<ListItem>,
    #[serde(default)]
    page: Value,
    #[serde(default)]
    blocks: Vec<Value>,
}

impl HttpSource {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> ClientResult<Reply> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, ?query, "calling site proxy");
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }
        let reply: Reply = response.json().await?;
        if !reply.success {
            return Err(ClientError::Api(
                reply.error.unwrap_or_else(|| "API response error".to_string()),
            ));
        }
        Ok(reply)
    }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch_posts(&self, category: Category) -> ClientResult<Vec<ListItem>> {
        let reply = self
            .get(POSTS_ENDPOINT, &[("type", category.as_str())])
            .await?;
        Ok(reply.posts)
    }

    async fn fetch_content(&self, page_id: &str) -> ClientResult<PageContent> {
        let reply = self.get(CONTENT_ENDPOINT, &[("pageId", page_id)]).await?;
        Ok(PageContent {
            page: reply.page,
            blocks: reply.blocks,
        })
    }
}

/// In-process source, skipping the HTTP hop.
#[async_trait]
impl ContentSource for NotionProxy {
    async fn fetch_posts(&self, category: Category) -> ClientResult<Vec<ListItem>> {
        self.get_posts(Some(category.as_str()))
            .await
            .map(|posts| posts.items)
            .map_err(|e| ClientError::Api(e.to_string()))
    }

    async fn fetch_content(&self, page_id: &str) -> ClientResult<PageContent> {
        self.get_content(Some(page_id))
            .await
            .map_err(|e| ClientError::Api(e.to_string()))
    }
}
