use futures_util::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::category::Category;
use crate::config::{Credentials, NotionConfig};
use crate::error::{ProxyError, ProxyResult};
use crate::models::{ListItem, PageContent, Posts};
use crate::normalize::{first_image_in_blocks, to_list_item};
use crate::notion::NotionClient;

/// Read-only bridge between the site's endpoints and the Notion API.
#[derive(Debug, Clone)]
pub struct NotionProxy {
    http: Client,
    config: NotionConfig,
    credentials: Credentials,
}

impl NotionProxy {
    pub fn new(http: Client, config: NotionConfig, credentials: Credentials) -> Self {
        Self {
            http,
            config,
            credentials,
        }
    }

    fn client(&self, api_key: &str) -> NotionClient {
        NotionClient::new(self.http.clone(), &self.config, api_key)
    }

    /// Fetches a page's metadata and its first page of child blocks.
    pub async fn get_content(&self, page_id: Option<&str>) -> ProxyResult<PageContent> {
        let page_id = page_id.map(str::trim).filter(|id| !id.is_empty());
        let (Some(api_key), Some(page_id)) = (self.credentials.api_key(), page_id) else {
            return Err(ProxyError::MissingParameters);
        };
        let client = self.client(api_key);

        let page = client
            .retrieve_page(page_id)
            .await
            .map_err(|e| retrieval_error(e, "failed to retrieve page metadata"))?;
        let blocks = client
            .list_block_children(page_id, self.config.block_page_size)
            .await
            .map_err(|e| retrieval_error(e, "failed to retrieve page blocks"))?;

        info!(page_id, blocks = blocks.len(), "notion page content fetched");
        Ok(PageContent { page, blocks })
    }

    /// Lists the newest items of a category, in upstream order.
    pub async fn get_posts(&self, token: Option<&str>) -> ProxyResult<Posts> {
        let api_key = self
            .credentials
            .api_key()
            .ok_or(ProxyError::MissingCredential)?;
        let category = match token.map(str::trim).filter(|t| !t.is_empty()) {
            None => Category::DEFAULT,
            Some(token) => Category::parse(token)
                .ok_or_else(|| ProxyError::UnknownCategory(token.to_string()))?,
        };
        let database_id = self
            .credentials
            .collection(category)
            .ok_or(ProxyError::MissingCollection(category))?;

        let client = self.client(api_key);
        let limit = self.config.limits.for_category(category);
        let pages = client.query_database(database_id, limit).await.map_err(|e| {
            error!(%category, error = %e, "notion database query failed");
            e
        })?;

        let mut items: Vec<ListItem> = pages
            .iter()
            .map(|page| to_list_item(page, category))
            .collect();
        if category == Category::Album {
            self.fill_covers_from_blocks(&client, &mut items).await;
        }

        info!(%category, count = items.len(), "notion posts fetched");
        Ok(Posts { category, items })
    }

    /// Last-resort cover lookup: first image among each item's own blocks.
    /// All scans run at once; a failed scan leaves the cover empty.
    async fn fill_covers_from_blocks(&self, client: &NotionClient, items: &mut [ListItem]) {
        let pending: Vec<(usize, String)> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.cover_url.is_none())
            .map(|(idx, item)| (idx, item.id.clone()))
            .collect();
        if pending.is_empty() {
            return;
        }

        let page_size = self.config.block_page_size;
        let scans = pending.iter().map(|(idx, id)| async move {
            (*idx, client.list_block_children(id, page_size).await)
        });

        for (idx, result) in join_all(scans).await {
            match result {
                Ok(blocks) => items[idx].cover_url = first_image_in_blocks(&blocks),
                Err(e) => warn!(page_id = %items[idx].id, error = %e, "cover scan failed"),
            }
        }
    }
}

fn retrieval_error(err: ProxyError, cause: &str) -> ProxyError {
    match err {
        ProxyError::Upstream { status, message } => {
            warn!(%status, %message, "{cause}");
            ProxyError::Retrieval(cause.to_string())
        }
        other => other,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentEnvelope {
    pub success: bool,
    pub page: Value,
    pub blocks: Vec<Value>,
}

impl From<PageContent> for ContentEnvelope {
    fn from(content: PageContent) -> Self {
        Self {
            success: true,
            page: content.page,
            blocks: content.blocks,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsEnvelope {
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: String,
    pub posts: Vec<ListItem>,
}

impl From<Posts> for PostsEnvelope {
    fn from(posts: Posts) -> Self {
        Self {
            success: true,
            kind: posts.category.as_str().to_string(),
            posts: posts.items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&ProxyError> for ErrorEnvelope {
    fn from(err: &ProxyError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
            details: err.details(),
        }
    }
}
