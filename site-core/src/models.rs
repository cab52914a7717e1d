use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A Notion database page reduced to what list views need.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: String,
    pub title: String,
    pub cover_url: Option<String>,
    pub created_time: String,
    pub page_url: String,
    pub schedule_date: Option<String>,
}

/// Page metadata and its top-level blocks, both passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageContent {
    pub page: Value,
    pub blocks: Vec<Value>,
}

/// Items of one category as returned by the list proxy.
#[derive(Debug, Clone, PartialEq)]
pub struct Posts {
    pub category: crate::Category,
    pub items: Vec<ListItem>,
}
