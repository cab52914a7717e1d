//! Reduction of Notion page objects to [`ListItem`]s.
//!
//! Cover images are resolved by trying an ordered list of pure strategies.
//! The album-only child-block fallback needs a network call and lives in the
//! proxy; it reuses [`first_image_in_blocks`] from here.

use serde_json::Value;
use url::Url;

use crate::category::Category;
use crate::models::ListItem;

/// Title used when a page has no title text.
pub const UNTITLED: &str = "제목 없음";

/// Property names checked, in order, for a schedule entry's date.
pub const SCHEDULE_DATE_KEYS: [&str; 5] = ["날짜", "Date", "date", "일정", "일시"];

pub type CoverStrategy = fn(&Value) -> Option<String>;

pub const COVER_STRATEGIES: [CoverStrategy; 5] = [
    page_cover,
    files_property,
    url_property,
    text_property_url,
    page_icon,
];

pub fn to_list_item(page: &Value, category: Category) -> ListItem {
    let schedule_date = if category == Category::Schedule {
        schedule_date(page)
    } else {
        None
    };

    ListItem {
        id: str_field(page, "id"),
        title: page_title(page),
        cover_url: resolve_cover(page),
        created_time: str_field(page, "created_time"),
        page_url: str_field(page, "url"),
        schedule_date,
    }
}

pub fn page_title(page: &Value) -> String {
    properties(page)
        .find(|prop| prop.get("type").and_then(Value::as_str) == Some("title"))
        .and_then(|prop| prop.get("title"))
        .and_then(|runs| runs.get(0))
        .and_then(|run| run.get("plain_text"))
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| UNTITLED.to_string())
}

pub fn resolve_cover(page: &Value) -> Option<String> {
    COVER_STRATEGIES.iter().find_map(|strategy| strategy(page))
}

pub fn page_cover(page: &Value) -> Option<String> {
    page.get("cover").and_then(file_url)
}

pub fn files_property(page: &Value) -> Option<String> {
    properties(page)
        .filter(|prop| prop.get("type").and_then(Value::as_str) == Some("files"))
        .filter_map(|prop| prop.get("files").and_then(|files| files.get(0)))
        .find_map(file_url)
}

pub fn url_property(page: &Value) -> Option<String> {
    properties(page)
        .filter(|prop| prop.get("type").and_then(Value::as_str) == Some("url"))
        .filter_map(|prop| prop.get("url").and_then(Value::as_str))
        .find_map(http_url)
}

/// First http(s) URL written inside a rich-text property.
pub fn text_property_url(page: &Value) -> Option<String> {
    properties(page)
        .filter(|prop| prop.get("type").and_then(Value::as_str) == Some("rich_text"))
        .filter_map(|prop| prop.get("rich_text").and_then(Value::as_array))
        .flatten()
        .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
        .flat_map(str::split_whitespace)
        .find_map(http_url)
}

/// Page icon when it is an image; emoji icons are skipped.
pub fn page_icon(page: &Value) -> Option<String> {
    page.get("icon").and_then(file_url)
}

pub fn first_image_in_blocks(blocks: &[Value]) -> Option<String> {
    blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("image"))
        .find_map(|block| block.get("image").and_then(file_url))
}

pub fn schedule_date(page: &Value) -> Option<String> {
    let props = page.get("properties")?;
    SCHEDULE_DATE_KEYS
        .iter()
        .filter_map(|key| props.get(*key))
        .chain(
            properties(page).filter(|prop| prop.get("type").and_then(Value::as_str) == Some("date")),
        )
        .find_map(|prop| {
            prop.get("date")
                .and_then(|date| date.get("start"))
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
        })
}

/// URL of a Notion file object, hosted (`file`) or linked (`external`).
pub fn file_url(object: &Value) -> Option<String> {
    let kind = object.get("type").and_then(Value::as_str)?;
    match kind {
        "external" | "file" => object
            .get(kind)
            .and_then(|inner| inner.get("url"))
            .and_then(Value::as_str)
            .and_then(http_url),
        _ => None,
    }
}

fn properties(page: &Value) -> impl Iterator<Item = &Value> {
    page.get("properties")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|map| map.values())
}

/// The trimmed input when it is an absolute http(s) URL.
pub fn http_url(candidate: &str) -> Option<String> {
    url_with_scheme(candidate, &["http", "https"])
}

/// Like [`http_url`], also accepting `mailto:` links.
pub fn link_url(candidate: &str) -> Option<String> {
    url_with_scheme(candidate, &["http", "https", "mailto"])
}

fn url_with_scheme(candidate: &str, schemes: &[&str]) -> Option<String> {
    let candidate = candidate.trim();
    let parsed = Url::parse(candidate).ok()?;
    schemes
        .iter()
        .any(|scheme| *scheme == parsed.scheme())
        .then(|| candidate.to_string())
}

fn str_field(object: &Value, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
