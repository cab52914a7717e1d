use chrono::FixedOffset;
use serde_json::Value;

use super::{escape_html, format_date, render_blocks};
use crate::category::{Category, ListShape};
use crate::models::{ListItem, PageContent};
use crate::normalize::page_title;

pub const DEFAULT_COVER: &str = "images/default-cover.jpg";
pub const EMPTY_POSTS: &str = "게시물이 없습니다.";
pub const EMPTY_SCHEDULE: &str = "예정된 일정이 없습니다.";

/// Where a rendered item points when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLink {
    /// The item's Notion page, in a new tab.
    External,
    /// The category's own page with `?id=<item id>`.
    CategoryPage,
    /// Handled on the current page; the anchor carries `data-id`.
    InPlace,
}

impl ItemLink {
    pub fn href(self, category: Category, item: &ListItem) -> String {
        match self {
            Self::External if item.page_url.is_empty() => "#".to_string(),
            Self::External => item.page_url.clone(),
            Self::CategoryPage => format!("{}?id={}", category.page_path(), item.id),
            Self::InPlace => "#".to_string(),
        }
    }

    fn attrs(self, category: Category, item: &ListItem) -> String {
        let href = escape_html(&self.href(category, item));
        match self {
            Self::External => format!(r#"href="{href}" target="_blank" rel="noopener noreferrer""#),
            Self::CategoryPage => format!(r#"href="{href}""#),
            Self::InPlace => format!(r#"href="{href}" data-id="{}""#, escape_html(&item.id)),
        }
    }
}

/// Dates in the bulleted and schedule shapes are shown in `offset`.
pub fn render_items(
    shape: ListShape,
    category: Category,
    items: &[ListItem],
    link: ItemLink,
    offset: FixedOffset,
) -> String {
    match shape {
        ListShape::Gallery => gallery_html(category, items, link),
        ListShape::MiniGallery => mini_gallery_html(category, items, link),
        ListShape::Bulleted => list_html(category, items, link, offset),
        ListShape::Schedule => schedule_html(category, items, link, offset),
    }
}

pub fn gallery_html(category: Category, items: &[ListItem], link: ItemLink) -> String {
    if items.is_empty() {
        return empty_html(EMPTY_POSTS);
    }
    items
        .iter()
        .map(|item| {
            let title = escape_html(&item.title);
            format!(
                r#"<figure class="notion-gallery-item"><a {}><img src="{}" alt="{title}" loading="lazy"><figcaption>{title}</figcaption></a></figure>"#,
                link.attrs(category, item),
                escape_html(cover(item)),
            )
        })
        .collect()
}

pub fn mini_gallery_html(category: Category, items: &[ListItem], link: ItemLink) -> String {
    if items.is_empty() {
        return empty_html(EMPTY_POSTS);
    }
    let cells: String = items
        .iter()
        .map(|item| {
            let title = escape_html(&item.title);
            format!(
                r#"<a {} class="mini-gallery-item"><img src="{}" alt="{title}" loading="lazy"><span>{title}</span></a>"#,
                link.attrs(category, item),
                escape_html(cover(item)),
            )
        })
        .collect();
    format!(r#"<div class="notion-mini-gallery">{cells}</div>"#)
}

pub fn list_html(category: Category, items: &[ListItem], link: ItemLink, offset: FixedOffset) -> String {
    if items.is_empty() {
        return empty_html(EMPTY_POSTS);
    }
    let rows: String = items
        .iter()
        .map(|item| {
            format!(
                r#"<li class="notion-list-item"><a {}><span class="list-title">{}</span><span class="list-date">{}</span></a></li>"#,
                link.attrs(category, item),
                escape_html(&item.title),
                format_date(&item.created_time, offset),
            )
        })
        .collect();
    format!(r#"<ul class="notion-list">{rows}</ul>"#)
}

pub fn schedule_html(
    category: Category,
    items: &[ListItem],
    link: ItemLink,
    offset: FixedOffset,
) -> String {
    if items.is_empty() {
        return empty_html(EMPTY_SCHEDULE);
    }
    let rows: String = items
        .iter()
        .map(|item| {
            let date = item.schedule_date.as_deref().unwrap_or(&item.created_time);
            format!(
                r#"<li class="notion-schedule-item"><a {}><span class="schedule-date">{}</span><span class="schedule-title">{}</span></a></li>"#,
                link.attrs(category, item),
                format_date(date, offset),
                escape_html(&item.title),
            )
        })
        .collect();
    format!(r#"<ul class="notion-schedule">{rows}</ul>"#)
}

pub fn loading_html() -> String {
    r#"<div class="notion-loading"><div class="spinner"></div><p>불러오는 중...</p></div>"#.to_string()
}

pub fn error_html(message: &str) -> String {
    format!(
        r#"<div class="notion-error"><p>⚠️ 불러오기 실패</p><p class="error-details">{}</p></div>"#,
        escape_html(message)
    )
}

/// Single item view: title, creation date and the rendered page body.
pub fn detail_html(content: &PageContent, offset: FixedOffset) -> String {
    let title = escape_html(&page_title(&content.page));
    let date = content
        .page
        .get("created_time")
        .and_then(Value::as_str)
        .map(|created| format_date(created, offset))
        .unwrap_or_default();
    format!(
        r#"<article class="notion-detail"><button type="button" class="notion-back" data-action="back">← 목록으로</button><h1 class="notion-detail-title">{title}</h1><p class="notion-detail-date">{date}</p><div class="notion-content">{}</div></article>"#,
        render_blocks(&content.blocks)
    )
}

fn cover(item: &ListItem) -> &str {
    item.cover_url.as_deref().unwrap_or(DEFAULT_COVER)
}

fn empty_html(message: &str) -> String {
    format!(r#"<p class="empty-message">{message}</p>"#)
}
