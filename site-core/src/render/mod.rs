//! HTML markup for Notion blocks and category item lists.

mod blocks;
mod lists;
mod rich_text;
mod video;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

pub use blocks::{
    merge_adjacent_lists, render_block, render_blocks, DEFAULT_CALLOUT_ICON, TABLE_UNSUPPORTED,
};
pub use lists::{
    detail_html, error_html, gallery_html, list_html, loading_html, mini_gallery_html,
    render_items, schedule_html, ItemLink, DEFAULT_COVER, EMPTY_POSTS, EMPTY_SCHEDULE,
};
pub use rich_text::{plain_text, render_rich_text, Span, StyledRun};
pub use video::{vimeo_id, youtube_id, VideoSource};

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Offset in which dates are shown when none is configured (KST).
pub const DEFAULT_DISPLAY_OFFSET_HOURS: i32 = 9;

/// Fixed offset `hours` east of UTC; out-of-range values fall back to UTC.
pub fn display_offset(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix())
}

/// `YYYY.MM.DD` of a timestamp as seen in `offset`. Bare dates are kept as written.
pub fn format_date(value: &str, offset: FixedOffset) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.with_timezone(&offset).format("%Y.%m.%d").to_string();
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|d| d.format("%Y.%m.%d").to_string())
        .unwrap_or_default()
}
