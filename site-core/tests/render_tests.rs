use serde_json::{json, Value};
use chrono::FixedOffset;
use site_core::render::{
    detail_html, display_offset, error_html, render_blocks, render_items, youtube_id, VideoSource,
    DEFAULT_CALLOUT_ICON, DEFAULT_COVER, EMPTY_SCHEDULE, TABLE_UNSUPPORTED,
};
use site_core::{Category, ItemLink, ListItem, ListShape, PageContent};

fn text_block(kind: &str, text: &str) -> Value {
    json!({
        "type": kind,
        kind: { "rich_text": [{ "type": "text", "plain_text": text, "annotations": {} }] }
    })
}

fn kst() -> FixedOffset {
    display_offset(9)
}

fn item(id: &str, title: &str) -> ListItem {
    ListItem {
        id: id.into(),
        title: title.into(),
        cover_url: None,
        created_time: "2024-10-21T07:28:00.000Z".into(),
        page_url: format!("https://www.notion.so/{id}"),
        schedule_date: None,
    }
}

#[test]
fn consecutive_bulleted_items_share_one_list() {
    let html = render_blocks(&[
        text_block("bulleted_list_item", "first"),
        text_block("bulleted_list_item", "second"),
    ]);

    assert_eq!(html, "<ul><li>first</li><li>second</li></ul>");
    assert_eq!(html.matches("<ul>").count(), 1);
    assert_eq!(html.matches("<li>").count(), 2);
}

#[test]
fn lists_of_different_kinds_stay_separate() {
    let html = render_blocks(&[
        text_block("bulleted_list_item", "a"),
        text_block("numbered_list_item", "1"),
        text_block("numbered_list_item", "2"),
        text_block("paragraph", "between"),
        text_block("bulleted_list_item", "b"),
    ]);

    assert_eq!(
        html,
        "<ul><li>a</li></ul><ol><li>1</li><li>2</li></ol><p>between</p><ul><li>b</li></ul>"
    );
}

#[test]
fn headings_quotes_and_dividers() {
    let html = render_blocks(&[
        text_block("heading_1", "H1"),
        text_block("heading_2", "H2"),
        text_block("heading_3", "H3"),
        text_block("quote", "wise"),
        json!({ "type": "divider", "divider": {} }),
    ]);

    assert_eq!(
        html,
        "<h1>H1</h1><h2>H2</h2><h3>H3</h3><blockquote>wise</blockquote><hr>"
    );
}

#[test]
fn callout_without_icon_uses_default_glyph() {
    let block = json!({
        "type": "callout",
        "callout": { "rich_text": [{ "plain_text": "Remember" }] }
    });
    let html = render_blocks(&[block]);

    assert!(html.contains(&format!(r#"<span class="notion-callout-icon">{DEFAULT_CALLOUT_ICON}</span>"#)));
    assert!(html.contains("Remember"));
}

#[test]
fn callout_with_emoji_icon_keeps_it() {
    let block = json!({
        "type": "callout",
        "callout": {
            "icon": { "type": "emoji", "emoji": "📢" },
            "rich_text": [{ "plain_text": "Heads up" }]
        }
    });
    let html = render_blocks(&[block]);

    assert!(html.contains("📢"));
    assert!(!html.contains(DEFAULT_CALLOUT_ICON));
}

#[test]
fn youtube_ids_from_query_and_path_styles() {
    assert_eq!(
        youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42").as_deref(),
        Some("dQw4w9WgXcQ")
    );
    assert_eq!(youtube_id("https://youtu.be/dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
    assert_eq!(
        youtube_id("https://youtu.be/dQw4w9WgXcQ?si=share").as_deref(),
        Some("dQw4w9WgXcQ")
    );
    assert_eq!(
        youtube_id("https://www.youtube.com/shorts/abc123XYZ_-").as_deref(),
        Some("abc123XYZ_-")
    );
    assert_eq!(youtube_id("https://example.com/watch?v=nope"), None);
}

#[test]
fn video_blocks_embed_known_hosts_and_play_others_directly() {
    let youtube = json!({
        "type": "video",
        "video": { "type": "external", "external": { "url": "https://youtu.be/dQw4w9WgXcQ" } }
    });
    let direct = json!({
        "type": "video",
        "video": { "type": "file", "file": { "url": "https://files.example/clip.mp4" } }
    });

    let html = render_blocks(&[youtube]);
    assert!(html.contains(r#"<iframe src="https://www.youtube.com/embed/dQw4w9WgXcQ""#));

    let html = render_blocks(&[direct]);
    assert!(html.contains(r#"<video src="https://files.example/clip.mp4" controls"#));

    assert_eq!(
        VideoSource::classify("https://vimeo.com/123456"),
        VideoSource::Vimeo("123456".into())
    );
}

#[test]
fn table_renders_notice_and_unknown_blocks_vanish() {
    let html = render_blocks(&[
        json!({ "type": "table", "table": { "table_width": 2 } }),
        json!({ "type": "synced_block", "synced_block": {} }),
        json!({ "no_type": true }),
    ]);

    assert_eq!(html, format!(r#"<p class="notion-unsupported">{TABLE_UNSUPPORTED}</p>"#));
}

#[test]
fn code_blocks_are_escaped() {
    let block = json!({
        "type": "code",
        "code": { "language": "rust", "rich_text": [{ "plain_text": "if a < b { x() }" }] }
    });

    assert_eq!(
        render_blocks(&[block]),
        r#"<pre class="notion-code"><code class="language-rust">if a &lt; b { x() }</code></pre>"#
    );
}

#[test]
fn image_file_pdf_and_embed_blocks() {
    let html = render_blocks(&[
        json!({ "type": "image", "image": {
            "type": "external", "external": { "url": "https://img.example/x.jpg" },
            "caption": [{ "plain_text": "Opening" }]
        }}),
        json!({ "type": "file", "file": {
            "type": "file", "file": { "url": "https://files.example/plan.hwp?sig=1" }, "caption": []
        }}),
        json!({ "type": "pdf", "pdf": { "type": "external", "external": { "url": "https://files.example/a.pdf" } } }),
        json!({ "type": "embed", "embed": { "url": "https://maps.example/embed" } }),
    ]);

    assert!(html.contains(r#"<img src="https://img.example/x.jpg" alt="Opening" loading="lazy"><figcaption>Opening</figcaption>"#));
    assert!(html.contains("📎 plan.hwp"));
    assert!(html.contains(r#"<div class="notion-pdf"><iframe src="https://files.example/a.pdf""#));
    assert!(html.contains(r#"<div class="notion-embed"><iframe src="https://maps.example/embed""#));
}

#[test]
fn rich_text_annotations_render_once_in_fixed_order() {
    let block = json!({
        "type": "paragraph",
        "paragraph": { "rich_text": [
            { "plain_text": "plain " , "annotations": {} },
            { "plain_text": "both", "annotations": { "bold": true, "italic": true } },
            { "plain_text": "site", "href": "https://school.example", "annotations": { "italic": true } }
        ]}
    });

    assert_eq!(
        render_blocks(&[block]),
        r#"<p>plain <strong><em>both</em></strong><a href="https://school.example" target="_blank" rel="noopener noreferrer"><em>site</em></a></p>"#
    );
}

#[test]
fn list_shapes_render_items() {
    let mut first = item("n1", "Open <house>");
    first.cover_url = Some("https://img.example/1.jpg".into());
    let items = vec![first, item("n2", "Second")];

    let gallery = render_items(ListShape::Gallery, Category::Album, &items, ItemLink::External, kst());
    assert_eq!(gallery.matches(r#"class="notion-gallery-item""#).count(), 2);
    assert!(gallery.contains("Open &lt;house&gt;"));
    assert!(gallery.contains(DEFAULT_COVER));
    assert!(gallery.contains(r#"href="https://www.notion.so/n1" target="_blank""#));

    let list = render_items(ListShape::Bulleted, Category::News, &items, ItemLink::CategoryPage, kst());
    assert!(list.starts_with(r#"<ul class="notion-list">"#));
    assert!(list.contains(r#"href="news.html?id=n2""#));
    assert!(list.contains(r#"<span class="list-date">2024.10.21</span>"#));

    let inline = render_items(ListShape::Bulleted, Category::Notice, &items, ItemLink::InPlace, kst());
    assert!(inline.contains(r##"href="#" data-id="n1""##));
}

#[test]
fn schedule_prefers_schedule_date() {
    let mut event = item("s1", "Sports day");
    event.schedule_date = Some("2024-11-02".into());
    let html = render_items(ListShape::Schedule, Category::Schedule, &[event], ItemLink::External, kst());

    assert!(html.contains(r#"<span class="schedule-date">2024.11.02</span>"#));
    assert!(render_items(ListShape::Schedule, Category::Schedule, &[], ItemLink::External, kst())
        .contains(EMPTY_SCHEDULE));
}

#[test]
fn detail_view_combines_title_date_and_blocks() {
    let content = PageContent {
        page: json!({
            "id": "d1",
            "created_time": "2024-10-21T07:28:00.000Z",
            "properties": { "Name": { "type": "title", "title": [{ "plain_text": "Field trip" }] } }
        }),
        blocks: vec![text_block("paragraph", "We went out.")],
    };

    let html = detail_html(&content, kst());
    assert!(html.contains(r#"<h1 class="notion-detail-title">Field trip</h1>"#));
    assert!(html.contains("2024.10.21"));
    assert!(html.contains("<p>We went out.</p>"));
    assert!(error_html("<boom>").contains("&lt;boom&gt;"));
}

#[test]
fn script_urls_never_reach_markup() {
    let html = render_blocks(&[
        json!({ "type": "embed", "embed": { "url": "javascript:alert(1)" } }),
        json!({ "type": "bookmark", "bookmark": { "url": "javascript:alert(2)", "caption": [] } }),
        json!({ "type": "image", "image": { "type": "external", "external": { "url": "javascript:alert(3)" } } }),
        json!({ "type": "paragraph", "paragraph": { "rich_text": [
            { "plain_text": "click", "href": "javascript:alert(4)" }
        ]}}),
    ]);

    assert!(!html.contains("javascript:"));
    assert_eq!(html, "<p>click</p>");
}

#[test]
fn bookmarks_and_mail_links_keep_safe_urls() {
    let html = render_blocks(&[
        json!({ "type": "bookmark", "bookmark": { "url": "https://school.example/map", "caption": [] } }),
        json!({ "type": "paragraph", "paragraph": { "rich_text": [
            { "plain_text": "mail us", "href": "mailto:office@school.example" }
        ]}}),
    ]);

    assert!(html.contains(r#"<a class="notion-bookmark" href="https://school.example/map""#));
    assert!(html.contains(r#"<a href="mailto:office@school.example" target="_blank""#));
}

#[test]
fn list_dates_follow_the_display_offset() {
    let mut late = item("n9", "Late post");
    late.created_time = "2024-10-21T16:30:00.000Z".into();
    let items = [late];

    let korea = render_items(ListShape::Bulleted, Category::News, &items, ItemLink::External, kst());
    let utc = render_items(ListShape::Bulleted, Category::News, &items, ItemLink::External, display_offset(0));

    assert!(korea.contains(r#"<span class="list-date">2024.10.22</span>"#));
    assert!(utc.contains(r#"<span class="list-date">2024.10.21</span>"#));
}
