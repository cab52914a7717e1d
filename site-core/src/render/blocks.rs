use serde_json::Value;

use super::escape_html;
use super::rich_text::{plain_text, render_rich_text};
use super::video::VideoSource;
use crate::normalize::{file_url, http_url};

pub const DEFAULT_CALLOUT_ICON: &str = "💡";
pub const TABLE_UNSUPPORTED: &str = "표는 아직 지원되지 않습니다.";

/// Renders a page's blocks, then joins neighbouring list items into one list.
pub fn render_blocks(blocks: &[Value]) -> String {
    let html: String = blocks.iter().map(render_block).collect();
    merge_adjacent_lists(&html)
}

/// Markup for one block; unknown kinds render as nothing.
pub fn render_block(block: &Value) -> String {
    let Some(kind) = block.get("type").and_then(Value::as_str) else {
        return String::new();
    };
    let data = block.get(kind).unwrap_or(&Value::Null);
    let text = || render_rich_text(data.get("rich_text"));

    match kind {
        "paragraph" => format!("<p>{}</p>", text()),
        "heading_1" => format!("<h1>{}</h1>", text()),
        "heading_2" => format!("<h2>{}</h2>", text()),
        "heading_3" => format!("<h3>{}</h3>", text()),
        "bulleted_list_item" => format!("<ul><li>{}</li></ul>", text()),
        "numbered_list_item" => format!("<ol><li>{}</li></ol>", text()),
        "quote" => format!("<blockquote>{}</blockquote>", text()),
        "divider" => "<hr>".to_string(),
        "code" => code(data),
        "callout" => callout(data),
        "image" => image(data),
        "video" => video(data),
        "file" => file(data),
        "pdf" => pdf(data),
        "embed" => embed(data),
        "bookmark" => bookmark(data),
        "table" => format!(r#"<p class="notion-unsupported">{TABLE_UNSUPPORTED}</p>"#),
        _ => String::new(),
    }
}

/// Removes the boundary between two lists of the same kind that touch.
pub fn merge_adjacent_lists(html: &str) -> String {
    html.replace("</ul><ul>", "").replace("</ol><ol>", "")
}

fn code(data: &Value) -> String {
    let language = data
        .get("language")
        .and_then(Value::as_str)
        .unwrap_or("plain text");
    format!(
        r#"<pre class="notion-code"><code class="language-{}">{}</code></pre>"#,
        escape_html(&language.replace(' ', "-")),
        escape_html(&plain_text(data.get("rich_text")))
    )
}

fn callout(data: &Value) -> String {
    let icon = data.get("icon");
    let icon_html = icon
        .and_then(|icon| icon.get("emoji"))
        .and_then(Value::as_str)
        .map(escape_html)
        .or_else(|| {
            icon.and_then(file_url)
                .map(|url| format!(r#"<img src="{}" alt="">"#, escape_html(&url)))
        })
        .unwrap_or_else(|| DEFAULT_CALLOUT_ICON.to_string());

    format!(
        r#"<div class="notion-callout"><span class="notion-callout-icon">{}</span><div class="notion-callout-text">{}</div></div>"#,
        icon_html,
        render_rich_text(data.get("rich_text"))
    )
}

fn image(data: &Value) -> String {
    let Some(url) = file_url(data) else {
        return String::new();
    };
    let alt = plain_text(data.get("caption"));
    let caption = render_rich_text(data.get("caption"));
    let figcaption = if caption.is_empty() {
        String::new()
    } else {
        format!("<figcaption>{caption}</figcaption>")
    };
    format!(
        r#"<figure class="notion-image"><img src="{}" alt="{}" loading="lazy">{}</figure>"#,
        escape_html(&url),
        escape_html(&alt),
        figcaption
    )
}

fn video(data: &Value) -> String {
    let Some(url) = file_url(data) else {
        return String::new();
    };
    match VideoSource::classify(&url).embed_url() {
        Some(embed) => format!(
            r#"<div class="notion-video"><iframe src="{}" frameborder="0" allow="accelerometer; autoplay; encrypted-media; gyroscope; picture-in-picture" allowfullscreen></iframe></div>"#,
            escape_html(&embed)
        ),
        None => format!(
            r#"<div class="notion-video"><video src="{}" controls preload="metadata"></video></div>"#,
            escape_html(&url)
        ),
    }
}

fn file(data: &Value) -> String {
    let Some(url) = file_url(data) else {
        return String::new();
    };
    let name = data
        .get("name")
        .and_then(Value::as_str)
        .filter(|n| !n.is_empty())
        .map(ToOwned::to_owned)
        .or_else(|| Some(plain_text(data.get("caption"))).filter(|c| !c.is_empty()))
        .unwrap_or_else(|| file_name_from_url(&url));
    format!(
        r#"<a class="notion-file" href="{}" target="_blank" rel="noopener noreferrer" download>📎 {}</a>"#,
        escape_html(&url),
        escape_html(&name)
    )
}

fn pdf(data: &Value) -> String {
    let Some(url) = file_url(data) else {
        return String::new();
    };
    let url = escape_html(&url);
    format!(
        r#"<div class="notion-pdf"><iframe src="{url}" title="PDF"></iframe><a href="{url}" target="_blank" rel="noopener noreferrer">PDF 열기</a></div>"#
    )
}

fn embed(data: &Value) -> String {
    let Some(url) = data.get("url").and_then(Value::as_str).and_then(http_url) else {
        return String::new();
    };
    format!(
        r#"<div class="notion-embed"><iframe src="{}" loading="lazy" allowfullscreen></iframe></div>"#,
        escape_html(&url)
    )
}

fn bookmark(data: &Value) -> String {
    let Some(url) = data.get("url").and_then(Value::as_str).and_then(http_url) else {
        return String::new();
    };
    let caption = plain_text(data.get("caption"));
    let label = if caption.is_empty() { &url } else { &caption };
    format!(
        r#"<a class="notion-bookmark" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        escape_html(&url),
        escape_html(label)
    )
}

fn file_name_from_url(url: &str) -> String {
    url.split('?')
        .next()
        .and_then(|path| path.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("file")
        .to_string()
}
