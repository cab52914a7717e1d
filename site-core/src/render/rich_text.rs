use serde_json::Value;

use super::escape_html;
use crate::normalize::link_url;

/// Formatting applied to a run, listed outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Link(String),
    Bold,
    Italic,
    Strikethrough,
    Underline,
    Code,
}

impl Span {
    fn open(&self) -> String {
        match self {
            Self::Link(href) => format!(
                r#"<a href="{}" target="_blank" rel="noopener noreferrer">"#,
                escape_html(href)
            ),
            Self::Bold => "<strong>".to_string(),
            Self::Italic => "<em>".to_string(),
            Self::Strikethrough => "<s>".to_string(),
            Self::Underline => "<u>".to_string(),
            Self::Code => "<code>".to_string(),
        }
    }

    fn close(&self) -> &'static str {
        match self {
            Self::Link(_) => "</a>",
            Self::Bold => "</strong>",
            Self::Italic => "</em>",
            Self::Strikethrough => "</s>",
            Self::Underline => "</u>",
            Self::Code => "</code>",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub spans: Vec<Span>,
}

impl StyledRun {
    /// Builds a run from a Notion rich-text object.
    pub fn from_value(run: &Value) -> Self {
        let text = run
            .get("plain_text")
            .and_then(Value::as_str)
            .or_else(|| {
                run.get("text")
                    .and_then(|t| t.get("content"))
                    .and_then(Value::as_str)
            })
            .unwrap_or_default()
            .to_string();

        let href = run.get("href").and_then(Value::as_str).or_else(|| {
            run.get("text")
                .and_then(|t| t.get("link"))
                .and_then(|l| l.get("url"))
                .and_then(Value::as_str)
        });

        let annotations = run.get("annotations");
        let flag = |name: &str| {
            annotations
                .and_then(|a| a.get(name))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };

        let mut spans = Vec::new();
        if let Some(href) = href.and_then(link_url) {
            spans.push(Span::Link(href));
        }
        for (name, span) in [
            ("bold", Span::Bold),
            ("italic", Span::Italic),
            ("strikethrough", Span::Strikethrough),
            ("underline", Span::Underline),
            ("code", Span::Code),
        ] {
            if flag(name) {
                spans.push(span);
            }
        }

        Self { text, spans }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for span in &self.spans {
            html.push_str(&span.open());
        }
        html.push_str(&escape_html(&self.text).replace('\n', "<br>"));
        for span in self.spans.iter().rev() {
            html.push_str(span.close());
        }
        html
    }
}

pub fn render_rich_text(runs: Option<&Value>) -> String {
    runs.and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .map(|run| StyledRun::from_value(run).to_html())
                .collect()
        })
        .unwrap_or_default()
}

pub fn plain_text(runs: Option<&Value>) -> String {
    runs.and_then(Value::as_array)
        .map(|runs| {
            runs.iter()
                .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
                .collect()
        })
        .unwrap_or_default()
}
