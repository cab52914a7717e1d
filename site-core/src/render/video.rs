use url::Url;

/// Where a video block's URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    YouTube(String),
    Vimeo(String),
    Direct(String),
}

impl VideoSource {
    pub fn classify(url: &str) -> Self {
        if let Some(id) = youtube_id(url) {
            Self::YouTube(id)
        } else if let Some(id) = vimeo_id(url) {
            Self::Vimeo(id)
        } else {
            Self::Direct(url.to_string())
        }
    }

    /// Embeddable player URL, if the host offers one.
    pub fn embed_url(&self) -> Option<String> {
        match self {
            Self::YouTube(id) => Some(format!("https://www.youtube.com/embed/{id}")),
            Self::Vimeo(id) => Some(format!("https://player.vimeo.com/video/{id}")),
            Self::Direct(_) => None,
        }
    }
}

/// Video id from `watch?v=` links and `youtu.be/`, `/embed/`, `/shorts/`, `/live/` paths.
pub fn youtube_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());

    let id = match host {
        "youtu.be" => segments.next().map(ToOwned::to_owned),
        "youtube.com" | "youtube-nocookie.com" | "music.youtube.com" => match segments.next() {
            Some("watch") => parsed
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned()),
            Some("embed" | "shorts" | "live" | "v") => segments.next().map(ToOwned::to_owned),
            _ => None,
        },
        _ => None,
    }?;

    (!id.is_empty()).then_some(id)
}

pub fn vimeo_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url.trim()).ok()?;
    let host = parsed.host_str()?.trim_start_matches("www.");
    if host != "vimeo.com" && host != "player.vimeo.com" {
        return None;
    }
    parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .last()
        .filter(|s| s.chars().all(|c| c.is_ascii_digit()))
        .map(ToOwned::to_owned)
}
