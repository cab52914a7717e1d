use std::fmt;

use serde::{Deserialize, Serialize};

/// Content categories published on the site, one Notion database each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    News,
    Notice,
    Resources,
    Schedule,
    Album,
}

/// Visual shape used when a category's items are rendered as a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListShape {
    Gallery,
    MiniGallery,
    Bulleted,
    Schedule,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::News,
        Category::Notice,
        Category::Resources,
        Category::Schedule,
        Category::Album,
    ];

    /// Token used when a request names no category.
    pub const DEFAULT: Category = Category::Album;

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "news" => Some(Self::News),
            "notice" => Some(Self::Notice),
            "resources" => Some(Self::Resources),
            "schedule" => Some(Self::Schedule),
            "album" => Some(Self::Album),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Notice => "notice",
            Self::Resources => "resources",
            Self::Schedule => "schedule",
            Self::Album => "album",
        }
    }

    /// Environment variable holding the category's database id.
    pub fn env_key(self) -> &'static str {
        match self {
            Self::News => "NOTION_DB_NEWS",
            Self::Notice => "NOTION_DB_NOTICE",
            Self::Resources => "NOTION_DB_RESOURCES",
            Self::Schedule => "NOTION_DB_SCHEDULE",
            Self::Album => "NOTION_DB_ALBUM",
        }
    }

    /// Items requested per list when no limits are configured.
    pub fn default_page_size(self) -> u32 {
        match self {
            Self::Schedule => 3,
            Self::Album => 5,
            _ => 15,
        }
    }

    pub fn shape(self) -> ListShape {
        match self {
            Self::Album => ListShape::Gallery,
            Self::Schedule => ListShape::Schedule,
            _ => ListShape::Bulleted,
        }
    }

    /// Shape of the compact preview popup.
    pub fn preview_shape(self) -> ListShape {
        match self {
            Self::Album => ListShape::MiniGallery,
            other => other.shape(),
        }
    }

    /// Dedicated page showing a single item of this category.
    pub fn page_path(self) -> String {
        format!("{}.html", self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
