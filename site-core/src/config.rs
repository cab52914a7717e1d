use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::category::Category;
use crate::render::{display_offset, DEFAULT_DISPLAY_OFFSET_HOURS};

const API_KEY_VAR: &str = "NOTION_API_KEY";
const CONFIG_PATH_VAR: &str = "SITE_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub notion: NotionConfig,
    pub server: ServerConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    pub api_base_url: String,
    pub notion_version: String,
    pub block_page_size: u32,
    pub limits: PageLimits,
}

/// Number of items requested per category list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLimits {
    pub schedule: u32,
    pub album: u32,
    pub default: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub user_agent: String,
}

/// How rendered markup presents dates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub utc_offset_hours: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: DEFAULT_DISPLAY_OFFSET_HOURS,
        }
    }
}

impl DisplayConfig {
    pub fn offset(&self) -> FixedOffset {
        display_offset(self.utc_offset_hours)
    }
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.notion.com/v1".to_string(),
            notion_version: "2022-06-28".to_string(),
            block_page_size: 100,
            limits: PageLimits::default(),
        }
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            schedule: Category::Schedule.default_page_size(),
            album: Category::Album.default_page_size(),
            default: Category::News.default_page_size(),
        }
    }
}

impl PageLimits {
    pub fn for_category(&self, category: Category) -> u32 {
        match category {
            Category::Schedule => self.schedule,
            Category::Album => self.album,
            _ => self.default,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8788".to_string(),
            user_agent: "notion-site/0.1".to_string(),
        }
    }
}

impl SiteConfig {
    /// Location of the configuration file: `$SITE_CONFIG`, else the user config dir.
    pub fn config_file_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_VAR) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("notion-site").join("config.json"))
    }

    /// Loads the configuration file, falling back to defaults when it is absent or invalid.
    pub fn load() -> Self {
        let Some(path) = Self::config_file_path() else {
            debug!("no config directory available; using defaults");
            return Self::default();
        };
        if !path.exists() {
            debug!(path = %path.display(), "config file not found; using defaults");
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, path = %path.display(), "failed to load config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: SiteConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}

/// API credential and per-category database ids read from the environment.
///
/// Deployment dashboards sometimes store variable names or values with stray
/// whitespace, so keys are matched after trimming and values are trimmed.
/// Missing entries are kept as empty strings and rejected per request.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    api_key: String,
    collections: HashMap<Category, String>,
}

impl Credentials {
    /// Variables that are not valid UTF-8 are skipped.
    pub fn from_env() -> Self {
        Self::from_vars(unicode_vars(std::env::vars_os()))
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let table: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();

        let api_key = lookup(&table, API_KEY_VAR);
        let collections = Category::ALL
            .into_iter()
            .map(|category| (category, lookup(&table, category.env_key())))
            .collect();

        Self {
            api_key,
            collections,
        }
    }

    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    pub fn collection(&self, category: Category) -> Option<&str> {
        self.collections
            .get(&category)
            .and_then(|id| non_empty(id))
    }
}

fn unicode_vars<I>(vars: I) -> impl Iterator<Item = (String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
}

fn lookup(table: &HashMap<String, String>, name: &str) -> String {
    let value = table
        .get(name)
        .or_else(|| {
            table
                .iter()
                .find(|(key, _)| key.trim() == name)
                .map(|(_, value)| value)
        })
        .map(String::as_str)
        .unwrap_or_default();
    value.trim().to_string()
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
