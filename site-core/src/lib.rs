pub mod cache;
pub mod category;
pub mod config;
pub mod controller;
pub mod error;
pub mod models;
pub mod normalize;
pub mod notion;
pub mod proxy;
pub mod render;
pub mod source;

pub use cache::{CachePolicy, PostCache};
pub use category::{Category, ListShape};
pub use config::{Credentials, DisplayConfig, NotionConfig, PageLimits, ServerConfig, SiteConfig};
pub use controller::{Container, History, ItemAction, TabController, ViewState};
pub use error::{ClientError, ClientResult, ProxyError, ProxyResult};
pub use models::{ListItem, PageContent, Posts};
pub use notion::NotionClient;
pub use proxy::{ContentEnvelope, ErrorEnvelope, NotionProxy, PostsEnvelope};
pub use render::ItemLink;
pub use source::{ContentSource, HttpSource};
