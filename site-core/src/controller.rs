//! Page-side state machine behind the category tabs and the detail viewer.

use chrono::FixedOffset;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::cache::PostCache;
use crate::category::Category;
use crate::error::ClientResult;
use crate::render::{
    detail_html, display_offset, error_html, loading_html, render_items, ItemLink,
    DEFAULT_DISPLAY_OFFSET_HOURS,
};
use crate::source::ContentSource;

/// Element whose markup the controller replaces.
pub trait Container {
    fn set_inner_html(&mut self, markup: String);
}

impl Container for String {
    fn set_inner_html(&mut self, markup: String) {
        *self = markup;
    }
}

/// Keeps every write, oldest first.
impl Container for Vec<String> {
    fn set_inner_html(&mut self, markup: String) {
        self.push(markup);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    NoCategory,
    Loading,
    ListShown(Category),
    DetailShown {
        category: Option<Category>,
        item_id: String,
    },
    ErrorShown(String),
}

/// Outcome of clicking an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemAction {
    /// The browser should go to this URL.
    Navigate(String),
    /// The detail view was loaded in place.
    Shown,
    /// The item is not in the current list.
    Ignored,
}

/// Browser history entries pushed for in-place detail views, keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn push(&mut self, item_id: impl Into<String>) {
        self.entries.push(item_id.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct TabController<S, C> {
    source: S,
    container: C,
    cache: PostCache,
    link: ItemLink,
    date_offset: FixedOffset,
    state: ViewState,
    last_category: Option<Category>,
    history: History,
}

impl<S: ContentSource, C: Container> TabController<S, C> {
    pub fn new(source: S, container: C, link: ItemLink) -> Self {
        Self {
            source,
            container,
            cache: PostCache::new(),
            link,
            date_offset: display_offset(DEFAULT_DISPLAY_OFFSET_HOURS),
            state: ViewState::NoCategory,
            last_category: None,
            history: History::default(),
        }
    }

    /// Offset in which list and detail dates are shown.
    pub fn with_date_offset(mut self, offset: FixedOffset) -> Self {
        self.date_offset = offset;
        self
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn cache(&self) -> &PostCache {
        &self.cache
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn current_category(&self) -> Option<Category> {
        self.last_category
    }

    /// Click on a category button carrying `data-type="<token>"`.
    pub async fn select_category(&mut self, token: &str) -> &ViewState {
        let Some(category) = Category::parse(token) else {
            self.show_error(format!("unknown category: {token}"));
            return &self.state;
        };
        self.last_category = Some(category);

        if !self.cache.contains(category) {
            self.set_loading();
            if let Err(e) = self.ensure_cached(category).await {
                warn!(%category, error = %e, "failed to load category list");
                self.show_error(e.to_string());
                return &self.state;
            }
        }
        self.show_list(category);
        &self.state
    }

    /// Compact markup for the hover preview popup; does not change the view.
    pub async fn preview(&mut self, token: &str) -> String {
        let Some(category) = Category::parse(token) else {
            return error_html(&format!("unknown category: {token}"));
        };
        match self.ensure_cached(category).await {
            Ok(()) => {
                let items = self.cache.get(category).unwrap_or_default();
                render_items(category.preview_shape(), category, items, self.link, self.date_offset)
            }
            Err(e) => error_html(&e.to_string()),
        }
    }

    /// Click on a rendered item.
    pub async fn select_item(&mut self, item_id: &str) -> ItemAction {
        if self.link == ItemLink::InPlace {
            self.history.push(item_id);
            self.load_detail(item_id).await;
            return ItemAction::Shown;
        }

        let Some(category) = self.last_category else {
            return ItemAction::Ignored;
        };
        let item = self
            .cache
            .get(category)
            .and_then(|items| items.iter().find(|item| item.id == item_id));
        match item {
            Some(item) => ItemAction::Navigate(self.link.href(category, item)),
            None => ItemAction::Ignored,
        }
    }

    /// Opens the item named by a page's `?id=` query, if any.
    pub async fn open_from_query(&mut self, query: &str) -> &ViewState {
        let query = query.trim_start_matches('?');
        let id = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "id")
            .map(|(_, value)| value.into_owned())
            .filter(|id| !id.is_empty());
        if let Some(id) = id {
            self.load_detail(&id).await;
        }
        &self.state
    }

    /// Back button inside the detail view.
    pub fn back(&mut self) -> &ViewState {
        let cached = self.last_category.filter(|c| self.cache.contains(*c));
        if let Some(category) = cached {
            self.show_list(category);
        } else {
            self.state = ViewState::NoCategory;
            self.container.set_inner_html(String::new());
        }
        &self.state
    }

    /// Browser back/forward: `Some(id)` reopens that item, `None` returns to the list.
    pub async fn restore(&mut self, item_id: Option<&str>) -> &ViewState {
        match item_id {
            Some(id) => {
                self.load_detail(id).await;
                &self.state
            }
            None => self.back(),
        }
    }

    async fn ensure_cached(&mut self, category: Category) -> ClientResult<()> {
        if self.cache.contains(category) {
            debug!(%category, "category list served from cache");
            return Ok(());
        }
        let items = self.source.fetch_posts(category).await?;
        self.cache.insert(category, items);
        Ok(())
    }

    async fn load_detail(&mut self, item_id: &str) {
        self.set_loading();
        match self.source.fetch_content(item_id).await {
            Ok(content) => {
                self.container.set_inner_html(detail_html(&content, self.date_offset));
                self.state = ViewState::DetailShown {
                    category: self.last_category,
                    item_id: item_id.to_string(),
                };
            }
            Err(e) => {
                warn!(item_id, error = %e, "failed to load item");
                self.show_error(e.to_string());
            }
        }
    }

    fn show_list(&mut self, category: Category) {
        let items = self.cache.get(category).unwrap_or_default();
        let markup = render_items(category.shape(), category, items, self.link, self.date_offset);
        self.container.set_inner_html(markup);
        self.state = ViewState::ListShown(category);
    }

    fn set_loading(&mut self) {
        self.state = ViewState::Loading;
        self.container.set_inner_html(loading_html());
    }

    fn show_error(&mut self, message: String) {
        self.container.set_inner_html(error_html(&message));
        self.state = ViewState::ErrorShown(message);
    }
}
