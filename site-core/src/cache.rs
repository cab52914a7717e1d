use std::collections::HashMap;

use tracing::debug;

use crate::category::Category;
use crate::models::ListItem;

/// When cached lists are dropped. Lists live for the whole page session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CachePolicy {
    #[default]
    Never,
}

/// Session cache of fetched category lists.
#[derive(Debug, Clone, Default)]
pub struct PostCache {
    policy: CachePolicy,
    lists: HashMap<Category, Vec<ListItem>>,
}

impl PostCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn get(&self, category: Category) -> Option<&[ListItem]> {
        self.lists.get(&category).map(Vec::as_slice)
    }

    pub fn contains(&self, category: Category) -> bool {
        self.lists.contains_key(&category)
    }

    pub fn insert(&mut self, category: Category, items: Vec<ListItem>) {
        debug!(%category, count = items.len(), "caching category list");
        self.lists.insert(category, items);
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }
}
