use std::collections::BTreeMap;

use super::catalog::CriteriaCatalog;

/// Result of opening a category's detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewTransition {
    FirstView,
    AlreadyViewed,
    UnknownCategory,
}

/// Tracks which categories the user has opened. Flags only move from
/// unviewed to viewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewState {
    viewed: BTreeMap<&'static str, bool>,
}

impl ReviewState {
    pub fn new(catalog: &CriteriaCatalog) -> Self {
        Self {
            viewed: catalog.category_ids().map(|id| (id, false)).collect(),
        }
    }

    /// Rebuilds a state from a list of reviewed category ids; unknown ids are ignored.
    pub fn from_viewed<I, S>(catalog: &CriteriaCatalog, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = Self::new(catalog);
        for id in ids {
            state.mark_viewed(id.as_ref());
        }
        state
    }

    pub fn mark_viewed(&mut self, category_id: &str) -> ReviewTransition {
        match self.viewed.get_mut(category_id) {
            None => ReviewTransition::UnknownCategory,
            Some(true) => ReviewTransition::AlreadyViewed,
            Some(flag) => {
                *flag = true;
                ReviewTransition::FirstView
            }
        }
    }

    pub fn is_viewed(&self, category_id: &str) -> bool {
        self.viewed.get(category_id).copied().unwrap_or(false)
    }

    /// True only when every category in `catalog` has been opened.
    pub fn can_submit(&self, catalog: &CriteriaCatalog) -> bool {
        catalog.category_ids().all(|id| self.is_viewed(id))
    }

    pub fn pending(&self, catalog: &CriteriaCatalog) -> Vec<&'static str> {
        catalog
            .category_ids()
            .filter(|id| !self.is_viewed(id))
            .collect()
    }

    pub fn viewed_ids(&self) -> Vec<&'static str> {
        self.viewed
            .iter()
            .filter_map(|(id, viewed)| viewed.then_some(*id))
            .collect()
    }
}
