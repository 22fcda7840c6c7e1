use crate::query::{Filter, SortOrder};

/// Filter, sort and search selection for the current session.
///
/// Favorites live in [`crate::favorites::FavoritesStore`] since they are
/// persisted; everything here starts fresh on every launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    filter: Filter,
    sort: SortOrder,
    search_query: String,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.sort = sort;
    }

    pub fn commit_search(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    pub fn clear_search(&mut self) {
        self.search_query.clear();
    }
}
