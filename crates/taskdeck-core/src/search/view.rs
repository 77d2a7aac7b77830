use std::fmt;
use std::num::NonZeroUsize;

use serde::Serialize;

use super::{Searchable, paginate, search_default, total_pages};

/// Search term and current page of one list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    term: String,
    page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            term: String::new(),
            page: 1,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    /// Current 1-based page.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Replace the search term. A different term moves back to page 1.
    pub fn set_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.term {
            self.term = term;
            self.page = 1;
        }
    }

    /// Jump to `page` (at least 1). The term is left alone.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Advance one page, stopping at `total_pages`.
    pub fn next_page(&mut self, total_pages: usize) {
        if self.page < total_pages {
            self.page += 1;
        }
    }

    /// Go back one page, stopping at 1.
    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Back to an empty term on page 1.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Search `items` with the current term and cut out the current page.
    pub fn apply<'a, T: Searchable>(
        &self,
        items: &'a [T],
        page_size: NonZeroUsize,
    ) -> (Vec<&'a T>, PageSummary) {
        let matched = search_default(items, &self.term);
        let page = paginate(&matched, page_size, self.page).to_vec();
        let summary = PageSummary {
            shown: page.len(),
            matched: matched.len(),
            page: self.page,
            total_pages: total_pages(matched.len(), page_size),
        };
        (page, summary)
    }
}

/// Counts behind a "showing X of Y" line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// Items on the current page.
    pub shown: usize,
    /// Items matching the search term across all pages.
    pub matched: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl fmt::Display for PageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {}", self.shown, self.matched)?;
        if self.total_pages > 1 {
            write!(f, " (page {} of {})", self.page, self.total_pages)?;
        }
        Ok(())
    }
}
