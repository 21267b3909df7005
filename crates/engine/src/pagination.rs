//! Page windows and page-marker lists for the ledger view.

use std::ops::Range;

/// Fixed number of rows per page.
pub const PAGE_SIZE: usize = 20;

/// Number of pages needed for `count` rows. An empty input yields 0
/// pages (and an empty page).
pub fn total_pages(count: usize, page_size: usize) -> u32 {
    count.div_ceil(page_size) as u32
}

/// Half-open index window for a 1-indexed `page`.
pub fn page_window(count: usize, page: u32, page_size: usize) -> Range<usize> {
    let start = (page.saturating_sub(1) as usize).saturating_mul(page_size);
    let start = start.min(count);
    let end = start.saturating_add(page_size).min(count);
    start..end
}

/// One element of the page-number button list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    /// A collapsed gap between shown page numbers.
    Ellipsis,
}

/// Button list for the pager: always page 1 and the last page, every
/// page within distance 1 of the current one, and each gap collapsed
/// into a single ellipsis (at most one per side).
pub fn page_markers(current: u32, total: u32) -> Vec<PageMarker> {
    let mut out = Vec::new();
    let mut last_shown = 0u32;
    for page in 1..=total {
        let shown = page == 1 || page == total || page.abs_diff(current) <= 1;
        if !shown {
            continue;
        }
        if last_shown != 0 && page - last_shown > 1 {
            out.push(PageMarker::Ellipsis);
        }
        out.push(PageMarker::Page(page));
        last_shown = page;
    }
    out
}

/// Search/page position owned by a viewing session.
///
/// A new query invalidates any prior page position, so changing the
/// query resets the page to 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    query: String,
    page: u32,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Replaces the active query, resetting the page to 1 whenever the
    /// query actually changes.
    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if query != self.query {
            self.page = 1;
        }
        self.query = query;
    }

    /// Moves to `page`, clamped to `[1, total_pages]`.
    pub fn set_page(&mut self, page: u32, total_pages: u32) {
        self.page = page.clamp(1, total_pages.max(1));
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forty_five_rows_make_three_pages() {
        assert_eq!(total_pages(45, PAGE_SIZE), 3);
        assert_eq!(total_pages(0, PAGE_SIZE), 0);
        assert_eq!(total_pages(20, PAGE_SIZE), 1);
        assert_eq!(total_pages(21, PAGE_SIZE), 2);
    }

    #[test]
    fn window_is_half_open() {
        assert_eq!(page_window(45, 2, PAGE_SIZE), 20..40);
        assert_eq!(page_window(45, 3, PAGE_SIZE), 40..45);
        assert_eq!(page_window(0, 1, PAGE_SIZE), 0..0);
    }

    #[test]
    fn markers_collapse_gaps_into_one_ellipsis_per_side() {
        use PageMarker::{Ellipsis, Page};

        assert_eq!(
            page_markers(5, 9),
            [Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(9)]
        );
        assert_eq!(page_markers(1, 3), [Page(1), Page(2), Page(3)]);
        assert_eq!(page_markers(1, 1), [Page(1)]);
        assert_eq!(
            page_markers(2, 4),
            [Page(1), Page(2), Page(3), Page(4)]
        );
        assert!(page_markers(1, 0).is_empty());
    }

    #[test]
    fn changing_the_query_resets_the_page() {
        let mut state = PageState::new();
        state.set_page(3, 3);
        assert_eq!(state.page(), 3);

        state.set_query("smith");
        assert_eq!(state.page(), 1);

        // Re-setting the same query keeps the position.
        state.set_page(2, 3);
        state.set_query("smith");
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn set_page_clamps() {
        let mut state = PageState::new();
        state.set_page(9, 3);
        assert_eq!(state.page(), 3);
        state.set_page(0, 3);
        assert_eq!(state.page(), 1);
        state.set_page(4, 0);
        assert_eq!(state.page(), 1);
    }
}
