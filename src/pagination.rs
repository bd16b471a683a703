use std::ops::Range;

use tracing::trace;

/// Page size, current page and the on/off flag of one table.
///
/// Pages are 1-based. The page size is validated before construction and never 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub enabled: bool,
    page_size: usize,
    current_page: usize,
}

/// One synthesized page selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub page: usize,
    pub active: bool,
}

impl PageLink {
    pub fn label(&self) -> String {
        self.page.to_string()
    }
}

impl PaginationState {
    pub(crate) fn new(page_size: usize, enabled: bool) -> Self {
        debug_assert!(page_size > 0);
        Self {
            enabled,
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self, total_rows: usize) -> usize {
        total_rows.div_ceil(self.page_size)
    }

    /// Moves to `page`, clamped to the pages that exist. Returns the page now current.
    ///
    /// An empty table still has page 1.
    pub fn set_page(&mut self, page: usize, total_rows: usize) -> usize {
        let last = self.total_pages(total_rows).max(1);
        let clamped = page.clamp(1, last);
        if clamped != page {
            trace!("Clamped page {} to {}", page, clamped);
        }
        self.current_page = clamped;
        clamped
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Range of row positions visible under this state.
    pub fn window(&self, total_rows: usize) -> Range<usize> {
        if !self.enabled {
            return 0..total_rows;
        }
        let start = ((self.current_page - 1) * self.page_size).min(total_rows);
        let end = (start + self.page_size).min(total_rows);
        start..end
    }

    /// Page links `1..=total_pages`, the current one marked active. Empty while disabled.
    pub fn links(&self, total_rows: usize) -> Vec<PageLink> {
        if !self.enabled {
            return Vec::new();
        }
        (1..=self.total_pages(total_rows))
            .map(|page| PageLink {
                page,
                active: page == self.current_page,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn windows_cover_partial_last_page() {
        let mut state = PaginationState::new(10, true);
        assert_eq!(state.total_pages(25), 3);
        assert_eq!(state.window(25), 0..10);
        state.set_page(3, 25);
        assert_eq!(state.window(25), 20..25);
    }

    #[test]
    fn set_page_clamps() {
        let mut state = PaginationState::new(10, true);
        assert_eq!(state.set_page(0, 25), 1);
        assert_eq!(state.set_page(99, 25), 3);
        assert_eq!(state.set_page(5, 0), 1);
        assert_eq!(state.window(0), 0..0);
    }

    #[test]
    fn disabled_shows_everything_without_links() {
        let mut state = PaginationState::new(10, true);
        state.set_page(2, 25);
        state.enabled = false;
        assert_eq!(state.window(25), 0..25);
        assert!(state.links(25).is_empty());
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn links_mark_current_page() {
        let mut state = PaginationState::new(4, true);
        state.set_page(2, 10);
        let links = state.links(10);
        assert_eq!(
            links,
            vec![
                PageLink { page: 1, active: false },
                PageLink { page: 2, active: true },
                PageLink { page: 3, active: false },
            ]
        );
        assert_eq!(links[2].label(), "3");
    }
}
