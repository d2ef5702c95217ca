use std::fmt;

/// 1-based page number used to request the next page of listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageCursor(u32);

impl PageCursor {
    pub const FIRST: PageCursor = PageCursor(1);

    /// Returns `None` for page 0.
    pub fn new(page: u32) -> Option<Self> {
        (page >= 1).then_some(Self(page))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: Option<u32>,
    pub total_pages: Option<u32>,
}

impl PageInfo {
    pub fn new(current_page: u32, total_pages: u32) -> Self {
        Self {
            current_page: Some(current_page),
            total_pages: Some(total_pages),
        }
    }

    /// Cursor for the following page, or `None` when this is the last one.
    ///
    /// Missing or zero metadata is treated as the final page.
    pub fn next_cursor(&self) -> Option<PageCursor> {
        let current = self.current_page.filter(|p| *p > 0)?;
        let total = self.total_pages.filter(|p| *p > 0)?;
        if current < total {
            PageCursor::new(current + 1)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_cursor_advances_until_last_page() {
        assert_eq!(PageInfo::new(2, 3).next_cursor(), PageCursor::new(3));
        assert_eq!(PageInfo::new(3, 3).next_cursor(), None);
        assert_eq!(PageInfo::new(5, 3).next_cursor(), None);
    }

    #[test]
    fn missing_metadata_means_no_more_pages() {
        assert_eq!(PageInfo::default().next_cursor(), None);

        let no_total = PageInfo {
            current_page: Some(1),
            total_pages: None,
        };
        assert_eq!(no_total.next_cursor(), None);

        let zero_current = PageInfo {
            current_page: Some(0),
            total_pages: Some(4),
        };
        assert_eq!(zero_current.next_cursor(), None);
    }

    #[test]
    fn cursor_rejects_page_zero() {
        assert_eq!(PageCursor::new(0), None);
        assert_eq!(PageCursor::default().get(), 1);
        assert_eq!(PageCursor::FIRST.to_string(), "1");
    }
}
