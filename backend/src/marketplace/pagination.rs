//! Fixed-size pages and the page-number window shown under the grid

use serde::{Serialize, Serializer};

/// Page numbers shown around the current page
pub const WINDOW_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageItem::Page(n) => serializer.serialize_u64(*n as u64),
            PageItem::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Never less than one, so an empty result still has a page to show
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// Window of `WINDOW_WIDTH` pages around `current`; first and last page are
/// always present, with an ellipsis wherever numbers are skipped
pub fn page_window(current: usize, total: usize) -> Vec<PageItem> {
    let total = total.max(1);
    let current = current.clamp(1, total);

    let half = WINDOW_WIDTH / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = (start + WINDOW_WIDTH - 1).min(total);
    start = end.saturating_sub(WINDOW_WIDTH - 1).max(1);

    let mut items = Vec::with_capacity(WINDOW_WIDTH + 4);
    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(PageItem::Page));
    if end < total {
        if end + 1 < total {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
    }
    items
}

/// One page of results
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_window: Vec<PageItem>,
}

/// Slice `items` to the requested page; the page number is clamped into range
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let total = items.len();
    let total_pages = total_pages(total, page_size);
    let page = page.clamp(1, total_pages);

    let items = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Page {
        items,
        total,
        page,
        total_pages,
        page_window: page_window(page, total_pages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Ellipsis, Page as P};

    #[test]
    fn test_window_at_start() {
        assert_eq!(
            page_window(1, 20),
            vec![P(1), P(2), P(3), P(4), P(5), Ellipsis, P(20)]
        );
    }

    #[test]
    fn test_window_in_middle_and_end() {
        assert_eq!(
            page_window(10, 20),
            vec![P(1), Ellipsis, P(8), P(9), P(10), P(11), P(12), Ellipsis, P(20)]
        );
        assert_eq!(
            page_window(20, 20),
            vec![P(1), Ellipsis, P(16), P(17), P(18), P(19), P(20)]
        );
    }

    #[test]
    fn test_window_without_gaps() {
        assert_eq!(page_window(1, 1), vec![P(1)]);
        assert_eq!(page_window(2, 3), vec![P(1), P(2), P(3)]);
        assert_eq!(page_window(4, 6), vec![P(1), P(2), P(3), P(4), P(5), P(6)]);
    }

    #[test]
    fn test_current_is_clamped() {
        assert_eq!(page_window(0, 3), page_window(1, 3));
        assert_eq!(page_window(99, 3), page_window(3, 3));
    }

    #[test]
    fn test_paginate() {
        let page = paginate((1..=30).collect::<Vec<_>>(), 3, 12);
        assert_eq!(page.items, (25..=30).collect::<Vec<_>>());
        assert_eq!(page.total, 30);
        assert_eq!(page.total_pages, 3);

        let empty = paginate(Vec::<u8>::new(), 5, 12);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn test_ellipsis_serializes_as_marker() {
        let json = serde_json::to_string(&page_window(1, 7)).unwrap();
        assert_eq!(json, r#"[1,2,3,4,5,"...",7]"#);
    }
}
