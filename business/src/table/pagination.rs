//! Windowed page numbers for the pagination bar.

/// Up to this many pages every page number is shown.
pub const MAX_UNWINDOWED_PAGES: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Zero-based page index.
    Page(usize),
    Ellipsis,
}

/// Page buttons for `page_count` pages with `current` (zero-based) selected.
///
/// Beyond [`MAX_UNWINDOWED_PAGES`] the first and last page stay visible, with a window of up to
/// three pages around `current` and an ellipsis over every gap. Near either edge the window
/// stretches to three pages from that edge.
pub fn page_items(page_count: usize, current: usize) -> Vec<PageItem> {
    if page_count <= MAX_UNWINDOWED_PAGES {
        return (0..page_count).map(PageItem::Page).collect();
    }

    let last = page_count - 1;
    let current = current.min(last);
    let left_dots = current > 3;
    let right_dots = current + 4 < page_count;

    let mut start = if left_dots { current - 1 } else { 0 };
    let mut end = if right_dots { current + 1 } else { last };
    if !left_dots {
        end = end.max(2);
    }
    if !right_dots {
        start = start.min(last - 2);
    }

    let mut items = Vec::with_capacity(end - start + 5);
    if left_dots {
        items.push(PageItem::Page(0));
        items.push(PageItem::Ellipsis);
    }
    items.extend((start..=end).map(PageItem::Page));
    if right_dots {
        items.push(PageItem::Ellipsis);
        items.push(PageItem::Page(last));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;

    /// One-based labels, `…` for gaps.
    fn labels(items: &[PageItem]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                Page(index) => (index + 1).to_string(),
                Ellipsis => "…".to_owned(),
            })
            .collect()
    }

    #[test]
    fn small_page_counts_show_every_page() {
        assert_eq!(labels(&page_items(5, 0)), ["1", "2", "3", "4", "5"]);
        assert_eq!(labels(&page_items(5, 4)), ["1", "2", "3", "4", "5"]);
        assert_eq!(page_items(7, 3).len(), 7);
    }

    #[test]
    fn no_pages_renders_nothing() {
        assert!(page_items(0, 0).is_empty());
    }

    #[test]
    fn first_page_of_ten() {
        assert_eq!(labels(&page_items(10, 0)), ["1", "2", "3", "…", "10"]);
    }

    #[test]
    fn middle_page_of_ten_shows_both_ellipses() {
        assert_eq!(
            labels(&page_items(10, 5)),
            ["1", "…", "5", "6", "7", "…", "10"]
        );
    }

    #[test]
    fn left_ellipsis_suppressed_up_to_fourth_page() {
        assert_eq!(labels(&page_items(10, 3)), ["1", "2", "3", "4", "5", "…", "10"]);
        assert_eq!(labels(&page_items(10, 4)), ["1", "…", "4", "5", "6", "…", "10"]);
    }

    #[test]
    fn last_page_of_ten() {
        assert_eq!(labels(&page_items(10, 9)), ["1", "…", "8", "9", "10"]);
        assert_eq!(labels(&page_items(10, 6)), ["1", "…", "6", "7", "8", "9", "10"]);
    }

    #[test]
    fn out_of_range_current_is_clamped() {
        assert_eq!(page_items(10, 42), page_items(10, 9));
    }

    #[test]
    fn current_page_is_always_listed() {
        for count in 1..30 {
            for current in 0..count {
                assert!(
                    page_items(count, current).contains(&Page(current)),
                    "page {current} of {count}"
                );
            }
        }
    }
}
