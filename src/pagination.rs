use serde::Serialize;

/// Page numbers to show around the current page; `None` marks a gap.
fn page_window(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// A page of items together with the numbers needed to draw a pager.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pages: Vec<Option<usize>>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
    /// 1-based position of the first item on this page, 0 when empty.
    pub first_item: usize,
    pub last_item: usize,
}

impl<T> Paginated<T> {
    /// Builds the pager from the counts reported by the backend.
    pub fn new(items: Vec<T>, current_page: usize, page_size: usize, total: usize) -> Self {
        let current_page = current_page.max(1);
        let total_pages = if page_size == 0 {
            0
        } else {
            total.div_ceil(page_size)
        };

        let pages = page_window(total_pages, current_page, 1, 2, 2, 1);

        let first_item = if items.is_empty() {
            0
        } else {
            (current_page - 1) * page_size + 1
        };
        let last_item = if items.is_empty() {
            0
        } else {
            first_item + items.len() - 1
        };

        Self {
            items,
            pages,
            page: current_page,
            page_size,
            total,
            total_pages,
            first_item,
            last_item,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
