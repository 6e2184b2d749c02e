//! Page slicing for query results.

/// Page size used by the attendance list.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    /// Items on this page, in order.
    pub items: &'a [T],
    /// The 1-indexed page actually returned, after clamping.
    pub number: usize,
    /// Number of non-empty pages; zero for an empty result set.
    pub total_pages: usize,
    /// Size of the whole result set.
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn has_prev(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// Return the `page_number`-th page (1-indexed) of `records`.
///
/// Page numbers below 1 yield the first page and numbers past the end yield
/// the last non-empty page. A `page_size` of zero is treated as one.
///
/// # Example
///
/// ```
/// use slate_core::paginate;
///
/// let rows: Vec<u32> = (1..=25).collect();
/// assert_eq!(paginate(&rows, 10, 3).items, &[21, 22, 23, 24, 25]);
/// assert_eq!(paginate(&rows, 10, 99).number, 3);
/// ```
pub fn paginate<T>(records: &[T], page_size: usize, page_number: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_items = records.len();
    let total_pages = total_items.div_ceil(page_size);
    let number = page_number.clamp(1, total_pages.max(1));

    let start = (number - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let items = records.get(start..end).unwrap_or(&[]);

    Page {
        items,
        number,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: u32) -> Vec<u32> {
        (1..=n).collect()
    }

    #[test]
    fn first_page_of_twenty_five() {
        let rows = rows(25);
        let page = paginate(&rows, 10, 1);
        assert_eq!(page.items, &rows[..10]);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_prev());
        assert!(page.has_next());
    }

    #[test]
    fn last_page_holds_the_remainder() {
        let rows = rows(25);
        let page = paginate(&rows, 10, 3);
        assert_eq!(page.items, &[21, 22, 23, 24, 25]);
        assert!(!page.has_next());
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let rows = rows(25);
        assert_eq!(paginate(&rows, 10, 99), paginate(&rows, 10, 3));
        assert_eq!(paginate(&rows, 10, 0), paginate(&rows, 10, 1));
    }

    #[test]
    fn empty_input_yields_an_empty_first_page() {
        let rows: Vec<u32> = Vec::new();
        let page = paginate(&rows, 10, 4);
        assert!(page.items.is_empty());
        assert_eq!(page.number, 1);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let rows = rows(3);
        let page = paginate(&rows, 0, 2);
        assert_eq!(page.items, &[2]);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn exact_multiple_has_no_trailing_empty_page() {
        let rows = rows(20);
        let page = paginate(&rows, 10, 5);
        assert_eq!(page.number, 2);
        assert_eq!(page.items, &rows[10..]);
    }
}
