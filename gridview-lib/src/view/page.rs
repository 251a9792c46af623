//! Pagination engine: fixed-size pages with silent index re-clamping.

/// The current page index and page size of one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    index: usize,
    size: usize,
}

impl PageState {
    /// Creates a page state on the first page with the given size.
    ///
    /// A zero size is treated as one row per page; page size can never
    /// divide by zero.
    pub fn new(size: usize) -> Self {
        Self {
            index: 0,
            size: size.max(1),
        }
    }

    /// Returns the 0-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the page size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Requests a page index; it is clamped on the next computation.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Changes the page size and returns to the first page.
    ///
    /// Keeping an old index across a size change would land on an arbitrary
    /// offset, so a size change is defined to return to page 0.
    pub fn set_size(&mut self, size: usize) {
        self.size = size.max(1);
        self.index = 0;
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(10)
    }
}

/// The result of slicing a result set into pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageView {
    /// Start offset of the page within the result set.
    pub start: usize,
    /// End offset (exclusive) of the page within the result set.
    pub end: usize,
    /// Total number of pages; at least 1 even for an empty result set.
    pub page_count: usize,
    /// The page index actually used, clamped into `[0, page_count - 1]`.
    ///
    /// Callers must adopt this as the new authoritative index after every
    /// call; silent re-clamping is how "filter narrowed the set while the
    /// user was on page 5" resolves without a visible fault.
    pub clamped_index: usize,
}

impl PageView {
    /// Returns the page slice of an ordered result set.
    ///
    /// The window is clamped to the slice actually handed in, so a result
    /// set shorter than the one the view was computed for yields a truncated
    /// (possibly empty) page rather than a panic.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let end = self.end.min(rows.len());
        let start = self.start.min(end);
        &rows[start..end]
    }
}

/// Computes page boundaries for a result set of `len` rows.
///
/// `page_count = max(1, ceil(len / size))`; the requested index is clamped
/// into range rather than rejected. A zero `size` counts as 1.
///
/// # Example
///
/// ```
/// use gridview_lib::view::paginate;
///
/// let view = paginate(23, 5, 10);
/// assert_eq!(view.page_count, 3);
/// assert_eq!(view.clamped_index, 2);
/// assert_eq!(view.end - view.start, 3);
/// ```
pub fn paginate(len: usize, index: usize, size: usize) -> PageView {
    let size = size.max(1);
    let page_count = len.div_ceil(size).max(1);
    let clamped_index = index.min(page_count - 1);
    let start = (clamped_index * size).min(len);
    let end = (start + size).min(len);
    PageView {
        start,
        end,
        page_count,
        clamped_index,
    }
}
