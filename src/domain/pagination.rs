//! Page window arithmetic shared by every listing endpoint.

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Number of pages needed to show `total_count` records, `page_size` at a time.
///
/// Rounds up when the division leaves a remainder and is the identity
/// otherwise. Always at least one page, so an empty collection still renders
/// a single (empty) page. A page size below 1 is treated as 1.
pub fn compute_page_count(total_count: i64, page_size: i64) -> i64 {
    let total = total_count.max(0);
    let size = page_size.max(1);
    let pages = total / size + i64::from(total % size != 0);
    pages.max(1)
}

/// Map a zero-based page selection from a pager widget to a one-based page number.
pub fn next_page_index(zero_based_selection: i64) -> i64 {
    zero_based_selection.max(0) + 1
}

/// Clamp a requested one-based page number into `[1, page_count]`.
pub fn clamp_page(page_no: i64, page_count: i64) -> i64 {
    page_no.clamp(1, page_count.max(1))
}

/// The `(pageNo, pageSize)` window describing which slice of a collection to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page_no: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page_no: i64, page_size: i64) -> Self {
        Self {
            page_no: page_no.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The same window moved onto the last page when `page_no` lies past the
    /// end of a collection of `total_count` records.
    pub fn within(self, total_count: i64) -> Self {
        let page_count = compute_page_count(total_count, self.page_size);
        Self {
            page_no: clamp_page(self.page_no, page_count),
            ..self
        }
    }

    /// Saturates instead of overflowing for absurd page numbers.
    pub fn offset(&self) -> i64 {
        (self.page_no - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// One page of a collection. `page` is the window actually served, which may
/// differ from the one requested (see [`PageRequest::within`]).
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page: PageRequest,
}

impl<T> PageResult<T> {
    pub fn page_count(&self) -> i64 {
        compute_page_count(self.total_count, self.page.page_size)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
        }
    }
}
