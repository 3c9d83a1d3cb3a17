//! Page-number pagination primitives shared by backend list endpoints.
//!
//! Endpoints accept a [`PageRequest`] built from `page` / `perPage` query
//! parameters and answer with a [`Paginated`] envelope carrying the page
//! slice, totals, and navigation links derived from the request URL.
//!
//! ```
//! use pagination::{PageRequest, paginate};
//! use url::Url;
//!
//! let base = Url::parse("https://example.test/api/v1/timesheets?status=missing")
//!     .expect("valid url");
//! let request = PageRequest::new(2, 2).expect("valid request");
//! let page = paginate(vec![1, 2, 3, 4, 5], request, &base);
//!
//! assert_eq!(page.data(), &[3, 4]);
//! assert_eq!(page.total_pages(), 3);
//! assert!(page.links().next().is_some());
//! ```

use serde::{Deserialize, Serialize};
use url::Url;

/// Query parameter carrying the one-based page number.
pub const PAGE_PARAM: &str = "page";
/// Query parameter carrying the page size.
pub const PER_PAGE_PARAM: &str = "perPage";

/// Errors raised when a page request is out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// Page size falls outside the accepted range.
    #[error("perPage must be between {min} and {max}, got {actual}")]
    PerPageOutOfRange {
        /// Smallest accepted page size.
        min: u32,
        /// Largest accepted page size.
        max: u32,
        /// Rejected value.
        actual: u32,
    },
}

/// Validated one-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Page returned when the caller does not ask for one.
    pub const DEFAULT_PAGE: u32 = 1;
    /// Page size used when the caller does not ask for one.
    pub const DEFAULT_PER_PAGE: u32 = 5;
    /// Largest page size a caller may request.
    pub const MAX_PER_PAGE: u32 = 100;

    /// Validate a page number and page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPage`] for `page == 0` and
    /// [`PageRequestError::PerPageOutOfRange`] when `per_page` is zero or
    /// above [`Self::MAX_PER_PAGE`].
    pub const fn new(page: u32, per_page: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if per_page == 0 || per_page > Self::MAX_PER_PAGE {
            return Err(PageRequestError::PerPageOutOfRange {
                min: 1,
                max: Self::MAX_PER_PAGE,
                actual: per_page,
            });
        }
        Ok(Self { page, per_page })
    }

    /// Build a request from optional query values, applying defaults.
    ///
    /// # Errors
    ///
    /// Propagates the validation failures of [`Self::new`].
    pub const fn from_query(
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<Self, PageRequestError> {
        let page = match page {
            Some(value) => value,
            None => Self::DEFAULT_PAGE,
        };
        let per_page = match per_page {
            Some(value) => value,
            None => Self::DEFAULT_PER_PAGE,
        };
        Self::new(page, per_page)
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Number of items per page.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of items preceding this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        let skipped = u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page);
        usize::try_from(skipped).unwrap_or(usize::MAX)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            per_page: Self::DEFAULT_PER_PAGE,
        }
    }
}

/// Navigation links for a page envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLinks {
    #[serde(rename = "self")]
    current: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prev: Option<String>,
}

impl PaginationLinks {
    /// Link to the page that was served.
    #[must_use]
    pub fn current(&self) -> &str {
        self.current.as_str()
    }

    /// Link to the following page, when one exists.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Link to the preceding page, when one exists.
    #[must_use]
    pub fn prev(&self) -> Option<&str> {
        self.prev.as_deref()
    }
}

/// One page of results plus the totals needed to render pager controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    data: Vec<T>,
    page: u32,
    per_page: u32,
    total_items: u64,
    total_pages: u32,
    links: PaginationLinks,
}

impl<T> Paginated<T> {
    /// Items on this page.
    #[must_use]
    pub fn data(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Consume the envelope and return its items.
    #[must_use]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// One-based page number that was served.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Requested page size.
    #[must_use]
    pub const fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of items across every page.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Number of pages; zero when there are no items.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Navigation links.
    #[must_use]
    pub const fn links(&self) -> &PaginationLinks {
        &self.links
    }

    /// Convert every item while keeping totals and links.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            data: self.data.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
            links: self.links,
        }
    }
}

/// Slice `items` according to `request` and build links relative to `base`.
///
/// Query parameters already present on `base` (filters) are kept; any
/// existing `page` / `perPage` values are replaced. Requesting a page past
/// the end yields an empty `data` array with accurate totals.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest, base: &Url) -> Paginated<T> {
    let total_items = u64::try_from(items.len()).unwrap_or(u64::MAX);
    let total_pages = page_count(total_items, request.per_page());
    let per_page = usize::try_from(request.per_page()).unwrap_or(usize::MAX);
    let data: Vec<T> = items
        .into_iter()
        .skip(request.offset())
        .take(per_page)
        .collect();

    let next = (request.page() < total_pages)
        .then(|| page_link(base, request.page().saturating_add(1), request.per_page()));
    let prev = (request.page() > 1)
        .then(|| page_link(base, request.page().saturating_sub(1), request.per_page()));

    Paginated {
        data,
        page: request.page(),
        per_page: request.per_page(),
        total_items,
        total_pages,
        links: PaginationLinks {
            current: page_link(base, request.page(), request.per_page()),
            next,
            prev,
        },
    }
}

fn page_count(total_items: u64, per_page: u32) -> u32 {
    let pages = total_items.div_ceil(u64::from(per_page.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

fn page_link(base: &Url, page: u32, per_page: u32) -> String {
    let retained: Vec<(String, String)> = base
        .query_pairs()
        .filter(|(key, _)| key != PAGE_PARAM && key != PER_PAGE_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(&retained)
        .append_pair(PAGE_PARAM, &page.to_string())
        .append_pair(PER_PAGE_PARAM, &per_page.to_string());
    url.to_string()
}

#[cfg(test)]
mod tests {
    //! Paging arithmetic and link construction.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn base() -> Url {
        Url::parse("https://example.test/api/v1/timesheets?status=completed&page=9")
            .unwrap_or_else(|err| panic!("fixture url: {err}"))
    }

    #[rstest]
    #[case(0, 5, PageRequestError::ZeroPage)]
    #[case(1, 0, PageRequestError::PerPageOutOfRange { min: 1, max: 100, actual: 0 })]
    #[case(1, 101, PageRequestError::PerPageOutOfRange { min: 1, max: 100, actual: 101 })]
    fn rejects_out_of_range_requests(
        #[case] page: u32,
        #[case] per_page: u32,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, per_page), Err(expected));
    }

    #[rstest]
    fn query_defaults_match_dashboard_defaults() {
        let request = PageRequest::from_query(None, None).expect("defaults are valid");
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.page(), 1);
        assert_eq!(request.per_page(), 5);
        assert_eq!(request.offset(), 0);
    }

    #[rstest]
    #[case(0, 5, 0)]
    #[case(5, 5, 1)]
    #[case(6, 5, 2)]
    #[case(20, 10, 2)]
    #[case(21, 20, 2)]
    fn counts_pages_with_ceiling(#[case] total: u64, #[case] per_page: u32, #[case] pages: u32) {
        assert_eq!(page_count(total, per_page), pages);
    }

    #[rstest]
    fn middle_page_has_both_links(base: Url) {
        let request = PageRequest::new(2, 2).expect("valid request");
        let page = paginate((1..=5).collect(), request, &base);

        assert_eq!(page.data(), &[3, 4]);
        assert_eq!(page.total_items(), 5);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(
            page.links().current(),
            "https://example.test/api/v1/timesheets?status=completed&page=2&perPage=2"
        );
        assert_eq!(
            page.links().next(),
            Some("https://example.test/api/v1/timesheets?status=completed&page=3&perPage=2")
        );
        assert_eq!(
            page.links().prev(),
            Some("https://example.test/api/v1/timesheets?status=completed&page=1&perPage=2")
        );
    }

    #[rstest]
    fn page_past_the_end_is_empty_but_keeps_totals(base: Url) {
        let request = PageRequest::new(4, 5).expect("valid request");
        let page = paginate((1..=6).collect::<Vec<u32>>(), request, &base);

        assert!(page.data().is_empty());
        assert_eq!(page.total_items(), 6);
        assert_eq!(page.total_pages(), 2);
        assert!(page.links().next().is_none());
        assert!(page.links().prev().is_some());
    }

    #[rstest]
    fn empty_input_has_zero_pages(base: Url) {
        let page = paginate(Vec::<u8>::new(), PageRequest::default(), &base);
        assert_eq!(page.total_pages(), 0);
        assert!(page.links().next().is_none());
        assert!(page.links().prev().is_none());
    }

    #[rstest]
    fn envelope_serialises_in_camel_case(base: Url) {
        let page = paginate(vec!["a"], PageRequest::default(), &base).map(str::to_uppercase);
        let value = serde_json::to_value(&page).expect("serialise envelope");

        assert_eq!(value["data"], serde_json::json!(["A"]));
        assert_eq!(value["perPage"], 5);
        assert_eq!(value["totalItems"], 1);
        assert_eq!(value["totalPages"], 1);
        assert!(value["links"]["self"].is_string());
        assert!(value["links"].get("next").is_none());
    }
}
