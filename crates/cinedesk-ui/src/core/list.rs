//! List page state: committed query, load state and pagination view.
//!
//! # Design
//! - The committed query is the single source of truth for the request and
//!   the address bar; both are derived from it.
//! - Search, ordering, page size and resource filters reset the page to 1.
//!   A direct page change keeps the requested page.
//! - Only query changes put a list back into [`LoadState::Loading`]; refreshes
//!   after mutations keep the current rows on screen.

use cinedesk_api_models::{
    GenreFilters, GenreOrdering, ListFilters, MovieFilters, MovieOrdering, Page, UserFilters,
    UserOrdering,
};
use cinedesk_client::{ClientResult, FetchOutcome};

use crate::core::toast::load_failed;

/// Rows requested when no page size is given.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page sizes offered by the page-size picker.
pub const PAGE_SIZES: [u32; 4] = [10, 20, 30, 50];

/// Value/label pairs for the active-status filter select.
pub const STATUS_OPTIONS: [(&str, &str); 3] =
    [("", "All statuses"), ("true", "Active"), ("false", "Inactive")];

/// Select value for an `is_active` filter.
#[must_use]
pub const fn status_value(is_active: Option<bool>) -> &'static str {
    match is_active {
        None => "",
        Some(true) => "true",
        Some(false) => "false",
    }
}

/// `is_active` filter for a select value; anything unknown means all.
#[must_use]
pub fn parse_status(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Per-resource list defaults.
pub trait ListDefaults: ListFilters {
    /// Ordering applied when the address bar names none.
    const DEFAULT_ORDERING: Self::Sort;
}

impl ListDefaults for MovieFilters {
    const DEFAULT_ORDERING: MovieOrdering = MovieOrdering::Newest;
}

impl ListDefaults for GenreFilters {
    const DEFAULT_ORDERING: GenreOrdering = GenreOrdering::NameAsc;
}

impl ListDefaults for UserFilters {
    const DEFAULT_ORDERING: UserOrdering = UserOrdering::Newest;
}

/// Committed list query for one resource page.
#[derive(Clone, Debug, PartialEq)]
pub struct ListQuery<F> {
    filters: F,
}

impl<F: ListDefaults> Default for ListQuery<F> {
    fn default() -> Self {
        Self::from_filters(F::default())
    }
}

impl<F: ListDefaults> ListQuery<F> {
    /// Query with every default applied.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a query from the address bar, filling in defaults.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        Self::from_filters(F::from_query_string(query))
    }

    fn from_filters(mut filters: F) -> Self {
        if filters.ordering().is_none() {
            filters.set_ordering(Some(F::DEFAULT_ORDERING));
        }
        if filters.page().is_none_or(|page| page == 0) {
            filters.set_page(Some(1));
        }
        if filters.page_size().is_none_or(|size| size == 0) {
            filters.set_page_size(Some(DEFAULT_PAGE_SIZE));
        }
        Self { filters }
    }

    /// Address-bar form; default values are left out.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut filters = self.filters.clone();
        if filters.ordering() == Some(F::DEFAULT_ORDERING) {
            filters.set_ordering(None);
        }
        if filters.page() == Some(1) {
            filters.set_page(None);
        }
        if filters.page_size() == Some(DEFAULT_PAGE_SIZE) {
            filters.set_page_size(None);
        }
        filters.to_query_string()
    }

    /// Filters sent with the list request.
    #[must_use]
    pub const fn filters(&self) -> &F {
        &self.filters
    }

    /// Committed search term, empty when unset.
    #[must_use]
    pub fn search(&self) -> &str {
        self.filters.search().unwrap_or_default()
    }

    /// Committed ordering.
    #[must_use]
    pub fn ordering(&self) -> F::Sort {
        self.filters.ordering().unwrap_or(F::DEFAULT_ORDERING)
    }

    /// Current 1-based page.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.filters.page().unwrap_or(1)
    }

    /// Current page size.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.filters.page_size().unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Commit a search term and return to page 1.
    ///
    /// Returns whether the query changed.
    pub fn commit_search(&mut self, search: &str) -> bool {
        self.update_filters(|filters| filters.set_search(Some(search.to_string())))
    }

    /// Change the ordering and return to page 1.
    pub fn set_ordering(&mut self, ordering: F::Sort) -> bool {
        self.update_filters(|filters| filters.set_ordering(Some(ordering)))
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&mut self, page_size: u32) -> bool {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        self.update_filters(|filters| filters.set_page_size(Some(page_size)))
    }

    /// Jump to `page` (at least 1) keeping every other key.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = self.page() != page;
        self.filters.set_page(Some(page));
        changed
    }

    /// Apply a resource-specific filter change and return to page 1.
    pub fn update_filters(&mut self, change: impl FnOnce(&mut F)) -> bool {
        let before = self.filters.clone();
        change(&mut self.filters);
        self.filters.set_page(Some(1));
        self.filters != before
    }
}

/// Coarse state of a list page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    /// First load for the current query is in flight.
    Loading,
    /// Rows for the current query are on screen.
    Ready,
    /// The last load for the current query failed.
    Error,
}

/// Rows, load state and error of one list page.
#[derive(Clone, Debug, PartialEq)]
pub struct ListData<T> {
    /// Coarse state.
    pub state: LoadState,
    /// Last page received.
    pub page: Option<Page<T>>,
    /// Message shown in the error panel.
    pub error: Option<String>,
}

impl<T> Default for ListData<T> {
    fn default() -> Self {
        Self {
            state: LoadState::Loading,
            page: None,
            error: None,
        }
    }
}

impl<T> ListData<T> {
    /// Start a load. A changed query shows the skeleton again; a refresh of
    /// the same query keeps the current rows.
    pub fn begin(&mut self, query_changed: bool) {
        if query_changed || self.page.is_none() {
            self.state = LoadState::Loading;
        }
    }

    /// Record the result of a load.
    pub fn resolve(&mut self, result: Result<Page<T>, String>) {
        match result {
            Ok(page) => {
                self.page = Some(page);
                self.error = None;
                self.state = LoadState::Ready;
            }
            Err(message) => {
                self.error = Some(message);
                self.state = LoadState::Error;
            }
        }
    }

    /// Rows of the last page, empty before the first load.
    #[must_use]
    pub fn rows(&self) -> &[T] {
        self.page
            .as_ref()
            .map(|page| page.results.as_slice())
            .unwrap_or_default()
    }
}

/// Turn a list fetch into what the page should apply.
///
/// `None` means a newer fetch for the same list started and this result must
/// be dropped; errors become the error panel text for `plural`.
#[must_use]
pub fn settle_fetch<T>(
    result: ClientResult<FetchOutcome<Page<T>>>,
    plural: &str,
) -> Option<Result<Page<T>, String>> {
    match result {
        Ok(outcome) => outcome.into_stored().map(Ok),
        Err(_) => Some(Err(load_failed(plural))),
    }
}

/// Pagination controls derived from a page and the committed query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageView {
    /// Current 1-based page.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Total pages, rounded up.
    pub total_pages: u64,
    /// Total matching rows.
    pub count: u64,
    /// Whether the server reports a previous page.
    pub can_previous: bool,
    /// Whether the server reports a next page.
    pub can_next: bool,
}

impl PageView {
    /// Build the view for `page` at `current` with `page_size` rows.
    #[must_use]
    pub fn new<T>(page: &Page<T>, current: u32, page_size: u32) -> Self {
        Self {
            page: current,
            page_size,
            total_pages: page.total_pages(page_size),
            count: page.count,
            can_previous: page.has_previous(),
            can_next: page.has_next(),
        }
    }

    /// Last page number for the "last page" button.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        u32::try_from(self.total_pages.max(1)).unwrap_or(u32::MAX)
    }

    /// `Page X of Y` caption.
    #[must_use]
    pub fn caption(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages.max(1))
    }

    /// `Showing A to B of N <noun>(s).`
    #[must_use]
    pub fn range_caption(&self, noun: &str) -> String {
        let size = u64::from(self.page_size.max(1));
        let first = u64::from(self.page.max(1) - 1) * size + 1;
        let last = (u64::from(self.page.max(1)) * size).min(self.count);
        format!("Showing {first} to {last} of {} {noun}(s).", self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(count: u64, next: bool, previous: bool) -> Page<u32> {
        Page {
            count,
            next: next.then(|| "n".to_string()),
            previous: previous.then(|| "p".to_string()),
            results: Vec::new(),
        }
    }

    #[test]
    fn defaults_fill_in_and_stay_out_of_the_url() {
        let query = ListQuery::<MovieFilters>::from_query_string("");
        assert_eq!(query.ordering(), MovieOrdering::Newest);
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(query.to_query_string(), "");
        assert_eq!(
            query.filters().to_query_string(),
            "?ordering=-release_date&page=1&page_size=10"
        );
    }

    #[test]
    fn committing_search_resets_page() {
        let mut query = ListQuery::<MovieFilters>::from_query_string("page=4");
        assert_eq!(query.page(), 4);
        assert!(query.commit_search("heat"));
        assert_eq!(query.page(), 1);
        assert_eq!(query.to_query_string(), "?search=heat");
    }

    #[test]
    fn ordering_and_page_size_reset_page() {
        let mut query = ListQuery::<UserFilters>::new();
        query.set_page(3);
        assert!(query.set_ordering(UserOrdering::EmailAsc));
        assert_eq!(query.page(), 1);

        query.set_page(2);
        assert!(query.set_page_size(50));
        assert_eq!(query.page(), 1);
        assert_eq!(query.to_query_string(), "?ordering=email&page_size=50");
    }

    #[test]
    fn direct_page_change_keeps_requested_page() {
        let mut query = ListQuery::<GenreFilters>::new();
        assert!(query.set_page(5));
        assert_eq!(query.page(), 5);
        assert!(!query.set_page(5));
        assert!(query.set_page(0));
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn resetting_to_same_search_on_page_one_is_not_a_change() {
        let mut query = ListQuery::<GenreFilters>::from_query_string("search=dra");
        assert!(!query.commit_search("dra"));
    }

    #[test]
    fn status_select_maps_to_filter() {
        for (value, _) in STATUS_OPTIONS {
            assert_eq!(status_value(parse_status(value)), value);
        }
        assert_eq!(parse_status("maybe"), None);
    }

    #[test]
    fn resource_filters_reset_page() {
        let mut query = ListQuery::<MovieFilters>::from_query_string("page=2&page_size=20");
        assert!(query.update_filters(|filters| filters.is_active = Some(true)));
        assert_eq!(query.to_query_string(), "?is_active=true&page_size=20");
    }

    #[test]
    fn genre_query_round_trips_through_url() {
        let query = ListQuery::<GenreFilters>::from_query_string(
            "?search=sci+fi&ordering=-movies_count&page=2",
        );
        assert_eq!(query.search(), "sci fi");
        assert_eq!(query.ordering(), GenreOrdering::MostMovies);
        assert_eq!(
            query.to_query_string(),
            "?search=sci+fi&ordering=-movies_count&page=2"
        );
    }

    #[test]
    fn refresh_keeps_rows_but_query_change_shows_loading() {
        let mut data = ListData::<u32>::default();
        data.begin(true);
        data.resolve(Ok(Page {
            results: vec![1, 2],
            ..page_of(2, false, false)
        }));
        assert_eq!(data.state, LoadState::Ready);

        data.begin(false);
        assert_eq!(data.state, LoadState::Ready);
        assert_eq!(data.rows(), &[1, 2]);

        data.begin(true);
        assert_eq!(data.state, LoadState::Loading);
        data.resolve(Err("boom".to_string()));
        assert_eq!(data.state, LoadState::Error);
        assert_eq!(data.rows(), &[1, 2]);
    }

    #[test]
    fn superseded_fetch_is_dropped_and_errors_become_panel_text() {
        assert_eq!(settle_fetch::<u32>(Ok(FetchOutcome::Superseded), "genres"), None);
        let failed = settle_fetch::<u32>(
            Err(cinedesk_client::ClientError::Api {
                status: 500,
                body: "{}".to_string(),
            }),
            "genres",
        );
        assert_eq!(
            failed,
            Some(Err("Failed to load genres. Please try again later.".to_string()))
        );
        let stored = settle_fetch(Ok(FetchOutcome::Stored(page_of(0, false, false))), "genres");
        assert!(matches!(stored, Some(Ok(page)) if page.count == 0));
    }

    #[test]
    fn page_view_uses_server_links_and_rounds_up() {
        let view = PageView::new(&page_of(21, true, false), 1, 10);
        assert_eq!(view.total_pages, 3);
        assert!(view.can_next);
        assert!(!view.can_previous);
        assert_eq!(view.caption(), "Page 1 of 3");

        let last = PageView::new(&page_of(21, false, true), 3, 10);
        assert_eq!(last.range_caption("genre"), "Showing 21 to 21 of 21 genre(s).");

        let empty = PageView::new(&page_of(0, false, false), 1, 10);
        assert_eq!(empty.last_page(), 1);
        assert_eq!(empty.caption(), "Page 1 of 1");
    }
}
