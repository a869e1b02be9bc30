//! # Search Controller
//!
//! The home screen: type-ahead search over books or categories, client-side
//! filters on book results, and local category browsing.
//!
//! ## Request Sequencing
//! Every search gets a ticket. Only the completion holding the newest ticket
//! is applied, so a slow early response can't overwrite a fast later one.
//! Clearing results or switching mode retires the outstanding ticket too.
//!
//! ```text
//! begin_search("gat")  ──► ticket 1 ─────────────────────────┐ (slow)
//! begin_search("gatsby") ► ticket 2 ──┐                      │
//!                                     ▼                      ▼
//!                          complete(#2) applied   complete(#1) dropped
//! ```
//!
//! ## Which Endpoint
//! | Mode | Category selected | Call |
//! |---|---|---|
//! | Books | yes | `Books/search-book-in-category/{q}/{id}` |
//! | Books | no | `Books/search-book-with-category/{q}` |
//! | Categories | - | `Categories/search/{q}` |
//!
//! Book hits then go through the local [`BookFilter`] (category, price band,
//! sort) before they're shown.

use bookstore_catalog::{CatalogClient, CatalogResult};
use bookstore_core::catalog::{self, BookFilter, PriceRange, SortBy};
use bookstore_core::validation::validate_search_query;
use bookstore_core::{Book, Category};
use tracing::{debug, error, warn};

use super::StateView;
use crate::state::BookstoreState;
use crate::Storefront;

// =============================================================================
// Request / Response
// =============================================================================

/// What the search box searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    #[default]
    Books,
    Categories,
}

/// A search ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub ticket: u64,
    pub mode: SearchMode,
    pub query: String,
    /// Restricts a book search to one category.
    pub category_id: Option<i64>,
}

/// What came back.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchHits {
    Books(Vec<Book>),
    Categories(Vec<Category>),
}

#[derive(Debug)]
pub struct SearchResponse {
    pub ticket: u64,
    pub mode: SearchMode,
    pub result: CatalogResult<SearchHits>,
}

impl SearchRequest {
    /// Calls the endpoint this request maps to.
    pub async fn run(&self, catalog: &CatalogClient) -> SearchResponse {
        let result = match (self.mode, self.category_id) {
            (SearchMode::Books, Some(category_id)) => catalog
                .books()
                .search_in_category(&self.query, category_id)
                .await
                .map(SearchHits::Books),
            (SearchMode::Books, None) => catalog
                .books()
                .search_with_category(&self.query)
                .await
                .map(SearchHits::Books),
            (SearchMode::Categories, _) => catalog
                .categories()
                .search(&self.query)
                .await
                .map(SearchHits::Categories),
        };

        SearchResponse {
            ticket: self.ticket,
            mode: self.mode,
            result,
        }
    }
}

/// A category opened from the category grid, with its books.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBrowse {
    pub category: Category,
    pub books: Vec<Book>,
}

// =============================================================================
// Controller
// =============================================================================

#[derive(Debug)]
pub struct SearchController {
    view: StateView,

    query: String,
    mode: SearchMode,
    search_category: Option<i64>,
    filter: BookFilter,

    all_books: Vec<Book>,
    categories: Vec<Category>,

    search_results: Vec<Book>,
    filtered_books: Vec<Book>,
    filtered_categories: Vec<Category>,
    suggestions: Vec<String>,
    show_book_results: bool,
    show_category_results: bool,
    searching: bool,

    browse: Option<CategoryBrowse>,

    latest_ticket: u64,
}

impl SearchController {
    pub fn new(store: &mut Storefront) -> Self {
        SearchController {
            view: StateView::attach(store),
            query: String::new(),
            mode: SearchMode::Books,
            search_category: None,
            filter: BookFilter::default(),
            all_books: Vec::new(),
            categories: Vec::new(),
            search_results: Vec::new(),
            filtered_books: Vec::new(),
            filtered_categories: Vec::new(),
            suggestions: Vec::new(),
            show_book_results: false,
            show_category_results: false,
            searching: false,
            browse: None,
            latest_ticket: 0,
        }
    }

    pub fn dispose(self) {
        self.view.dispose();
    }

    /// The shared snapshot (for the cart badge).
    pub fn view(&mut self) -> &BookstoreState {
        self.view.sync()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads categories and every book for local browsing. These stay on
    /// this screen; the container isn't touched.
    pub async fn load(&mut self, store: &Storefront) {
        self.load_categories(store).await;

        let result = store.catalog().books().list().await;
        match result {
            Ok(books) => self.all_books = books,
            Err(e) => error!(error = %e, "Error loading books"),
        }
    }

    async fn load_categories(&mut self, store: &Storefront) {
        let result = store.catalog().categories().list().await;
        match result {
            Ok(categories) => self.categories = categories,
            Err(e) => error!(error = %e, "Error loading categories"),
        }
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Stores the search box text and refreshes suggestions.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        if self.query.trim().is_empty() {
            self.clear_results();
        } else {
            self.generate_suggestions();
        }
    }

    /// Switches between book and category search, dropping all results.
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
        self.clear_results();
        self.browse = None;
    }

    /// Picks the category a book search is restricted to. Results are
    /// cleared; if there's a query, the returned request re-runs it.
    pub fn set_search_category(&mut self, category_id: Option<i64>) -> Option<SearchRequest> {
        self.search_category = category_id;
        self.clear_results();
        if self.query.trim().is_empty() {
            None
        } else {
            self.begin_search()
        }
    }

    pub fn set_category_filter(&mut self, category_id: Option<i64>) {
        self.filter.category_id = category_id;
        self.apply_filters();
    }

    pub fn set_price_range(&mut self, range: Option<PriceRange>) {
        self.filter.price_range = range;
        self.apply_filters();
    }

    pub fn set_sort_by(&mut self, sort_by: SortBy) {
        self.filter.sort_by = sort_by;
        self.apply_filters();
    }

    /// Uses `suggestion` as the query and returns the search to run.
    pub fn select_suggestion(&mut self, suggestion: &str) -> Option<SearchRequest> {
        self.query = suggestion.to_string();
        self.suggestions.clear();
        self.begin_search()
    }

    // =========================================================================
    // Searching
    // =========================================================================

    /// Issues a ticket for the current query. `None` (and cleared results)
    /// when the query is blank or too long.
    pub fn begin_search(&mut self) -> Option<SearchRequest> {
        let query = match validate_search_query(&self.query) {
            Ok(query) => query,
            Err(e) => {
                debug!(error = %e, "Search skipped");
                self.clear_results();
                return None;
            }
        };

        self.latest_ticket += 1;
        self.searching = true;

        match self.mode {
            SearchMode::Books => self.show_category_results = false,
            SearchMode::Categories => self.show_book_results = false,
        }

        Some(SearchRequest {
            ticket: self.latest_ticket,
            mode: self.mode,
            query,
            category_id: match self.mode {
                SearchMode::Books => self.search_category,
                SearchMode::Categories => None,
            },
        })
    }

    /// Applies `response` if it answers the newest request. Returns whether
    /// it was applied.
    pub fn complete(&mut self, response: SearchResponse) -> bool {
        if response.ticket != self.latest_ticket {
            debug!(
                ticket = response.ticket,
                latest = self.latest_ticket,
                "Discarding stale search response"
            );
            return false;
        }

        self.searching = false;

        match (response.mode, response.result) {
            (_, Ok(SearchHits::Books(books))) => {
                self.search_results = books;
                self.apply_filters();
                self.show_book_results = true;
            }
            (_, Ok(SearchHits::Categories(categories))) => {
                self.filtered_categories = categories;
                self.show_category_results = true;
            }
            (SearchMode::Books, Err(e)) => {
                error!(error = %e, "Error searching books");
                self.search_results.clear();
                self.filtered_books.clear();
                self.show_book_results = true;
            }
            (SearchMode::Categories, Err(e)) => {
                error!(error = %e, "Error searching categories");
                self.filtered_categories.clear();
                self.show_category_results = true;
            }
        }
        true
    }

    /// Runs the current query to completion.
    pub async fn search(&mut self, store: &Storefront) -> bool {
        match self.begin_search() {
            Some(request) => {
                let response = request.run(store.catalog()).await;
                self.complete(response)
            }
            None => false,
        }
    }

    fn abandon_pending(&mut self) {
        if self.searching {
            debug!(ticket = self.latest_ticket, "Abandoning in-flight search");
        }
        self.latest_ticket += 1;
        self.searching = false;
    }

    fn apply_filters(&mut self) {
        self.filtered_books = self.filter.apply(&self.search_results);
    }

    fn generate_suggestions(&mut self) {
        let vocabulary: &[&str] = match self.mode {
            SearchMode::Books => &catalog::BOOK_SUGGESTIONS,
            SearchMode::Categories => &catalog::CATEGORY_SUGGESTIONS,
        };
        self.suggestions = catalog::suggestions(vocabulary, &self.query);
    }

    // =========================================================================
    // Resetting
    // =========================================================================

    /// Drops every result and retires any search still in flight, so its
    /// completion is discarded.
    pub fn clear_results(&mut self) {
        self.abandon_pending();
        self.show_book_results = false;
        self.show_category_results = false;
        self.search_results.clear();
        self.filtered_books.clear();
        self.filtered_categories.clear();
        self.suggestions.clear();
    }

    /// Resets the query and every filter, then reloads categories.
    pub async fn clear_search(&mut self, store: &Storefront) {
        self.query.clear();
        self.search_category = None;
        self.filter = BookFilter::default();
        self.clear_results();
        self.load_categories(store).await;
    }

    // =========================================================================
    // Category Browsing
    // =========================================================================

    /// Shows the loaded books of one category. `false` if the category isn't
    /// among the loaded ones.
    pub fn browse_category(&mut self, category_id: i64) -> bool {
        self.clear_results();

        let Some(category) = self
            .categories
            .iter()
            .find(|c| c.id == Some(category_id))
            .cloned()
        else {
            warn!(category_id, "Browsing an unknown category");
            self.browse = None;
            return false;
        };

        let books = self
            .all_books
            .iter()
            .filter(|b| b.category_id == category_id)
            .cloned()
            .collect();
        self.browse = Some(CategoryBrowse { category, books });
        true
    }

    pub fn back_from_category(&mut self) {
        self.browse = None;
    }

    // =========================================================================
    // Actions
    // =========================================================================

    pub fn add_to_cart(&mut self, store: &mut Storefront, book: &Book) {
        super::add_to_cart(store, book);
    }

    /// Shows a short preview of `book`.
    pub fn quick_view(&self, store: &Storefront, book: &Book) {
        let preview: String = book.description.chars().take(100).collect();
        store.notifier().info(
            "Quick View",
            &format!("\"{}\" by {} - {}...", book.name, book.author, preview),
        );
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn filter(&self) -> &BookFilter {
        &self.filter
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Filtered and sorted book hits.
    pub fn book_results(&self) -> &[Book] {
        &self.filtered_books
    }

    pub fn category_results(&self) -> &[Category] {
        &self.filtered_categories
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    pub fn showing_book_results(&self) -> bool {
        self.show_book_results
    }

    pub fn showing_category_results(&self) -> bool {
        self.show_category_results
    }

    pub fn browsing(&self) -> Option<&CategoryBrowse> {
        self.browse.as_ref()
    }

    /// Name of category `id`, or empty.
    pub fn category_name(&self, id: i64) -> &str {
        self.categories
            .iter()
            .find(|c| c.id == Some(id))
            .map(|c| c.name.as_str())
            .unwrap_or("")
    }
}
