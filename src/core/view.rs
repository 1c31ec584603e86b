//! Per-screen engine instance: filter state, pagination and mutations together

use crate::core::clock::Clock;
use crate::core::collection::Collection;
use crate::core::entity::Record;
use crate::core::error::ConsoleResult;
use crate::core::filter::{FilterComposer, FilterState, SortSpec};
use crate::core::mutation;
use crate::core::predicate::{CategoryFilter, DateRange, NumericRange, Tab};
use crate::core::query::{Page, PageIndexing, PaginationState, DEFAULT_PAGE_SIZE};
use crate::core::schema::EntitySchema;

/// List screen over one record type
///
/// Owns the authoritative collection together with the screen's filter and
/// pagination state. Every setter and every mutation re-clamps the page
/// against the newly filtered result, so the page index is always valid.
///
/// # Example
/// ```rust
/// use backstage::prelude::*;
/// use backstage::entities::genre::{Genre, GenrePatch};
///
/// let mut view: ListView<Genre> = ListView::new(Genre::schema(), Collection::new());
/// for name in ["Jazz", "Soul", "Afrobeat"] {
///     view.create(GenrePatch::default().name(name)).unwrap();
/// }
/// view.set_search("o");
/// assert_eq!(view.visible().items.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ListView<R: Record> {
    composer: FilterComposer<R>,
    collection: Collection<R>,
    filter: FilterState,
    pagination: PaginationState,
    clock: Clock,
}

impl<R: Record> ListView<R> {
    /// View over `collection` using the record type's tabs
    ///
    /// Page size and indexing come from the schema, falling back to
    /// [`DEFAULT_PAGE_SIZE`] and one-based pages.
    pub fn new(schema: EntitySchema, collection: Collection<R>) -> Self {
        Self::with_tabs(schema, R::tabs(), collection)
    }

    pub fn with_tabs(schema: EntitySchema, tabs: Vec<Tab<R>>, collection: Collection<R>) -> Self {
        let pagination = PaginationState::new(
            schema.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            schema.indexing.unwrap_or_default(),
        );
        Self {
            composer: FilterComposer::new(schema, tabs),
            collection,
            filter: FilterState::default(),
            pagination,
            clock: Clock::System,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_page_size(mut self, page_size: usize, indexing: PageIndexing) -> Self {
        self.pagination = PaginationState::new(page_size, indexing);
        self
    }

    pub fn schema(&self) -> &EntitySchema {
        self.composer.schema()
    }

    pub fn tabs(&self) -> &[Tab<R>] {
        self.composer.tabs()
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    /// Authoritative collection, unfiltered, for aggregation
    pub fn records(&self) -> &Collection<R> {
        &self.collection
    }

    /// Filtered and sorted records, every page
    pub fn filtered(&self) -> Vec<R> {
        self.composer
            .apply(self.collection.as_slice(), &self.filter, self.clock.today())
    }

    /// Records on the current page
    pub fn visible(&self) -> Page<R> {
        let page = self.pagination.slice(self.filtered());
        tracing::debug!(
            entity_type = R::entity_type(),
            page = page.meta.page,
            total = page.meta.total,
            "page computed"
        );
        page
    }

    // ------------------------------------------------------------------
    // Filter setters
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.filter.search = term.into();
        self.reclamp();
    }

    pub fn set_category(&mut self, field: impl Into<String>, value: impl Into<CategoryFilter>) {
        self.filter.set_category(field, value);
        self.reclamp();
    }

    pub fn set_tab(&mut self, key: impl Into<String>) {
        self.filter.tab = Some(key.into());
        self.reclamp();
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.filter.date_range = range;
        self.reclamp();
    }

    pub fn add_numeric_range(&mut self, range: NumericRange) {
        self.filter.numeric_ranges.retain(|r| r.field != range.field);
        self.filter.numeric_ranges.push(range);
        self.reclamp();
    }

    /// Sort by an expression such as `plays:desc`
    pub fn set_sort(&mut self, expression: &str) -> ConsoleResult<()> {
        let sort: SortSpec = expression.parse()?;
        self.filter.sort = Some(sort);
        Ok(())
    }

    pub fn clear_sort(&mut self) {
        self.filter.sort = None;
    }

    /// Replace the whole filter state at once
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.reclamp();
    }

    pub fn clear_filters(&mut self) {
        self.filter.clear();
        self.reclamp();
    }

    // ------------------------------------------------------------------
    // Page navigation
    // ------------------------------------------------------------------

    pub fn set_page(&mut self, page: usize) {
        self.pagination.set_page(page);
        self.reclamp();
    }

    pub fn next_page(&mut self) {
        self.set_page(self.pagination.page().saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.pagination.page().saturating_sub(1));
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create a record and return its identity
    pub fn create(&mut self, draft: R::Patch) -> ConsoleResult<R::Id> {
        let created = mutation::create(&self.collection, draft, self.schema(), self.clock.now())?;
        let id = created.id().clone();
        self.replace(created.collection);
        Ok(id)
    }

    pub fn update(&mut self, id: &R::Id, patch: R::Patch) -> ConsoleResult<()> {
        let next = mutation::update(&self.collection, id, patch, self.schema(), self.clock.now())?;
        self.replace(next);
        Ok(())
    }

    pub fn delete(&mut self, id: &R::Id) {
        let next = mutation::delete(&self.collection, id);
        self.replace(next);
    }

    /// Swap in a collection produced elsewhere (e.g. reloaded from a repository)
    pub fn replace(&mut self, collection: Collection<R>) {
        self.collection = collection;
        self.reclamp();
    }

    fn reclamp(&mut self) {
        let before = self.pagination.page();
        let total = self.filtered().len();
        if self.pagination.clamp(total) {
            tracing::warn!(
                entity_type = R::entity_type(),
                from = before,
                to = self.pagination.page(),
                "stale page index clamped"
            );
        }
    }
}
