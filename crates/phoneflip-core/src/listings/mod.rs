//! Listing query engine.
//!
//! Turns [`Filters`] into paged `GET /listings` requests and folds the
//! responses into a single result buffer. Requests are split into
//! [`ListingFeed::begin`] and [`ListingFeed::complete`] so that the caller
//! owns the network call; every request carries a generation number and
//! completions for superseded requests are dropped.

use crate::config::DEFAULT_PAGE_SIZE;
use crate::filters::Filters;
use crate::models::Listing;
use crate::util::normalize_text_option;

/// Parameters of one `GET /listings` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub brand: Option<String>,
    pub city: Option<String>,
    pub condition: Option<String>,
    pub sort_by: String,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub search: Option<String>,
    pub page: u32,
    pub limit: usize,
}

impl ListingQuery {
    /// Build a query from `filters`.
    ///
    /// `search_override` wins over the stored search text when it is
    /// non-empty.
    pub fn from_filters(
        filters: &Filters,
        search_override: Option<&str>,
        page: u32,
        limit: usize,
    ) -> Self {
        let search = search_override
            .and_then(|search| normalize_text_option(Some(search.to_string())))
            .or_else(|| normalize_text_option(Some(filters.search.clone())));

        Self {
            brand: normalize_text_option(filters.brand.clone()),
            city: normalize_text_option(filters.city.clone()),
            condition: filters
                .condition
                .map(|condition| condition.as_str().to_string()),
            sort_by: filters.sort_by.as_str().to_string(),
            min_price: filters.min_price,
            max_price: filters.max_price,
            search,
            page: page.max(1),
            limit,
        }
    }

    /// Query-string pairs; empty criteria are omitted.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(9);
        if let Some(brand) = &self.brand {
            pairs.push(("brand", brand.clone()));
        }
        if let Some(city) = &self.city {
            pairs.push(("city", city.clone()));
        }
        if let Some(condition) = &self.condition {
            pairs.push(("condition", condition.clone()));
        }
        if !self.sort_by.is_empty() {
            pairs.push(("sort_by", self.sort_by.clone()));
        }
        if let Some(min_price) = self.min_price {
            pairs.push(("min_price", min_price.to_string()));
        }
        if let Some(max_price) = self.max_price {
            pairs.push(("max_price", max_price.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        pairs
    }

    /// Value of a query-string key, if it is sent.
    pub fn param(&self, key: &str) -> Option<String> {
        self.to_pairs()
            .into_iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }
}

/// An issued, not yet completed page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPage {
    pub generation: u64,
    pub append: bool,
    pub query: ListingQuery,
}

/// What [`ListingFeed::complete`] did with a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedOutcome {
    /// Page merged into the buffer.
    Applied { received: usize },
    /// Request failed; the buffer was cleared.
    Failed,
    /// A newer request was issued after this one; the response was dropped.
    Stale,
}

/// Paged listing result buffer.
#[derive(Debug, Clone)]
pub struct ListingFeed {
    items: Vec<Listing>,
    page: u32,
    has_more: bool,
    loading: bool,
    generation: u64,
    page_size: usize,
}

impl Default for ListingFeed {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListingFeed {
    pub fn new(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            has_more: false,
            loading: false,
            generation: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    pub const fn page(&self) -> u32 {
        self.page
    }

    /// `true` when the last page came back full.
    ///
    /// This is a heuristic: a final page holding exactly `page_size` items
    /// still reports more.
    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    pub const fn can_load_more(&self) -> bool {
        self.has_more && !self.loading
    }

    /// Start a request for `page` (default 1).
    ///
    /// A non-append request restarts pagination at the requested page.
    pub fn begin(
        &mut self,
        filters: &Filters,
        search_override: Option<&str>,
        page: Option<u32>,
        append: bool,
    ) -> PendingPage {
        let page = page.unwrap_or(1).max(1);
        self.generation += 1;
        self.loading = true;
        if !append {
            self.page = page;
        }

        PendingPage {
            generation: self.generation,
            append,
            query: ListingQuery::from_filters(filters, search_override, page, self.page_size),
        }
    }

    /// Start a request for the next page, or `None` when load-more is disabled.
    pub fn begin_load_more(&mut self, filters: &Filters) -> Option<PendingPage> {
        if !self.can_load_more() {
            return None;
        }
        let next_page = self.page + 1;
        Some(self.begin(filters, None, Some(next_page), true))
    }

    /// Fold a response into the buffer.
    pub fn complete<E>(
        &mut self,
        pending: &PendingPage,
        result: Result<Vec<Listing>, E>,
    ) -> FeedOutcome {
        if pending.generation != self.generation {
            tracing::debug!(
                stale = pending.generation,
                current = self.generation,
                "Dropping superseded listing response"
            );
            return FeedOutcome::Stale;
        }
        self.loading = false;

        match result {
            Ok(listings) => {
                let received = listings.len();
                self.has_more = received == self.page_size;
                self.page = pending.query.page;
                if pending.append {
                    self.items.extend(listings);
                } else {
                    self.items = listings;
                }
                FeedOutcome::Applied { received }
            }
            Err(_) => {
                self.items.clear();
                self.has_more = false;
                FeedOutcome::Failed
            }
        }
    }

    /// Drop everything, including any outstanding request.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self::new(self.page_size);
        self.generation = generation;
    }
}
