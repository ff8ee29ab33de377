//! Query vocabulary for paging through the server fleet.

use super::{ParseSortKeyError, ParseSortOrderError, ServerRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Page size applied when the caller supplies none or an out-of-range one.
const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size the registry will serve.
const MAX_PAGE_SIZE: usize = 100;

/// Column a server listing is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Sort by display name.
    Name,
    /// Sort by host.
    Host,
    /// Sort by port number.
    Port,
    /// Sort by SSH username.
    Username,
    /// Sort by creation timestamp.
    CreatedAt,
    /// Sort by last-update timestamp.
    UpdatedAt,
}

impl SortKey {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Host => "host",
            Self::Port => "port",
            Self::Username => "username",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SortKey {
    type Error = ParseSortKeyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "host" => Ok(Self::Host),
            "port" => Ok(Self::Port),
            "username" => Ok(Self::Username),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            _ => Err(ParseSortKeyError(value.to_owned())),
        }
    }
}

/// Direction a server listing is sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SortOrder {
    type Error = ParseSortOrderError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(ParseSortOrderError(value.to_owned())),
        }
    }
}

/// Listing parameters: page, page size, search text, and sort.
///
/// Out-of-range values are normalised on construction the same way the
/// registry normalises them server-side: page floors at 1, page size
/// outside 1-100 falls back to 10. Deserialization routes through the
/// same normalisation, so a decoded query can never hold a zero page or
/// page size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawServerQuery")]
pub struct ServerQuery {
    page: usize,
    page_size: usize,
    search: Option<String>,
    sort_key: SortKey,
    sort_order: SortOrder,
}

/// Unnormalised wire form of [`ServerQuery`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawServerQuery {
    page: usize,
    page_size: usize,
    search: Option<String>,
    sort_key: SortKey,
    sort_order: SortOrder,
}

impl Default for RawServerQuery {
    fn default() -> Self {
        let defaults = ServerQuery::default();
        Self {
            page: defaults.page,
            page_size: defaults.page_size,
            search: defaults.search,
            sort_key: defaults.sort_key,
            sort_order: defaults.sort_order,
        }
    }
}

impl From<RawServerQuery> for ServerQuery {
    fn from(raw: RawServerQuery) -> Self {
        Self::default()
            .with_page(raw.page)
            .with_page_size(raw.page_size)
            .with_sort_key(raw.sort_key)
            .with_sort_order(raw.sort_order)
            .with_search(raw.search.unwrap_or_default())
    }
}

impl Default for ServerQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
            sort_key: SortKey::CreatedAt,
            sort_order: SortOrder::Desc,
        }
    }
}

impl ServerQuery {
    /// Creates a query with registry defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page number, flooring at 1.
    #[must_use]
    pub const fn with_page(mut self, page: usize) -> Self {
        self.page = if page == 0 { 1 } else { page };
        self
    }

    /// Sets the page size; values outside 1-100 fall back to the default.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = if page_size == 0 || page_size > MAX_PAGE_SIZE {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        self
    }

    /// Sets the free-text search term; empty terms are dropped.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let term = search.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term)
        };
        self
    }

    /// Sets the sort column.
    #[must_use]
    pub const fn with_sort_key(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub const fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Returns the page number (1-based).
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns the search term, if any.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the sort column.
    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Returns the zero-based offset of the first record on this page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.page - 1) * self.page_size
    }
}

/// Pagination metadata accompanying a server listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page this listing covers (1-based).
    pub current_page: usize,
    /// Requested page size.
    pub page_size: usize,
    /// Total number of pages.
    pub total_pages: usize,
    /// Total number of matching records.
    pub total_items: usize,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl Pagination {
    /// Computes pagination metadata for a query over `total_items` records.
    #[must_use]
    pub const fn for_query(query: &ServerQuery, total_items: usize) -> Self {
        let total_pages = total_items.div_ceil(query.page_size());
        Self {
            current_page: query.page(),
            page_size: query.page_size(),
            total_pages,
            total_items,
            has_next: query.page() < total_pages,
            has_prev: query.page() > 1,
        }
    }
}

/// One page of server records plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerPage {
    /// Records on this page.
    pub servers: Vec<ServerRecord>,
    /// Pagination metadata.
    pub pagination: Pagination,
}
