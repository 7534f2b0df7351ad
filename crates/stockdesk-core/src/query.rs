//! # List Queries
//!
//! One paginated, filterable query shape shared by every list page
//! (products, orders, customers, categories, users).
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Page controls ──► ListQuery ──► to_query_pairs() ──► GET /orders?...  │
//! │                                                                         │
//! │  page=3, page_size=20                  offset=40&limit=20               │
//! │  search="  acme "                      &search=acme                     │
//! │  sort=created_at desc                  &sort=created_at&order=desc      │
//! │  filters {status: shipped}             &status=shipped                  │
//! │                                                                         │
//! │  GET response ──► Page<T> { items, total, page, page_size }            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Offset/limit are passed straight through; the backend does the work.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::validate_search_query;
use crate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// A list page request.
///
/// ## Example
/// ```rust
/// use stockdesk_core::query::ListQuery;
///
/// let query = ListQuery::new(3, 20).with_filter("status", "shipped");
/// assert_eq!(query.offset(), 40);
/// assert_eq!(
///     query.to_query_pairs(),
///     vec![
///         ("offset".to_string(), "40".to_string()),
///         ("limit".to_string(), "20".to_string()),
///         ("status".to_string(), "shipped".to_string()),
///     ]
/// );
/// ```
///
/// Deserialization goes through the same clamps and trimming as the
/// builder methods, so a stored or URL-decoded query is always in range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    page: u32,
    page_size: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    search: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    sort: Option<SortSpec>,

    /// Equality filters, rendered in key order.
    #[serde(default)]
    filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        ListQuery::new(1, DEFAULT_PAGE_SIZE)
    }
}

impl ListQuery {
    /// Creates a query. Page 0 becomes 1; page size is clamped to
    /// `1..=MAX_PAGE_SIZE`.
    pub fn new(page: u32, page_size: u32) -> Self {
        ListQuery {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            search: None,
            sort: None,
            filters: BTreeMap::new(),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    /// Sets the search text, trimmed. Blank clears the search.
    ///
    /// Changing the search resets to page 1.
    pub fn with_search(mut self, search: &str) -> Result<Self, ValidationError> {
        let search = validate_search_query(search)?;
        self.search = (!search.is_empty()).then_some(search);
        self.page = 1;
        Ok(self)
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some(SortSpec {
            field: field.into(),
            direction,
        });
        self
    }

    /// Adds or replaces an equality filter. A blank value removes it.
    ///
    /// Changing a filter resets to page 1.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        if value.trim().is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value.trim().to_string());
        }
        self.page = 1;
        self
    }

    /// Moves to another page, keeping search, sort and filters.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u32 {
        self.page_size
    }

    /// Query-string pairs in a stable order: offset, limit, search, sort,
    /// then filters by key.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("offset".to_string(), self.offset().to_string()),
            ("limit".to_string(), self.limit().to_string()),
        ];

        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }

        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.field.clone()));
            pairs.push(("order".to_string(), sort.direction.as_str().to_string()));
        }

        pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));
        pairs
    }
}

/// Wire shape of [`ListQuery`] before clamping.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawListQuery {
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default = "default_page_size")]
    page_size: u32,
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    sort: Option<SortSpec>,
    #[serde(default)]
    filters: BTreeMap<String, String>,
}

fn first_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl TryFrom<RawListQuery> for ListQuery {
    type Error = ValidationError;

    fn try_from(raw: RawListQuery) -> Result<Self, Self::Error> {
        let mut query = ListQuery::new(raw.page, raw.page_size);
        if let Some(search) = raw.search.as_deref() {
            query = query.with_search(search)?;
        }
        for (key, value) in raw.filters {
            query = query.with_filter(key, value);
        }
        query.sort = raw.sort;
        // search and filters reset the page
        Ok(query.with_page(raw.page))
    }
}

impl<'de> Deserialize<'de> for ListQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawListQuery::deserialize(deserializer)?;
        ListQuery::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// One page of results from a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u64 {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.page_size))
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
