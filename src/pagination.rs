//! Pagination utilities for OTX list and search endpoints.
//!
//! The server is authoritative for paging: each envelope carries opaque
//! `next`/`previous` links, and the options for the following request are
//! read back out of those links instead of being tracked client-side.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{OtxError, Result};

/// Largest page size the OTX API serves.
pub const MAX_PAGE_SIZE: u32 = 20;

/// Page size used by list endpoints when none (or an invalid one) is given.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Page size used by the search-all helpers.
pub const SEARCH_ALL_PAGE_SIZE: u32 = 5;

/// Base used to resolve relative page links.
const PLACEHOLDER_BASE: &str = "http://localhost/";

/// Options for a single page request.
///
/// Serializes as `page`, `limit` and `q`; unset or zero fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListOptions {
    /// Page number (1-indexed).
    #[serde(default, skip_serializing_if = "is_unset")]
    pub page: Option<u32>,

    /// Number of items per page, at most [`MAX_PAGE_SIZE`].
    #[serde(rename = "limit", default, skip_serializing_if = "is_unset")]
    pub per_page: Option<u32>,

    /// Search query. Only sent by search endpoints.
    #[serde(rename = "q", default, skip_serializing_if = "is_blank")]
    pub query: Option<String>,
}

fn is_unset(value: &Option<u32>) -> bool {
    matches!(value, None | Some(0))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

impl ListOptions {
    /// Options for a specific page and page size.
    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            query: None,
        }
    }

    /// Options for the first page of a search.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            page: None,
            per_page: None,
            query: Some(query.into()),
        }
    }

    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Page size clamped to `[0, MAX_PAGE_SIZE]`, or `default` when unset
    /// or out of range.
    pub fn effective_per_page(&self, default: u32) -> u32 {
        match self.per_page {
            Some(n) if n <= MAX_PAGE_SIZE => n,
            _ => default,
        }
    }

    /// Options as sent to a list endpoint: bounded page size, no query.
    #[must_use]
    pub fn for_listing(&self) -> Self {
        Self {
            page: self.page,
            per_page: Some(self.effective_per_page(DEFAULT_PAGE_SIZE)),
            query: None,
        }
    }

    /// Options as sent to a search endpoint: bounded page size, query kept.
    #[must_use]
    pub fn for_search(&self) -> Self {
        Self {
            page: self.page,
            per_page: Some(self.effective_per_page(DEFAULT_PAGE_SIZE)),
            query: self.query.clone(),
        }
    }

    /// Encode as a URL query string (without the leading `?`).
    ///
    /// # Errors
    ///
    /// Returns [`OtxError::Query`] if encoding fails.
    pub fn to_query_string(&self) -> Result<String> {
        Ok(serde_urlencoded::to_string(self)?)
    }

    /// Read options back out of a page link returned by the server.
    ///
    /// A negative `page` becomes 1 and an absent one means the first page.
    /// A `limit` outside `[0, MAX_PAGE_SIZE]` becomes [`MAX_PAGE_SIZE`].
    /// `q` is carried over when present.
    ///
    /// # Errors
    ///
    /// Returns [`OtxError::InvalidPageParam`] when `page` or `limit` is not
    /// an integer, and [`OtxError::Url`] when the link cannot be parsed.
    pub fn from_page_url(link: &str) -> Result<Self> {
        let url = match Url::parse(link) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                Url::parse(PLACEHOLDER_BASE)?.join(link)?
            }
            Err(e) => return Err(e.into()),
        };

        let mut opts = ListOptions {
            page: Some(1),
            ..Default::default()
        };

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "page" => {
                    let page = parse_int("page", &value)?;
                    opts.page = Some(if page < 0 { 1 } else { saturate(page) });
                }
                "limit" => {
                    let limit = parse_int("limit", &value)?;
                    opts.per_page = Some(if (0..=i64::from(MAX_PAGE_SIZE)).contains(&limit) {
                        saturate(limit)
                    } else {
                        tracing::warn!(limit, "page link limit out of range, using {}", MAX_PAGE_SIZE);
                        MAX_PAGE_SIZE
                    });
                }
                "q" => opts.query = Some(value.into_owned()),
                _ => {}
            }
        }

        Ok(opts)
    }
}

fn parse_int(param: &'static str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|source| OtxError::InvalidPageParam {
            param,
            value: value.to_string(),
            source,
        })
}

fn saturate(value: i64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Number of pages a count-bounded search walks through.
///
/// `floor(count / per_page)` when `count > 0`, otherwise 1. A zero
/// `per_page` is treated as [`SEARCH_ALL_PAGE_SIZE`].
pub fn total_pages(count: u64, per_page: u32) -> u64 {
    let per_page = if per_page == 0 {
        SEARCH_ALL_PAGE_SIZE
    } else {
        per_page
    };
    if count > 0 {
        count / u64::from(per_page)
    } else {
        1
    }
}

/// A page of results from the OTX API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct PageEnvelope<T> {
    /// The items on this page.
    #[serde(rename = "results", default)]
    pub items: Vec<T>,

    /// Link to the next page, if any.
    #[serde(rename = "next", default)]
    pub next_page_url: Option<String>,

    /// Link to the previous page, if any.
    #[serde(rename = "previous", alias = "prev", default)]
    pub prev_page_url: Option<String>,

    /// Total number of items across all pages, if reported.
    #[serde(rename = "count", default)]
    pub total_count: Option<u64>,
}

impl<T> Default for PageEnvelope<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page_url: None,
            prev_page_url: None,
            total_count: None,
        }
    }
}

impl<T> PageEnvelope<T> {
    /// Options for fetching the next page.
    ///
    /// # Errors
    ///
    /// Returns [`OtxError::NoPage`] on the last page, or a parse error if the
    /// link is malformed.
    pub fn next_page_options(&self) -> Result<ListOptions> {
        match &self.next_page_url {
            Some(link) => ListOptions::from_page_url(link),
            None => Err(OtxError::NoPage),
        }
    }

    /// Options for fetching the previous page.
    ///
    /// # Errors
    ///
    /// Returns [`OtxError::NoPage`] on the first page, or a parse error if
    /// the link is malformed.
    pub fn prev_page_options(&self) -> Result<ListOptions> {
        match &self.prev_page_url {
            Some(link) => ListOptions::from_page_url(link),
            None => Err(OtxError::NoPage),
        }
    }

    /// Whether the server reported a next page.
    pub fn has_next(&self) -> bool {
        self.next_page_url.is_some()
    }

    /// Whether the server reported a previous page.
    pub fn has_prev(&self) -> bool {
        self.prev_page_url.is_some()
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PageEnvelope<U> {
        PageEnvelope {
            items: self.items.into_iter().map(f).collect(),
            next_page_url: self.next_page_url,
            prev_page_url: self.prev_page_url,
            total_count: self.total_count,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for PageEnvelope<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PageEnvelope<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
