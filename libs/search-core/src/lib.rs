//! Storage-agnostic search and pagination contract.
//!
//! Callers describe a search with [`SearchQuery`] (free-text term, zero-based page,
//! page size, optional sort key) and receive a [`Page`] carrying the items plus
//! [`PageInfo`] totals. Translating a query into SQL belongs to the storage layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod page;
pub use page::{page_offset, Page, PageInfo};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDir {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDir::Asc),
            "desc" | "descending" => Ok(SortDir::Desc),
            _ => Err(Error::InvalidSortDirection(s.to_string())),
        }
    }
}

/// A single ordering key: API-level field name plus direction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub dir: SortDir,
}

impl SortKey {
    pub fn new(field: impl Into<String>, dir: SortDir) -> Self {
        Self {
            field: field.into(),
            dir,
        }
    }
}

/// A free-text search request over one entity type.
///
/// An empty `term` matches every row, so "list all, paginated" goes through the
/// same path as "search, paginated".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    /// Zero-based page index.
    pub page: u64,
    /// Requested page size; `None` falls back to [`PageLimits::default`].
    pub page_size: Option<u64>,
    /// Requested ordering; `None` means the entity's primary label ascending.
    pub sort: Option<SortKey>,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// Match-everything query.
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, page: u64, page_size: u64) -> Self {
        self.page = page;
        self.page_size = Some(page_size);
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, dir: SortDir) -> Self {
        self.sort = Some(SortKey::new(field, dir));
        self
    }

    /// The term in the form used for case-insensitive matching.
    pub fn normalized_term(&self) -> String {
        fold_case(&self.term)
    }

    pub fn matches_everything(&self) -> bool {
        self.term.is_empty()
    }
}

/// Case folding shared by stored search columns and query terms.
///
/// Full Unicode lowercasing, so `"ÉVORA"`, `"Évora"` and `"évora"` fold to the
/// same text. Databases only fold ASCII reliably, so text is folded before it
/// reaches them.
pub fn fold_case(s: &str) -> String {
    s.to_lowercase()
}

/// Default and maximum page sizes applied when resolving a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    pub default: u64,
    pub max: u64,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default: 50,
            max: 1000,
        }
    }
}

/// Resolve the effective page size: omitted → default, above max → max, zero → error.
pub fn resolve_page_size(requested: Option<u64>, limits: PageLimits) -> Result<u64, Error> {
    match requested {
        Some(0) => Err(Error::InvalidPageSize),
        Some(n) => Ok(n.min(limits.max.max(1))),
        None => Ok(limits.default.clamp(1, limits.max.max(1))),
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("page size must be a positive number")]
    InvalidPageSize,

    #[error("unsupported sort field: {0}")]
    InvalidSortField(String),

    #[error("unsupported sort direction: {0}")]
    InvalidSortDirection(String),
}

#[cfg(test)]
mod tests;
