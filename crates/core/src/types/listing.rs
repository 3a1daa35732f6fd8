//! Listing parameters shared by the paginated query surfaces.
//!
//! Sort fields are closed enums rather than free-form strings so the
//! database layer can map them to a whitelisted ORDER BY expression.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Sort field for store listings.
///
/// `Rating` compares by the derived average rating, not a stored column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreSortField {
    #[default]
    Name,
    Address,
    Rating,
    CreatedAt,
}

/// Sort field for user listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserSortField {
    #[default]
    Name,
    Email,
    Role,
    CreatedAt,
}

/// A 1-indexed page request.
///
/// Page numbers below 1 are treated as page 1; the page size is a fixed
/// configuration value owned by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PageRequest(u32);

// Manual Deserialize so the clamp also applies to query-string input.
impl<'de> Deserialize<'de> for PageRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let page = u32::deserialize(deserializer)?;
        Ok(Self::new(page))
    }
}

impl PageRequest {
    /// Create a page request, clamping 0 up to page 1.
    #[must_use]
    pub const fn new(page: u32) -> Self {
        if page == 0 { Self(1) } else { Self(page) }
    }

    /// The 1-indexed page number.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Row offset for this page at the given page size.
    #[must_use]
    pub const fn offset(self, page_size: u32) -> i64 {
        (self.0 as i64 - 1) * page_size as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self(1)
    }
}

/// One page of a listing plus the total match count for pagination UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total rows matching the filter, across all pages.
    pub total: i64,
    /// The 1-indexed page number served.
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    /// Assemble a page from a slice of items and the total match count.
    #[must_use]
    pub const fn new(items: Vec<T>, total: i64, request: PageRequest, page_size: u32) -> Self {
        Self {
            items,
            total,
            page: request.number(),
            page_size,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_zero() {
        assert_eq!(PageRequest::new(0).number(), 1);
        assert_eq!(PageRequest::new(1).number(), 1);
        assert_eq!(PageRequest::new(7).number(), 7);
    }

    #[test]
    fn test_page_request_clamps_zero_on_deserialize() {
        let page: PageRequest = serde_json::from_str("0").unwrap();
        assert_eq!(page.number(), 1);
    }

    #[test]
    fn test_offset_is_zero_based() {
        assert_eq!(PageRequest::new(1).offset(10), 0);
        assert_eq!(PageRequest::new(2).offset(10), 10);
        assert_eq!(PageRequest::new(3).offset(25), 50);
    }

    #[test]
    fn test_sort_order_sql() {
        assert_eq!(SortOrder::Asc.as_sql(), "ASC");
        assert_eq!(SortOrder::Desc.as_sql(), "DESC");
    }

    #[test]
    fn test_sort_fields_deserialize_snake_case() {
        let field: StoreSortField = serde_json::from_str("\"created_at\"").unwrap();
        assert_eq!(field, StoreSortField::CreatedAt);
        let field: UserSortField = serde_json::from_str("\"email\"").unwrap();
        assert_eq!(field, UserSortField::Email);
        assert!(serde_json::from_str::<StoreSortField>("\"password\"").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(StoreSortField::default(), StoreSortField::Name);
        assert_eq!(UserSortField::default(), UserSortField::Name);
        assert_eq!(SortOrder::default(), SortOrder::Asc);
        assert_eq!(PageRequest::default().number(), 1);
    }

    #[test]
    fn test_page_assembly() {
        let page = Page::new(vec!["a", "b"], 12, PageRequest::new(2), 10);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 12);
        assert_eq!(page.page, 2);
        assert_eq!(page.page_size, 10);
    }
}
