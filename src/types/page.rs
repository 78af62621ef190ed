//! Paging types shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Largest page size the client will request.
pub const MAX_LIMIT: u32 = 1000;

/// Page size used by [`Limit::default`], matching the server default.
pub const DEFAULT_LIMIT: u32 = 25;

/// Requested window of a paged resource.
///
/// `start` is the zero-based offset of the first item and `limit` the
/// maximum number of items; the window ends (exclusively) at [`Limit::end`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limit {
    start: u32,
    limit: u32,
}

impl Limit {
    /// Create a window. `limit` is clamped to `1..=MAX_LIMIT`.
    #[must_use]
    pub fn new(start: u32, limit: u32) -> Self {
        Self {
            start,
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Window of `limit` items starting at the first one.
    #[must_use]
    pub fn first(limit: u32) -> Self {
        Self::new(0, limit)
    }

    /// Offset of the first requested item.
    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Maximum number of items requested.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Exclusive end offset of the window.
    #[must_use]
    pub fn end(&self) -> u32 {
        self.start.saturating_add(self.limit)
    }

    /// The window following `page`, keeping this page size.
    ///
    /// Returns `None` when `page` is the last page.
    #[must_use]
    pub fn next<T>(&self, page: &Page<T>) -> Option<Self> {
        page.next_page_start().map(|start| Self::new(start, self.limit))
    }

    /// `start` and `limit` as query parameters.
    #[must_use]
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("start", self.start.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::first(DEFAULT_LIMIT)
    }
}

/// One page of a paged resource, as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Number of items in this page
    #[serde(default)]
    pub size: u32,
    /// Page size the server applied
    #[serde(default)]
    pub limit: u32,
    /// Whether there are no further pages
    #[serde(default = "default_true")]
    pub is_last_page: bool,
    /// Offset of the first item in this page
    #[serde(default)]
    pub start: u32,
    /// Offset to request for the next page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_start: Option<u32>,
    /// Items in this page
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

fn default_true() -> bool {
    true
}

impl<T> Page<T> {
    /// An empty last page starting at `start`.
    #[must_use]
    pub fn empty(start: u32) -> Self {
        Self {
            size: 0,
            limit: 0,
            is_last_page: true,
            start,
            next_page_start: None,
            values: Vec::new(),
        }
    }

    /// Number of items in this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    /// Offset of the next page, or `None` if this is the last page.
    ///
    /// A page that claims more items but reports no `nextPageStart` is
    /// treated as the last one.
    #[must_use]
    pub fn next_page_start(&self) -> Option<u32> {
        if self.is_last_page {
            None
        } else {
            self.next_page_start
        }
    }

    /// The window for the next page, reusing the page size the server applied.
    #[must_use]
    pub fn next_limit(&self) -> Option<Limit> {
        self.next_page_start()
            .map(|start| Limit::new(start, self.limit.max(1)))
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    /// Convert the items, keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            size: self.size,
            limit: self.limit,
            is_last_page: self.is_last_page,
            start: self.start,
            next_page_start: self.next_page_start,
            values: self.values.into_iter().map(f).collect(),
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_clamps_page_size() {
        assert_eq!(Limit::new(0, 0).limit(), 1);
        assert_eq!(Limit::new(0, 5000).limit(), MAX_LIMIT);
        assert_eq!(Limit::new(10, 50).limit(), 50);
    }

    #[test]
    fn test_limit_end() {
        let limit = Limit::new(25, 25);
        assert_eq!(limit.start(), 25);
        assert_eq!(limit.end(), 50);
        assert_eq!(Limit::new(u32::MAX, 10).end(), u32::MAX);
    }

    #[test]
    fn test_limit_query_params() {
        let params = Limit::new(100, 50).query_params();
        assert_eq!(params[0], ("start", "100".to_string()));
        assert_eq!(params[1], ("limit", "50".to_string()));
    }

    #[test]
    fn test_default_limit() {
        let limit = Limit::default();
        assert_eq!(limit.start(), 0);
        assert_eq!(limit.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_page_deserialize() {
        let json = r#"{
            "size": 2,
            "limit": 2,
            "isLastPage": false,
            "values": ["a", "b"],
            "start": 0,
            "nextPageStart": 2
        }"#;

        let page: Page<String> = serde_json::from_str(json).unwrap();
        assert_eq!(page.len(), 2);
        assert!(!page.is_last_page);
        assert_eq!(page.next_page_start(), Some(2));
        assert_eq!(page.next_limit(), Some(Limit::new(2, 2)));
        assert_eq!(Limit::new(0, 2).next(&page), Some(Limit::new(2, 2)));
    }

    #[test]
    fn test_last_page_has_no_next() {
        let json = r#"{"size": 1, "limit": 25, "isLastPage": true, "values": [1], "start": 0}"#;

        let page: Page<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.next_page_start(), None);
        assert_eq!(Limit::default().next(&page), None);
    }

    #[test]
    fn test_page_map_keeps_metadata() {
        let page = Page {
            size: 2,
            limit: 2,
            is_last_page: false,
            start: 4,
            next_page_start: Some(6),
            values: vec![1, 2],
        };

        let mapped = page.map(|v| v * 10);
        assert_eq!(mapped.values, vec![10, 20]);
        assert_eq!(mapped.start, 4);
        assert_eq!(mapped.next_page_start(), Some(6));
    }

    #[test]
    fn test_empty_page() {
        let page: Page<u32> = Page::empty(0);
        assert!(page.is_empty());
        assert_eq!(page.next_limit(), None);
    }
}
