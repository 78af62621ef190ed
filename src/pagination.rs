//! Walking every page of a paged resource.

use std::future::Future;

use tracing::{debug, warn};

use crate::error::Error;
use crate::types::{Limit, Page};

/// Fetch pages starting at `first` until the server reports the last page,
/// and return all items in order.
///
/// `fetch` is called once per page with that page's window; any accessor
/// returning `Page<T>` fits, e.g.
/// `collect_all(Limit::first(100), None, |l| client.projects().list(l))`.
///
/// Stops early once `max_items` items have been gathered, or if the server
/// reports a `nextPageStart` that does not move forward. `Some(0)` sends no
/// request at all.
///
/// # Errors
///
/// Returns the first error `fetch` returns; items gathered so far are
/// dropped.
pub async fn collect_all<T, F, Fut>(
    first: Limit,
    max_items: Option<usize>,
    mut fetch: F,
) -> Result<Vec<T>, Error>
where
    F: FnMut(Limit) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    if max_items == Some(0) {
        return Ok(Vec::new());
    }

    let mut items = Vec::new();
    let mut limit = first;

    loop {
        let page = fetch(limit).await?;
        let next = limit.next(&page);
        debug!(
            start = limit.start(),
            received = page.len(),
            last = next.is_none(),
            "Fetched page"
        );

        items.extend(page.into_values());

        if let Some(max) = max_items {
            if items.len() >= max {
                items.truncate(max);
                break;
            }
        }

        match next {
            Some(next) if next.start() > limit.start() => limit = next,
            Some(next) => {
                warn!(
                    start = limit.start(),
                    next_start = next.start(),
                    "Server returned a non-advancing page offset, stopping"
                );
                break;
            }
            None => break,
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(start: u32, values: Vec<u32>, next: Option<u32>) -> Page<u32> {
        Page {
            size: values.len() as u32,
            limit: 2,
            is_last_page: next.is_none(),
            start,
            next_page_start: next,
            values,
        }
    }

    #[tokio::test]
    async fn test_collects_every_page() {
        let mut requested = Vec::new();

        let items = collect_all(Limit::first(2), None, |limit| {
            requested.push(limit.start());
            let result = match limit.start() {
                0 => page(0, vec![1, 2], Some(2)),
                2 => page(2, vec![3, 4], Some(4)),
                _ => page(4, vec![5], None),
            };
            async move { Ok(result) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4, 5]);
        assert_eq!(requested, vec![0, 2, 4]);
    }

    #[tokio::test]
    async fn test_stops_at_max_items() {
        let mut calls = 0;

        let items = collect_all(Limit::first(2), Some(3), |limit| {
            calls += 1;
            let start = limit.start();
            let result = page(start, vec![start, start + 1], Some(start + 2));
            async move { Ok(result) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![0, 1, 2]);
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_zero_max_items_sends_no_request() {
        let mut calls = 0;

        let items: Vec<u32> = collect_all(Limit::first(2), Some(0), |_| {
            calls += 1;
            async move { Ok(page(0, vec![1, 2], Some(2))) }
        })
        .await
        .unwrap();

        assert!(items.is_empty());
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_stops_on_non_advancing_offset() {
        let mut calls = 0;

        let items = collect_all(Limit::first(2), None, |_| {
            calls += 1;
            async move { Ok(page(0, vec![1, 2], Some(0))) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2]);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_propagates_errors() {
        let result: Result<Vec<u32>, Error> = collect_all(Limit::default(), None, |_| async {
            Err(Error::Http("connection reset".to_string()))
        })
        .await;

        assert!(matches!(result, Err(Error::Http(_))));
    }
}
