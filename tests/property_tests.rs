//! Property-based tests for paging.

use proptest::prelude::*;

use bitbucket_rest_client::pagination::collect_all;
use bitbucket_rest_client::types::MAX_LIMIT;
use bitbucket_rest_client::{Error, Limit, Page};

/// Serve `total` items as the server would, in windows of `limit.limit()`.
fn serve(total: u32, limit: Limit) -> Page<u32> {
    let start = limit.start().min(total);
    let end = limit.end().min(total);
    let is_last_page = end >= total;

    Page {
        size: end - start,
        limit: limit.limit(),
        is_last_page,
        start,
        next_page_start: if is_last_page { None } else { Some(end) },
        values: (start..end).collect(),
    }
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime should build")
        .block_on(future)
}

proptest! {
    /// Page size always lands in 1..=MAX_LIMIT and the window end never wraps.
    #[test]
    fn test_limit_window_is_well_formed(start in any::<u32>(), size in any::<u32>()) {
        let limit = Limit::new(start, size);

        prop_assert!(limit.limit() >= 1);
        prop_assert!(limit.limit() <= MAX_LIMIT);
        prop_assert!(limit.end() >= limit.start());
        prop_assert_eq!(limit.start(), start);
    }

    /// The next window starts where the server said and keeps the page size.
    #[test]
    fn test_next_window_follows_server(start in 0u32..10_000, size in 1u32..500, total in 0u32..20_000) {
        let limit = Limit::new(start, size);
        let page = serve(total, limit);

        match limit.next(&page) {
            Some(next) => {
                prop_assert!(!page.is_last_page);
                prop_assert_eq!(next.start(), limit.end());
                prop_assert_eq!(next.limit(), limit.limit());
            }
            None => prop_assert!(page.is_last_page),
        }
    }

    /// Walking every page yields each item exactly once, in order.
    #[test]
    fn test_collect_all_yields_every_item(total in 0u32..2_000, size in 1u32..300) {
        let mut requests = 0u32;
        let items = block_on(collect_all(Limit::first(size), None, |limit| {
            requests += 1;
            let page = serve(total, limit);
            async move { Ok::<_, Error>(page) }
        }))
        .expect("collect_all should succeed");

        prop_assert_eq!(items, (0..total).collect::<Vec<_>>());
        let expected_requests = if total == 0 { 1 } else { total.div_ceil(size) };
        prop_assert_eq!(requests, expected_requests);
    }

    /// `max_items` caps the result without skipping any item.
    #[test]
    fn test_collect_all_respects_max_items(total in 0u32..1_000, size in 1u32..100, max in 0usize..1_200) {
        let items = block_on(collect_all(Limit::first(size), Some(max), |limit| {
            let page = serve(total, limit);
            async move { Ok::<_, Error>(page) }
        }))
        .expect("collect_all should succeed");

        let expected = (total as usize).min(max);
        prop_assert_eq!(items, (0..expected as u32).collect::<Vec<_>>());
    }
}
