//! Cursor pagination over Zoom listing endpoints.

use crate::error::Error;
use crate::gateway::zoom::Page;
use std::future::Future;

/// Fetch pages one at a time, feeding each page's `next_page_token` into the
/// next request, until a page comes back without a cursor.
///
/// Items are returned in page order. The first failing page aborts the walk
/// and its error is returned; items gathered so far are dropped.
pub async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, Error>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let mut items = Vec::new();
    let mut next_page_token = None;

    loop {
        let page = fetch_page(next_page_token.take()).await?;
        items.extend(page.items);

        match page.next_page_token {
            Some(token) => next_page_token = Some(token),
            None => break,
        }
    }

    Ok(items)
}
