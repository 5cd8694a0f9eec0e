// Cursor pagination helper shared by the list endpoints.

use std::future::Future;

use tracing::{trace, warn};

use crate::error::Error;
use crate::types::{Identified, ListResponse, PaginationParams};

/// Largest page the API will return.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Options for the "fetch everything" helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAllOptions {
    /// Items per request, clamped to 1..=100. Defaults to 100.
    pub page_size: Option<u32>,
    /// Stop once this many items have been collected.
    pub limit: Option<usize>,
    /// Start after this ID instead of at the beginning.
    pub starting_after: Option<String>,
}

impl ListAllOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

/// Collect all pages into a single `Vec<T>`.
///
/// Pages are requested one after another, each starting after the last ID
/// of the previous page. Stops on the first page with `has_more == false`,
/// on an empty page, on a page whose last ID is the cursor just sent, or
/// once `options.limit` items are held; the result is truncated to that
/// limit.
pub async fn paginate_all<T, F, Fut>(options: &ListAllOptions, mut fetch: F) -> Result<Vec<T>, Error>
where
    T: Identified,
    F: FnMut(PaginationParams) -> Fut,
    Fut: Future<Output = Result<ListResponse<T>, Error>>,
{
    let page_size = options
        .page_size
        .unwrap_or(MAX_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let mut all = Vec::new();
    let mut cursor = options.starting_after.clone();
    let mut pages: u32 = 0;

    loop {
        let remaining = options.limit.map(|limit| limit.saturating_sub(all.len()));
        if remaining == Some(0) {
            break;
        }
        let request_size = remaining.map_or(page_size, |r| {
            u32::try_from(r).unwrap_or(u32::MAX).min(page_size)
        });

        let sent = cursor.take();
        let page = fetch(PaginationParams {
            limit: Some(request_size),
            starting_after: sent.clone(),
            ending_before: None,
        })
        .await?;
        pages += 1;

        let has_more = page.has_more;
        let next = page.data.last().map(|item| item.id().to_owned());
        trace!(page = pages, received = page.data.len(), has_more, "fetched page");

        // A page ending on the cursor we sent would be requested forever.
        if sent.is_some() && next == sent {
            warn!(page = pages, cursor = ?sent, "cursor did not advance, stopping");
            break;
        }
        all.extend(page.data);

        match next {
            Some(id) if has_more => cursor = Some(id),
            _ => break,
        }
    }

    if let Some(limit) = options.limit {
        all.truncate(limit);
    }
    Ok(all)
}
