//! Offset pagination over the in-memory listing.
//!
//! The collection endpoint fetches the whole table and slices it here; there
//! is deliberately no cursor machinery behind such a small data set.

use serde::Deserialize;

use foglio_api_types::{PostListItem, PostListResponse, PostPage};

/// Query parameters of `GET /posts`.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    #[serde(rename = "pageOffset", default)]
    pub page_offset: Option<u32>,
    #[serde(rename = "pageSize", default)]
    pub page_size: Option<u32>,
}

/// Slice the full listing into a response.
///
/// A missing or zero page size returns the entire array unpaginated.
/// Otherwise page `k` of size `n` is the slice `[k*n, k*n + n)` and
/// `next_page_offset` is `k + 1` exactly when items remain past the slice.
pub fn paginate(items: Vec<PostListItem>, query: PageQuery) -> PostListResponse {
    let size = query.page_size.unwrap_or(0) as usize;
    if size == 0 {
        return PostListResponse::Full(items);
    }

    let offset = query.page_offset.unwrap_or(0);
    let start = (offset as usize).saturating_mul(size);
    let end = start.saturating_add(size);

    let next_page_offset = (items.len() > end).then(|| offset + 1);
    let page: Vec<PostListItem> = items.into_iter().skip(start).take(size).collect();

    PostListResponse::Page(PostPage {
        items: page,
        next_page_offset,
    })
}
