//! Shared request and response types for the Foglio headless blog API.
//!
//! The server and the command-line client both depend on this crate so the
//! wire contract lives in exactly one place.

use serde::{Deserialize, Serialize};
use time::Date;

/// A post as returned by the item endpoints.
///
/// Only `id` is guaranteed: it is generated by the server at creation time
/// and is immutable afterwards. Every other field is whatever the row holds;
/// posts created without a title or content keep those fields absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        rename = "publishedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<Date>,
}

/// The listing projection: `{id, title, publishedAt}` without content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostListItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        rename = "publishedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<Date>,
}

/// One page of the collection listing.
///
/// `next_page_offset` is present only when further items remain past this
/// page; the final page omits the key entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPage {
    pub items: Vec<PostListItem>,
    #[serde(
        rename = "nextPageOffset",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub next_page_offset: Option<u32>,
}

/// Response of `GET /posts`: the full array when no page size was requested,
/// one page otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostListResponse {
    Page(PostPage),
    Full(Vec<PostListItem>),
}

impl PostListResponse {
    pub fn items(&self) -> &[PostListItem] {
        match self {
            Self::Page(page) => &page.items,
            Self::Full(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<PostListItem> {
        match self {
            Self::Page(page) => page.items,
            Self::Full(items) => items,
        }
    }
}

/// Body of `POST /posts`. Every member is independently optional; missing
/// fields are passed through to the row uninterpreted. Unknown members are
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        rename = "publishedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<Date>,
}

/// Body of `PATCH /posts/{id}`. Merge is a shallow field overwrite: only the
/// members present in the body replace the row's values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        rename = "publishedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub published_at: Option<Date>,
}

impl Post {
    /// The listing projection of this post.
    pub fn to_list_item(&self) -> PostListItem {
        PostListItem {
            id: self.id.clone(),
            title: self.title.clone(),
            published_at: self.published_at,
        }
    }
}
