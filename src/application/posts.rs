//! Post operations: the translation from API requests to gateway calls.

use std::sync::Arc;

use tracing::debug;

use foglio_api_types::{CreatePostRequest, Post, PostListResponse, UpdatePostRequest};

use crate::application::gateway::{GatewayError, PostsGateway};
use crate::application::pagination::{self, PageQuery};
use crate::domain::posts::{PostFields, PostId};

/// Fields fetched for the collection listing. `content` stays on the row.
const LIST_FIELDS: &[&str] = &["id", "title", "publishedAt"];

pub struct PostService {
    gateway: Arc<dyn PostsGateway>,
}

impl PostService {
    pub fn new(gateway: Arc<dyn PostsGateway>) -> Self {
        Self { gateway }
    }

    /// List all posts, optionally sliced into one page.
    pub async fn list(&self, query: PageQuery) -> Result<PostListResponse, GatewayError> {
        let rows = self.gateway.select_all(LIST_FIELDS).await?;
        let items = rows
            .into_iter()
            .filter_map(|row| row.fields.into_list_item())
            .collect();
        Ok(pagination::paginate(items, query))
    }

    /// Create a post: mint an identifier, merge it into the request fields,
    /// and issue a single create call. Missing fields pass through as-is.
    pub async fn create(&self, request: CreatePostRequest) -> Result<Post, GatewayError> {
        let id = PostId::generate();
        let fields = PostFields {
            id: Some(id.to_string()),
            title: request.title,
            content: request.content,
            published_at: request.published_at,
        };

        let row = self.gateway.create_row(fields).await?;
        debug!(target: "foglio::posts", post_id = %id, "created post");

        Ok(row.fields.into_post().unwrap_or_else(|| Post {
            id: id.to_string(),
            title: None,
            content: None,
            published_at: None,
        }))
    }

    /// Look up one post by its public identifier.
    pub async fn find(&self, post_id: &str) -> Result<Option<Post>, GatewayError> {
        let row = self.gateway.find_by_post_id(post_id).await?;
        Ok(row.and_then(|row| row.fields.into_post()))
    }

    /// Shallow-merge the patch into an existing post via the gateway's
    /// per-row update. `Ok(None)` when no row matches the identifier.
    pub async fn update(
        &self,
        post_id: &str,
        request: UpdatePostRequest,
    ) -> Result<Option<Post>, GatewayError> {
        let Some(row) = self.gateway.find_by_post_id(post_id).await? else {
            return Ok(None);
        };

        let patch = PostFields {
            id: None,
            title: request.title,
            content: request.content,
            published_at: request.published_at,
        };

        let merged = self.gateway.update_row(&row.record_key, patch).await?;
        Ok(merged.fields.into_post())
    }

    /// Delete the post matching the identifier. `Ok(None)` on no match.
    pub async fn delete(&self, post_id: &str) -> Result<Option<()>, GatewayError> {
        let Some(row) = self.gateway.find_by_post_id(post_id).await? else {
            return Ok(None);
        };

        self.gateway.destroy_row(&row.record_key).await?;
        debug!(target: "foglio::posts", post_id, "deleted post");
        Ok(Some(()))
    }
}
