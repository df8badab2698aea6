//! Gateway trait describing the remote table store.
//!
//! The hosted spreadsheet service is the system of record; this trait is the
//! seam between the application layer and its wire adapter, and the seam the
//! tests fake.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::posts::PostFields;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("gateway transport error: {0}")]
    Transport(String),
    #[error("gateway rejected request with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode gateway response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}

/// One row of the remote table.
///
/// `record_key` is the store's own row handle, used to address updates and
/// deletes; the post's public identifier lives inside `fields` and the two
/// are never interchangeable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub record_key: String,
    pub fields: PostFields,
}

/// Operations the posts table supports.
///
/// A lookup that matches nothing is `Ok(None)`; `Err` always means the query
/// itself failed. Callers can therefore distinguish "no such row" from "the
/// gateway broke" without inspecting error text.
#[async_trait]
pub trait PostsGateway: Send + Sync {
    /// Fetch every row, restricted to the named fields.
    async fn select_all(&self, fields: &[&str]) -> Result<Vec<TableRow>, GatewayError>;

    /// Find the first row whose identifier field equals `post_id`.
    async fn find_by_post_id(&self, post_id: &str) -> Result<Option<TableRow>, GatewayError>;

    /// Create one row with the given fields and return it.
    async fn create_row(&self, fields: PostFields) -> Result<TableRow, GatewayError>;

    /// Merge `fields` into the row addressed by `record_key` and return the
    /// merged row. The store performs the shallow overwrite itself.
    async fn update_row(
        &self,
        record_key: &str,
        fields: PostFields,
    ) -> Result<TableRow, GatewayError>;

    /// Destroy the row addressed by `record_key`.
    async fn destroy_row(&self, record_key: &str) -> Result<(), GatewayError>;
}
