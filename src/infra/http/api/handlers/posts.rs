//! Posts handlers
//!
//! Thin dispatch from HTTP verbs to `PostService`. Extractor rejections are
//! folded into the generic 500 contract on purpose: the surface only knows
//! 200, 404 and the fixed 500 body.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use foglio_api_types::{CreatePostRequest, UpdatePostRequest};

use crate::application::pagination::PageQuery;
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

const SOURCE: &str = "infra::http::api::posts";

const DELETED_BODY: &str = "Resource Deleted";

pub async fn list_posts(
    State(state): State<ApiState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(|err| ApiError::internal(SOURCE, &err))?;

    let listing = state
        .posts
        .list(query)
        .await
        .map_err(|err| ApiError::internal(SOURCE, &err))?;

    Ok(Json(listing))
}

pub async fn create_post(
    State(state): State<ApiState>,
    payload: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|err| ApiError::internal(SOURCE, &err))?;

    let post = state
        .posts
        .create(payload)
        .await
        .map_err(|err| ApiError::internal(SOURCE, &err))?;

    Ok(Json(post))
}

pub async fn get_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .posts
        .find(&id)
        .await
        .map_err(|err| ApiError::internal(SOURCE, &err))?;

    match post {
        Some(post) => Ok(Json(post)),
        None => Err(ApiError::not_found(SOURCE)),
    }
}

pub async fn update_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdatePostRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(|err| ApiError::internal(SOURCE, &err))?;

    let post = state
        .posts
        .update(&id, payload)
        .await
        .map_err(|err| ApiError::internal(SOURCE, &err))?;

    match post {
        Some(post) => Ok(Json(post)),
        None => Err(ApiError::not_found(SOURCE)),
    }
}

pub async fn delete_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let deleted = state
        .posts
        .delete(&id)
        .await
        .map_err(|err| ApiError::internal(SOURCE, &err))?;

    match deleted {
        Some(()) => Ok((StatusCode::OK, DELETED_BODY)),
        None => Err(ApiError::not_found(SOURCE)),
    }
}
