//! Handler-level tests over an in-memory gateway fake.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tokio::sync::Mutex;
use tower::ServiceExt;

use foglio::application::gateway::{GatewayError, PostsGateway, TableRow};
use foglio::application::posts::PostService;
use foglio::domain::posts::PostFields;
use foglio::infra::http::{ApiState, build_api_router};

/// Gateway fake backed by a vector in creation order, like the real store.
#[derive(Default)]
struct InMemoryGateway {
    rows: Mutex<Vec<TableRow>>,
    next_key: AtomicUsize,
}

impl InMemoryGateway {
    fn project(fields: &PostFields, names: &[&str]) -> PostFields {
        if names.is_empty() {
            return fields.clone();
        }
        PostFields {
            id: names.contains(&"id").then(|| fields.id.clone()).flatten(),
            title: names
                .contains(&"title")
                .then(|| fields.title.clone())
                .flatten(),
            content: names
                .contains(&"content")
                .then(|| fields.content.clone())
                .flatten(),
            published_at: names
                .contains(&"publishedAt")
                .then_some(fields.published_at)
                .flatten(),
        }
    }
}

#[async_trait]
impl PostsGateway for InMemoryGateway {
    async fn select_all(&self, fields: &[&str]) -> Result<Vec<TableRow>, GatewayError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .map(|row| TableRow {
                record_key: row.record_key.clone(),
                fields: Self::project(&row.fields, fields),
            })
            .collect())
    }

    async fn find_by_post_id(&self, post_id: &str) -> Result<Option<TableRow>, GatewayError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .find(|row| row.fields.id.as_deref() == Some(post_id))
            .cloned())
    }

    async fn create_row(&self, fields: PostFields) -> Result<TableRow, GatewayError> {
        let key = self.next_key.fetch_add(1, Ordering::Relaxed);
        let row = TableRow {
            record_key: format!("rec{key}"),
            fields,
        };
        self.rows.lock().await.push(row.clone());
        Ok(row)
    }

    async fn update_row(
        &self,
        record_key: &str,
        fields: PostFields,
    ) -> Result<TableRow, GatewayError> {
        let mut rows = self.rows.lock().await;
        let row = rows
            .iter_mut()
            .find(|row| row.record_key == record_key)
            .ok_or(GatewayError::Status {
                status: 404,
                body: "unknown record".to_string(),
            })?;
        row.fields.merge(fields);
        Ok(row.clone())
    }

    async fn destroy_row(&self, record_key: &str) -> Result<(), GatewayError> {
        let mut rows = self.rows.lock().await;
        rows.retain(|row| row.record_key != record_key);
        Ok(())
    }
}

/// Gateway fake whose every call fails, for the 500 contract.
struct BrokenGateway;

#[async_trait]
impl PostsGateway for BrokenGateway {
    async fn select_all(&self, _fields: &[&str]) -> Result<Vec<TableRow>, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }

    async fn find_by_post_id(&self, _post_id: &str) -> Result<Option<TableRow>, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }

    async fn create_row(&self, _fields: PostFields) -> Result<TableRow, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }

    async fn update_row(
        &self,
        _record_key: &str,
        _fields: PostFields,
    ) -> Result<TableRow, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }

    async fn destroy_row(&self, _record_key: &str) -> Result<(), GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }
}

fn router_with(gateway: Arc<dyn PostsGateway>) -> Router {
    build_api_router(ApiState {
        posts: Arc::new(PostService::new(gateway)),
    })
}

fn router() -> Router {
    router_with(Arc::new(InMemoryGateway::default()))
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("infallible router");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("collect body")
        .to_bytes()
        .to_vec();
    (status, body)
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("request")
}

fn json_request(method: &str, path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn create_post(router: &Router, body: serde_json::Value) -> serde_json::Value {
    let (status, bytes) = send(router, json_request("POST", "/posts", body)).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).expect("created post json")
}

#[tokio::test]
async fn post_then_get_returns_the_same_fields() {
    let router = router();

    let created = create_post(
        &router,
        serde_json::json!({"title": "Hello", "content": "World", "publishedAt": "2023-01-01"}),
    )
    .await;

    let id = created["id"].as_str().expect("generated id");
    assert!(!id.is_empty());
    assert_eq!(created["title"], "Hello");
    assert_eq!(created["content"], "World");
    assert_eq!(created["publishedAt"], "2023-01-01");

    let (status, bytes) = send(&router, get(&format!("/posts/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: serde_json::Value = serde_json::from_slice(&bytes).expect("post json");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn absent_ids_return_404_with_the_fixed_body() {
    let router = router();

    for request in [
        get("/posts/nope"),
        json_request("PATCH", "/posts/nope", serde_json::json!({"title": "x"})),
        Request::builder()
            .method("DELETE")
            .uri("/posts/nope")
            .body(Body::empty())
            .expect("request"),
    ] {
        let (status, body) = send(&router, request).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, b"Not found");
    }
}

#[tokio::test]
async fn created_ids_are_unique() {
    let router = router();

    let mut seen = HashSet::new();
    for index in 0..5 {
        let created = create_post(&router, serde_json::json!({"title": format!("p{index}")})).await;
        let id = created["id"].as_str().expect("id").to_string();
        assert!(seen.insert(id), "identifier issued twice");
    }
}

#[tokio::test]
async fn listing_without_a_page_size_returns_the_full_array() {
    let router = router();
    for index in 0..3 {
        create_post(&router, serde_json::json!({"title": format!("p{index}")})).await;
    }

    let (status, bytes) = send(&router, get("/posts")).await;
    assert_eq!(status, StatusCode::OK);
    let listing: serde_json::Value = serde_json::from_slice(&bytes).expect("listing");
    let items = listing.as_array().expect("plain array");
    assert_eq!(items.len(), 3);
    // The listing projection never includes content.
    assert!(items.iter().all(|item| item.get("content").is_none()));
}

#[tokio::test]
async fn pages_are_slices_of_the_creation_ordered_set() {
    let router = router();
    for index in 0..7 {
        create_post(&router, serde_json::json!({"title": format!("p{index}")})).await;
    }

    let (status, bytes) = send(&router, get("/posts?pageOffset=1&pageSize=3")).await;
    assert_eq!(status, StatusCode::OK);
    let page: serde_json::Value = serde_json::from_slice(&bytes).expect("page");

    let items = page["items"].as_array().expect("items");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["title"], "p3");
    assert_eq!(items[2]["title"], "p5");
    assert_eq!(page["nextPageOffset"], 2);

    let (_, bytes) = send(&router, get("/posts?pageOffset=2&pageSize=3")).await;
    let last: serde_json::Value = serde_json::from_slice(&bytes).expect("last page");
    assert_eq!(last["items"].as_array().expect("items").len(), 1);
    assert!(last.get("nextPageOffset").is_none());
}

#[tokio::test]
async fn zero_page_size_is_unpaginated() {
    let router = router();
    create_post(&router, serde_json::json!({"title": "only"})).await;

    let (status, bytes) = send(&router, get("/posts?pageOffset=4&pageSize=0")).await;
    assert_eq!(status, StatusCode::OK);
    let listing: serde_json::Value = serde_json::from_slice(&bytes).expect("listing");
    assert!(listing.is_array());
}

#[tokio::test]
async fn patch_merges_fields_shallowly() {
    let router = router();
    let created = create_post(&router, serde_json::json!({"title": "A", "content": "B"})).await;
    let id = created["id"].as_str().expect("id");

    let (status, bytes) = send(
        &router,
        json_request(
            "PATCH",
            &format!("/posts/{id}"),
            serde_json::json!({"title": "C"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let merged: serde_json::Value = serde_json::from_slice(&bytes).expect("merged post");
    assert_eq!(merged["title"], "C");
    assert_eq!(merged["content"], "B");
    assert_eq!(merged["id"], created["id"]);
}

#[tokio::test]
async fn delete_removes_the_post() {
    let router = router();
    let created = create_post(&router, serde_json::json!({"title": "doomed"})).await;
    let id = created["id"].as_str().expect("id");

    let (status, body) = send(
        &router,
        Request::builder()
            .method("DELETE")
            .uri(format!("/posts/{id}"))
            .body(Body::empty())
            .expect("request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"Resource Deleted");

    let (status, body) = send(&router, get(&format!("/posts/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"Not found");
}

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let router = router();

    let response = router
        .clone()
        .oneshot(get("/posts"))
        .await
        .expect("infallible router");
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );

    let response = router
        .clone()
        .oneshot(get("/posts/missing"))
        .await
        .expect("infallible router");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn preflight_short_circuits_with_allow_headers() {
    let router = router();

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/posts")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("infallible router");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .and_then(|value| value.to_str().ok()),
        Some("GET,POST,PATCH,DELETE,OPTIONS")
    );
}

#[tokio::test]
async fn gateway_failures_surface_as_the_generic_500() {
    let router = router_with(Arc::new(BrokenGateway));

    let (status, bytes) = send(&router, get("/posts")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("error body");
    assert_eq!(body, serde_json::json!({"message": "An unknown error occurred!"}));
}

#[tokio::test]
async fn unknown_body_fields_fold_into_the_generic_500() {
    let router = router();

    let (status, bytes) = send(
        &router,
        json_request("POST", "/posts", serde_json::json!({"author": "nobody"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = serde_json::from_slice(&bytes).expect("error body");
    assert_eq!(body["message"], "An unknown error occurred!");
}

#[tokio::test]
async fn create_passes_missing_fields_through_uninterpreted() {
    let router = router();

    let created = create_post(&router, serde_json::json!({"title": "only a title"})).await;
    assert!(created.get("content").is_none());
    assert!(created.get("publishedAt").is_none());

    let id = created["id"].as_str().expect("id");
    let (status, _) = send(&router, get(&format!("/posts/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
}
