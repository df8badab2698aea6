//! Wire-level checks for the typed API client.

use httpmock::MockServer;
use serde_json::json;

use foglio_api_types::PostListResponse;
use foglio_client::api::{Api, ClientError};

fn api(server: &MockServer) -> Api {
    Api::new(&server.base_url()).expect("api context")
}

#[tokio::test]
async fn list_passes_page_parameters() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("GET")
            .path("/posts")
            .query_param("pageOffset", "2")
            .query_param("pageSize", "5");
        then.status(200)
            .json_body(json!({"items": [], "nextPageOffset": 3}));
    });

    let listing = api(&server).list_posts(Some((2, 5))).await.expect("list");
    mock.assert();
    match listing {
        PostListResponse::Page(page) => assert_eq!(page.next_page_offset, Some(3)),
        PostListResponse::Full(_) => panic!("expected the paged shape"),
    }
}

#[tokio::test]
async fn list_without_paging_accepts_the_plain_array() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts");
        then.status(200)
            .json_body(json!([{"id": "a", "title": "A", "publishedAt": "2023-01-01"}]));
    });

    let listing = api(&server).list_posts(None).await.expect("list");
    assert_eq!(listing.items().len(), 1);
    assert_eq!(listing.items()[0].id, "a");
}

#[tokio::test]
async fn not_found_surfaces_the_status_and_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("GET").path("/posts/ghost");
        then.status(404).body("Not found");
    });

    let err = api(&server).get_post("ghost").await.expect_err("missing");
    match err {
        ClientError::Server(message) => {
            assert!(message.contains("404"));
            assert!(message.contains("Not found"));
        }
        other => panic!("expected a server error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_sends_the_typed_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("POST").path("/posts").json_body(json!({
            "title": "Hello",
            "content": "World",
            "publishedAt": "2023-01-01"
        }));
        then.status(200).json_body(json!({
            "id": "fresh",
            "title": "Hello",
            "content": "World",
            "publishedAt": "2023-01-01"
        }));
    });

    let request = foglio_api_types::CreatePostRequest {
        title: Some("Hello".to_string()),
        content: Some("World".to_string()),
        published_at: Some(time::macros::date!(2023 - 01 - 01)),
    };
    let created = api(&server).create_post(&request).await.expect("create");

    mock.assert();
    assert_eq!(created.id, "fresh");
}

#[tokio::test]
async fn delete_tolerates_a_plain_text_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method("DELETE").path("/posts/p1");
        then.status(200).body("Resource Deleted");
    });

    api(&server).delete_post("p1").await.expect("delete");
    mock.assert();
}
