//! Typed HTTP client for the Foglio API.

use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;

use foglio_api_types::{
    CreatePostRequest, Post, PostListResponse, UpdatePostRequest,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("API base URL is required (use --api or FOGLIO_API_URL)")]
    MissingApiUrl,
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server error: {0}")]
    Server(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Connection context: one client, one base URL.
#[derive(Clone, Debug)]
pub struct Api {
    client: Client,
    base: Url,
}

impl Api {
    pub fn new(base: &str) -> Result<Self, ClientError> {
        let base = Url::parse(base)?.join("/")?;
        let client = Client::builder().user_agent(Self::user_agent()).build()?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("foglio-cli/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base.join(path).map_err(ClientError::Url)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        let mut url = self.url(path)?;
        if let Some(q) = query {
            url.set_query(None);
            let mut qp = url.query_pairs_mut();
            for (k, v) in q {
                qp.append_pair(k, v);
            }
        }

        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp = req.send().await?;
        Self::handle(resp).await
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            return Err(ClientError::Server(format!("status {status} body {text}")));
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::Server(format!("failed to parse body: {e}")))
    }

    pub async fn list_posts(
        &self,
        page: Option<(u32, u32)>,
    ) -> Result<PostListResponse, ClientError> {
        let query = page.map(|(offset, size)| {
            vec![
                ("pageOffset", offset.to_string()),
                ("pageSize", size.to_string()),
            ]
        });
        self.request(Method::GET, "posts", query.as_deref(), None)
            .await
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, ClientError> {
        self.request(Method::GET, &format!("posts/{id}"), None, None)
            .await
    }

    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, ClientError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        self.request(Method::POST, "posts", None, Some(body)).await
    }

    pub async fn update_post(
        &self,
        id: &str,
        request: &UpdatePostRequest,
    ) -> Result<Post, ClientError> {
        let body = serde_json::to_value(request)
            .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
        self.request(Method::PATCH, &format!("posts/{id}"), None, Some(body))
            .await
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), ClientError> {
        let url = self.url(&format!("posts/{id}"))?;
        let resp = self.client.delete(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(ClientError::Server(format!("status {status} body {text}")));
        }
        Ok(())
    }
}
