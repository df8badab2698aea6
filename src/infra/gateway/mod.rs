//! Airtable adapter for the posts gateway.
//!
//! Speaks the hosted store's REST wire format: rows travel as records with
//! an opaque record key and a `fields` object, list queries use repeated
//! `fields[]` parameters and `filterByFormula`, and long listings page via
//! an `offset` continuation token.

mod wire;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use tracing::debug;

use crate::application::gateway::{GatewayError, PostsGateway, TableRow};
use crate::config::GatewaySettings;
use crate::domain::posts::PostFields;

use wire::{CreateRecords, NewRecord, Record, RecordList, UpdateRecord};

pub struct AirtableGateway {
    client: Client,
    base: Url,
    api_token: Option<String>,
    table: String,
}

impl AirtableGateway {
    pub fn new(settings: &GatewaySettings) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(GatewayError::transport)?;

        Ok(Self {
            client,
            base: settings.base_url.clone(),
            api_token: settings.api_token.clone(),
            table: settings.table.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("foglio/", env!("CARGO_PKG_VERSION"))
    }

    fn table_url(&self, record_key: Option<&str>) -> Result<Url, GatewayError> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| GatewayError::Transport("gateway base URL is not a base".into()))?;
            segments.pop_if_empty().push(&self.table);
            if let Some(key) = record_key {
                segments.push(key);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.client.request(method, url);
        match self.api_token.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, GatewayError> {
        let status = response.status();
        let bytes = response.bytes().await.map_err(GatewayError::transport)?;
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        serde_json::from_slice(&bytes).map_err(GatewayError::decode)
    }

    async fn select(
        &self,
        fields: &[&str],
        filter: Option<&str>,
    ) -> Result<Vec<TableRow>, GatewayError> {
        let url = self.table_url(None)?;
        let mut rows = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut request = self.request(Method::GET, url.clone());
            for field in fields {
                request = request.query(&[("fields[]", *field)]);
            }
            if let Some(formula) = filter {
                request = request.query(&[("filterByFormula", formula)]);
            }
            if let Some(token) = offset.as_deref() {
                request = request.query(&[("offset", token)]);
            }

            let response = request.send().await.map_err(GatewayError::transport)?;
            let page: RecordList = Self::read_json(response).await?;
            rows.extend(page.records.into_iter().map(Record::into_row));

            match page.offset {
                Some(token) => offset = Some(token),
                None => break,
            }
        }

        Ok(rows)
    }
}

/// Quote a value for use inside a `filterByFormula` string literal.
fn formula_quote(value: &str) -> String {
    value.replace('\'', "\\'")
}

#[async_trait]
impl PostsGateway for AirtableGateway {
    async fn select_all(&self, fields: &[&str]) -> Result<Vec<TableRow>, GatewayError> {
        self.select(fields, None).await
    }

    async fn find_by_post_id(&self, post_id: &str) -> Result<Option<TableRow>, GatewayError> {
        let formula = format!("({{id}} = '{}')", formula_quote(post_id));
        let rows = self.select(&[], Some(&formula)).await?;
        Ok(rows.into_iter().next())
    }

    async fn create_row(&self, fields: PostFields) -> Result<TableRow, GatewayError> {
        let url = self.table_url(None)?;
        let body = CreateRecords {
            records: vec![NewRecord { fields }],
        };

        let response = self
            .request(Method::POST, url)
            .json(&body)
            .send()
            .await
            .map_err(GatewayError::transport)?;

        let created: RecordList = Self::read_json(response).await?;
        debug!(target: "foglio::gateway", table = %self.table, "created row");

        created
            .records
            .into_iter()
            .next()
            .map(Record::into_row)
            .ok_or_else(|| GatewayError::Decode("create returned no records".into()))
    }

    async fn update_row(
        &self,
        record_key: &str,
        fields: PostFields,
    ) -> Result<TableRow, GatewayError> {
        let url = self.table_url(Some(record_key))?;
        let body = UpdateRecord { fields };

        let response = self
            .request(Method::PATCH, url)
            .json(&body)
            .send()
            .await
            .map_err(GatewayError::transport)?;

        let record: Record = Self::read_json(response).await?;
        Ok(record.into_row())
    }

    async fn destroy_row(&self, record_key: &str) -> Result<(), GatewayError> {
        let url = self.table_url(Some(record_key))?;

        let response = self
            .request(Method::DELETE, url)
            .send()
            .await
            .map_err(GatewayError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        debug!(target: "foglio::gateway", table = %self.table, record_key, "destroyed row");
        Ok(())
    }
}
