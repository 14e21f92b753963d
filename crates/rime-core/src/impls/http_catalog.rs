//! HTTP remote catalog client
//!
//! - listing: `GET {base_url}/works` -> `[{"id", "title", "author"}, ...]`
//! - detail:  `GET {base_url}/works/{id}` -> `{"body": "..."}`
//!
//! Responses are read leniently: a listing that is not an array is an empty
//! listing, and a detail without a string `body` is empty text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::domain::ResolveError;
use crate::ports::{RemoteCatalog, WorkSummary};

const USER_AGENT: &str = concat!("rime/", env!("CARGO_PKG_VERSION"));

pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ResolveError> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim_end_matches('/'))
            .map_err(|e| ResolveError::InvalidUrl(format!("{raw}: {e}")))?;

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        let client = Self { http, base_url };
        client.works_url()?;
        Ok(client)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `{base}/works`, keeping any query string on the base.
    fn works_url(&self) -> Result<Url, ResolveError> {
        self.url_with(&["works"])
    }

    fn work_url(&self, work_id: &str) -> Result<Url, ResolveError> {
        self.url_with(&["works", work_id])
    }

    fn url_with(&self, segments: &[&str]) -> Result<Url, ResolveError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ResolveError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json(&self, url: Url) -> Result<Value, ResolveError> {
        debug!(url = %url, "querying remote catalog");

        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ResolveError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl RemoteCatalog for HttpCatalogClient {
    async fn list_works(&self) -> Result<Vec<WorkSummary>, ResolveError> {
        let value = self.get_json(self.works_url()?).await?;
        Ok(parse_listing(&value))
    }

    async fn fetch_body(&self, work_id: &str) -> Result<String, ResolveError> {
        let value = self.get_json(self.work_url(work_id)?).await?;
        Ok(parse_body(&value))
    }
}

fn parse_listing(value: &Value) -> Vec<WorkSummary> {
    let Some(items) = value.as_array() else {
        debug!("remote listing is not an array; treating as no results");
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| {
            let id = match item.get("id")? {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            let title = item.get("title")?.as_str()?;
            let author = item.get("author")?.as_str()?;
            Some(WorkSummary::new(id, title, author))
        })
        .collect()
}

fn parse_body(value: &Value) -> String {
    value
        .get("body")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
