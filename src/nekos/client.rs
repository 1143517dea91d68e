// Image API HTTP client.
// Issues the metadata lookups and image downloads for both backends.

use reqwest::{
    Client,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;
use crate::http::{USER_AGENT, check_response};

use super::endpoints::{Category, Sources};
use super::types::{CategoryResponse, RandomResponse};

/// Client for the categorized and random image APIs.
pub struct NekosClient {
    client: Client,
    sources: Sources,
}

impl NekosClient {
    /// Create a client for the given API base URLs.
    pub fn new(sources: Sources) -> Result<Self> {
        let mut headers = HeaderMap::new();
        // The random API speaks JSON:API; the other hosts ignore this header.
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.api+json"));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, sources })
    }

    /// Look up an image in a named category.
    pub async fn fetch_category(&self, category: Category) -> Result<CategoryResponse> {
        self.get_json(&self.sources.endpoint(category)).await
    }

    /// Look up a random image.
    pub async fn fetch_random(&self) -> Result<RandomResponse> {
        self.get_json(&self.sources.endpoint(Category::Random)).await
    }

    /// Download raw image bytes.
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url).await?;
        let bytes = response.bytes().await?;
        debug!(url, size = bytes.len(), "Downloaded image");
        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self.client.get(url).send().await?;
        Ok(check_response(response))
    }

    /// GET and decode a JSON body whatever the status code was.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.get(url).await?;
        let content = response.bytes().await?;
        let value = serde_json::from_slice(&content)?;
        Ok(value)
    }
}
