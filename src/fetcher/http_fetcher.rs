use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use url::Url;

use crate::app::Result;
use crate::fetcher::Fetcher;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("shortreel/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &Url, authorization: Option<&str>) -> Result<Vec<u8>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(authorization) = authorization {
            if let Ok(value) = HeaderValue::from_str(authorization) {
                headers.insert(AUTHORIZATION, value);
            }
        }

        let response = self
            .client
            .get(url.as_str())
            .headers(headers)
            .send()
            .await?;

        response.error_for_status_ref()?;

        let body = response.bytes().await?.to_vec();
        tracing::debug!("GET {} -> {} bytes", url.host_str().unwrap_or(""), body.len());
        Ok(body)
    }
}
