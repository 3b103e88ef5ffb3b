pub mod http_fetcher;

use async_trait::async_trait;
use url::Url;

use crate::app::Result;

pub use http_fetcher::HttpFetcher;

#[async_trait]
pub trait Fetcher {
    /// GET `url` and return the body of a 2xx response.
    ///
    /// Non-2xx statuses are errors.
    async fn get(&self, url: &Url, authorization: Option<&str>) -> Result<Vec<u8>>;
}
