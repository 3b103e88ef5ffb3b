//! Fakes shared by unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::app::{AppError, Result};
use crate::fetcher::Fetcher;

/// Fetcher that answers every request with the same canned reply.
pub struct StubFetcher {
    reply: std::result::Result<String, String>,
    requested: Mutex<Vec<String>>,
    authorization: Mutex<Vec<Option<String>>>,
}

impl StubFetcher {
    pub fn ok(body: &str) -> Self {
        Self::with_reply(Ok(body.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_reply(Err(message.to_string()))
    }

    fn with_reply(reply: std::result::Result<String, String>) -> Self {
        Self {
            reply,
            requested: Mutex::new(Vec::new()),
            authorization: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn authorization(&self) -> Vec<Option<String>> {
        self.authorization.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn get(&self, url: &Url, authorization: Option<&str>) -> Result<Vec<u8>> {
        self.requested.lock().unwrap().push(url.to_string());
        self.authorization
            .lock()
            .unwrap()
            .push(authorization.map(String::from));
        match &self.reply {
            Ok(body) => Ok(body.clone().into_bytes()),
            Err(message) => Err(AppError::Other(message.clone())),
        }
    }
}
