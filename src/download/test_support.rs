//! In-memory [`MediaFetcher`] for download tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use futures::{stream, StreamExt};

use crate::download::{MediaBody, MediaFetcher};
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub(crate) struct FakeResponse {
    pub body: Vec<u8>,
    pub declared_length: Option<u64>,
    /// Send the first chunk, then fail the stream.
    pub fail_mid_stream: bool,
}

impl FakeResponse {
    pub fn ok(body: &[u8]) -> Self {
        Self {
            body: body.to_vec(),
            declared_length: Some(body.len() as u64),
            fail_mid_stream: false,
        }
    }
}

/// Serves canned bodies by URL and records every request.
/// Unknown URLs answer 404.
#[derive(Debug, Default)]
pub(crate) struct FakeFetcher {
    responses: HashMap<String, FakeResponse>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, url: &str, body: &[u8]) -> Self {
        self.with_response(url, FakeResponse::ok(body))
    }

    pub fn with_response(mut self, url: &str, response: FakeResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl MediaFetcher for FakeFetcher {
    async fn fetch(&self, url: &str, _timeout: Duration) -> Result<MediaBody> {
        self.requests.lock().unwrap().push(url.to_string());

        let response = self
            .responses
            .get(url)
            .ok_or_else(|| Error::from_status(reqwest::StatusCode::NOT_FOUND))?;

        let mut chunks: Vec<Result<Vec<u8>>> =
            response.body.chunks(4).map(|c| Ok(c.to_vec())).collect();

        if response.fail_mid_stream {
            chunks.truncate(1);
            chunks.push(Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            ))));
        }

        Ok(MediaBody {
            content_length: response.declared_length,
            chunks: stream::iter(chunks).boxed(),
        })
    }
}
