/*!
 # HTTP transport

 The effects client talks to the device through the [`Transport`]
 trait, so tests and embedders can swap in their own implementation.
 [`HttpTransport`] is the default, built on a shared `reqwest::Client`.
*/

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{instrument, trace};

use crate::{Error, Result};

/// Raw status and body of a device response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Minimal request capability the effects client needs
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET; a failure to obtain any response is [`Error::Transport`]
    async fn get(&self, url: &str) -> Result<Response>;

    /// Issues a PUT with a JSON body
    async fn put(&self, url: &str, body: Vec<u8>) -> Result<Response>;
}

/// Strips the request URL, which carries the auth token
fn transport_error(e: reqwest::Error) -> Error {
    Error::Transport(Box::new(e.without_url()))
}

/// [`Transport`] over HTTP
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Transport without a request deadline
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose requests fail after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self { client })
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(transport_error)?
            .to_vec();

        trace!("Received status {} with {} byte body", status, body.len());
        Ok(Response { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip_all)]
    async fn get(&self, url: &str) -> Result<Response> {
        Self::send(self.client.get(url)).await
    }

    #[instrument(skip_all)]
    async fn put(&self, url: &str, body: Vec<u8>) -> Result<Response> {
        Self::send(
            self.client
                .put(url)
                .header(CONTENT_TYPE, "application/json")
                .body(body),
        )
        .await
    }
}
