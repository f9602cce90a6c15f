//! Upload executor backed by [`reqwest`].

use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use reqwest::{Client, Request};
use s3put_core::{Error, HttpSend, Result};

/// ReqwestHttpSend performs the signed PUT with a [`reqwest::Client`].
///
/// Redirects are not followed: a redirected PUT would need a fresh
/// signature for the new host.
#[derive(Debug)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl Default for ReqwestHttpSend {
    fn default() -> Self {
        // Redirects would be followed without re-signing.
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::unexpected("failed to convert request").with_source(e))?;
        debug!("sending {} {}", req.method(), req.url());

        let resp = self
            .client
            .execute(req)
            .await
            .map_err(|e| Error::unexpected("failed to execute request").with_source(e))?;

        let mut builder = http::Response::builder()
            .status(resp.status())
            .version(resp.version());
        if let Some(headers) = builder.headers_mut() {
            headers.extend(resp.headers().clone());
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::unexpected("failed to read response body").with_source(e))?;
        debug!("received {} bytes of response body", body.len());

        Ok(builder.body(body)?)
    }
}
