use crate::constants::{AWS_URI_ENCODE_SET, DEFAULT_CONTENT_TYPE};
use bytes::Bytes;
use http::Method;
use percent_encoding::utf8_percent_encode;
use std::fmt::{Debug, Formatter};

/// Everything the signer needs to know about one PUT.
///
/// The payload is fully buffered: its hash is part of the signature, so it has
/// to be known before signing begins.
#[derive(Clone)]
pub struct RequestDescriptor {
    /// HTTP method, only `PUT` can be signed.
    pub method: Method,
    /// Host the request is sent to, e.g. `my-bucket.s3.us-east-1.amazonaws.com`.
    pub host: String,
    /// Absolute, already URI-encoded path starting with `/`.
    pub canonical_uri: String,
    /// Canonical query string, empty for plain uploads.
    pub query_string: String,
    /// Request body.
    pub payload: Option<Bytes>,
    /// `Content-Type` sent along, not part of the signature.
    pub content_type: Option<String>,
    /// Additional headers to sign, in the order the caller added them.
    pub signed_headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    /// Build a PUT of `payload` to `https://{host}{canonical_uri}`.
    ///
    /// `canonical_uri` is taken verbatim, it must already be encoded.
    pub fn put(host: &str, canonical_uri: &str, payload: impl Into<Bytes>) -> Self {
        Self {
            method: Method::PUT,
            host: host.to_string(),
            canonical_uri: canonical_uri.to_string(),
            query_string: String::new(),
            payload: Some(payload.into()),
            content_type: None,
            signed_headers: Vec::new(),
        }
    }

    /// Build a virtual-hosted-style PUT of `key` into `bucket`.
    ///
    /// The key is URI-encoded with AWS rules, `/` is kept as segment separator.
    pub fn for_object(bucket: &str, region: &str, key: &str, payload: impl Into<Bytes>) -> Self {
        Self::put(
            &virtual_host(bucket, region),
            &object_uri(key),
            payload,
        )
    }

    /// Set the content type sent with the request.
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    /// Sign an additional header, e.g. `x-amz-acl` or `x-amz-storage-class`.
    pub fn with_signed_header(mut self, name: &str, value: &str) -> Self {
        self.signed_headers
            .push((name.to_string(), value.to_string()));
        self
    }

    /// Set the canonical query string.
    pub fn with_query_string(mut self, query_string: &str) -> Self {
        self.query_string = query_string.to_string();
        self
    }

    /// Content type to send, falling back to `application/octet-stream`.
    pub fn content_type(&self) -> &str {
        self.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Target url: `https://{host}{canonical_uri}[?{query_string}]`.
    pub fn url(&self) -> String {
        if self.query_string.is_empty() {
            format!("https://{}{}", self.host, self.canonical_uri)
        } else {
            format!(
                "https://{}{}?{}",
                self.host, self.canonical_uri, self.query_string
            )
        }
    }
}

impl Debug for RequestDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDescriptor")
            .field("method", &self.method)
            .field("host", &self.host)
            .field("canonical_uri", &self.canonical_uri)
            .field("query_string", &self.query_string)
            .field("payload_len", &self.payload.as_ref().map(|v| v.len()))
            .field("content_type", &self.content_type)
            .field("signed_headers", &self.signed_headers)
            .finish()
    }
}

/// Virtual-hosted-style host: `{bucket}.s3.{region}.amazonaws.com`
pub fn virtual_host(bucket: &str, region: &str) -> String {
    format!("{bucket}.s3.{region}.amazonaws.com")
}

/// Encode an object key into a canonical URI: `/` + AWS UriEncode(key).
///
/// A leading `/` in the key is not doubled.
pub fn object_uri(key: &str) -> String {
    let key = key.strip_prefix('/').unwrap_or(key);
    format!("/{}", utf8_percent_encode(key, &AWS_URI_ENCODE_SET))
}
