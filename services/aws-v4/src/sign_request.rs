use crate::canonical::{CanonicalHeaders, CanonicalRequest, SigningScope, TimeContext};
use crate::constants::{AWS4_HMAC_SHA256, HOST, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE};
use crate::signing_key::derive_signing_key;
use crate::{Credential, RequestDescriptor};
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderValue, Method};
use log::debug;
use s3put_core::hash::{hex_hmac_sha256, hex_sha256};
use s3put_core::time::{now, DateTime};
use s3put_core::{Error, Result, SigningCredential};
use std::fmt::Write;

/// RequestSigner that implement AWS SigV4 for a single object PUT.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
/// - [Authenticating Requests: Using the Authorization Header](https://docs.aws.amazon.com/AmazonS3/latest/API/sigv4-auth-using-authorization-header.html)
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer for `service` in `region`.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),

            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Region requests are signed for.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Sign `descriptor` with `cred` at the current time.
    ///
    /// The clock is read exactly once per call.
    pub fn sign(
        &self,
        descriptor: &RequestDescriptor,
        cred: &Credential,
    ) -> Result<AuthorizedRequest> {
        let now = self.time.unwrap_or_else(now);
        self.sign_at(descriptor, cred, now)
    }

    /// Sign `descriptor` with `cred` as of `now`.
    ///
    /// Pure: the same input always yields the same output.
    pub fn sign_at(
        &self,
        descriptor: &RequestDescriptor,
        cred: &Credential,
        now: DateTime,
    ) -> Result<AuthorizedRequest> {
        if !cred.is_valid() {
            return Err(Error::missing_credentials(
                "access key id and secret access key must not be empty",
            ));
        }
        let payload = validate_descriptor(descriptor)?;

        let time = TimeContext::new(now);
        let payload_hash = hex_sha256(payload);

        let headers: CanonicalHeaders = descriptor
            .signed_headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .chain([
                (HOST, descriptor.host.as_str()),
                (X_AMZ_CONTENT_SHA_256, payload_hash.as_str()),
                (X_AMZ_DATE, time.amz_date.as_str()),
            ])
            .collect();

        let creq = CanonicalRequest {
            method: descriptor.method.as_str(),
            canonical_uri: &descriptor.canonical_uri,
            query_string: &descriptor.query_string,
            headers: &headers,
            payload_hash: &payload_hash,
        };
        debug!("calculated canonical request: {creq}");

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = SigningScope::new(&time.date_stamp, &self.region, &self.service);
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "{AWS4_HMAC_SHA256}")?;
            writeln!(f, "{}", time.amz_date)?;
            writeln!(f, "{scope}")?;
            write!(f, "{}", creq.hash())?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key = derive_signing_key(
            &cred.secret_access_key,
            &time.date_stamp,
            &self.region,
            &self.service,
        );
        let signature = hex_hmac_sha256(signing_key.as_ref(), string_to_sign.as_bytes());

        let authorization = format!(
            "{AWS4_HMAC_SHA256} Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id,
            scope,
            headers.signed_headers(),
            signature
        );

        Ok(AuthorizedRequest {
            descriptor: descriptor.clone(),
            amz_date: time.amz_date,
            payload_hash_hex: payload_hash,
            authorization,
        })
    }
}

/// Reject descriptors the signer can not produce a valid signature for.
fn validate_descriptor(descriptor: &RequestDescriptor) -> Result<&Bytes> {
    if descriptor.method != Method::PUT {
        return Err(Error::invalid_descriptor(format!(
            "method {} is not supported, only PUT can be signed",
            descriptor.method
        )));
    }
    if descriptor.host.is_empty() {
        return Err(Error::invalid_descriptor("host must not be empty"));
    }
    if !descriptor.canonical_uri.starts_with('/') {
        return Err(Error::invalid_descriptor(format!(
            "canonical uri {:?} must start with '/'",
            descriptor.canonical_uri
        )));
    }
    for (name, _) in &descriptor.signed_headers {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_descriptor("signed header name must not be empty"));
        }
        if [HOST, X_AMZ_CONTENT_SHA_256, X_AMZ_DATE, AUTHORIZATION.as_str()]
            .iter()
            .any(|reserved| name.eq_ignore_ascii_case(reserved))
        {
            return Err(Error::invalid_descriptor(format!(
                "header {name} is computed by the signer and can not be supplied"
            )));
        }
    }

    descriptor
        .payload
        .as_ref()
        .ok_or_else(|| Error::invalid_descriptor("payload must be buffered before signing"))
}

/// A signed PUT, ready for the upload executor.
///
/// Built fresh for every attempt: the embedded timestamp is only accepted by
/// the server within a short window.
#[derive(Debug, Clone)]
pub struct AuthorizedRequest {
    /// The request that was signed.
    pub descriptor: RequestDescriptor,
    /// Value of `x-amz-date`.
    pub amz_date: String,
    /// Value of `x-amz-content-sha256`.
    pub payload_hash_hex: String,
    /// Value of `Authorization`.
    pub authorization: String,
}

impl AuthorizedRequest {
    /// Target url of the PUT.
    pub fn url(&self) -> String {
        self.descriptor.url()
    }

    /// Build the http request handed to the executor.
    ///
    /// Carries `x-amz-content-sha256`, `x-amz-date`, `Authorization`,
    /// `Content-Type` and any additional signed headers.
    pub fn to_http_request(&self) -> Result<http::Request<Bytes>> {
        let mut builder = http::Request::builder()
            .method(self.descriptor.method.clone())
            .uri(self.url());

        for (name, value) in &self.descriptor.signed_headers {
            builder = builder.header(name.trim(), HeaderValue::from_str(value.trim())?);
        }

        let mut authorization = HeaderValue::from_str(&self.authorization)?;
        authorization.set_sensitive(true);

        let req = builder
            .header(X_AMZ_CONTENT_SHA_256, self.payload_hash_hex.as_str())
            .header(X_AMZ_DATE, self.amz_date.as_str())
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, self.descriptor.content_type())
            .body(self.descriptor.payload.clone().unwrap_or_default())?;
        Ok(req)
    }
}
