use crate::{AuthorizedRequest, Config, Credential, RequestDescriptor, RequestSigner};
use bytes::Bytes;
use http::StatusCode;
use log::{debug, info, warn};
use s3put_core::{Context, Error, ProvideCredential, Result};
use std::sync::Arc;

/// Result of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOutput {
    /// Public url of the uploaded object.
    pub url: String,
    /// Status returned by the endpoint, always `200 OK`.
    pub status: StatusCode,
    /// Response body, usually empty.
    pub body: String,
}

/// Uploader signs objects and PUTs them through the context's executor.
///
/// A fresh credential is loaded and a fresh signature computed for every
/// call. Nothing is retried: a rejected upload is returned to the caller,
/// who may call again to get a newly signed request.
#[derive(Clone, Debug)]
pub struct Uploader {
    ctx: Context,
    loader: Arc<dyn ProvideCredential<Credential = Credential>>,
    signer: RequestSigner,
    bucket: String,
    content_type: Option<String>,
}

impl Uploader {
    /// Create a new uploader for the bucket described by `config`.
    pub fn new(
        ctx: Context,
        config: &Config,
        loader: impl ProvideCredential<Credential = Credential>,
    ) -> Result<Self> {
        let bucket = config.bucket()?.to_string();
        let region = config.region()?;

        Ok(Self {
            ctx,
            loader: Arc::new(loader),
            signer: RequestSigner::new(&config.service, region),
            bucket,
            content_type: config.content_type.clone(),
        })
    }

    /// Replace the signer, e.g. to pin the signing time.
    pub fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// Upload `payload` as `key`.
    ///
    /// `content_type` falls back to the configured one, then to
    /// `application/octet-stream`.
    pub async fn put_object(
        &self,
        key: &str,
        payload: impl Into<Bytes>,
        content_type: Option<&str>,
    ) -> Result<UploadOutput> {
        let mut descriptor =
            RequestDescriptor::for_object(&self.bucket, self.signer.region(), key, payload);
        if let Some(content_type) = content_type.or(self.content_type.as_deref()) {
            descriptor = descriptor.with_content_type(content_type);
        }

        self.upload(&descriptor).await
    }

    /// Sign and execute `descriptor`.
    pub async fn upload(&self, descriptor: &RequestDescriptor) -> Result<UploadOutput> {
        let cred = self
            .loader
            .provide_credential(&self.ctx)
            .await?
            .ok_or_else(|| Error::missing_credentials("no credential found"))?;

        let req = self.signer.sign(descriptor, &cred)?;
        self.execute(&req).await
    }

    /// Execute an already signed request.
    ///
    /// `200 OK` is success, every other status is [`s3put_core::ErrorKind::UploadRejected`].
    pub async fn execute(&self, req: &AuthorizedRequest) -> Result<UploadOutput> {
        let url = req.url();
        debug!("uploading {} bytes to {url}", payload_len(req));

        let resp = self.ctx.http_send_as_string(req.to_http_request()?).await?;
        let (parts, body) = resp.into_parts();

        if parts.status != StatusCode::OK {
            warn!("upload to {url} rejected with {}", parts.status);
            return Err(Error::upload_rejected(parts.status, body));
        }

        info!("uploaded {url}");
        Ok(UploadOutput {
            url,
            status: parts.status,
            body,
        })
    }
}

fn payload_len(req: &AuthorizedRequest) -> usize {
    req.descriptor.payload.as_ref().map_or(0, |v| v.len())
}
