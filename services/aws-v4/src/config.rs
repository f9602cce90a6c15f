use crate::constants::*;
use crate::descriptor::virtual_host;
use s3put_core::utils::Redact;
use s3put_core::{Context, Error, Result};
use std::fmt::{Debug, Formatter};

/// Config for object uploads.
///
/// Read once at startup and passed by value into the uploader; nothing in
/// the crate reads global state behind the caller's back.
#[derive(Clone)]
pub struct Config {
    /// `bucket` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`S3PUT_BUCKET`]
    pub bucket: Option<String>,
    /// `region` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_REGION`]
    /// - env value: [`AWS_DEFAULT_REGION`]
    pub region: Option<String>,
    /// Service name used in the credential scope, default to `s3`.
    pub service: String,
    /// `content_type` will be loaded from:
    ///
    /// - this field if it's `is_some`
    /// - env value: [`S3PUT_CONTENT_TYPE`]
    /// - default to `application/octet-stream` at upload time
    pub content_type: Option<String>,
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket: None,
            region: None,
            service: S3_SERVICE.to_string(),
            content_type: None,
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("service", &self.service)
            .field("content_type", &self.content_type)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key).full())
            .finish()
    }
}

impl Config {
    /// Fill unset fields from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let envs = ctx.env_vars();

        if self.bucket.is_none() {
            self.bucket = envs.get(S3PUT_BUCKET).cloned();
        }
        if self.region.is_none() {
            self.region = envs
                .get(AWS_REGION)
                .or_else(|| envs.get(AWS_DEFAULT_REGION))
                .cloned();
        }
        if self.content_type.is_none() {
            self.content_type = envs.get(S3PUT_CONTENT_TYPE).cloned();
        }
        if self.access_key_id.is_none() {
            self.access_key_id = envs.get(AWS_ACCESS_KEY_ID).cloned();
        }
        if self.secret_access_key.is_none() {
            self.secret_access_key = envs.get(AWS_SECRET_ACCESS_KEY).cloned();
        }
        self
    }

    /// Bucket to upload into.
    pub fn bucket(&self) -> Result<&str> {
        self.bucket
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid(format!("bucket is not set, try {S3PUT_BUCKET}")))
    }

    /// Region the bucket lives in.
    pub fn region(&self) -> Result<&str> {
        self.region
            .as_deref()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::config_invalid(format!("region is not set, try {AWS_REGION}")))
    }

    /// Virtual-hosted-style host of the bucket.
    pub fn host(&self) -> Result<String> {
        Ok(virtual_host(self.bucket()?, self.region()?))
    }
}
