//! AWS SigV4 signing and upload for a single S3 object PUT.
//!
//! ## Example
//!
//! ```no_run
//! use s3put_aws_v4::{Config, EnvCredentialProvider, Uploader};
//! use s3put_core::{Context, OsEnv};
//!
//! # async fn example(ctx: Context) -> s3put_core::Result<()> {
//! // `ctx` carries an `HttpSend` executor, e.g. `s3put_http_send_reqwest::ReqwestHttpSend`.
//! let ctx = ctx.with_env(OsEnv);
//! let config = Config::default().from_env(&ctx);
//!
//! let uploader = Uploader::new(ctx, &config, EnvCredentialProvider::new())?;
//! let output = uploader
//!     .put_object("images/test.jpg", b"hello".to_vec(), Some("image/jpeg"))
//!     .await?;
//! println!("uploaded to {}", output.url);
//! # Ok(())
//! # }
//! ```

mod constants;
pub use constants::{DEFAULT_CONTENT_TYPE, EMPTY_STRING_SHA256};

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod signing_key;
pub use signing_key::{derive_signing_key, SigningKey};

mod descriptor;
pub use descriptor::{object_uri, virtual_host, RequestDescriptor};

mod canonical;
pub use canonical::{CanonicalHeaders, CanonicalRequest, SigningScope, TimeContext};

mod sign_request;
pub use sign_request::{AuthorizedRequest, RequestSigner};

mod upload;
pub use upload::{UploadOutput, Uploader};
