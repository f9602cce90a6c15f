//! SigV4 signing key derivation.
//!
//! - [Derive a signing key](https://docs.aws.amazon.com/IAM/latest/UserGuide/reference_sigv-create-signed-request.html#derive-signing-key)

use crate::constants::AWS4_REQUEST;
use s3put_core::hash::{hmac_sha256, SHA256_OUTPUT_LEN};
use std::fmt::{Debug, Formatter};

/// The `kSigning` key scoped to one date, region and service.
///
/// `Debug` never prints the key bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey([u8; SHA256_OUTPUT_LEN]);

impl SigningKey {
    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for SigningKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(***)")
    }
}

/// Derive the signing key from the long-term secret.
///
/// Every step feeds the raw HMAC output of the previous one as the key of the
/// next:
///
/// ```text
/// kDate    = HMAC("AWS4" + secret, date_stamp)
/// kRegion  = HMAC(kDate, region)
/// kService = HMAC(kRegion, service)
/// kSigning = HMAC(kService, "aws4_request")
/// ```
pub fn derive_signing_key(
    secret: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> SigningKey {
    let secret = format!("AWS4{secret}");
    let k_date = hmac_sha256(secret.as_bytes(), date_stamp.as_bytes());
    let k_region = hmac_sha256(&k_date, region.as_bytes());
    let k_service = hmac_sha256(&k_region, service.as_bytes());
    SigningKey(hmac_sha256(&k_service, AWS4_REQUEST.as_bytes()))
}
