mod properties;

use chrono::{TimeZone, Utc};
use s3put_aws_v4::{Credential, RequestDescriptor, RequestSigner};
use s3put_core::time::DateTime;

/// 2024-01-15T10:30:00Z
pub fn scenario_time() -> DateTime {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
}

pub fn scenario_credential() -> Credential {
    Credential::new("AKIAEXAMPLE", "secretEXAMPLE")
}

pub fn scenario_signer() -> RequestSigner {
    let _ = env_logger::builder().is_test(true).try_init();
    RequestSigner::new("s3", "us-east-1")
}

pub fn scenario_descriptor(payload: &[u8]) -> RequestDescriptor {
    RequestDescriptor::put(
        "my-bucket.s3.us-east-1.amazonaws.com",
        "/images/test.jpg",
        payload.to_vec(),
    )
}
