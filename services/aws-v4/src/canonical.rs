//! Canonical forms used as signing input.
//!
//! - [Create a canonical request](https://docs.aws.amazon.com/IAM/latest/UserGuide/reference_sigv-create-signed-request.html#create-canonical-request)

use crate::constants::AWS4_REQUEST;
use s3put_core::hash::hex_sha256;
use s3put_core::time::{format_date, format_iso8601, DateTime};
use std::fmt::{Display, Formatter, Write};

/// Both timestamps used while signing, taken from one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeContext {
    /// `YYYYMMDD'T'HHMMSS'Z'`, sent as `x-amz-date`.
    pub amz_date: String,
    /// `YYYYMMDD`, used in the credential scope.
    pub date_stamp: String,
}

impl TimeContext {
    /// Derive both values from the same instant.
    pub fn new(now: DateTime) -> Self {
        Self {
            amz_date: format_iso8601(now),
            date_stamp: format_date(now),
        }
    }
}

/// The credential scope: `{date}/{region}/{service}/aws4_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningScope {
    /// `YYYYMMDD`
    pub date_stamp: String,
    /// Region, e.g. `us-east-1`.
    pub region: String,
    /// Service, `s3` for object uploads.
    pub service: String,
}

impl SigningScope {
    /// Create a new scope.
    pub fn new(date_stamp: &str, region: &str, service: &str) -> Self {
        Self {
            date_stamp: date_stamp.to_string(),
            region: region.to_string(),
            service: service.to_string(),
        }
    }
}

impl Display for SigningScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.date_stamp, self.region, self.service, AWS4_REQUEST
        )
    }
}

/// Ordered list of signed headers.
///
/// Names are lowercased, values trimmed with inner runs of spaces collapsed,
/// entries sorted by name, and values of a repeated name joined with `,` in
/// the order they were supplied. Both the header block and the signed-headers
/// list render from this one list, so they can not drift apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalHeaders {
    headers: Vec<(String, String)>,
}

impl CanonicalHeaders {
    /// Number of headers.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns true if no header is present.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns true if `name` (case-insensitive) is present.
    pub fn contains(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.headers.iter().any(|(k, _)| *k == name)
    }

    /// Iterate over `(name, value)` in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `;`-joined lowercase names, e.g. `host;x-amz-content-sha256;x-amz-date`.
    pub fn signed_headers(&self) -> String {
        self.headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";")
    }

    /// Every header as `name:value\n`.
    pub fn to_block(&self) -> String {
        let mut f = String::with_capacity(128);
        for (k, v) in &self.headers {
            f.push_str(k);
            f.push(':');
            f.push_str(v);
            f.push('\n');
        }
        f
    }
}

impl<K, V> FromIterator<(K, V)> for CanonicalHeaders
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers: Vec<(String, String)> = iter
            .into_iter()
            .map(|(k, v)| {
                (
                    k.as_ref().trim().to_ascii_lowercase(),
                    normalize_header_value(v.as_ref()),
                )
            })
            .collect();
        // Stable sort keeps the caller's order for repeated names.
        headers.sort_by(|a, b| a.0.cmp(&b.0));
        // Repeated names collapse into one `name:v1,v2` entry.
        headers.dedup_by(|next, prev| {
            if next.0 != prev.0 {
                return false;
            }
            prev.1.push(',');
            prev.1.push_str(&next.1);
            true
        });
        Self { headers }
    }
}

/// Trim the value and collapse inner runs of spaces into one.
fn normalize_header_value(value: &str) -> String {
    let mut normalized = String::with_capacity(value.len());
    for (i, part) in value.split_whitespace().enumerate() {
        if i > 0 {
            normalized.push(' ');
        }
        normalized.push_str(part);
    }
    normalized
}

/// The canonical request, rendered by `Display`:
///
/// ```text
/// PUT
/// /images/test.jpg
///
/// host:my-bucket.s3.us-east-1.amazonaws.com
/// x-amz-content-sha256:2cf24d...
/// x-amz-date:20240115T103000Z
///
/// host;x-amz-content-sha256;x-amz-date
/// 2cf24d...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest<'a> {
    /// HTTP method.
    pub method: &'a str,
    /// Encoded absolute path.
    pub canonical_uri: &'a str,
    /// Encoded query string.
    pub query_string: &'a str,
    /// Signed headers.
    pub headers: &'a CanonicalHeaders,
    /// Hex encoded SHA-256 of the payload.
    pub payload_hash: &'a str,
}

impl CanonicalRequest<'_> {
    /// Hex encoded SHA-256 of the canonical request.
    pub fn hash(&self) -> String {
        hex_sha256(self.to_string().as_bytes())
    }
}

impl Display for CanonicalRequest<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.method)?;
        writeln!(f, "{}", self.canonical_uri)?;
        writeln!(f, "{}", self.query_string)?;
        // The header block ends with its own newline, which leaves a blank
        // line before the signed headers.
        f.write_str(&self.headers.to_block())?;
        f.write_char('\n')?;
        writeln!(f, "{}", self.headers.signed_headers())?;
        f.write_str(self.payload_hash)
    }
}
