//!
//! `Digest` header computation
//!
//! Only produces header values. Comparing a received digest against the body is left to the caller
//!

use crate::Result;
use http::{HeaderName, HeaderValue, Request};
use ring::digest::{digest, SHA256};
use serde::Serialize;

/// Name of the digest header, for use in a signing set
pub static DIGEST_HEADER: HeaderName = HeaderName::from_static("digest");

/// Compute the digest header value over raw body bytes
#[inline]
#[must_use]
pub fn header_value(body: &[u8]) -> String {
    let hash = digest(&SHA256, body);
    format!("SHA-256={}", base64_simd::STANDARD.encode_to_string(hash))
}

/// Compute the digest header value over a structured body
///
/// The body is serialised into compact JSON first. Receivers have to hash the same serialisation
pub fn header_value_json<T>(body: &T) -> Result<String>
where
    T: Serialize + ?Sized,
{
    let serialised = serde_json::to_vec(body)?;
    Ok(header_value(&serialised))
}

/// Compute the digest over the request body and insert it into the request, overwriting any previous value
pub fn apply<B>(req: &mut Request<B>) -> Result<()>
where
    B: AsRef<[u8]>,
{
    let value = HeaderValue::from_str(&header_value(req.body().as_ref()))?;
    req.headers_mut().insert(DIGEST_HEADER.clone(), value);

    Ok(())
}
