//!
//! Easy and fool-proof HTTP signature handling
//!
//! Opinionated defaults on top of [`Signer`] and [`Verifier`]
//!

use super::{AccountResolver, Signer, Verifier, DEFAULT_HEADERS};
use crate::{crypto::Account, digest::DIGEST_HEADER, Result};
use http::{header::AUTHORIZATION, HeaderValue};
use tracing::instrument;

const AUTHORIZATION_SCHEME: &str = "Signature";

/// Sign an HTTP request with the account's key using opinionated defaults
///
/// - Requests with a body get a `digest` header, which is signed as well
/// - The signature is placed into the `Authorization` header using the `Signature` scheme
///
/// The `date` header has to be set by the caller
#[inline]
#[instrument(skip_all)]
pub fn sign<B>(mut req: http::Request<B>, account: &Account) -> Result<http::Request<B>>
where
    B: AsRef<[u8]>,
{
    let signer = if req.body().as_ref().is_empty() {
        Signer::default()
    } else {
        crate::digest::apply(&mut req)?;

        let mut headers = DEFAULT_HEADERS.to_vec();
        headers.push(DIGEST_HEADER.as_str());
        Signer::builder().headers(&headers).build()
    };

    let signature_header = signer.sign_with(&req, account)?;
    let header_value =
        HeaderValue::from_str(&format!("{AUTHORIZATION_SCHEME} {signature_header}"))?;
    req.headers_mut().insert(AUTHORIZATION, header_value);

    Ok(req)
}

/// Verify an HTTP request using opinionated defaults
///
/// Signatures whose `date` is more than 15 minutes off are rejected
#[inline]
pub fn verify<B, R>(req: &http::Request<B>, resolver: R) -> Result<bool>
where
    R: AccountResolver,
{
    Verifier::new(resolver).verify(req)
}
