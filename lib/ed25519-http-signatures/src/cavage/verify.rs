//!
//! Checking signature headers against the live request
//!

use super::{freshness::Freshness, MaxAge, ParseError, ParseErrorKind};
use crate::{
    crypto::{Account, Algorithm},
    Error, Result, SIGNATURE_HEADER,
};
use http::header::{AUTHORIZATION, DATE};
use tracing::{debug, instrument};

const AUTHORIZATION_SCHEME: &str = "signature";

/// Resolve a key ID into the account owning it
///
/// Implemented for closures and for [`Account`] itself, which only resolves its own key ID
pub trait AccountResolver {
    /// Look up the account, `None` if the key ID is unknown
    fn resolve(&self, key_id: &str) -> Option<Account>;
}

impl<F> AccountResolver for F
where
    F: Fn(&str) -> Option<Account>,
{
    #[inline]
    fn resolve(&self, key_id: &str) -> Option<Account> {
        self(key_id)
    }
}

impl AccountResolver for Account {
    fn resolve(&self, key_id: &str) -> Option<Account> {
        (self.key_id() == key_id).then(|| self.clone())
    }
}

/// HTTP verifier
///
/// Checks proceed in a fixed order: parse, resolve the key, rebuild the signature string, check freshness, check the signature.
/// The first failure is returned
#[derive(Clone, Debug)]
pub struct Verifier<R, F = MaxAge> {
    resolver: R,
    freshness: F,
}

impl<R> Verifier<R> {
    /// Construct a verifier using the default freshness policy
    #[must_use]
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            freshness: MaxAge::default(),
        }
    }
}

impl<R, F> Verifier<R, F> {
    /// Replace the freshness policy
    #[must_use]
    pub fn freshness<P>(self, freshness: P) -> Verifier<R, P> {
        Verifier {
            resolver: self.resolver,
            freshness,
        }
    }
}

impl<R, F> Verifier<R, F>
where
    R: AccountResolver,
    F: Freshness,
{
    /// Verify the signature carried by the request
    ///
    /// Reads the `Authorization` header (`Signature` scheme), falling back to a bare `Signature` header
    #[instrument(skip_all)]
    pub fn verify<B>(&self, request: &http::Request<B>) -> Result<bool> {
        let header = signature_header_value(request)?;
        let signature_header = super::parse(header)?;
        let algorithm = Algorithm::parse(signature_header.algorithm)?;

        let Some(key_id) = signature_header.key_id else {
            debug!("signature without key ID");
            return Err(Error::UnknownKey);
        };

        let Some(account) = self.resolver.resolve(key_id) else {
            debug!(key_id, "unknown key ID");
            return Err(Error::UnknownKey);
        };

        let signature_string =
            super::signature_string::construct(request, &signature_header.headers)?;

        let signs_date = signature_header
            .headers
            .iter()
            .any(|name| name.eq_ignore_ascii_case(DATE.as_str()));
        let date = signs_date
            .then(|| request.headers().get(DATE))
            .flatten()
            .and_then(|value| value.to_str().ok());

        if !self.freshness.is_fresh(date) {
            debug!(?date, "signature outside of the accepted age");
            return Err(Error::ExpiredSignature);
        }

        crate::crypto::verify(
            algorithm,
            signature_string.as_bytes(),
            signature_header.signature,
            &account,
        )
        .inspect_err(|_| debug!(key_id, "signature mismatch"))?;

        Ok(true)
    }
}

fn signature_header_value<B>(request: &http::Request<B>) -> Result<&str> {
    if let Some(authorization) = request.headers().get(AUTHORIZATION) {
        let authorization = authorization.to_str()?;
        let scheme_len = authorization
            .find(' ')
            .filter(|&len| authorization[..len].eq_ignore_ascii_case(AUTHORIZATION_SCHEME));

        return match scheme_len {
            Some(len) => Ok(authorization[len..].trim_start()),
            None => {
                debug!("authorization header doesn't use the signature scheme");
                let scheme_end = authorization.find(' ').unwrap_or(authorization.len());
                Err(ParseError::new(ParseErrorKind::InvalidScheme, 0..scheme_end).into())
            }
        };
    }

    if let Some(signature) = request.headers().get(&SIGNATURE_HEADER) {
        return Ok(signature.to_str()?);
    }

    debug!("missing signature");
    Err(Error::MissingHeader(AUTHORIZATION.as_str().to_owned()))
}
