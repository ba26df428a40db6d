//!
//! Producing signature headers
//!

use super::{SignatureHeader, DEFAULT_HEADERS};
use crate::{
    crypto::{Account, Algorithm},
    Error, Result,
};
use tracing::{debug, instrument};
use typed_builder::TypedBuilder;

/// HTTP signer
///
/// Never touches the request. The `date` header (and `digest`, if signed) has to be in place before signing
#[derive(Clone, Debug, TypedBuilder)]
pub struct Signer {
    /// Algorithm to sign with
    #[builder(default)]
    algorithm: Algorithm,

    /// Ordered list of headers to include into the signature
    #[builder(
        default = DEFAULT_HEADERS.iter().map(|name| (*name).to_owned()).collect(),
        setter(transform = |headers: &[&str]| headers.iter().map(|name| (*name).to_owned()).collect()),
    )]
    headers: Vec<String>,
}

impl Signer {
    /// Algorithm this signer uses
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Headers this signer covers, in signing order
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Sign the request with the account's private key
    ///
    /// Returns the signature header value, ready to be put into a `Signature` header or behind the `Signature` scheme of an `Authorization` header.
    /// An empty header list is refused, since its `headers=""` parameter is rejected on parse
    #[instrument(skip_all, fields(algorithm = self.algorithm.as_str()))]
    pub fn sign_with<B>(&self, request: &http::Request<B>, account: &Account) -> Result<String> {
        if self.headers.is_empty() {
            debug!("refusing to sign an empty header list");
            return Err(Error::MissingHeader(String::from("headers")));
        }

        let signature_string = super::signature_string::construct(request, &self.headers)?;
        let signature =
            crate::crypto::sign(self.algorithm, signature_string.as_bytes(), account)?;

        let key_id = account.key_id();
        debug!(%key_id, "signed request");

        let signature_header = SignatureHeader {
            key_id: Some(&key_id),
            algorithm: self.algorithm.as_str(),
            headers: self.headers.iter().map(String::as_str).collect(),
            signature,
        };

        Ok(super::serialise(&signature_header))
    }
}

impl Default for Signer {
    fn default() -> Self {
        Self::builder().build()
    }
}
