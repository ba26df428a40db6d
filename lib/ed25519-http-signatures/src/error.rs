use crate::cavage::ParseError;
use miette::Diagnostic;
use thiserror::Error;

/// Result alias defaulting to this crate's error
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Signing and verification error
///
/// Every variant is terminal. Callers should reject the request on any of them
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Signature is outside of the accepted age window
    #[error("Signature expired")]
    ExpiredSignature,

    /// Constructed header value contains illegal characters
    #[error(transparent)]
    HeaderConstruction(#[from] http::header::InvalidHeaderValue),

    /// Header had an invalid value (non visible-ASCII value)
    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::ToStrError),

    /// Key material is absent or unusable
    #[error("Invalid key material")]
    InvalidKey,

    /// Cryptographic check failed
    #[error("invalid signature")]
    InvalidSignature,

    /// Structured body failed to serialise
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Signature header couldn't be parsed
    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedSignature(#[from] ParseError),

    /// Header is missing from the request
    #[error("Missing header: {0}")]
    MissingHeader(String),

    /// Key ID doesn't resolve to an account
    #[error("Unknown key")]
    UnknownKey,

    /// Algorithm name isn't one we implement
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),
}
