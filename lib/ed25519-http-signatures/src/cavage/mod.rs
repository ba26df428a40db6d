//!
//! Cavage-style HTTP signatures
//!

mod parse;
mod serialise;

pub mod easy;
pub mod freshness;
pub mod sign;
pub mod signature_string;
pub mod verify;

pub use self::freshness::{Freshness, MaxAge};
pub use self::parse::{parse, ParseError, ParseErrorKind};
pub use self::serialise::serialise;
pub use self::sign::Signer;
pub use self::verify::{AccountResolver, Verifier};

/// Headers signed when no explicit list is given
pub const DEFAULT_HEADERS: &[&str] = &["(request-target)", "date"];

/// Signature header value
///
/// `headers` has to be identical, in order, on the signing and the verifying side.
/// It travels inside the header so the verifier never has to guess it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureHeader<'a, S> {
    /// Content-address of the signer's public key
    pub key_id: Option<&'a str>,

    /// Wire name of the signature algorithm
    pub algorithm: &'a str,

    /// Ordered names of the signed headers
    pub headers: Vec<&'a str>,

    /// Base64 encoded signature
    pub signature: S,
}
