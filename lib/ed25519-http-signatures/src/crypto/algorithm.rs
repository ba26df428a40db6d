use crate::{Error, Result};
use ring::digest::{digest, SHA256};
use std::{borrow::Cow, str::FromStr};
use strum::{AsRefStr, EnumString, IntoStaticStr};

/// Signature algorithm
///
/// Closed set of the algorithms we sign and verify with. Wire names are parsed into this at the boundary
#[derive(AsRefStr, Clone, Copy, Debug, Default, EnumString, Eq, Hash, IntoStaticStr, PartialEq)]
pub enum Algorithm {
    /// Ed25519 over the raw signature string
    #[strum(serialize = "ed25519")]
    Ed25519,

    /// Ed25519 over the SHA-256 digest of the signature string
    ///
    /// This is hash-then-sign, not Ed25519ph. Existing signers depend on exactly this construction
    #[default]
    #[strum(serialize = "ed25519-sha256")]
    Ed25519Sha256,
}

impl Algorithm {
    /// Parse an algorithm from its wire name
    #[inline]
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_str(name).map_err(|_| Error::UnsupportedAlgorithm(name.to_owned()))
    }

    /// Wire name of the algorithm
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Select the bytes that actually get passed to Ed25519
    #[must_use]
    pub fn message(self, signature_string: &[u8]) -> Cow<'_, [u8]> {
        match self {
            Self::Ed25519 => Cow::Borrowed(signature_string),
            Self::Ed25519Sha256 => Cow::Owned(digest(&SHA256, signature_string).as_ref().to_vec()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::Algorithm;
    use crate::Error;
    use std::borrow::Cow;

    #[test]
    fn parses_wire_names() {
        assert_eq!(Algorithm::parse("ed25519").unwrap(), Algorithm::Ed25519);
        assert_eq!(
            Algorithm::parse("ed25519-sha256").unwrap(),
            Algorithm::Ed25519Sha256
        );
        assert_eq!(Algorithm::default(), Algorithm::Ed25519Sha256);
    }

    #[test]
    fn rejects_unknown_names() {
        for name in ["rsa-sha256", "hs2019", "ED25519", ""] {
            assert!(matches!(
                Algorithm::parse(name),
                Err(Error::UnsupportedAlgorithm(ref rejected)) if rejected == name
            ));
        }
    }

    #[test]
    fn prehashes_only_sha256_variant() {
        let message = b"(request-target): get /test";

        assert!(matches!(
            Algorithm::Ed25519.message(message),
            Cow::Borrowed(bytes) if bytes == message
        ));

        let prehashed = Algorithm::Ed25519Sha256.message(message);
        assert_eq!(prehashed.len(), 32);
        assert_ne!(prehashed.as_ref(), message);
    }
}
