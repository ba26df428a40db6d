use crate::{Error, Result};
use ring::{
    digest::{digest, SHA256},
    signature::{Ed25519KeyPair, KeyPair, UnparsedPublicKey, ED25519},
};
use std::fmt;

const SEED_LEN: usize = 32;
const KEYPAIR_LEN: usize = 64;

/// Identity holding an Ed25519 public key and, optionally, its private key
///
/// Accepted private key encodings:
///
/// - 32 byte seed
/// - 64 byte NaCl secret key (seed followed by the public key)
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    public_key: Vec<u8>,
    private_key: Option<Vec<u8>>,
}

impl Account {
    /// Construct an account from raw private and public key bytes
    ///
    /// The key material is only checked once it's used for signing
    #[must_use]
    pub fn new(private_key: impl Into<Vec<u8>>, public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: Some(private_key.into()),
        }
    }

    /// Construct a verification-only account
    #[must_use]
    pub fn from_public_key(public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: None,
        }
    }

    /// Construct an account from a 32 byte seed, deriving the public key
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        let key_pair = Ed25519KeyPair::from_seed_unchecked(seed).map_err(|_| Error::InvalidKey)?;

        Ok(Self {
            public_key: key_pair.public_key().as_ref().to_vec(),
            private_key: Some(seed.to_vec()),
        })
    }

    /// Raw public key bytes
    #[inline]
    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Content-address of the public key
    ///
    /// Base64 encoded SHA-256 digest of the raw public key bytes
    #[must_use]
    pub fn key_id(&self) -> String {
        base64_simd::STANDARD.encode_to_string(digest(&SHA256, &self.public_key))
    }

    pub(crate) fn key_pair(&self) -> Result<Ed25519KeyPair> {
        let private_key = self.private_key.as_deref().ok_or(Error::InvalidKey)?;
        let seed = match private_key.len() {
            SEED_LEN => private_key,
            KEYPAIR_LEN => {
                let (seed, public_key) = private_key.split_at(SEED_LEN);
                if public_key != self.public_key {
                    return Err(Error::InvalidKey);
                }

                seed
            }
            _ => return Err(Error::InvalidKey),
        };

        Ed25519KeyPair::from_seed_and_public_key(seed, &self.public_key)
            .map_err(|_| Error::InvalidKey)
    }

    pub(crate) fn verifying_key(&self) -> UnparsedPublicKey<&[u8]> {
        UnparsedPublicKey::new(&ED25519, &self.public_key)
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("key_id", &self.key_id())
            .field("has_private_key", &self.private_key.is_some())
            .finish_non_exhaustive()
    }
}
