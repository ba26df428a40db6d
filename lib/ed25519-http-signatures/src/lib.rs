//!
//! HTTP signatures over Ed25519
//!
//! Implements the cavage "Signing HTTP Messages" scheme, restricted to Ed25519 and a SHA-256 pre-hashed Ed25519 variant
//!

#![deny(missing_docs)]

use http::HeaderName;

pub use self::error::{Error, Result};

pub mod cavage;
pub mod crypto;
pub mod digest;

mod error;

static SIGNATURE_HEADER: HeaderName = HeaderName::from_static("signature");
