use super::{Account, Algorithm};
use crate::{Error, Result};

/// Verify that the signature string corresponds with the Base64 encoded signature under the account's public key
///
/// Undecodable signatures are reported the same as mismatching ones
#[inline]
pub fn verify(
    algorithm: Algorithm,
    signature_string: &[u8],
    encoded_signature: &str,
    account: &Account,
) -> Result<()> {
    let signature = base64_simd::STANDARD
        .decode_to_vec(encoded_signature)
        .map_err(|_| Error::InvalidSignature)?;

    account
        .verifying_key()
        .verify(&algorithm.message(signature_string), &signature)
        .map_err(|_| Error::InvalidSignature)
}
