use super::{Account, Algorithm};
use crate::Result;

/// Sign a signature string under the given algorithm and encode the returned signature in Base64
#[inline]
pub fn sign(algorithm: Algorithm, signature_string: &[u8], account: &Account) -> Result<String> {
    let key_pair = account.key_pair()?;
    let signature = key_pair.sign(&algorithm.message(signature_string));

    Ok(base64_simd::STANDARD.encode_to_string(signature))
}
