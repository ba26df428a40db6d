use super::SignatureHeader;
use std::fmt::Write;

/// Serialise a signature header into its wire form
///
/// Field order is `keyId`, `algorithm`, `headers`, `signature`
#[inline]
#[must_use]
pub fn serialise<S>(header: &SignatureHeader<'_, S>) -> String
where
    S: AsRef<str>,
{
    let mut buffer = String::new();

    if let Some(key_id) = header.key_id {
        let _ = write!(buffer, "keyId=\"{key_id}\",");
    }

    let _ = write!(buffer, "algorithm=\"{}\"", header.algorithm);

    buffer.push_str(",headers=\"");
    for item in itertools::intersperse(header.headers.iter().copied(), " ") {
        buffer.push_str(item);
    }
    buffer.push('"');

    let _ = write!(buffer, ",signature=\"{}\"", header.signature.as_ref());

    buffer
}
