use eyre::{eyre, Result};
use std::fmt::Write;

/// Decodes a hex string into a vector of bytes
///
/// ```
/// use sift_common::utils::strings::decode_hex;
///
/// let result = decode_hex("0xa9059cbb").expect("should decode hex");
/// assert_eq!(result, vec![0xa9, 0x05, 0x9c, 0xbb]);
/// ```
pub fn decode_hex(mut s: &str) -> Result<Vec<u8>> {
    // normalize
    s = s.trim_start_matches("0x").trim();

    if s.is_empty() {
        return Ok(vec![]);
    }
    if s.len() % 2 != 0 {
        return Err(eyre!("odd-length hex string: {}", s));
    }

    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16))
        .collect::<Result<Vec<u8>, _>>()
        .map_err(|_| eyre!("invalid hex string: {}", s))
}

/// Encodes a slice of bytes into a lowercase hex string, without a prefix
///
/// ```
/// use sift_common::utils::strings::encode_hex;
///
/// assert_eq!(encode_hex(&[0xa9, 0x05, 0x9c, 0xbb]), "a9059cbb");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::new(), |mut acc, b| {
        write!(acc, "{b:02x}").expect("unable to write");
        acc
    })
}
