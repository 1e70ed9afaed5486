//! Decoder for obfuscated email addresses
//!
//! Profile pages hide addresses in a `data-cfemail` attribute: a hex string
//! whose first byte is an XOR key applied to every following byte.

use thiserror::Error;

/// Errors returned for malformed obfuscated addresses
#[derive(Debug, Error, PartialEq)]
pub enum EmailDecodeError {
    #[error("obfuscated email is empty")]
    Empty,

    #[error("obfuscated email is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Decodes an obfuscated email address
///
/// Each decoded byte is mapped to the character with the same code point,
/// so non-ASCII bytes come out as Latin-1 characters rather than failing.
///
/// # Example
///
/// ```
/// use merocrawl::crawler::decode_cf_email;
///
/// // "a@b.c" XORed with key 0x42
/// assert_eq!(decode_cf_email("422302206c21").unwrap(), "a@b.c");
/// ```
pub fn decode_cf_email(encoded: &str) -> Result<String, EmailDecodeError> {
    let bytes = hex::decode(encoded.trim())?;

    let (key, payload) = bytes.split_first().ok_or(EmailDecodeError::Empty)?;

    Ok(payload.iter().map(|b| char::from(b ^ key)).collect())
}
