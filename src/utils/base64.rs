use base64::alphabet;
use base64::engine::general_purpose::{self, GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::{DecodeError, Engine as _};

/// Standard alphabet, padding optional, non-zero trailing bits tolerated.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Encodes a string to Base64 format.
pub fn base64_encode(input: &str) -> String {
    general_purpose::STANDARD.encode(input)
}

/// Decodes a Base64 string, accepting both the standard and the URL-safe
/// alphabet, with or without padding. Trailing bits of the last symbol
/// need not be zero.
///
/// # Arguments
/// * `input` - The Base64 encoded string. Surrounding whitespace is ignored.
///
/// # Returns
/// The decoded bytes, or the decoder's error if the input is not Base64.
pub fn base64_decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    LENIENT.decode(url_safe_base64_reverse(input.trim()))
}

/// Decodes Base64 into a UTF-8 string.
pub fn base64_decode_string(input: &str) -> Result<String, crate::ParseError> {
    Ok(String::from_utf8(base64_decode(input)?)?)
}

/// Reverses a URL-safe Base64 string to standard Base64 format.
pub fn url_safe_base64_reverse(input: &str) -> String {
    input.replace('-', "+").replace('_', "/")
}

/// Converts a Base64 string to URL-safe Base64 format by replacing specific characters.
pub fn url_safe_base64_apply(input: &str) -> String {
    input
        .replace('+', "-")
        .replace('/', "_")
        .replace('=', "") // Remove padding
}

/// Encodes a string to URL-safe Base64 format.
pub fn url_safe_base64_encode(input: &str) -> String {
    url_safe_base64_apply(&base64_encode(input))
}
