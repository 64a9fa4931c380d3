/* ---------- Base64 helpers ---------- */

use base64::alphabet;
use base64::engine::general_purpose::STANDARD;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use thiserror::Error;

/// Standard alphabet decoder that accepts input with or without `=` padding
/// and ignores non-zero trailing bits, like the browser's `atob`.
pub const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base64Error {
    #[error("Invalid Base64 input")]
    InvalidEncoding,
    #[error("Decoded bytes aren't valid UTF-8 text")]
    NotUtf8,
}

/// UTF-8 bytes of `text`, standard alphabet, padded.
pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

pub fn decode_text(input: &str) -> Result<String, Base64Error> {
    let compact: String = input
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = LENIENT
        .decode(compact.as_bytes())
        .map_err(|_| Base64Error::InvalidEncoding)?;
    String::from_utf8(bytes).map_err(|_| Base64Error::NotUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_utf8_text_with_padding() {
        assert_eq!(encode_text("Hello World"), "SGVsbG8gV29ybGQ=");
        assert_eq!(encode_text("héllo ✓"), "aMOpbGxvIOKckw==");
        assert_eq!(encode_text(""), "");
    }

    #[test]
    fn decodes_padded_and_unpadded_input() {
        assert_eq!(decode_text("SGVsbG8gV29ybGQ=").unwrap(), "Hello World");
        assert_eq!(decode_text("SGVsbG8gV29ybGQ").unwrap(), "Hello World");
        assert_eq!(decode_text("aMOpbGxvIOKckw==").unwrap(), "héllo ✓");
    }

    #[test]
    fn ignores_ascii_whitespace() {
        assert_eq!(decode_text("  SGVs\nbG8g V29y\tbGQ=\n").unwrap(), "Hello World");
    }

    #[test]
    fn rejects_bad_alphabet_and_length() {
        assert_eq!(decode_text("@@@@"), Err(Base64Error::InvalidEncoding));
        assert_eq!(decode_text("SGVsb"), Err(Base64Error::InvalidEncoding));
    }

    #[test]
    fn rejects_non_utf8_payloads() {
        assert_eq!(decode_text("/w=="), Err(Base64Error::NotUtf8));
    }
}
