//! Payload codec between UTF-8 text, raw bytes and `0x` hex strings.

use crate::domain::error::CellError;

/// Prefix marking a hex string.
pub const HEX_PREFIX: &str = "0x";

/// Hex form of a zero-length payload.
pub const EMPTY_HEX: &str = "0x";

pub fn encode_hex(bytes: &[u8]) -> String {
    format!("{HEX_PREFIX}{}", hex::encode(bytes))
}

pub fn decode_hex(value: &str) -> Result<Vec<u8>, CellError> {
    let digits = value
        .strip_prefix(HEX_PREFIX)
        .ok_or_else(|| CellError::Format(format!("hex data should start with 0x: {value}")))?;
    hex::decode(digits).map_err(|e| CellError::Format(format!("{value}: {e}")))
}

pub fn text_to_hex(text: &str) -> String {
    encode_hex(text.as_bytes())
}

pub fn hex_to_text(value: &str) -> Result<String, CellError> {
    let bytes = decode_hex(value)?;
    String::from_utf8(bytes).map_err(|e| CellError::Format(format!("payload is not UTF-8: {e}")))
}
