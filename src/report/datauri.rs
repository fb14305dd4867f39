use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const PDF_DATA_URI_PREFIX: &str = "data:application/pdf;base64,";

pub fn encode_pdf(bytes: &[u8]) -> String {
    format!("{}{}", PDF_DATA_URI_PREFIX, STANDARD.encode(bytes))
}

/// Accepts `data:application/pdf;base64,...`, `data:base64,...`, any other
/// `...,payload` form, or bare base64.
pub fn decode_attachment(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = data
        .strip_prefix(PDF_DATA_URI_PREFIX)
        .or_else(|| data.strip_prefix("data:base64,"))
        .or_else(|| data.split_once(',').map(|(_, rest)| rest))
        .unwrap_or(data);
    STANDARD.decode(payload.trim())
}
