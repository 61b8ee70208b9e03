//! Base-32 re-encoding of raw secret bytes into the textual form OTP
//! clients expect (RFC 4648, uppercase, no padding).

/// Encode raw bytes to base-32 (no padding, uppercase).
///
/// Empty input yields an empty string — some exports carry placeholder
/// entries without a secret.
pub fn encode_secret(bytes: &[u8]) -> String {
    base32::encode(base32::Alphabet::Rfc4648 { padding: false }, bytes)
}

/// Decode a base-32 secret back to raw bytes.
///
/// Tolerates lowercase and surrounding whitespace; returns `None` for
/// non-alphabet characters.
pub fn decode_secret(s: &str) -> Option<Vec<u8>> {
    let cleaned = s.trim().to_uppercase();
    base32::decode(base32::Alphabet::Rfc4648 { padding: false }, &cleaned)
}
