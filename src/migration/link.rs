//! Migration-link parsing: pulls the base64 payload out of an
//! `otpauth-migration://offline?data=…` link and decodes it to raw bytes.
//!
//! The scheme and host are not interpreted beyond requiring a well-formed
//! URI with an authority; only the `data` query parameter is consumed.

use base64::Engine;
use url::Url;

use crate::migration::types::{MigrationError, MigrationErrorKind};

/// Extract and base64-decode the `data` query parameter of a migration link.
pub fn extract_payload(link: &str) -> Result<Vec<u8>, MigrationError> {
    let url = Url::parse(link.trim()).map_err(|e| {
        MigrationError::new(MigrationErrorKind::InvalidLink, "Link is not a valid URI")
            .with_detail(e.to_string())
    })?;

    if url.host_str().is_none() {
        return Err(MigrationError::new(
            MigrationErrorKind::InvalidLink,
            "Link has no host segment",
        ));
    }

    let data = url
        .query_pairs()
        .find(|(key, _)| key == "data")
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            MigrationError::new(
                MigrationErrorKind::InvalidLink,
                "Missing 'data' query parameter",
            )
        })?;

    // query_pairs applies form decoding, which turns a literal '+' into a
    // space. Spaces never occur in base64, so map them back.
    let data = data.replace(' ', "+");

    let payload = decode_base64(&data).map_err(|e| {
        MigrationError::new(
            MigrationErrorKind::InvalidEncoding,
            "Payload is not valid base64",
        )
        .with_detail(e.to_string())
    })?;

    log::debug!("extracted {} payload byte(s) from migration link", payload.len());
    Ok(payload)
}

/// Decode base64 accepting standard and URL-safe alphabets, padded or not.
fn decode_base64(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};

    STANDARD
        .decode(data)
        .or_else(|_| STANDARD_NO_PAD.decode(data))
        .or_else(|_| URL_SAFE.decode(data))
        .or_else(|_| URL_SAFE_NO_PAD.decode(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str = "otpauth-migration://offline?data=CjQKFKuOm4V945mpzWoDXUoJMyfferkVEg5qZG9lQGdtYWlsLmNvbRoGQW1hem9uIAEoATACEAIYASAA";

    #[test]
    fn extracts_payload_from_valid_link() {
        let bytes = extract_payload(LINK).unwrap();
        assert_eq!(bytes.len(), 60);
        // Outer message starts with field 1, wire type 2.
        assert_eq!(bytes[0], 0x0a);
    }

    #[test]
    fn not_a_uri_is_invalid_link() {
        let err = extract_payload("invalid-url").unwrap_err();
        assert_eq!(err.kind, MigrationErrorKind::InvalidLink);
    }

    #[test]
    fn missing_data_parameter_is_invalid_link() {
        let err = extract_payload("otpauth-migration://offline?other=1").unwrap_err();
        assert_eq!(err.kind, MigrationErrorKind::InvalidLink);

        let err = extract_payload("otpauth-migration://offline").unwrap_err();
        assert_eq!(err.kind, MigrationErrorKind::InvalidLink);
    }

    #[test]
    fn bad_base64_is_invalid_encoding() {
        let err = extract_payload("otpauth-migration://offline?data=%25%25%25").unwrap_err();
        assert_eq!(err.kind, MigrationErrorKind::InvalidEncoding);
    }

    #[test]
    fn accepts_percent_encoded_padding_and_plus() {
        // "+A==" percent-encoded; decodes as standard base64.
        let link = "otpauth-migration://offline?data=%2BA%3D%3D";
        let bytes = extract_payload(link).unwrap();
        assert_eq!(bytes, vec![0xf8]);
    }

    #[test]
    fn accepts_literal_plus_in_query() {
        // A '+' that survived without percent-encoding must not be treated
        // as a space.
        let link = "otpauth-migration://offline?data=+A==";
        let bytes = extract_payload(link).unwrap();
        assert_eq!(bytes, vec![0xf8]);
    }

    #[test]
    fn accepts_url_safe_alphabet_without_padding() {
        // 0xf8 0x00 is "-AA" in URL-safe base64 (unpadded "+AA" standard).
        let link = "otpauth-migration://offline?data=-AA";
        let bytes = extract_payload(link).unwrap();
        assert_eq!(bytes, vec![0xf8, 0x00]);
    }
}
