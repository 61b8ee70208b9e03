//! Tag-driven decoding of the migration payload and its account entries.
//!
//! The outer message carries repeated account entries in field 1 plus batch
//! metadata in fields 2–5. Each entry is a nested message:
//!
//! ```text
//! 1: secret (bytes)
//! 2: name (string)
//! 3: issuer (string)
//! 4: algorithm (varint: 0=unspecified, 1=SHA1, 2=SHA256, 3=SHA512, 4=MD5)
//! 5: digits (varint: 0=unspecified, 1=six, 2=eight)
//! 6: type (varint: 0=unspecified, 1=HOTP, 2=TOTP)
//! 7: counter (varint)
//! ```
//!
//! Unknown field numbers are skipped by wire type; any wire-format violation
//! aborts the whole decode, since a corrupt offset invalidates every
//! subsequent field boundary.

use crate::migration::types::{
    MigrationError, MigrationErrorKind, MigrationPayload, OtpParameter,
};
use crate::migration::wire::{WireError, WireReader, WIRE_LEN, WIRE_VARINT};

/// Decode the top-level export message.
///
/// Entry order matches wire order exactly, duplicates included. Fails with
/// [`MigrationErrorKind::MalformedPayload`] on any wire-format violation;
/// partial results are never returned.
pub fn decode_migration_payload(bytes: &[u8]) -> Result<MigrationPayload, MigrationError> {
    let payload = decode_payload_fields(bytes).map_err(|e| {
        MigrationError::new(
            MigrationErrorKind::MalformedPayload,
            "Malformed migration payload",
        )
        .with_detail(e.to_string())
    })?;
    log::debug!(
        "decoded migration payload: {} account(s), batch index {:?} of {:?}",
        payload.parameters.len(),
        payload.batch_index,
        payload.batch_size
    );
    Ok(payload)
}

fn decode_payload_fields(bytes: &[u8]) -> Result<MigrationPayload, WireError> {
    let mut reader = WireReader::new(bytes);
    let mut payload = MigrationPayload::default();

    while !reader.at_end() {
        let tag = reader.read_varint()?;
        let field = tag >> 3;
        let wire_type = (tag & 0x7) as u8;

        match (field, wire_type) {
            (1, WIRE_LEN) => {
                let slice = reader.read_length_delimited()?;
                payload.parameters.push(decode_otp_parameter(slice)?);
            }
            (2, WIRE_VARINT) => payload.version = Some(reader.read_varint()?),
            (3, WIRE_VARINT) => payload.batch_size = Some(reader.read_varint()?),
            (4, WIRE_VARINT) => payload.batch_index = Some(reader.read_varint()?),
            (5, WIRE_VARINT) => payload.batch_id = Some(reader.read_varint()?),
            (field, wire_type) => {
                log::debug!("skipping payload field {} (wire type {})", field, wire_type);
                reader.skip_field(wire_type)?;
            }
        }
    }

    Ok(payload)
}

/// Decode one nested account entry.
fn decode_otp_parameter(bytes: &[u8]) -> Result<OtpParameter, WireError> {
    let mut reader = WireReader::new(bytes);
    let mut param = OtpParameter::default();

    while !reader.at_end() {
        let tag = reader.read_varint()?;
        let field = tag >> 3;
        let wire_type = (tag & 0x7) as u8;

        match (field, wire_type) {
            (1, WIRE_LEN) => param.secret = reader.read_length_delimited()?.to_vec(),
            (2, WIRE_LEN) => param.name = read_string(&mut reader)?,
            (3, WIRE_LEN) => param.issuer = read_string(&mut reader)?,
            (4, WIRE_VARINT) => param.algorithm = reader.read_varint()?,
            (5, WIRE_VARINT) => param.digits = reader.read_varint()?,
            (6, WIRE_VARINT) => param.otp_type = reader.read_varint()?,
            (7, WIRE_VARINT) => param.counter = reader.read_varint()?,
            (_, wire_type) => reader.skip_field(wire_type)?,
        }
    }

    Ok(param)
}

fn read_string(reader: &mut WireReader<'_>) -> Result<String, WireError> {
    let slice = reader.read_length_delimited()?;
    std::str::from_utf8(slice)
        .map(str::to_owned)
        .map_err(|_| WireError::InvalidUtf8)
}
