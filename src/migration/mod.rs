//! Migration decoder: sub-modules and the top-level decode pipeline.

pub mod assemble;
pub mod decode;
pub mod link;
pub mod secret;
pub mod types;
pub mod wire;

// Re-export top-level items for convenience.
pub use assemble::{assemble, DEFAULT_PERIOD};
pub use decode::decode_migration_payload;
pub use link::extract_payload;
pub use secret::{decode_secret, encode_secret};
pub use types::*;

/// Decode a migration link into an ordered list of account records.
///
/// Runs the whole pipeline: payload extraction, binary decode and record
/// assembly. Output order matches the order of entries on the wire, one
/// record per entry, nothing dropped.
pub fn decode_migration_link(link: &str) -> Result<Vec<AccountRecord>, MigrationError> {
    let bytes = extract_payload(link)?;
    let payload = decode_migration_payload(&bytes)?;
    Ok(payload.parameters.iter().map(assemble).collect())
}
