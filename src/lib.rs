//! # otpauth-migration
//!
//! Decoder for authenticator bulk-export links of the form
//! `otpauth-migration://offline?data=…`, as produced when a user exports
//! accounts from Google Authenticator and compatible apps:
//!
//! - **Payload extraction** – URI parsing and base64 decoding of the `data`
//!   query parameter (standard and URL-safe alphabets, padded or not)
//! - **Wire decoding** – a self-contained parser for the length-delimited,
//!   tag-based binary export format, with forward-compatible skipping of
//!   unknown fields
//! - **Account records** – issuer, label, base-32 secret, hash algorithm,
//!   digit count and TOTP/HOTP parameters, in wire order
//!
//! The pipeline is pure and synchronous: no I/O, no external binaries, no
//! shared state. Malformed input fails with a typed error rather than a
//! partial result.
//!
//! ```rust
//! use otpauth_migration::decode_migration_link;
//!
//! let link = "otpauth-migration://offline?data=CjQKFKuOm4V945mpzWoDXUoJMyfferkVEg5qZG9lQGdtYWlsLmNvbRoGQW1hem9uIAEoATACEAIYASAA";
//! let records = decode_migration_link(link).unwrap();
//! assert_eq!(records[0].account, "jdoe@gmail.com");
//! assert_eq!(records[0].issuer, "Amazon");
//! ```

pub mod migration;

pub use migration::{
    decode_migration_link, decode_migration_payload, decode_secret, encode_secret,
    extract_payload, AccountRecord, Algorithm, MigrationError, MigrationErrorKind,
    MigrationPayload, OtpParameter, OtpType,
};
