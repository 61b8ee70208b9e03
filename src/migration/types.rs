//! Core types for the migration decoder.

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Algorithm
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Hash algorithm used for HMAC-based OTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Algorithm {
    Sha1,
    Sha256,
    Sha512,
    Md5,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Sha1
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sha1 => write!(f, "SHA1"),
            Self::Sha256 => write!(f, "SHA256"),
            Self::Sha512 => write!(f, "SHA512"),
            Self::Md5 => write!(f, "MD5"),
        }
    }
}

impl Algorithm {
    /// Map a raw wire enum code to an algorithm.
    ///
    /// Code 0 (unspecified) and any unrecognised future code fall back to
    /// SHA-1, the de-facto default for authenticator exports.
    pub fn from_code(code: u64) -> Self {
        match code {
            2 => Self::Sha256,
            3 => Self::Sha512,
            4 => Self::Md5,
            _ => Self::Sha1,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OTP type
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Whether an entry uses time-based or counter-based OTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpType {
    Totp,
    Hotp,
}

impl Default for OtpType {
    fn default() -> Self {
        Self::Totp
    }
}

impl fmt::Display for OtpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Totp => write!(f, "TOTP"),
            Self::Hotp => write!(f, "HOTP"),
        }
    }
}

impl OtpType {
    /// Map a raw wire enum code to an OTP type.
    ///
    /// Code 0 (unspecified) and unknown codes fall back to TOTP.
    pub fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Hotp,
            _ => Self::Totp,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Raw wire messages
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One account entry exactly as decoded from the wire, enum codes untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpParameter {
    /// Raw secret key bytes (may be empty for placeholder entries).
    pub secret: Vec<u8>,
    /// Account label (e.g. "user@example.com").
    pub name: String,
    /// Issuer (e.g. "GitHub"); empty when the export carries none.
    pub issuer: String,
    /// Raw algorithm enum code.
    pub algorithm: u64,
    /// Raw digit-count enum code.
    pub digits: u64,
    /// Raw OTP-type enum code (0 = unspecified, 1 = HOTP, 2 = TOTP).
    pub otp_type: u64,
    /// HOTP counter; meaningless for TOTP entries.
    pub counter: u64,
}

/// The decoded top-level export message.
///
/// `parameters` preserves wire order, duplicates included. The batch fields
/// describe multi-QR exports (a large vault is split across several links)
/// and are informational only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationPayload {
    pub parameters: Vec<OtpParameter>,
    pub version: Option<u64>,
    pub batch_size: Option<u64>,
    pub batch_index: Option<u64>,
    pub batch_id: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Account record
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One decoded account in the form OTP clients consume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Issuer; empty when the export carries none.
    pub issuer: String,
    /// Account label.
    pub account: String,
    /// Base-32 encoded secret (uppercase, no padding).
    pub secret: String,
    /// Hash algorithm.
    pub algorithm: Algorithm,
    /// Number of digits in generated codes (6 or 8).
    pub digits: u8,
    /// TOTP or HOTP.
    #[serde(rename = "type")]
    pub otp_type: OtpType,
    /// Time period in seconds; present for TOTP entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<u32>,
    /// Counter value; present for HOTP entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Category of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MigrationErrorKind {
    /// The link is not a well-formed URI or has no `data` parameter.
    InvalidLink,
    /// The `data` parameter is not valid base64.
    InvalidEncoding,
    /// The binary payload violates the wire format.
    MalformedPayload,
}

/// Crate-level error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationError {
    pub kind: MigrationErrorKind,
    pub message: String,
    pub detail: Option<String>,
}

impl fmt::Display for MigrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)?;
        if let Some(d) = &self.detail {
            write!(f, " ({})", d)?;
        }
        Ok(())
    }
}

impl std::error::Error for MigrationError {}

impl MigrationError {
    pub fn new(kind: MigrationErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            message: msg.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<MigrationError> for String {
    fn from(e: MigrationError) -> String {
        e.to_string()
    }
}
