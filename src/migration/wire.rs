//! Forward-only cursor over the tag-length-value wire format carried by
//! migration payloads.
//!
//! Every read either advances the cursor or fails; adversarial input
//! terminates in O(len) steps. Unknown fields are skipped by wire type
//! alone, which keeps the decoder tolerant of future payload revisions.

use std::fmt;

/// Wire type 0: base-128 varint.
pub const WIRE_VARINT: u8 = 0;
/// Wire type 1: 8 raw little-endian bytes.
pub const WIRE_FIXED64: u8 = 1;
/// Wire type 2: varint length prefix followed by that many bytes.
pub const WIRE_LEN: u8 = 2;
/// Wire type 5: 4 raw little-endian bytes.
pub const WIRE_FIXED32: u8 = 5;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Low-level wire format violation. Folded into
/// [`MigrationErrorKind::MalformedPayload`](crate::MigrationErrorKind) by
/// the message decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// Buffer ended inside a varint.
    TruncatedVarint,
    /// Varint does not fit in 64 bits.
    VarintOverflow,
    /// Buffer ended inside a fixed32/fixed64 field.
    TruncatedFixed,
    /// Length prefix exceeds the remaining buffer.
    TruncatedLengthDelimited { needed: u64, remaining: usize },
    /// Wire type outside {0, 1, 2, 5}; deprecated group types included.
    UnsupportedWireType(u8),
    /// A string field holds bytes that are not valid UTF-8.
    InvalidUtf8,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedVarint => write!(f, "truncated varint"),
            Self::VarintOverflow => write!(f, "varint exceeds 64 bits"),
            Self::TruncatedFixed => write!(f, "truncated fixed-width field"),
            Self::TruncatedLengthDelimited { needed, remaining } => write!(
                f,
                "length-delimited field needs {} byte(s), {} remain",
                needed, remaining
            ),
            Self::UnsupportedWireType(t) => write!(f, "unsupported wire type {}", t),
            Self::InvalidUtf8 => write!(f, "invalid UTF-8 in string field"),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Reader
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A forward-only cursor over a byte slice.
#[derive(Debug)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// `true` once the full buffer has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.buf.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    /// Read a little-endian base-128 varint, capped at 10 bytes.
    pub fn read_varint(&mut self) -> Result<u64, WireError> {
        let mut value: u64 = 0;
        for index in 0..10 {
            let byte = match self.buf.get(self.pos) {
                Some(&b) => b,
                None => return Err(WireError::TruncatedVarint),
            };
            self.pos += 1;
            let bits = u64::from(byte & 0x7f);
            let shift = index * 7;
            // The 10th byte may only carry the final bit of a u64.
            if shift == 63 && bits > 1 {
                return Err(WireError::VarintOverflow);
            }
            value |= bits << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(WireError::VarintOverflow)
    }

    /// Read 4 raw little-endian bytes.
    pub fn read_fixed32(&mut self) -> Result<u32, WireError> {
        let slice = self.take(4).ok_or(WireError::TruncatedFixed)?;
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(slice);
        Ok(u32::from_le_bytes(bytes))
    }

    /// Read 8 raw little-endian bytes.
    pub fn read_fixed64(&mut self) -> Result<u64, WireError> {
        let slice = self.take(8).ok_or(WireError::TruncatedFixed)?;
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(slice);
        Ok(u64::from_le_bytes(bytes))
    }

    /// Read a varint length prefix, then that many bytes as a borrowed slice.
    pub fn read_length_delimited(&mut self) -> Result<&'a [u8], WireError> {
        let len = self.read_varint()?;
        if len > self.remaining() as u64 {
            return Err(WireError::TruncatedLengthDelimited {
                needed: len,
                remaining: self.remaining(),
            });
        }
        // Fits in remaining(), so the usize cast is lossless.
        let end = self.pos + len as usize;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Consume and discard one field's payload based on its wire type.
    pub fn skip_field(&mut self, wire_type: u8) -> Result<(), WireError> {
        match wire_type {
            WIRE_VARINT => {
                self.read_varint()?;
            }
            WIRE_FIXED64 => {
                self.read_fixed64()?;
            }
            WIRE_LEN => {
                self.read_length_delimited()?;
            }
            WIRE_FIXED32 => {
                self.read_fixed32()?;
            }
            other => return Err(WireError::UnsupportedWireType(other)),
        }
        Ok(())
    }
}
