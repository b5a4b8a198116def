//! Fixed-width hexadecimal protocol fields.

use core::fmt::{self, Write as _};

use crate::{Error, Result};

/// The widest field the protocol uses, in bytes.
pub const MAX_FIELD_WIDTH: usize = 4;

/// A zero-padded, lowercase hex field of a declared byte width.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct HexField(heapless::String<{ MAX_FIELD_WIDTH * 2 }>);

impl HexField {
    /// Encodes a number into a field of `width` bytes.
    ///
    /// Values that need more than `width * 2` hex digits are rejected with
    /// [`Error::EncodingOverflow`] instead of being truncated.
    pub fn encode(value: u32, width: usize) -> Result<Self> {
        check_width(width)?;
        if width < MAX_FIELD_WIDTH && value >> (width * 8) != 0 {
            return Err(Error::EncodingOverflow { value, width });
        }

        let mut inner = heapless::String::new();
        write!(inner, "{value:0digits$x}", digits = width * 2)
            .map_err(|_| Error::EncodingOverflow { value, width })?;
        Ok(Self(inner))
    }

    /// Encodes a string of hex digits into a field of `width` bytes.
    ///
    /// The digits are normalized to lowercase and left-padded with zeros.
    pub fn from_hex_str(digits: &str, width: usize) -> Result<Self> {
        check_width(width)?;
        let digits = digits.trim_start_matches('0');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidHexDigit);
        }
        if digits.len() > width * 2 {
            // Only reachable for long inputs, so the value is reported saturated.
            let value = u32::from_str_radix(digits, 16).unwrap_or(u32::MAX);
            return Err(Error::EncodingOverflow { value, width });
        }
        // Fits into `u32` because of the length check above.
        let value = u32::from_str_radix(digits, 16).unwrap_or(0);
        Self::encode(value, width)
    }

    /// Returns the encoded digits.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for HexField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn check_width(width: usize) -> Result<()> {
    if width == 0 || width > MAX_FIELD_WIDTH {
        return Err(Error::UnsupportedFieldWidth(width));
    }
    Ok(())
}
