use core::fmt::Display;

use displaydoc::Display;

/// A specialized result type for the LED pipeline.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while resolving a topology or building a frame.
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum Error {
    /// Value {value} does not fit into a {width}-byte hex field.
    EncodingOverflow { value: u32, width: usize },
    /// Hex field width {0} is not supported.
    UnsupportedFieldWidth(usize),
    /// Input is not a valid hex string.
    InvalidHexDigit,
    /// LED count {0} is out of the supported range 1..=2000.
    LedCountOutOfRange(u32),
    /// Frame has no colors to encode.
    EmptyFrame,
    /// Got {actual} colors for a strip of {expected} LEDs.
    StripLengthMismatch { expected: u16, actual: usize },
    /// Unable to hand the frame over to the transport.
    Transport,
    /// Transport has no room for the frame.
    TransportBusy,
}

impl Error {
    /// Creates a new transport error.
    pub fn transport<E>(err: E) -> Self
    where
        E: Display,
    {
        log::debug!("Transport failure: {err}");
        Self::Transport
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
