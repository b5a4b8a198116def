//! Frame delivery off the render path.
//!
//! Rendering must never wait for the network, so frames are put into a
//! bounded queue and a separate task hands them over to a [`FrameSink`].
//! When the queue is full the newest frame is dropped.

// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    async_fn_in_trait
)]

use core::fmt::Display;

use displaydoc::Display;
pub use tuya_leds_app::Transport;
use tuya_leds_core::Frame;

#[cfg(feature = "tokio")]
pub mod tokio;

/// Number of frames waiting for delivery by default.
pub const DEFAULT_QUEUE_LEN: usize = 8;

/// Errors reported by the queued transport.
#[derive(Clone, Copy, PartialEq, Eq, Display, Debug)]
pub enum QueueError {
    /// Frame forwarder has been stopped.
    Closed,
}

impl std::error::Error for QueueError {}

/// Final destination of the frames, usually a device connection.
pub trait FrameSink {
    /// Error type returned on delivery failure.
    type Error: Display;
    /// Delivers a single frame.
    async fn send_frame(&mut self, frame: Frame) -> Result<(), Self::Error>;
}
