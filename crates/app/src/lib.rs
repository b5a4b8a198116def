//! Virtual Tuya LED devices.
//!
//! Glues the encoding pipeline to the host lighting engine: every device owns
//! its configuration, LED topology and transport, and the [`App`] owns every
//! initialized device.

use tuya_leds_core::{Frame, LedPosition, RGB8};
pub use tuya_leds_core::{Error as PipelineError, Result as PipelineResult};

pub use crate::{
    app::App,
    config::{ConfigError, DeviceConfig, ValidationStep},
    device::{RenderMode, VirtualDevice},
};

mod app;
mod config;
mod device;

/// Host canvas which provides the rendered colors.
pub trait Canvas {
    /// Samples the color at the given LED position.
    fn color(&self, position: LedPosition) -> RGB8;
}

impl<F> Canvas for F
where
    F: Fn(LedPosition) -> RGB8,
{
    fn color(&self, position: LedPosition) -> RGB8 {
        self(position)
    }
}

/// Host side representation of a device.
///
/// Receives the device layout each time it is resolved.
pub trait DeviceDisplay {
    /// Sets the device name shown to the user.
    fn set_name(&mut self, name: &str);
    /// Sets the size of the device pixel grid.
    fn set_size(&mut self, columns: u16, rows: u16);
    /// Registers LEDs with their names and grid positions.
    fn set_controllable_leds(&mut self, names: &[String], positions: &[LedPosition]);
}

impl DeviceDisplay for () {
    fn set_name(&mut self, _name: &str) {}

    fn set_size(&mut self, _columns: u16, _rows: u16) {}

    fn set_controllable_leds(&mut self, _names: &[String], _positions: &[LedPosition]) {}
}

/// Delivers frames to the physical device.
///
/// Implementations must not block: if a frame cannot be accepted right now
/// they should return [`nb::Error::WouldBlock`] and the frame is dropped.
pub trait Transport {
    /// Error type returned on delivery failure.
    type Error: core::fmt::Display;
    /// Hands a frame over for delivery.
    fn send_colors(&mut self, frame: &Frame) -> nb::Result<(), Self::Error>;

    /// Hands over the last frame before the device goes away.
    ///
    /// Transports with a bounded buffer should keep room for this frame, so
    /// that it is accepted even if regular frames are piling up.
    fn send_final(&mut self, frame: &Frame) -> nb::Result<(), Self::Error> {
        self.send_colors(frame)
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn send_colors(&mut self, frame: &Frame) -> nb::Result<(), Self::Error> {
        T::send_colors(self, frame)
    }

    fn send_final(&mut self, frame: &Frame) -> nb::Result<(), Self::Error> {
        T::send_final(self, frame)
    }
}
