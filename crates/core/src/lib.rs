//! Tuya LED frame encoding pipeline.
//!
//! Resolves an LED layout, converts sampled RGB colors into the device HSV
//! representation and serializes them into the hex command string understood
//! by Tuya LED controllers.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
// Linter configuration
#![warn(unsafe_code, clippy::pedantic, clippy::use_self)]
// Too many false positives.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

extern crate alloc;

pub use rgb::RGB8;

pub use crate::{
    color::{HexColor, Hsv},
    errors::{Error, Result},
    frame::Frame,
    hex::HexField,
    schedule::RenderScheduler,
    time::Milliseconds,
    topology::{DeviceModel, LedCount, LedPosition, LedSource, LedTopology},
};

pub mod color;
pub mod errors;
pub mod frame;
pub mod hex;
pub mod schedule;
pub mod time;
pub mod topology;
