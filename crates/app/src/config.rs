//! Device configuration and its validation.

use std::net::Ipv4Addr;

use displaydoc::Display;
use serde::{Deserialize, Serialize};
use tuya_leds_core::{
    schedule::{MAX_FRAME_DELAY, MIN_FRAME_DELAY},
    topology::MAX_LED_COUNT,
    DeviceModel, LedSource, Milliseconds,
};

/// Minimal length of a Tuya device identifier.
pub const MIN_DEVICE_ID_LEN: usize = 10;

/// Errors reported for an invalid device configuration.
#[derive(Clone, PartialEq, Eq, Display, Debug)]
pub enum ConfigError {
    /// Invalid IP address format
    InvalidAddress,
    /// Device ID must be at least 10 characters
    DeviceIdTooShort,
    /// Access ID and Access Key are required
    MissingAccessCredentials,
    /// Custom LED count must be between 0 and 2000 (0 = auto)
    LedCountOutOfRange(i32),
    /// Refresh rate must be between 10 and 1000 ms
    RefreshRateOutOfRange(u64),
    /// Unknown validation step {0}
    UnknownStep(u8),
}

impl std::error::Error for ConfigError {}

/// A single check of the configuration, in the order the host asks for them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum ValidationStep {
    /// Device address.
    Address = 1,
    /// Device and cloud credentials.
    Credentials = 2,
    /// LED count override.
    LedCount = 3,
    /// Frame refresh rate.
    RefreshRate = 4,
}

impl ValidationStep {
    /// All steps in order.
    pub const ALL: [Self; 4] = [
        Self::Address,
        Self::Credentials,
        Self::LedCount,
        Self::RefreshRate,
    ];
}

impl TryFrom<u8> for ValidationStep {
    type Error = ConfigError;

    fn try_from(step: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|known| *known as u8 == step)
            .ok_or(ConfigError::UnknownStep(step))
    }
}

/// Connection and behavior settings of a single device.
///
/// Keys match the host setting names, missing keys take their defaults.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct DeviceConfig {
    /// IPv4 address of the device.
    #[serde(rename = "deviceIP")]
    pub device_ip: String,
    pub device_id: String,
    pub access_id: String,
    pub access_key: String,
    /// Number of LEDs, `0` uses the model default.
    pub custom_led_count: i32,
    /// Minimal delay between frames in milliseconds.
    pub refresh_rate: u64,
    pub debug_mode: bool,
    /// Device model used when no LED count is set.
    pub model: Option<DeviceModel>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            device_ip: "192.168.1.100".to_owned(),
            device_id: String::new(),
            access_id: String::new(),
            access_key: String::new(),
            custom_led_count: 0,
            refresh_rate: 50,
            debug_mode: false,
            model: None,
        }
    }
}

impl DeviceConfig {
    /// Runs a single validation step.
    pub fn validate_step(&self, step: ValidationStep) -> Result<(), ConfigError> {
        match step {
            ValidationStep::Address => {
                self.device_ip
                    .parse::<Ipv4Addr>()
                    .map_err(|_| ConfigError::InvalidAddress)?;
            }
            ValidationStep::Credentials => {
                if self.device_id.chars().count() < MIN_DEVICE_ID_LEN {
                    return Err(ConfigError::DeviceIdTooShort);
                }
                if self.access_id.is_empty() || self.access_key.is_empty() {
                    return Err(ConfigError::MissingAccessCredentials);
                }
            }
            ValidationStep::LedCount => {
                if !(0..=i32::from(MAX_LED_COUNT)).contains(&self.custom_led_count) {
                    return Err(ConfigError::LedCountOutOfRange(self.custom_led_count));
                }
            }
            ValidationStep::RefreshRate => {
                if !(MIN_FRAME_DELAY.0..=MAX_FRAME_DELAY.0).contains(&self.refresh_rate) {
                    return Err(ConfigError::RefreshRateOutOfRange(self.refresh_rate));
                }
            }
        }
        Ok(())
    }

    /// Runs all validation steps, stops at the first failed one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ValidationStep::ALL
            .into_iter()
            .try_for_each(|step| self.validate_step(step))
    }

    /// Returns where the LED count of this device comes from.
    pub fn led_source(&self) -> Result<LedSource, ConfigError> {
        let count = u32::try_from(self.custom_led_count)
            .map_err(|_| ConfigError::LedCountOutOfRange(self.custom_led_count))?;
        LedSource::from_override(count, self.model)
            .map_err(|_| ConfigError::LedCountOutOfRange(self.custom_led_count))
    }

    /// Returns the minimal delay between frames.
    pub fn frame_delay(&self) -> Milliseconds {
        Milliseconds(self.refresh_rate)
    }
}
