//! LED layout resolution.

use alloc::{format, string::String, vec::Vec};
use core::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Largest number of LEDs a single device may drive.
pub const MAX_LED_COUNT: u16 = 2000;
/// Largest number of LEDs placed in one row of the layout grid.
pub const MAX_LEDS_PER_ROW: u16 = 50;

/// Number of LEDs, always within `1..=MAX_LED_COUNT`.
#[derive(
    Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash,
)]
#[serde(try_from = "u32", into = "u32")]
pub struct LedCount(u16);

impl LedCount {
    /// A single LED.
    pub const ONE: Self = Self(1);

    /// Checks that the given count is within the supported range.
    pub fn new(count: u32) -> Result<Self> {
        if count == 0 || count > u32::from(MAX_LED_COUNT) {
            return Err(Error::LedCountOutOfRange(count));
        }
        // Lossless after the range check.
        Ok(Self(count as u16))
    }

    pub const fn get(self) -> u16 {
        self.0
    }
}

impl TryFrom<u32> for LedCount {
    type Error = Error;

    fn try_from(count: u32) -> Result<Self> {
        Self::new(count)
    }
}

impl From<LedCount> for u32 {
    fn from(count: LedCount) -> Self {
        count.0.into()
    }
}

impl From<LedCount> for usize {
    fn from(count: LedCount) -> Self {
        count.0.into()
    }
}

impl Display for LedCount {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}

/// Known device models and their built-in LED layouts.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DeviceModel {
    /// Single zone bulb.
    Bulb,
    /// Legacy strip controller with four groups of four LEDs.
    LightStrip,
}

impl DeviceModel {
    /// Returns the number of LEDs the model ships with.
    pub const fn led_count(self) -> LedCount {
        match self {
            Self::Bulb => LedCount(1),
            Self::LightStrip => LedCount(16),
        }
    }

    /// Returns a human readable model name.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Bulb => "Tuya Smart Bulb",
            Self::LightStrip => "Tuya LED Strip",
        }
    }
}

/// Where the LED count of a device comes from.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum LedSource {
    /// The built-in layout of a model, or a single LED for unknown models.
    Model(Option<DeviceModel>),
    /// An explicit LED count set by the user.
    Custom(LedCount),
}

impl LedSource {
    /// Picks the override when it is positive, the model table otherwise.
    pub fn from_override(custom_led_count: u32, model: Option<DeviceModel>) -> Result<Self> {
        if custom_led_count > 0 {
            LedCount::new(custom_led_count).map(Self::Custom)
        } else {
            Ok(Self::Model(model))
        }
    }

    /// Returns the resolved number of LEDs.
    pub fn led_count(self) -> LedCount {
        match self {
            Self::Model(Some(model)) => model.led_count(),
            Self::Model(None) => LedCount::ONE,
            Self::Custom(count) => count,
        }
    }

    /// Returns a human readable device name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Model(Some(model)) => model.display_name(),
            Self::Model(None) => "Tuya Smart Device",
            Self::Custom(_) => "Tuya Smart LED Controller",
        }
    }
}

/// Grid coordinates of a single LED.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Debug, Hash, Default)]
pub struct LedPosition {
    pub column: u16,
    pub row: u16,
}

/// Row-major LED grid used for canvas sampling and host registration.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct LedTopology {
    led_count: LedCount,
    positions: Vec<LedPosition>,
}

impl LedTopology {
    /// Builds a topology from the given LED source.
    pub fn resolve(source: LedSource) -> Self {
        Self::with_led_count(source.led_count())
    }

    /// Lays out the given number of LEDs, at most [`MAX_LEDS_PER_ROW`] per row.
    pub fn with_led_count(led_count: LedCount) -> Self {
        let per_row = leds_per_row(led_count);
        let positions = (0..led_count.get())
            .map(|index| LedPosition {
                column: index % per_row,
                row: index / per_row,
            })
            .collect();

        Self {
            led_count,
            positions,
        }
    }

    pub fn led_count(&self) -> LedCount {
        self.led_count
    }

    /// Returns the LED positions in LED order.
    pub fn positions(&self) -> &[LedPosition] {
        &self.positions
    }

    /// Number of columns in the grid.
    pub fn leds_per_row(&self) -> u16 {
        leds_per_row(self.led_count)
    }

    /// Number of rows in the grid.
    pub fn rows(&self) -> u16 {
        self.led_count.get().div_ceil(self.leds_per_row())
    }

    /// Grid size as `(columns, rows)`.
    pub fn size(&self) -> (u16, u16) {
        (self.leds_per_row(), self.rows())
    }

    /// Display names of the LEDs, starting from `Led 1`.
    pub fn led_names(&self) -> Vec<String> {
        (1..=self.led_count.get())
            .map(|number| format!("Led {number}"))
            .collect()
    }
}

fn leds_per_row(led_count: LedCount) -> u16 {
    led_count.get().min(MAX_LEDS_PER_ROW)
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;

    use super::*;

    fn custom(count: u32) -> LedTopology {
        LedTopology::resolve(LedSource::from_override(count, None).unwrap())
    }

    #[test]
    fn test_led_count_range() {
        assert_eq!(LedCount::new(0), Err(Error::LedCountOutOfRange(0)));
        assert_eq!(LedCount::new(2001), Err(Error::LedCountOutOfRange(2001)));
        assert_eq!(LedCount::new(1).unwrap().get(), 1);
        assert_eq!(LedCount::new(2000).unwrap().get(), 2000);
    }

    #[test]
    fn test_override_wins_over_model() {
        let source = LedSource::from_override(8, Some(DeviceModel::LightStrip)).unwrap();
        assert_eq!(source.led_count().get(), 8);

        let source = LedSource::from_override(0, Some(DeviceModel::LightStrip)).unwrap();
        assert_eq!(source.led_count().get(), 16);

        let source = LedSource::from_override(0, None).unwrap();
        assert_eq!(source.led_count(), LedCount::ONE);
    }

    #[test]
    fn test_small_layout_is_single_row() {
        let topology = custom(8);
        assert_eq!(topology.size(), (8, 1));
        assert_eq!(
            topology.positions()[7],
            LedPosition { column: 7, row: 0 }
        );
    }

    #[test]
    fn test_large_layout_wraps_rows() {
        let topology = custom(121);
        assert_eq!(topology.size(), (50, 3));
        assert_eq!(
            topology.positions()[50],
            LedPosition { column: 0, row: 1 }
        );
        assert_eq!(
            topology.positions()[120],
            LedPosition { column: 20, row: 2 }
        );
    }

    #[test]
    fn test_positions_are_unique_and_bounded() {
        for count in 1..=u32::from(MAX_LED_COUNT) {
            let topology = custom(count);
            let positions = topology.positions();
            let per_row = topology.leds_per_row();

            assert_eq!(positions.len(), count as usize);
            assert!(positions.iter().all(|p| p.column < per_row));
            assert!(positions.iter().all(|p| p.row < topology.rows()));
            let unique: BTreeSet<_> = positions.iter().map(|p| (p.column, p.row)).collect();
            assert_eq!(unique.len(), positions.len());
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        assert_eq!(custom(333), custom(333));
    }

    #[test]
    fn test_led_names() {
        let names = custom(3).led_names();
        assert_eq!(names, ["Led 1", "Led 2", "Led 3"]);
    }
}
