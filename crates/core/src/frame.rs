//! Command payload encoding.
//!
//! A single color is sent as a compact fixed frame:
//!
//! ```text
//! hue(2) sat/10(1) val/10(1) 00000100
//! ```
//!
//! Several colors are sent as a multi-zone frame, where LEDs are bundled into
//! groups of [`LEDS_PER_GROUP`]:
//!
//! ```text
//! 0004 [hue(2) sat(2) val(2)]* splice_len(2) [group(1)]*
//! ```
//!
//! Field widths are in bytes, each byte is two lowercase hex digits. Group
//! numbers past [`MAX_GROUP`] share the last group.

use alloc::string::String;
use core::fmt::{self, Display};

use crate::{color::Hsv, hex::HexField, topology::LedCount, Error, Result};

/// Number of LEDs sharing a single firmware sub-channel.
pub const LEDS_PER_GROUP: u16 = 4;
/// Trailer of a single color frame that selects direct color mode.
pub const SINGLE_COLOR_TRAILER: &str = "00000100";
/// Mode marker of a multi-zone frame.
pub const MULTI_ZONE_MARKER: &str = "0004";
/// Length of a single color frame in hex digits.
pub const SINGLE_COLOR_FRAME_LEN: usize = 16;
/// The largest group number a one byte group map entry can hold.
pub const MAX_GROUP: u16 = 0xff;

const COLOR_RECORD_LEN: usize = 12;

/// A complete hex command string ready for transport.
#[derive(Clone, PartialEq, Eq, Debug, Default, Hash)]
pub struct Frame(String);

impl Frame {
    /// Encodes the colors of `led_count` LEDs into a frame.
    ///
    /// A single color produces a compact frame, even if the device has more LEDs.
    pub fn build(colors: &[Hsv], led_count: LedCount) -> Result<Self> {
        match colors {
            [] => Err(Error::EmptyFrame),
            [color] => single_color(*color),
            colors => multi_zone(colors, led_count),
        }
    }

    /// Returns the encoded frame.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the frame length in hex digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Frame {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Returns the number of groups needed for `led_count` LEDs.
pub fn groups_count(led_count: LedCount) -> u16 {
    led_count.get().div_ceil(LEDS_PER_GROUP)
}

/// Returns the group of the LED with the given one-based number.
///
/// LEDs past the 1020th are all put into [`MAX_GROUP`].
pub fn group_of(led_number: u16) -> u16 {
    led_number.div_ceil(LEDS_PER_GROUP).min(MAX_GROUP)
}

fn single_color(color: Hsv) -> Result<Frame> {
    let mut frame = String::with_capacity(SINGLE_COLOR_FRAME_LEN);
    frame.push_str(HexField::encode(color.hue.into(), 2)?.as_str());
    frame.push_str(HexField::encode(color.saturation_percent().into(), 1)?.as_str());
    frame.push_str(HexField::encode(color.value_percent().into(), 1)?.as_str());
    frame.push_str(SINGLE_COLOR_TRAILER);
    Ok(Frame(frame))
}

fn multi_zone(colors: &[Hsv], led_count: LedCount) -> Result<Frame> {
    let leds = usize::from(led_count);
    if colors.len() != leds {
        return Err(Error::StripLengthMismatch {
            expected: led_count.get(),
            actual: colors.len(),
        });
    }

    let mut frame = String::with_capacity(
        MULTI_ZONE_MARKER.len() + colors.len() * COLOR_RECORD_LEN + 4 + leds * 2,
    );

    frame.push_str(MULTI_ZONE_MARKER);
    for color in colors {
        frame.push_str(HexField::encode(color.hue.into(), 2)?.as_str());
        frame.push_str(HexField::encode(color.saturation.into(), 2)?.as_str());
        frame.push_str(HexField::encode(color.value.into(), 2)?.as_str());
    }
    frame.push_str(HexField::encode(led_count.into(), 2)?.as_str());
    for led_number in 1..=led_count.get() {
        frame.push_str(HexField::encode(group_of(led_number).into(), 1)?.as_str());
    }

    log::trace!(
        "Encoded {} colors into {} groups",
        colors.len(),
        groups_count(led_count)
    );
    Ok(Frame(frame))
}
