//! Time units used by the render scheduler.

use core::{
    fmt::Display,
    ops::{Add, Sub},
    time::Duration,
};

use serde::{Deserialize, Serialize};

macro_rules! impl_time_unit {
    ($name:ident, $secs_factor:expr) => {
        #[derive(
            Serialize, Deserialize, PartialEq, PartialOrd, Clone, Copy, Eq, Debug, Ord, Hash, Default,
        )]
        pub struct $name(pub u64);

        impl $name {
            pub const SECS_FACTOR: u64 = $secs_factor;

            /// Returns the time elapsed since `earlier`, zero if it is in the future.
            pub const fn saturating_since(self, earlier: Self) -> Self {
                Self(self.0.saturating_sub(earlier.0))
            }
        }

        impl From<u64> for $name {
            fn from(inner: u64) -> Self {
                Self(inner)
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                Self(self.0.saturating_add(rhs.0))
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                self.saturating_since(rhs)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

impl_time_unit!(Milliseconds, 1_000);

impl From<Milliseconds> for Duration {
    fn from(value: Milliseconds) -> Self {
        Duration::from_millis(value.0)
    }
}

impl From<Duration> for Milliseconds {
    fn from(value: Duration) -> Self {
        Self(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }
}
