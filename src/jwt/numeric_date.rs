use core::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

/// A JSON numeric value representing the number of seconds from
/// 1970-01-01T00:00:00Z UTC, ignoring leap seconds.
///
/// Sub-second precision is dropped, every conversion truncates towards the
/// start of the epoch.
///
/// See [section 2 of RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519#section-2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NumericDate(u64);

impl NumericDate {
    /// The start of the epoch.
    pub const UNIX_EPOCH: Self = Self(0);

    /// Creates a date from whole seconds since the epoch.
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// The number of whole seconds since the epoch.
    pub const fn as_secs(&self) -> u64 {
        self.0
    }

    /// The current time.
    #[cfg(feature = "std")]
    pub fn now() -> Self {
        std::time::SystemTime::now().into()
    }
}

impl From<Duration> for NumericDate {
    /// Interprets the duration as time since the epoch.
    fn from(since_epoch: Duration) -> Self {
        Self(since_epoch.as_secs())
    }
}

impl From<NumericDate> for Duration {
    fn from(date: NumericDate) -> Self {
        Duration::from_secs(date.0)
    }
}

#[cfg(feature = "std")]
impl From<std::time::SystemTime> for NumericDate {
    /// Times before the epoch are clamped to the epoch.
    fn from(time: std::time::SystemTime) -> Self {
        time.duration_since(std::time::UNIX_EPOCH)
            .map(Self::from)
            .unwrap_or(Self::UNIX_EPOCH)
    }
}

#[cfg(feature = "std")]
impl From<NumericDate> for std::time::SystemTime {
    fn from(date: NumericDate) -> Self {
        std::time::UNIX_EPOCH + Duration::from(date)
    }
}

impl fmt::Display for NumericDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
