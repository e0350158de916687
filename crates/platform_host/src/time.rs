//! Time helpers shared across host contracts and adapters.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Wall-clock time of day in the host's local timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalClockTime {
    /// Hour, `0..24`.
    pub hour: u32,
    /// Minute, `0..60`.
    pub minute: u32,
    /// Second, `0..60`.
    pub second: u32,
}

impl LocalClockTime {
    /// Builds a clock value, wrapping out-of-range components.
    pub const fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// Reads the current local time.
    ///
    /// Outside the browser there is no timezone database, so UTC is reported.
    pub fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            Self::new(date.get_hours(), date.get_minutes(), date.get_seconds())
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let secs = unix_time_ms_now() / 1000;
            let day_secs = (secs % 86_400) as u32;
            Self::new(day_secs / 3600, (day_secs / 60) % 60, day_secs % 60)
        }
    }

    /// `HH:MM:SS`, zero padded.
    pub fn hms(self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }

    /// `HH:MM`, zero padded.
    pub fn hm(self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}
