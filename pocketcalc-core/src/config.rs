//! Timing configuration
//!
//! The device has no storage, so configuration is a set of compile-time
//! defaults that the firmware may override when building the controller.

/// Confirm-read timing for the key scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanTiming {
    /// Wait after driving a row before sampling its columns (µs)
    pub row_settle_us: u32,
    /// Gap between the two samples of a confirm-read (µs)
    pub confirm_us: u32,
    /// Wait after releasing a row before driving the next (µs)
    pub row_release_us: u32,
}

impl ScanTiming {
    pub const DEFAULT: Self = Self {
        row_settle_us: 80,
        confirm_us: 50,
        row_release_us: 40,
    };
}

impl Default for ScanTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Scan tick period (ms)
    pub tick_interval_ms: u32,
    /// Minimum gap between accepted menu/about navigation actions (ms)
    pub nav_interval_ms: u32,
    /// Render on every Nth scan tick
    pub render_divisor: u8,
    /// Pause after a failed tick before waiting for the next one (ms)
    pub fault_backoff_ms: u32,
    /// Key scanner timing
    pub scan: ScanTiming,
}

impl Config {
    pub const DEFAULT: Self = Self {
        tick_interval_ms: 50,
        nav_interval_ms: 300,
        render_divisor: 3,
        fault_backoff_ms: 50,
        scan: ScanTiming::DEFAULT,
    };
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.nav_interval_ms, 300);
        assert_eq!(config.render_divisor, 3);
        assert_eq!(config.fault_backoff_ms, 50);
        assert_eq!(config.scan, ScanTiming::DEFAULT);
    }

    #[test]
    fn test_render_period_is_about_150ms() {
        let config = Config::DEFAULT;
        assert_eq!(config.tick_interval_ms * config.render_divisor as u32, 150);
    }
}
