//! Runtime configuration for the settings screen.

use core::time::Duration;

use crate::navigation::CHANGE_TAB_HOLD_MS;

/// Version string drawn in the header
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tunables for the settings screen and its render task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsScreenConfig {
    /// Poll interval of the render task
    pub render_interval: Duration,
    /// Up/Down holds longer than this switch category on release
    pub long_hold_ms: u32,
    /// Stack size for the render thread
    pub render_task_stack_bytes: usize,
    /// Thread name (shows up in ESP-IDF task lists)
    pub render_task_name: &'static str,
    /// Version text drawn in the header
    pub version: &'static str,
}

impl SettingsScreenConfig {
    const DEFAULT_RENDER_INTERVAL_MS: u64 = 10;
    const DEFAULT_RENDER_STACK_BYTES: usize = 16 * 1024;

    pub fn with_render_interval(mut self, interval: Duration) -> Self {
        self.render_interval = interval;
        self
    }

    pub fn with_long_hold_ms(mut self, long_hold_ms: u32) -> Self {
        self.long_hold_ms = long_hold_ms;
        self
    }
}

impl Default for SettingsScreenConfig {
    fn default() -> Self {
        Self {
            render_interval: Duration::from_millis(Self::DEFAULT_RENDER_INTERVAL_MS),
            long_hold_ms: CHANGE_TAB_HOLD_MS,
            render_task_stack_bytes: Self::DEFAULT_RENDER_STACK_BYTES,
            render_task_name: "settings-render",
            version: FIRMWARE_VERSION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SettingsScreenConfig::default();
        assert_eq!(config.render_interval, Duration::from_millis(10));
        assert_eq!(config.long_hold_ms, 700);
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn builders_override() {
        let config = SettingsScreenConfig::default()
            .with_render_interval(Duration::from_millis(1))
            .with_long_hold_ms(300);
        assert_eq!(config.render_interval, Duration::from_millis(1));
        assert_eq!(config.long_hold_ms, 300);
    }
}
