//! Device-wide persisted settings and the store interface screens write through.
//!
//! The settings object is owned by the application root and shared with
//! every screen as a [`SharedSettings`] handle. Descriptors reach individual
//! fields through [`BoolField`] and [`ByteField`] identifiers instead of
//! holding references into the struct.

#[cfg(feature = "std")]
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Device settings (in-memory copy of the persisted file)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSettings {
    // Display
    pub sleep_screen: u8,
    pub sleep_screen_cover_mode: u8,
    pub sleep_screen_cover_filter: u8,
    pub status_bar: u8,
    pub hide_battery_percentage: u8,
    pub refresh_frequency: u8,
    pub ui_theme: u8,
    // Reader
    pub font_family: u8,
    pub font_size: u8,
    pub line_spacing: u8,
    pub screen_margin: u8,
    pub paragraph_alignment: u8,
    pub hyphenation_enabled: bool,
    pub orientation: u8,
    pub extra_paragraph_spacing: bool,
    pub text_anti_aliasing: bool,
    // Controls
    pub side_button_layout: u8,
    pub long_press_chapter_skip: bool,
    pub short_power_button: u8,
    // System
    pub sleep_timeout: u8,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            sleep_screen: 0,
            sleep_screen_cover_mode: 0,
            sleep_screen_cover_filter: 0,
            status_bar: 2,
            hide_battery_percentage: 0,
            refresh_frequency: 3,
            ui_theme: 0,
            font_family: 0,
            font_size: 1,
            line_spacing: 1,
            screen_margin: 5,
            paragraph_alignment: 0,
            hyphenation_enabled: false,
            orientation: 0,
            extra_paragraph_spacing: true,
            text_anti_aliasing: true,
            side_button_layout: 0,
            long_press_chapter_skip: true,
            short_power_button: 0,
            sleep_timeout: 2,
        }
    }
}

impl DeviceSettings {
    /// Reset to factory defaults
    pub fn reset_to_defaults(&mut self) {
        *self = Self::default();
    }
}

/// Boolean fields reachable from a toggle descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolField {
    Hyphenation,
    ExtraParagraphSpacing,
    TextAntiAliasing,
    LongPressChapterSkip,
}

impl BoolField {
    pub const fn get(self, settings: &DeviceSettings) -> bool {
        match self {
            Self::Hyphenation => settings.hyphenation_enabled,
            Self::ExtraParagraphSpacing => settings.extra_paragraph_spacing,
            Self::TextAntiAliasing => settings.text_anti_aliasing,
            Self::LongPressChapterSkip => settings.long_press_chapter_skip,
        }
    }

    pub fn set(self, settings: &mut DeviceSettings, value: bool) {
        let slot = match self {
            Self::Hyphenation => &mut settings.hyphenation_enabled,
            Self::ExtraParagraphSpacing => &mut settings.extra_paragraph_spacing,
            Self::TextAntiAliasing => &mut settings.text_anti_aliasing,
            Self::LongPressChapterSkip => &mut settings.long_press_chapter_skip,
        };
        *slot = value;
    }
}

/// Byte-sized fields reachable from enum and value descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteField {
    SleepScreen,
    SleepScreenCoverMode,
    SleepScreenCoverFilter,
    StatusBar,
    HideBatteryPercentage,
    RefreshFrequency,
    UiTheme,
    FontFamily,
    FontSize,
    LineSpacing,
    ScreenMargin,
    ParagraphAlignment,
    Orientation,
    SideButtonLayout,
    ShortPowerButton,
    SleepTimeout,
}

impl ByteField {
    pub const fn get(self, settings: &DeviceSettings) -> u8 {
        match self {
            Self::SleepScreen => settings.sleep_screen,
            Self::SleepScreenCoverMode => settings.sleep_screen_cover_mode,
            Self::SleepScreenCoverFilter => settings.sleep_screen_cover_filter,
            Self::StatusBar => settings.status_bar,
            Self::HideBatteryPercentage => settings.hide_battery_percentage,
            Self::RefreshFrequency => settings.refresh_frequency,
            Self::UiTheme => settings.ui_theme,
            Self::FontFamily => settings.font_family,
            Self::FontSize => settings.font_size,
            Self::LineSpacing => settings.line_spacing,
            Self::ScreenMargin => settings.screen_margin,
            Self::ParagraphAlignment => settings.paragraph_alignment,
            Self::Orientation => settings.orientation,
            Self::SideButtonLayout => settings.side_button_layout,
            Self::ShortPowerButton => settings.short_power_button,
            Self::SleepTimeout => settings.sleep_timeout,
        }
    }

    pub fn set(self, settings: &mut DeviceSettings, value: u8) {
        let slot = match self {
            Self::SleepScreen => &mut settings.sleep_screen,
            Self::SleepScreenCoverMode => &mut settings.sleep_screen_cover_mode,
            Self::SleepScreenCoverFilter => &mut settings.sleep_screen_cover_filter,
            Self::StatusBar => &mut settings.status_bar,
            Self::HideBatteryPercentage => &mut settings.hide_battery_percentage,
            Self::RefreshFrequency => &mut settings.refresh_frequency,
            Self::UiTheme => &mut settings.ui_theme,
            Self::FontFamily => &mut settings.font_family,
            Self::FontSize => &mut settings.font_size,
            Self::LineSpacing => &mut settings.line_spacing,
            Self::ScreenMargin => &mut settings.screen_margin,
            Self::ParagraphAlignment => &mut settings.paragraph_alignment,
            Self::Orientation => &mut settings.orientation,
            Self::SideButtonLayout => &mut settings.side_button_layout,
            Self::ShortPowerButton => &mut settings.short_power_button,
            Self::SleepTimeout => &mut settings.sleep_timeout,
        };
        *slot = value;
    }
}

/// Persisted-settings store shared with the rest of the device.
pub trait SettingsStore {
    fn settings(&self) -> &DeviceSettings;

    fn settings_mut(&mut self) -> &mut DeviceSettings;

    /// Synchronously persist the current settings. Safe to call repeatedly;
    /// failures are the store's concern and are not reported to callers.
    fn save_to_file(&mut self);
}

/// Store that keeps settings in memory and counts save requests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    settings: DeviceSettings,
    save_count: usize,
    last_saved: Option<DeviceSettings>,
}

impl InMemorySettingsStore {
    pub fn new(settings: DeviceSettings) -> Self {
        Self {
            settings,
            save_count: 0,
            last_saved: None,
        }
    }

    /// Number of `save_to_file` calls so far
    pub fn save_count(&self) -> usize {
        self.save_count
    }

    /// Snapshot taken by the most recent save
    pub fn last_saved(&self) -> Option<&DeviceSettings> {
        self.last_saved.as_ref()
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut DeviceSettings {
        &mut self.settings
    }

    fn save_to_file(&mut self) {
        self.save_count += 1;
        self.last_saved = Some(self.settings);
    }
}

/// Shared handle to the device settings store.
#[cfg(feature = "std")]
pub type SharedSettings<S> = Arc<Mutex<S>>;

/// Wrap a store into a shared handle.
#[cfg(feature = "std")]
pub fn shared_settings<S: SettingsStore>(store: S) -> SharedSettings<S> {
    Arc::new(Mutex::new(store))
}

/// Lock a shared store, recovering from poisoning.
///
/// The store holds plain data that is never left half-written, so a panic in
/// another holder does not invalidate it.
#[cfg(feature = "std")]
pub fn lock_settings<S>(handle: &Mutex<S>) -> MutexGuard<'_, S> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}
