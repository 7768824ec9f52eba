//! Settings screen for the Xteink X4 e-reader.
//! Descriptor registry, navigation controller and render scheduling.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::unreachable,
        clippy::unwrap_used
    )
)]

extern crate alloc;

pub mod buffered_display;
pub mod config;
pub mod device_settings;
pub mod input;
pub mod navigation;
pub mod registry;
pub mod render;
pub mod setting_info;
pub mod surface;
pub mod test_display;
pub mod ui;

#[cfg(feature = "std")]
pub mod render_task;
#[cfg(feature = "std")]
pub mod settings_activity;
#[cfg(feature = "std")]
pub mod settings_file;

/// Portrait width the UI draws in
pub const DISPLAY_WIDTH: u32 = 480;
/// Portrait height the UI draws in
pub const DISPLAY_HEIGHT: u32 = 800;

pub use config::{SettingsScreenConfig, FIRMWARE_VERSION};
pub use device_settings::{
    BoolField, ByteField, DeviceSettings, InMemorySettingsStore, SettingsStore,
};
pub use input::{
    Button, ButtonLabels, FrontButtonLayout, FrontRole, InputEvent, InputSource, MappedInput,
};
pub use navigation::{ControllerOutcome, NavigationState, CHANGE_TAB_HOLD_MS};
pub use registry::{Category, CATEGORIES, CATEGORY_COUNT};
pub use setting_info::{SettingAction, SettingChange, SettingInfo, SettingKind, ValueRange};
pub use surface::FrameSurface;

#[cfg(feature = "std")]
pub use device_settings::{lock_settings, shared_settings, SharedSettings};
#[cfg(feature = "std")]
pub use settings_activity::SettingsActivity;
#[cfg(feature = "std")]
pub use settings_file::{FileSettingsStore, SettingsFileError};
#[cfg(feature = "std")]
pub use surface::{lock_surface, SharedSurface};
