//! File-backed settings store.
//!
//! Format: a `v1` header line, then one tab-separated line holding every
//! bound setting in registry order. Toggles are written as `0`/`1`, enum and
//! numeric settings as their decimal value.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::device_settings::{DeviceSettings, SettingsStore};
use crate::registry::{self, all_settings};
use crate::setting_info::SettingKind;

const FORMAT_HEADER: &str = "v1";

/// Default location of the settings file
pub fn settings_file_path() -> &'static str {
    if cfg!(target_os = "espidf") {
        "/sd/.crosspoint/settings.tsv"
    } else {
        "target/.xteink-settings.tsv"
    }
}

/// Errors while reading or writing the settings file
#[derive(Debug)]
pub enum SettingsFileError {
    /// Filesystem error
    Io(std::io::Error),
    /// First line is not a known format version
    UnknownHeader(String),
    /// File ended before this setting
    MissingField(&'static str),
    /// Field could not be parsed for this setting
    InvalidField {
        name: &'static str,
        value: String,
    },
}

impl fmt::Display for SettingsFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsFileError::Io(err) => write!(f, "I/O error: {err}"),
            SettingsFileError::UnknownHeader(header) => {
                write!(f, "Unknown settings format: {header:?}")
            }
            SettingsFileError::MissingField(name) => write!(f, "Missing field: {name}"),
            SettingsFileError::InvalidField { name, value } => {
                write!(f, "Invalid value for {name}: {value:?}")
            }
        }
    }
}

impl core::error::Error for SettingsFileError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            SettingsFileError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsFileError {
    fn from(err: std::io::Error) -> Self {
        SettingsFileError::Io(err)
    }
}

/// Serialize settings to the `v1` text format.
pub fn encode_settings(settings: &DeviceSettings) -> String {
    let fields: Vec<String> = all_settings()
        .filter_map(|info| match info.kind {
            SettingKind::Toggle(field) => Some(u8::from(field.get(settings)).to_string()),
            SettingKind::Enum { field, .. } | SettingKind::Value { field, .. } => {
                Some(field.get(settings).to_string())
            }
            SettingKind::Action(_) => None,
        })
        .collect();

    let mut out = String::from(FORMAT_HEADER);
    out.push('\n');
    out.push_str(&fields.join("\t"));
    out.push('\n');
    out
}

/// Parse the `v1` text format. Loaded values are normalized into range.
pub fn decode_settings(raw: &str) -> Result<DeviceSettings, SettingsFileError> {
    let mut lines = raw.lines();
    let header = lines.next().unwrap_or_default();
    if header != FORMAT_HEADER {
        return Err(SettingsFileError::UnknownHeader(header.to_string()));
    }
    let mut fields = lines.next().unwrap_or_default().split('\t');

    let mut settings = DeviceSettings::default();
    for info in all_settings() {
        if matches!(info.kind, SettingKind::Action(_)) {
            continue;
        }
        let raw_field = fields
            .next()
            .filter(|field| !field.is_empty())
            .ok_or(SettingsFileError::MissingField(info.name))?;
        let value = raw_field
            .parse::<u8>()
            .map_err(|_| SettingsFileError::InvalidField {
                name: info.name,
                value: raw_field.to_string(),
            })?;
        match info.kind {
            SettingKind::Toggle(field) => field.set(&mut settings, value != 0),
            SettingKind::Enum { field, .. } | SettingKind::Value { field, .. } => {
                field.set(&mut settings, value)
            }
            SettingKind::Action(_) => {}
        }
    }

    let fixed = registry::normalize_all(&mut settings);
    if fixed > 0 {
        log::warn!("[SETTINGS-FILE] normalized {} out-of-range values", fixed);
    }
    Ok(settings)
}

/// Settings store persisted to a file.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
    settings: DeviceSettings,
}

impl FileSettingsStore {
    /// Open the store at `path`, falling back to defaults when the file is
    /// missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = match Self::load(&path) {
            Ok(settings) => {
                log::info!("[SETTINGS-FILE] loaded {}", path.display());
                settings
            }
            Err(SettingsFileError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("[SETTINGS-FILE] no settings file, using defaults");
                DeviceSettings::default()
            }
            Err(err) => {
                log::warn!(
                    "[SETTINGS-FILE] failed to load {}: {}",
                    path.display(),
                    err
                );
                DeviceSettings::default()
            }
        };
        Self { path, settings }
    }

    /// Open the store at the default device location.
    pub fn open_default() -> Self {
        Self::open(settings_file_path())
    }

    pub fn load(path: &Path) -> Result<DeviceSettings, SettingsFileError> {
        let raw = std::fs::read_to_string(path)?;
        decode_settings(&raw)
    }

    /// Write the current settings, creating parent directories as needed.
    pub fn save(&self) -> Result<(), SettingsFileError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, encode_settings(&self.settings))?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn settings(&self) -> &DeviceSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut DeviceSettings {
        &mut self.settings
    }

    fn save_to_file(&mut self) {
        match self.save() {
            Ok(()) => log::debug!("[SETTINGS-FILE] saved {}", self.path.display()),
            Err(err) => log::warn!(
                "[SETTINGS-FILE] failed to save {}: {}",
                self.path.display(),
                err
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("xteink-settings-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn default_encoding() {
        let encoded = encode_settings(&DeviceSettings::default());
        assert_eq!(
            encoded,
            "v1\n0\t0\t0\t2\t0\t3\t0\t0\t1\t1\t5\t0\t0\t0\t1\t1\t0\t1\t0\t2\n"
        );
    }

    #[test]
    fn decode_restores_encoded_settings() {
        let settings = DeviceSettings {
            screen_margin: 25,
            hyphenation_enabled: true,
            ui_theme: 1,
            sleep_timeout: 4,
            ..DeviceSettings::default()
        };
        assert_eq!(
            decode_settings(&encode_settings(&settings)).unwrap(),
            settings
        );
    }

    #[test]
    fn decode_normalizes_out_of_range_values() {
        let raw = "v1\n9\t0\t0\t2\t0\t3\t0\t0\t1\t1\t42\t0\t0\t0\t1\t1\t0\t1\t0\t2\n";
        let settings = decode_settings(raw).unwrap();
        assert_eq!(settings.sleep_screen, 0);
        assert_eq!(settings.screen_margin, 40);
    }

    #[test]
    fn decode_rejects_bad_input() {
        assert!(matches!(
            decode_settings("v2\n0"),
            Err(SettingsFileError::UnknownHeader(_))
        ));
        assert!(matches!(
            decode_settings("v1\n0\t0"),
            Err(SettingsFileError::MissingField("Sleep Screen Cover Filter"))
        ));
        assert!(matches!(
            decode_settings("v1\nx"),
            Err(SettingsFileError::InvalidField {
                name: "Sleep Screen",
                ..
            })
        ));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let store = FileSettingsStore::open(temp_path("missing/settings.tsv"));
        assert_eq!(*store.settings(), DeviceSettings::default());
    }

    #[test]
    fn save_then_reopen() {
        let path = temp_path("saved/settings.tsv");
        let mut store = FileSettingsStore::open(&path);
        store.settings_mut().font_size = 3;
        store.settings_mut().text_anti_aliasing = false;
        store.save_to_file();

        let reopened = FileSettingsStore::open(&path);
        assert_eq!(reopened.settings().font_size, 3);
        assert!(!reopened.settings().text_anti_aliasing);
        let _ = std::fs::remove_file(&path);
    }
}
