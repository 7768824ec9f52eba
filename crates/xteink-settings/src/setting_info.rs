//! Setting descriptors: immutable, statically-defined configurable items.

extern crate alloc;

use alloc::borrow::Cow;
use alloc::string::ToString;

use crate::device_settings::{BoolField, ByteField, DeviceSettings};

/// Inclusive integer range walked in fixed steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueRange {
    pub min: u8,
    pub max: u8,
    pub step: u8,
}

impl ValueRange {
    pub const fn new(min: u8, max: u8, step: u8) -> Self {
        Self { min, max, step }
    }

    /// Next value; past `max` wraps back to `min` instead of clamping.
    pub const fn next(&self, current: u8) -> u8 {
        let candidate = current as u16 + self.step as u16;
        if candidate > self.max as u16 {
            self.min
        } else {
            candidate as u8
        }
    }

    /// Number of distinct positions, `(max - min) / step + 1`.
    pub const fn positions(&self) -> usize {
        if self.step == 0 || self.max < self.min {
            return 1;
        }
        ((self.max - self.min) / self.step) as usize + 1
    }

    /// Snap an arbitrary value into the range, onto a step boundary.
    pub const fn normalize(&self, value: u8) -> u8 {
        if value <= self.min || self.step == 0 {
            return self.min;
        }
        if value >= self.max {
            return self.max;
        }
        let offset = (value - self.min) / self.step * self.step;
        self.min + offset
    }
}

/// Composite actions that hand control to a child screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingAction {
    RemapFrontButtons,
    KoreaderSync,
    OpdsBrowser,
    ClearCache,
    CheckForUpdates,
}

impl SettingAction {
    pub const ALL: [Self; 5] = [
        Self::RemapFrontButtons,
        Self::KoreaderSync,
        Self::OpdsBrowser,
        Self::ClearCache,
        Self::CheckForUpdates,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::RemapFrontButtons => "Remap Front Buttons",
            Self::KoreaderSync => "KOReader Sync",
            Self::OpdsBrowser => "OPDS Browser",
            Self::ClearCache => "Clear Cache",
            Self::CheckForUpdates => "Check for updates",
        }
    }
}

/// Kind of setting, carrying its accessor and metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Toggle(BoolField),
    Enum {
        field: ByteField,
        labels: &'static [&'static str],
    },
    Value {
        field: ByteField,
        range: ValueRange,
    },
    Action(SettingAction),
}

/// What happened when a setting was activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingChange {
    Toggled(bool),
    Cycled(u8),
    Stepped(u8),
    Action(SettingAction),
}

/// One configurable item in a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingInfo {
    pub name: &'static str,
    pub kind: SettingKind,
}

impl SettingInfo {
    pub const fn toggle(name: &'static str, field: BoolField) -> Self {
        Self {
            name,
            kind: SettingKind::Toggle(field),
        }
    }

    pub const fn enumeration(
        name: &'static str,
        field: ByteField,
        labels: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            kind: SettingKind::Enum { field, labels },
        }
    }

    pub const fn value(name: &'static str, field: ByteField, range: ValueRange) -> Self {
        Self {
            name,
            kind: SettingKind::Value { field, range },
        }
    }

    pub const fn action(action: SettingAction) -> Self {
        Self {
            name: action.label(),
            kind: SettingKind::Action(action),
        }
    }

    /// Advance the bound value (or report the action to dispatch).
    pub fn activate(&self, settings: &mut DeviceSettings) -> SettingChange {
        match self.kind {
            SettingKind::Toggle(field) => {
                let value = !field.get(settings);
                field.set(settings, value);
                SettingChange::Toggled(value)
            }
            SettingKind::Enum { field, labels } => {
                let count = labels.len().max(1);
                let value = ((field.get(settings) as usize + 1) % count) as u8;
                field.set(settings, value);
                SettingChange::Cycled(value)
            }
            SettingKind::Value { field, range } => {
                let value = range.next(field.get(settings));
                field.set(settings, value);
                SettingChange::Stepped(value)
            }
            SettingKind::Action(action) => SettingChange::Action(action),
        }
    }

    /// Trailing value text shown next to the name in the list.
    pub fn value_text(&self, settings: &DeviceSettings) -> Cow<'static, str> {
        match self.kind {
            SettingKind::Toggle(field) => {
                Cow::Borrowed(if field.get(settings) { "ON" } else { "OFF" })
            }
            SettingKind::Enum { field, labels } => Cow::Borrowed(
                labels
                    .get(field.get(settings) as usize)
                    .copied()
                    .unwrap_or(""),
            ),
            SettingKind::Value { field, .. } => Cow::Owned(field.get(settings).to_string()),
            SettingKind::Action(_) => Cow::Borrowed(""),
        }
    }

    /// Bring a bound value back into its valid domain.
    ///
    /// Returns `true` when the stored value had to change.
    pub fn normalize(&self, settings: &mut DeviceSettings) -> bool {
        match self.kind {
            SettingKind::Enum { field, labels } => {
                let current = field.get(settings);
                if (current as usize) < labels.len() {
                    return false;
                }
                field.set(settings, 0);
                true
            }
            SettingKind::Value { field, range } => {
                let current = field.get(settings);
                let normalized = range.normalize(current);
                field.set(settings, normalized);
                normalized != current
            }
            SettingKind::Toggle(_) | SettingKind::Action(_) => false,
        }
    }

    pub const fn action_kind(&self) -> Option<SettingAction> {
        match self.kind {
            SettingKind::Action(action) => Some(action),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARGIN: SettingInfo = SettingInfo::value(
        "Screen Margin",
        ByteField::ScreenMargin,
        ValueRange::new(5, 40, 5),
    );
    const SPACING: SettingInfo =
        SettingInfo::enumeration("Line Spacing", ByteField::LineSpacing, &["Tight", "Normal", "Wide"]);
    const HYPHENATION: SettingInfo = SettingInfo::toggle("Hyphenation", BoolField::Hyphenation);

    #[test]
    fn value_wraps_to_min_past_max() {
        let mut settings = DeviceSettings {
            screen_margin: 40,
            ..DeviceSettings::default()
        };
        assert_eq!(MARGIN.activate(&mut settings), SettingChange::Stepped(5));
        assert_eq!(settings.screen_margin, 5);
    }

    #[test]
    fn value_cycle_returns_to_start() {
        let mut settings = DeviceSettings {
            screen_margin: 20,
            ..DeviceSettings::default()
        };
        let range = ValueRange::new(5, 40, 5);
        assert_eq!(range.positions(), 8);
        for _ in 0..range.positions() {
            MARGIN.activate(&mut settings);
            assert!((5..=40).contains(&settings.screen_margin));
            assert_eq!((settings.screen_margin - 5) % 5, 0);
        }
        assert_eq!(settings.screen_margin, 20);
    }

    #[test]
    fn enum_cycle_returns_to_start() {
        let mut settings = DeviceSettings::default();
        let start = settings.line_spacing;
        SPACING.activate(&mut settings);
        assert_eq!(settings.line_spacing, (start + 1) % 3);
        SPACING.activate(&mut settings);
        SPACING.activate(&mut settings);
        assert_eq!(settings.line_spacing, start);
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut settings = DeviceSettings::default();
        let start = settings.hyphenation_enabled;
        assert_eq!(
            HYPHENATION.activate(&mut settings),
            SettingChange::Toggled(!start)
        );
        HYPHENATION.activate(&mut settings);
        assert_eq!(settings.hyphenation_enabled, start);
    }

    #[test]
    fn action_leaves_settings_untouched() {
        let mut settings = DeviceSettings::default();
        let info = SettingInfo::action(SettingAction::ClearCache);
        assert_eq!(info.name, "Clear Cache");
        assert_eq!(
            info.activate(&mut settings),
            SettingChange::Action(SettingAction::ClearCache)
        );
        assert_eq!(settings, DeviceSettings::default());
        assert_eq!(info.value_text(&settings), "");
    }

    #[test]
    fn value_text_per_kind() {
        let settings = DeviceSettings {
            hyphenation_enabled: true,
            line_spacing: 2,
            screen_margin: 15,
            ..DeviceSettings::default()
        };
        assert_eq!(HYPHENATION.value_text(&settings), "ON");
        assert_eq!(SPACING.value_text(&settings), "Wide");
        assert_eq!(MARGIN.value_text(&settings), "15");
    }

    #[test]
    fn normalize_repairs_out_of_range_values() {
        let mut settings = DeviceSettings {
            line_spacing: 9,
            screen_margin: 17,
            ..DeviceSettings::default()
        };
        assert!(SPACING.normalize(&mut settings));
        assert_eq!(settings.line_spacing, 0);
        assert!(MARGIN.normalize(&mut settings));
        assert_eq!(settings.screen_margin, 15);
        assert!(!MARGIN.normalize(&mut settings));

        settings.screen_margin = 200;
        MARGIN.normalize(&mut settings);
        assert_eq!(settings.screen_margin, 40);
        settings.screen_margin = 0;
        MARGIN.normalize(&mut settings);
        assert_eq!(settings.screen_margin, 5);
    }
}
