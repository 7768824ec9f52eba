//! Fixed settings registry: four categories of descriptors.

use crate::device_settings::{BoolField, ByteField, DeviceSettings};
use crate::setting_info::{SettingAction, SettingInfo, ValueRange};

/// A named tab of settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub settings: &'static [SettingInfo],
}

impl Category {
    pub const fn len(&self) -> usize {
        self.settings.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'static SettingInfo> {
        self.settings.get(index)
    }
}

// Order must match SleepScreenMode on the sleep path.
const DISPLAY_SETTINGS: [SettingInfo; 7] = [
    SettingInfo::enumeration(
        "Sleep Screen",
        ByteField::SleepScreen,
        &["Dark", "Light", "Custom", "Cover", "None", "Cover + Custom"],
    ),
    SettingInfo::enumeration(
        "Sleep Screen Cover Mode",
        ByteField::SleepScreenCoverMode,
        &["Fit", "Crop"],
    ),
    SettingInfo::enumeration(
        "Sleep Screen Cover Filter",
        ByteField::SleepScreenCoverFilter,
        &["None", "Contrast", "Inverted"],
    ),
    SettingInfo::enumeration(
        "Status Bar",
        ByteField::StatusBar,
        &[
            "None",
            "No Progress",
            "Full w/ Percentage",
            "Full w/ Progress Bar",
            "Progress Bar",
        ],
    ),
    SettingInfo::enumeration(
        "Hide Battery %",
        ByteField::HideBatteryPercentage,
        &["Never", "In Reader", "Always"],
    ),
    SettingInfo::enumeration(
        "Refresh Frequency",
        ByteField::RefreshFrequency,
        &["1 page", "5 pages", "10 pages", "15 pages", "30 pages"],
    ),
    SettingInfo::enumeration("UI Theme", ByteField::UiTheme, &["Classic", "Lyra"]),
];

const READER_SETTINGS: [SettingInfo; 9] = [
    SettingInfo::enumeration(
        "Font Family",
        ByteField::FontFamily,
        &["Bookerly", "Noto Sans", "Open Dyslexic"],
    ),
    SettingInfo::enumeration(
        "Font Size",
        ByteField::FontSize,
        &["Small", "Medium", "Large", "X Large"],
    ),
    SettingInfo::enumeration(
        "Line Spacing",
        ByteField::LineSpacing,
        &["Tight", "Normal", "Wide"],
    ),
    SettingInfo::value(
        "Screen Margin",
        ByteField::ScreenMargin,
        ValueRange::new(5, 40, 5),
    ),
    SettingInfo::enumeration(
        "Paragraph Alignment",
        ByteField::ParagraphAlignment,
        &["Justify", "Left", "Center", "Right"],
    ),
    SettingInfo::toggle("Hyphenation", BoolField::Hyphenation),
    SettingInfo::enumeration(
        "Reading Orientation",
        ByteField::Orientation,
        &["Portrait", "Landscape CW", "Inverted", "Landscape CCW"],
    ),
    SettingInfo::toggle("Extra Paragraph Spacing", BoolField::ExtraParagraphSpacing),
    SettingInfo::toggle("Text Anti-Aliasing", BoolField::TextAntiAliasing),
];

const CONTROLS_SETTINGS: [SettingInfo; 4] = [
    SettingInfo::action(SettingAction::RemapFrontButtons),
    SettingInfo::enumeration(
        "Side Button Layout (reader)",
        ByteField::SideButtonLayout,
        &["Prev, Next", "Next, Prev"],
    ),
    SettingInfo::toggle("Long-press Chapter Skip", BoolField::LongPressChapterSkip),
    SettingInfo::enumeration(
        "Short Power Button Click",
        ByteField::ShortPowerButton,
        &["Ignore", "Sleep", "Page Turn"],
    ),
];

const SYSTEM_SETTINGS: [SettingInfo; 5] = [
    SettingInfo::enumeration(
        "Time to Sleep",
        ByteField::SleepTimeout,
        &["1 min", "5 min", "10 min", "15 min", "30 min"],
    ),
    SettingInfo::action(SettingAction::KoreaderSync),
    SettingInfo::action(SettingAction::OpdsBrowser),
    SettingInfo::action(SettingAction::ClearCache),
    SettingInfo::action(SettingAction::CheckForUpdates),
];

/// Number of top-level tabs
pub const CATEGORY_COUNT: usize = 4;

/// All categories in tab order
pub static CATEGORIES: [Category; CATEGORY_COUNT] = [
    Category {
        name: "Display",
        settings: &DISPLAY_SETTINGS,
    },
    Category {
        name: "Reader",
        settings: &READER_SETTINGS,
    },
    Category {
        name: "Controls",
        settings: &CONTROLS_SETTINGS,
    },
    Category {
        name: "System",
        settings: &SYSTEM_SETTINGS,
    },
];

/// Category at `index`; indices past the end wrap around.
pub fn category(index: usize) -> &'static Category {
    &CATEGORIES[index % CATEGORY_COUNT]
}

/// Every descriptor, category by category, in display order.
pub fn all_settings() -> impl Iterator<Item = &'static SettingInfo> {
    CATEGORIES.iter().flat_map(|category| category.settings.iter())
}

/// Repair every bound value so it lies in its descriptor's domain.
///
/// Returns the number of fields that were changed.
pub fn normalize_all(settings: &mut DeviceSettings) -> usize {
    all_settings()
        .filter(|info| info.normalize(settings))
        .count()
}
