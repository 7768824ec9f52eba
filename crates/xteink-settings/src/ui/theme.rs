//! Theme system with metrics for consistent UI spacing and sizing.
//!
//! ## Semantic Font API
//!
//! UI code should use exactly three font functions:
//! - `ui_font_title()` — header title (largest)
//! - `ui_font_body()`  — tab labels and list rows
//! - `ui_font_small()` — version text and button hints
//!
//! The active UI theme is process-wide. It is read on every render and
//! re-applied from settings when the settings screen exits.

use core::sync::atomic::{AtomicU8, Ordering};

use embedded_graphics::mono_font::{ascii, MonoFont};

// Index into the "UI Theme" enum labels: 0 = Classic, 1 = Lyra.
static ACTIVE_UI_THEME: AtomicU8 = AtomicU8::new(0);

/// Selectable UI theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiTheme {
    #[default]
    Classic,
    Lyra,
}

impl UiTheme {
    pub const ALL: [Self; 2] = [Self::Classic, Self::Lyra];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Lyra => "Lyra",
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::Classic => 0,
            Self::Lyra => 1,
        }
    }

    /// Unknown indices fall back to Classic.
    pub const fn from_index(index: u8) -> Self {
        match index {
            1 => Self::Lyra,
            _ => Self::Classic,
        }
    }
}

/// Make `theme` the active theme for subsequent renders.
pub fn reload(theme: UiTheme) {
    let previous = ACTIVE_UI_THEME.swap(theme.index(), Ordering::Relaxed);
    if previous != theme.index() {
        log::info!("[THEME] switched to {}", theme.label());
    }
}

/// Currently active theme preset.
pub fn active_ui_theme() -> UiTheme {
    UiTheme::from_index(ACTIVE_UI_THEME.load(Ordering::Relaxed))
}

// ── Semantic font tiers ─────────────────────────────────────────────
//
// Theme    title        body          small
// Classic  10x20        9x18 Bold     7x13
// Lyra     9x18 Bold    8x13 Bold     6x13

/// Title/header font.
pub fn ui_font_title() -> &'static MonoFont<'static> {
    match active_ui_theme() {
        UiTheme::Classic => &ascii::FONT_10X20,
        UiTheme::Lyra => &ascii::FONT_9X18_BOLD,
    }
}

/// Body font for tabs and list rows.
pub fn ui_font_body() -> &'static MonoFont<'static> {
    match active_ui_theme() {
        UiTheme::Classic => &ascii::FONT_9X18_BOLD,
        UiTheme::Lyra => &ascii::FONT_8X13_BOLD,
    }
}

/// Small font for secondary text.
pub fn ui_font_small() -> &'static MonoFont<'static> {
    match active_ui_theme() {
        UiTheme::Classic => &ascii::FONT_7X13,
        UiTheme::Lyra => &ascii::FONT_6X13,
    }
}

/// Pixel width of `text` in `font`.
pub fn text_width(font: &MonoFont<'_>, text: &str) -> i32 {
    let advance = font.character_size.width + font.character_spacing;
    (text.chars().count() as u32 * advance) as i32
}

/// UI spacing and sizing metrics (in pixels)
///
/// Tuned for the Xteink X4's 480x800 portrait display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeMetrics {
    /// Gap above the header
    pub top_padding: u32,
    /// Header (screen title) height
    pub header_height: u32,
    /// Category tab bar height
    pub tab_bar_height: u32,
    /// Height of each list row
    pub list_row_height: u32,
    /// Button hint bar height
    pub button_hints_height: u32,
    /// Gap between stacked regions
    pub vertical_spacing: u32,
    /// Left/right margin
    pub side_padding: u32,
    /// Version text inset from the right edge
    pub version_text_right_x: u32,
    /// Version text baseline
    pub version_text_y: i32,
}

impl ThemeMetrics {
    pub const CLASSIC: Self = Self {
        top_padding: 0,
        header_height: 56,
        tab_bar_height: 48,
        list_row_height: 52,
        button_hints_height: 40,
        vertical_spacing: 10,
        side_padding: 20,
        version_text_right_x: 20,
        version_text_y: 34,
    };

    pub const LYRA: Self = Self {
        top_padding: 8,
        header_height: 48,
        tab_bar_height: 40,
        list_row_height: 44,
        button_hints_height: 36,
        vertical_spacing: 8,
        side_padding: 16,
        version_text_right_x: 16,
        version_text_y: 38,
    };

    /// Y where the tab bar starts
    pub const fn tab_bar_y(&self) -> i32 {
        (self.top_padding + self.header_height) as i32
    }

    /// Y where the settings list starts
    pub const fn list_y(&self) -> i32 {
        (self.top_padding + self.header_height + self.tab_bar_height + self.vertical_spacing) as i32
    }

    /// Height available to the list above the button hints.
    pub const fn list_height(&self, display_height: u32) -> u32 {
        display_height.saturating_sub(
            self.top_padding
                + self.header_height
                + self.tab_bar_height
                + self.button_hints_height
                + self.vertical_spacing * 2,
        )
    }

    /// How many list rows fit in the list area.
    pub const fn visible_rows(&self, display_height: u32) -> usize {
        if self.list_row_height == 0 {
            return 0;
        }
        (self.list_height(display_height) / self.list_row_height) as usize
    }

    /// Usable content width after side padding
    pub const fn content_width(&self, display_width: u32) -> u32 {
        display_width.saturating_sub(self.side_padding * 2)
    }
}

impl Default for ThemeMetrics {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Complete theme definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub metrics: ThemeMetrics,
}

impl Theme {
    pub const fn new(metrics: ThemeMetrics) -> Self {
        Self { metrics }
    }

    pub const fn for_ui_theme(theme: UiTheme) -> Self {
        match theme {
            UiTheme::Classic => Self::new(ThemeMetrics::CLASSIC),
            UiTheme::Lyra => Self::new(ThemeMetrics::LYRA),
        }
    }

    /// Theme matching the active preset
    pub fn active() -> Self {
        Self::for_ui_theme(active_ui_theme())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_ui_theme(UiTheme::Classic)
    }
}
