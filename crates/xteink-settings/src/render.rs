//! Full-frame rendering of the settings screen.
//!
//! Rendering is a pure function of navigation state, settings values and
//! hint labels: drawing the same inputs twice yields the same frame.

extern crate alloc;

use alloc::vec::Vec;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*, primitives::Rectangle};

use crate::device_settings::DeviceSettings;
use crate::input::ButtonLabels;
use crate::navigation::NavigationState;
use crate::registry::CATEGORIES;
use crate::surface::FrameSurface;
use crate::ui::components::{
    draw_version_text, ButtonHints, Header, ListRow, SettingsList, TabBar, TabInfo,
};
use crate::ui::theme::Theme;

/// Screen title
pub const SETTINGS_TITLE: &str = "Settings";

/// Semantic hint labels passed through the input layer's button mapping
pub const HINT_BACK: &str = "< Back";
pub const HINT_CONFIRM: &str = "Toggle";
pub const HINT_PREVIOUS: &str = "Up";
pub const HINT_NEXT: &str = "Down";

/// Everything one frame depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInputs<'a> {
    pub nav: &'a NavigationState,
    pub settings: &'a DeviceSettings,
    pub labels: ButtonLabels,
    pub version: &'a str,
}

/// Draw header, tabs, list, version and hints, then flush.
pub fn render_settings_frame<D: FrameSurface>(
    display: &mut D,
    theme: &Theme,
    frame: FrameInputs<'_>,
) -> Result<(), D::Error> {
    display.clear_screen();
    draw_settings_frame(display, theme, frame)?;
    display.display_buffer();
    Ok(())
}

/// Draw the frame without clearing or flushing.
pub fn draw_settings_frame<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    theme: &Theme,
    frame: FrameInputs<'_>,
) -> Result<(), D::Error> {
    let size = display.bounding_box().size;
    let metrics = &theme.metrics;
    let nav = frame.nav;

    Header::new(
        SETTINGS_TITLE,
        Rectangle::new(
            Point::new(0, metrics.top_padding as i32),
            Size::new(size.width, metrics.header_height),
        ),
    )
    .render(display, theme)?;

    let tabs = CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, category)| TabInfo {
            label: category.name,
            selected: i == nav.category_index(),
        })
        .collect();
    TabBar::new(
        tabs,
        Rectangle::new(
            Point::new(0, metrics.tab_bar_y()),
            Size::new(size.width, metrics.tab_bar_height),
        ),
        nav.item_index() == 0,
    )
    .render(display, theme)?;

    let rows: Vec<ListRow<'static>> = nav
        .category()
        .settings
        .iter()
        .map(|info| ListRow {
            label: info.name,
            value: info.value_text(frame.settings),
        })
        .collect();
    SettingsList::new(
        rows,
        nav.focused_setting(),
        Rectangle::new(
            Point::new(0, metrics.list_y()),
            Size::new(size.width, metrics.list_height(size.height)),
        ),
    )
    .render(display, theme)?;

    draw_version_text(display, theme, frame.version)?;

    ButtonHints::new(frame.labels.as_array()).render(display, theme)
}
