//! UI Components for e-ink displays.
//!
//! Components are designed with e-ink constraints in mind:
//! - High contrast (black/white only)
//! - No animations or gradients
//! - Inverted fill marks focus

extern crate alloc;

use alloc::borrow::Cow;
use alloc::vec::Vec;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::ui::theme::{self, Theme, ThemeMetrics};

fn fill<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    area: Rectangle,
    color: BinaryColor,
) -> Result<(), D::Error> {
    area.into_styled(PrimitiveStyle::with_fill(color)).draw(display)
}

fn draw_text<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    text: &str,
    position: Point,
    font: &MonoFont<'_>,
    color: BinaryColor,
    alignment: Alignment,
) -> Result<(), D::Error> {
    let character_style = MonoTextStyle::new(font, color);
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Middle)
        .build();
    Text::with_text_style(text, position, character_style, text_style).draw(display)?;
    Ok(())
}

/// Screen title bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub title: &'a str,
    pub area: Rectangle,
}

impl<'a> Header<'a> {
    pub fn new(title: &'a str, area: Rectangle) -> Self {
        Self { title, area }
    }

    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) -> Result<(), D::Error> {
        let metrics = &theme.metrics;
        let center_y = self.area.top_left.y + (self.area.size.height as i32) / 2;
        draw_text(
            display,
            self.title,
            Point::new(self.area.top_left.x + metrics.side_padding as i32, center_y),
            theme::ui_font_title(),
            BinaryColor::On,
            Alignment::Left,
        )?;

        // Separator under the title
        fill(
            display,
            Rectangle::new(
                Point::new(
                    self.area.top_left.x + metrics.side_padding as i32,
                    self.area.top_left.y + self.area.size.height as i32 - 2,
                ),
                Size::new(metrics.content_width(self.area.size.width), 2),
            ),
            BinaryColor::On,
        )
    }
}

/// One tab in a [`TabBar`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabInfo<'a> {
    pub label: &'a str,
    pub selected: bool,
}

/// Horizontal category tabs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabBar<'a> {
    pub tabs: Vec<TabInfo<'a>>,
    pub area: Rectangle,
    /// Tab row itself has focus (selected tab drawn inverted)
    pub focused: bool,
}

impl<'a> TabBar<'a> {
    pub fn new(tabs: Vec<TabInfo<'a>>, area: Rectangle, focused: bool) -> Self {
        Self {
            tabs,
            area,
            focused,
        }
    }

    /// Bounds of tab `index`, splitting the content width evenly.
    pub fn tab_bounds(&self, index: usize, metrics: &ThemeMetrics) -> Rectangle {
        let count = self.tabs.len().max(1) as u32;
        let width = metrics.content_width(self.area.size.width) / count;
        let x = self.area.top_left.x + metrics.side_padding as i32 + (index as u32 * width) as i32;
        Rectangle::new(
            Point::new(x, self.area.top_left.y),
            Size::new(width, self.area.size.height),
        )
    }

    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) -> Result<(), D::Error> {
        let metrics = &theme.metrics;
        for (i, tab) in self.tabs.iter().enumerate() {
            let bounds = self.tab_bounds(i, metrics);
            let inverted = tab.selected && self.focused;

            if inverted {
                fill(display, bounds, BinaryColor::On)?;
            } else if tab.selected {
                // Underline marks the active tab when focus is in the list
                fill(
                    display,
                    Rectangle::new(
                        Point::new(
                            bounds.top_left.x,
                            bounds.top_left.y + bounds.size.height as i32 - 4,
                        ),
                        Size::new(bounds.size.width, 4),
                    ),
                    BinaryColor::On,
                )?;
            }

            let text_color = if inverted {
                BinaryColor::Off
            } else {
                BinaryColor::On
            };
            draw_text(
                display,
                tab.label,
                bounds.center(),
                theme::ui_font_body(),
                text_color,
                Alignment::Center,
            )?;
        }
        Ok(())
    }
}

/// One row of a [`SettingsList`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow<'a> {
    pub label: &'a str,
    pub value: Cow<'a, str>,
}

/// Scrollable list of labelled rows with right-aligned value text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsList<'a> {
    pub rows: Vec<ListRow<'a>>,
    /// Focused row, `None` when focus is elsewhere
    pub selected: Option<usize>,
    pub area: Rectangle,
}

impl<'a> SettingsList<'a> {
    pub fn new(rows: Vec<ListRow<'a>>, selected: Option<usize>, area: Rectangle) -> Self {
        Self {
            rows,
            selected,
            area,
        }
    }

    /// Rows that fit in the list area
    pub fn visible_count(&self, metrics: &ThemeMetrics) -> usize {
        if metrics.list_row_height == 0 {
            return 0;
        }
        (self.area.size.height / metrics.list_row_height) as usize
    }

    /// First visible row: pages so the focused row is always on screen.
    pub fn scroll_offset(&self, metrics: &ThemeMetrics) -> usize {
        let visible = self.visible_count(metrics).max(1);
        match self.selected {
            Some(selected) => (selected / visible) * visible,
            None => 0,
        }
    }

    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) -> Result<(), D::Error> {
        let metrics = &theme.metrics;
        let row_height = metrics.list_row_height as i32;
        let offset = self.scroll_offset(metrics);
        let font = theme::ui_font_body();
        let left = self.area.top_left.x + metrics.side_padding as i32;
        let right = self.area.top_left.x + self.area.size.width as i32 - metrics.side_padding as i32;

        for (i, row) in self
            .rows
            .iter()
            .enumerate()
            .skip(offset)
            .take(self.visible_count(metrics))
        {
            let y = self.area.top_left.y + ((i - offset) as i32) * row_height;
            let is_selected = self.selected == Some(i);
            let center_y = y + row_height / 2;

            if is_selected {
                fill(
                    display,
                    Rectangle::new(
                        Point::new(left - 5, y),
                        Size::new(metrics.content_width(self.area.size.width) + 10, metrics.list_row_height),
                    ),
                    BinaryColor::On,
                )?;
            }

            let text_color = if is_selected {
                BinaryColor::Off
            } else {
                BinaryColor::On
            };
            draw_text(
                display,
                row.label,
                Point::new(left, center_y),
                font,
                text_color,
                Alignment::Left,
            )?;
            if !row.value.is_empty() {
                draw_text(
                    display,
                    &row.value,
                    Point::new(right, center_y),
                    font,
                    text_color,
                    Alignment::Right,
                )?;
            }
        }

        // Page indicator when the list scrolls
        if self.rows.len() > self.visible_count(metrics) && !self.rows.is_empty() {
            let track = self.area.size.height;
            let pages = self.rows.len().div_ceil(self.visible_count(metrics).max(1)) as u32;
            let page = (offset / self.visible_count(metrics).max(1)) as u32;
            let thumb = (track / pages.max(1)).max(8);
            fill(
                display,
                Rectangle::new(
                    Point::new(
                        self.area.top_left.x + self.area.size.width as i32 - 4,
                        self.area.top_left.y + (page * thumb) as i32,
                    ),
                    Size::new(3, thumb),
                ),
                BinaryColor::On,
            )?;
        }

        Ok(())
    }
}

/// Bottom bar with one label per front button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonHints<'a> {
    pub labels: [&'a str; 4],
}

impl<'a> ButtonHints<'a> {
    pub fn new(labels: [&'a str; 4]) -> Self {
        Self { labels }
    }

    pub fn render<D: DrawTarget<Color = BinaryColor>>(
        &self,
        display: &mut D,
        theme: &Theme,
    ) -> Result<(), D::Error> {
        let size = display.bounding_box().size;
        let height = theme.metrics.button_hints_height;
        let y = size.height.saturating_sub(height) as i32;
        let slot_width = size.width / 4;

        for (i, label) in self.labels.iter().enumerate() {
            if label.is_empty() {
                continue;
            }
            let slot = Rectangle::new(
                Point::new((i as u32 * slot_width) as i32 + 4, y),
                Size::new(slot_width.saturating_sub(8), height.saturating_sub(4)),
            );
            slot.into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
                .draw(display)?;
            draw_text(
                display,
                label,
                slot.center(),
                theme::ui_font_small(),
                BinaryColor::On,
                Alignment::Center,
            )?;
        }
        Ok(())
    }
}

/// Right-aligned version string in the header area
pub fn draw_version_text<D: DrawTarget<Color = BinaryColor>>(
    display: &mut D,
    theme: &Theme,
    version: &str,
) -> Result<(), D::Error> {
    let width = display.bounding_box().size.width as i32;
    let font = theme::ui_font_small();
    let x = width - theme.metrics.version_text_right_x as i32 - theme::text_width(font, version);
    draw_text(
        display,
        version,
        Point::new(x, theme.metrics.version_text_y),
        font,
        BinaryColor::On,
        Alignment::Left,
    )
}
