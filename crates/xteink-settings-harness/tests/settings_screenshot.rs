use std::path::PathBuf;

use xteink_settings::{Button, DeviceSettings, FrontButtonLayout, FrontRole, CATEGORIES};
use xteink_settings_harness::ScenarioHarness;

fn screenshot_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_TARGET_TMPDIR"))
        .join("screenshots")
        .join(format!("{}.png", name))
}

#[test]
fn screenshot_all_categories() {
    let mut harness = ScenarioHarness::new(DeviceSettings::default());
    for (index, category) in CATEGORIES.iter().enumerate() {
        assert!(harness.render());
        let display = harness.display();
        assert!(display.black_pixel_count() > 0);

        let path = screenshot_path(&format!(
            "{:02}_settings_{}",
            index + 1,
            category.name.to_lowercase()
        ));
        harness
            .save_screenshot_png(&path)
            .expect("Failed to save settings screenshot");
        assert!(path.exists());

        harness.tap(Button::Confirm);
    }
}

#[test]
fn screenshot_focused_row_and_remapped_hints() {
    let mut harness = ScenarioHarness::new(DeviceSettings::default());
    harness.tap(Button::Confirm);
    for _ in 0..4 {
        harness.tap(Button::Down);
    }
    assert!(harness.render());
    let focused = harness.display();
    harness
        .save_screenshot_png(screenshot_path("05_settings_reader_margin"))
        .expect("Failed to save focused row screenshot");

    harness.set_front_layout(FrontButtonLayout([
        FrontRole::Previous,
        FrontRole::Next,
        FrontRole::Back,
        FrontRole::Confirm,
    ]));
    harness.tick();
    assert!(harness.render());
    assert_ne!(harness.display().pixels(), focused.pixels());
    harness
        .save_screenshot_png(screenshot_path("06_settings_remapped_hints"))
        .expect("Failed to save remapped hints screenshot");
}

#[test]
fn child_screen_screenshot() {
    let mut harness = ScenarioHarness::new(DeviceSettings::default());
    harness.tap(Button::Confirm);
    harness.tap(Button::Confirm);
    harness.tap(Button::Down);
    harness.tap(Button::Confirm);
    assert!(harness.screen().has_child());
    assert!(harness.display().black_pixel_count() > 0);
    harness
        .save_screenshot_png(screenshot_path("07_remap_placeholder"))
        .expect("Failed to save child screenshot");
}
