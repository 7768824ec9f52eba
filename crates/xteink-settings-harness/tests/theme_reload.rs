//! Kept in its own test binary: the active UI theme is process-wide.

use xteink_settings::ui::theme::{active_ui_theme, reload};
use xteink_settings::ui::UiTheme;
use xteink_settings::{Button, DeviceSettings};
use xteink_settings_harness::ScenarioHarness;

#[test]
fn exit_applies_selected_ui_theme() {
    let mut harness = ScenarioHarness::new(DeviceSettings::default());
    reload(UiTheme::Classic);
    assert!(harness.render());
    let classic = harness.display();

    // Display > UI Theme is the seventh row
    for _ in 0..7 {
        harness.tap(Button::Down);
    }
    harness.tap(Button::Confirm);
    assert_eq!(harness.settings().ui_theme, 1);
    assert_eq!(active_ui_theme(), UiTheme::Classic);

    harness.exit();
    assert_eq!(active_ui_theme(), UiTheme::Lyra);

    assert!(harness.render());
    assert_ne!(harness.display().pixels(), classic.pixels());

    reload(UiTheme::Classic);
}
