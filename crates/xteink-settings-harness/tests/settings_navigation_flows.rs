use std::thread;

use xteink_settings::ui::ActivityResult;
use xteink_settings::{Button, DeviceSettings, CATEGORIES};
use xteink_settings_harness::ScenarioHarness;

const LONG_HOLD_MS: u64 = 800;

fn harness() -> ScenarioHarness {
    ScenarioHarness::new(DeviceSettings::default())
}

fn position(harness: &ScenarioHarness) -> (usize, usize) {
    let nav = harness.screen().navigation();
    (nav.category_index(), nav.item_index())
}

#[test]
fn confirm_on_tab_row_walks_categories_and_wraps() {
    let mut harness = harness();
    assert_eq!(position(&harness), (0, 0));

    assert_eq!(harness.tap(Button::Confirm), ActivityResult::Consumed);
    assert_eq!(position(&harness), (1, 0));

    harness.tap(Button::Confirm);
    harness.tap(Button::Confirm);
    assert_eq!(position(&harness), (3, 0));

    harness.tap(Button::Confirm);
    assert_eq!(position(&harness), (0, 0));
    assert_eq!(harness.save_count(), 0);
}

#[test]
fn list_navigation_wraps_through_tab_row() {
    let mut harness = harness();
    let display_len = CATEGORIES[0].len();

    harness.tap(Button::Up);
    assert_eq!(position(&harness), (0, display_len));

    harness.tap(Button::Down);
    assert_eq!(position(&harness), (0, 0));

    harness.tap(Button::Right);
    harness.tap(Button::Right);
    assert_eq!(position(&harness), (0, 2));

    harness.tap(Button::Left);
    assert_eq!(position(&harness), (0, 1));
}

#[test]
fn long_hold_switches_category_and_resets_item() {
    let mut harness = harness();

    // Tab row stays on the tab row
    assert_eq!(
        harness.hold(Button::Down, LONG_HOLD_MS),
        ActivityResult::Consumed
    );
    assert_eq!(position(&harness), (1, 0));

    // A deep item lands on the first item of the new category
    for _ in 0..8 {
        harness.tap(Button::Down);
    }
    assert_eq!(position(&harness), (1, 8));
    harness.hold(Button::Up, LONG_HOLD_MS);
    assert_eq!(position(&harness), (0, 1));

    harness.hold(Button::Up, LONG_HOLD_MS);
    assert_eq!(position(&harness), (3, 1));
}

#[test]
fn category_change_always_lands_on_tab_row_or_first_item() {
    let mut harness = harness();
    for (category, info) in CATEGORIES.iter().enumerate() {
        for start in 0..=info.len() {
            for _ in 0..start {
                harness.tap(Button::Down);
            }
            assert_eq!(position(&harness), (category, start));

            harness.hold(Button::Down, LONG_HOLD_MS);
            let (next, item) = position(&harness);
            assert_eq!(next, (category + 1) % CATEGORIES.len());
            assert_eq!(item, usize::from(start > 0), "from item {}", start);

            harness.hold(Button::Up, LONG_HOLD_MS);
            if position(&harness).1 == 1 {
                harness.tap(Button::Up);
            }
            assert_eq!(position(&harness), (category, 0));
        }
        harness.hold(Button::Down, LONG_HOLD_MS);
    }
}

#[test]
fn hold_at_threshold_is_a_plain_move() {
    let mut harness = harness();
    harness.hold(Button::Down, 700);
    assert_eq!(position(&harness), (0, 1));

    harness.hold(Button::Down, 701);
    assert_eq!(position(&harness), (1, 1));
}

#[test]
fn screen_margin_wraps_to_minimum_with_one_save() {
    let mut harness = ScenarioHarness::new(DeviceSettings {
        screen_margin: 40,
        ..DeviceSettings::default()
    });
    harness.tap(Button::Confirm);
    for _ in 0..4 {
        harness.tap(Button::Down);
    }
    assert_eq!(position(&harness), (1, 4));

    assert_eq!(harness.tap(Button::Confirm), ActivityResult::Consumed);
    assert_eq!(harness.settings().screen_margin, 5);
    assert_eq!(harness.save_count(), 1);
    assert_eq!(position(&harness), (1, 4));
}

#[test]
fn screen_margin_full_cycle_returns_to_start() {
    let mut harness = harness();
    harness.tap(Button::Confirm);
    for _ in 0..4 {
        harness.tap(Button::Down);
    }
    let start = harness.settings().screen_margin;
    for _ in 0..8 {
        harness.tap(Button::Confirm);
    }
    assert_eq!(harness.settings().screen_margin, start);
    assert_eq!(harness.save_count(), 8);
}

#[test]
fn enum_and_toggle_cycles_return_to_start() {
    let mut harness = harness();
    harness.tap(Button::Confirm);

    // Font Size: four labels
    harness.tap(Button::Down);
    harness.tap(Button::Down);
    let font_size = harness.settings().font_size;
    for _ in 0..4 {
        harness.tap(Button::Confirm);
    }
    assert_eq!(harness.settings().font_size, font_size);

    // Hyphenation
    for _ in 0..4 {
        harness.tap(Button::Down);
    }
    assert_eq!(position(&harness), (1, 6));
    harness.tap(Button::Confirm);
    assert!(harness.settings().hyphenation_enabled);
    harness.tap(Button::Confirm);
    assert!(!harness.settings().hyphenation_enabled);
    assert_eq!(harness.save_count(), 6);
}

#[test]
fn back_saves_once_and_exits() {
    let mut harness = harness();
    harness.tap(Button::Down);
    harness.tap(Button::Confirm);
    assert_eq!(harness.save_count(), 1);

    assert_eq!(harness.tap(Button::Back), ActivityResult::NavigateBack);
    assert_eq!(harness.save_count(), 2);
    assert_eq!(harness.settings().sleep_screen, 1);
}

#[test]
fn idle_ticks_leave_state_alone() {
    let mut harness = harness();
    assert!(harness.render());
    assert_eq!(harness.tick(), ActivityResult::Ignored);
    harness.advance(5_000);
    assert_eq!(harness.tick(), ActivityResult::Ignored);
    assert!(!harness.screen().is_dirty());
    assert_eq!(position(&harness), (0, 0));
}

#[test]
fn navigation_flow_on_small_stack_thread() {
    let handle = thread::Builder::new()
        .name("scenario-small-stack".to_string())
        .stack_size(128 * 1024)
        .spawn(|| {
            let mut harness = harness();
            harness.tap(Button::Confirm);
            harness.tap(Button::Down);
            harness.tap(Button::Confirm);
            assert!(harness.render());
            harness.tap(Button::Back);
            harness.settings().font_family
        })
        .expect("thread spawn should succeed");

    assert_eq!(handle.join().expect("small-stack scenario should pass"), 1);
}
