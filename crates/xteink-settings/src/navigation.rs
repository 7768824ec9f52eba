//! Navigation state and the input-driven controller.
//!
//! Item index 0 is the category tab row; `1..=len` focus list item `index - 1`.

use crate::input::{Button, InputSource};
use crate::registry::{self, Category, CATEGORY_COUNT};

/// Hold longer than this on Up/Down switches category on release.
pub const CHANGE_TAB_HOLD_MS: u32 = 700;

/// What the controller decided for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerOutcome {
    /// No relevant input this tick
    Idle,
    /// Focus moved within the current category
    Moved,
    /// Active category changed
    CategoryChanged,
    /// Confirm on a list item: activate descriptor `index` of the category
    Activate(usize),
    /// Back: persist and leave the screen
    Exit,
}

/// Current focus on the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    category_index: usize,
    item_index: usize,
    dirty: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    /// Entry state: first category, tab row focused, redraw owed.
    pub const fn new() -> Self {
        Self {
            category_index: 0,
            item_index: 0,
            dirty: true,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub const fn category_index(&self) -> usize {
        self.category_index
    }

    pub const fn item_index(&self) -> usize {
        self.item_index
    }

    pub fn category(&self) -> &'static Category {
        registry::category(self.category_index)
    }

    /// Number of list items in the active category
    pub fn settings_count(&self) -> usize {
        self.category().len()
    }

    /// Focused descriptor index, `None` when the tab row has focus.
    pub const fn focused_setting(&self) -> Option<usize> {
        self.item_index.checked_sub(1)
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Clear the redraw flag, returning whether a redraw was owed.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    /// Process one tick of input.
    ///
    /// Rules are evaluated in precedence order; the first that fires ends
    /// the tick. No relevant input leaves the state (and dirty flag) as is.
    pub fn handle_tick(&mut self, input: &dyn InputSource, long_hold_ms: u32) -> ControllerOutcome {
        if input.was_pressed(Button::Confirm) {
            self.mark_dirty();
            return match self.focused_setting() {
                None => {
                    self.next_category();
                    ControllerOutcome::CategoryChanged
                }
                Some(index) => ControllerOutcome::Activate(index),
            };
        }

        if input.was_pressed(Button::Back) {
            return ControllerOutcome::Exit;
        }

        let up = input.was_released(Button::Up);
        let down = input.was_released(Button::Down);
        let left = input.was_released(Button::Left);
        let right = input.was_released(Button::Right);
        let change_tab = input.held_time_ms() > long_hold_ms;

        if up && change_tab {
            self.previous_category();
            self.mark_dirty();
            ControllerOutcome::CategoryChanged
        } else if down && change_tab {
            self.next_category();
            self.mark_dirty();
            ControllerOutcome::CategoryChanged
        } else if up || left {
            self.move_previous();
            self.mark_dirty();
            ControllerOutcome::Moved
        } else if right || down {
            self.move_next();
            self.mark_dirty();
            ControllerOutcome::Moved
        } else {
            ControllerOutcome::Idle
        }
    }

    pub fn next_category(&mut self) {
        self.set_category((self.category_index + 1) % CATEGORY_COUNT);
    }

    pub fn previous_category(&mut self) {
        let previous = if self.category_index == 0 {
            CATEGORY_COUNT - 1
        } else {
            self.category_index - 1
        };
        self.set_category(previous);
    }

    /// Up/Left: from the tab row wrap to the last list item.
    pub fn move_previous(&mut self) {
        self.item_index = if self.item_index == 0 {
            self.settings_count()
        } else {
            self.item_index - 1
        };
    }

    /// Down/Right: from the last list item wrap to the tab row.
    pub fn move_next(&mut self) {
        self.item_index = if self.item_index >= self.settings_count() {
            0
        } else {
            self.item_index + 1
        };
    }

    // Land on the tab row or the first item, never a stale deep index.
    fn set_category(&mut self, index: usize) {
        self.category_index = index % CATEGORY_COUNT;
        let first = if self.item_index == 0 { 0 } else { 1 };
        self.item_index = first.min(self.settings_count());
    }

    /// Focus list item `index` (0-based) directly, clamped to the list.
    pub fn focus_setting(&mut self, index: usize) {
        let count = self.settings_count();
        self.item_index = if count == 0 { 0 } else { index.min(count - 1) + 1 };
        self.mark_dirty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ButtonLabels;

    #[derive(Default)]
    struct TickInput {
        pressed: Option<Button>,
        released: Option<Button>,
        held_ms: u32,
    }

    impl TickInput {
        fn press(button: Button) -> Self {
            Self {
                pressed: Some(button),
                ..Self::default()
            }
        }

        fn release(button: Button, held_ms: u32) -> Self {
            Self {
                released: Some(button),
                held_ms,
                ..Self::default()
            }
        }
    }

    impl InputSource for TickInput {
        fn was_pressed(&self, button: Button) -> bool {
            self.pressed == Some(button)
        }

        fn was_released(&self, button: Button) -> bool {
            self.released == Some(button)
        }

        fn held_time_ms(&self) -> u32 {
            self.held_ms
        }

        fn map_labels(
            &self,
            back: &'static str,
            confirm: &'static str,
            previous: &'static str,
            next: &'static str,
        ) -> ButtonLabels {
            ButtonLabels {
                btn1: back,
                btn2: confirm,
                btn3: previous,
                btn4: next,
            }
        }
    }

    fn tick(nav: &mut NavigationState, input: TickInput) -> ControllerOutcome {
        nav.handle_tick(&input, CHANGE_TAB_HOLD_MS)
    }

    #[test]
    fn confirm_on_tab_row_advances_category() {
        let mut nav = NavigationState::new();
        nav.take_dirty();
        assert_eq!(
            tick(&mut nav, TickInput::press(Button::Confirm)),
            ControllerOutcome::CategoryChanged
        );
        assert_eq!(nav.category_index(), 1);
        assert_eq!(nav.item_index(), 0);
        assert!(nav.is_dirty());
    }

    #[test]
    fn confirm_wraps_past_last_category() {
        let mut nav = NavigationState::new();
        for _ in 0..CATEGORY_COUNT {
            tick(&mut nav, TickInput::press(Button::Confirm));
        }
        assert_eq!(nav.category_index(), 0);
    }

    #[test]
    fn confirm_on_item_requests_activation() {
        let mut nav = NavigationState::new();
        nav.next_category();
        nav.focus_setting(3);
        nav.take_dirty();
        assert_eq!(
            tick(&mut nav, TickInput::press(Button::Confirm)),
            ControllerOutcome::Activate(3)
        );
        assert!(nav.is_dirty());
        assert_eq!(nav.item_index(), 4);
    }

    #[test]
    fn back_exits() {
        let mut nav = NavigationState::new();
        assert_eq!(
            tick(&mut nav, TickInput::press(Button::Back)),
            ControllerOutcome::Exit
        );
    }

    #[test]
    fn no_input_keeps_state_and_dirty_flag() {
        let mut nav = NavigationState::new();
        nav.take_dirty();
        let before = nav;
        assert_eq!(tick(&mut nav, TickInput::default()), ControllerOutcome::Idle);
        assert_eq!(nav, before);
        assert!(!nav.is_dirty());
    }

    #[test]
    fn item_navigation_wraps_both_ways() {
        let mut nav = NavigationState::new();
        let count = nav.settings_count();

        tick(&mut nav, TickInput::release(Button::Up, 50));
        assert_eq!(nav.item_index(), count);

        tick(&mut nav, TickInput::release(Button::Right, 50));
        assert_eq!(nav.item_index(), 0);

        tick(&mut nav, TickInput::release(Button::Left, 50));
        assert_eq!(nav.item_index(), count);

        tick(&mut nav, TickInput::release(Button::Down, 50));
        assert_eq!(nav.item_index(), 0);
    }

    #[test]
    fn long_hold_switches_category_and_resets_item() {
        for start_item in 0..=7 {
            let mut nav = NavigationState::new();
            nav.item_index = start_item;

            assert_eq!(
                tick(&mut nav, TickInput::release(Button::Down, 701)),
                ControllerOutcome::CategoryChanged
            );
            assert_eq!(nav.category_index(), 1);
            let expected = if start_item == 0 { 0 } else { 1 };
            assert_eq!(nav.item_index(), expected);

            tick(&mut nav, TickInput::release(Button::Up, 900));
            tick(&mut nav, TickInput::release(Button::Up, 900));
            assert_eq!(nav.category_index(), CATEGORY_COUNT - 1);
            assert_eq!(nav.item_index(), expected);
        }
    }

    #[test]
    fn hold_at_threshold_is_a_plain_move() {
        let mut nav = NavigationState::new();
        tick(&mut nav, TickInput::release(Button::Down, CHANGE_TAB_HOLD_MS));
        assert_eq!(nav.category_index(), 0);
        assert_eq!(nav.item_index(), 1);
    }

    #[test]
    fn category_change_keeps_item_in_range() {
        let mut nav = NavigationState::new();
        for _ in 0..12 {
            nav.move_previous();
            nav.next_category();
            assert!(nav.item_index() <= 1);
            assert!(nav.item_index() <= nav.settings_count());
        }
    }

    #[test]
    fn focus_setting_clamps() {
        let mut nav = NavigationState::new();
        nav.focus_setting(99);
        assert_eq!(nav.item_index(), nav.settings_count());
        assert_eq!(nav.focused_setting(), Some(nav.settings_count() - 1));
    }
}
