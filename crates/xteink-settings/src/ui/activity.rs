//! Activity pattern for screen-based navigation.
//!
//! A screen that launches a child hands it exclusive control of input and
//! rendering until the child signals completion through its callback.

extern crate alloc;

use alloc::boxed::Box;

use crate::input::InputSource;
use crate::setting_info::SettingAction;

/// Result of handling one input tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityResult {
    /// Input consumed, stay on current activity
    Consumed,
    /// Input consumed, request navigation back (home)
    NavigateBack,
    /// Nothing to do this tick
    Ignored,
}

/// No-argument completion callback handed to a child screen.
///
/// The child calls it once it is done; the parent tears the child down on
/// its next tick and redraws.
pub type OnComplete = Box<dyn Fn() + Send + Sync>;

/// Child screen launched from a settings action.
///
/// # Example
/// ```
/// use xteink_settings::ui::{OnComplete, SubScreen};
/// use xteink_settings::{Button, InputSource};
///
/// struct ClearCacheScreen {
///     on_complete: OnComplete,
/// }
///
/// impl SubScreen for ClearCacheScreen {
///     fn on_enter(&mut self) {}
///
///     fn on_exit(&mut self) {}
///
///     fn tick(&mut self, input: &dyn InputSource) {
///         if input.was_pressed(Button::Back) {
///             (self.on_complete)();
///         }
///     }
/// }
/// ```
pub trait SubScreen {
    /// Called once after construction, while the parent holds its render gate
    fn on_enter(&mut self);

    /// Called once before the child is dropped
    fn on_exit(&mut self);

    /// Handle one tick of input; the child owns rendering while active
    fn tick(&mut self, input: &dyn InputSource);
}

/// Builds the child screen for each settings action.
///
/// `surface` is the shared frame surface the child renders into.
pub trait SubScreenFactory<Surface> {
    fn create(
        &mut self,
        action: SettingAction,
        surface: Surface,
        on_complete: OnComplete,
    ) -> Box<dyn SubScreen>;
}
