//! The settings screen: controller, value mutation, sub-screen handoff and
//! render task lifecycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::SettingsScreenConfig;
use crate::device_settings::{lock_settings, SettingsStore, SharedSettings};
use crate::input::{ButtonLabels, InputSource};
use crate::navigation::{ControllerOutcome, NavigationState};
use crate::render::{HINT_BACK, HINT_CONFIRM, HINT_NEXT, HINT_PREVIOUS};
use crate::render_task::{RenderShared, RenderTask, ViewState};
use crate::setting_info::{SettingAction, SettingChange};
use crate::surface::{FrameSurface, SharedSurface};
use crate::ui::activity::{ActivityResult, OnComplete, SubScreen, SubScreenFactory};
use crate::ui::theme::{self, UiTheme};

struct ActiveChild {
    action: SettingAction,
    screen: Box<dyn SubScreen>,
    finished: Arc<AtomicBool>,
}

/// Settings screen with four categories of device configuration.
///
/// Input is processed by [`SettingsActivity::tick`] on the caller's loop;
/// drawing happens on a separate render task started by `on_enter`.
pub struct SettingsActivity<S, F, Fac>
where
    S: SettingsStore + Send + 'static,
    F: FrameSurface + Send + 'static,
    Fac: SubScreenFactory<SharedSurface<F>>,
{
    settings: SharedSettings<S>,
    surface: SharedSurface<F>,
    factory: Fac,
    config: SettingsScreenConfig,
    shared: Arc<RenderShared>,
    render_task: Option<RenderTask>,
    child: Option<ActiveChild>,
}

fn default_labels() -> ButtonLabels {
    ButtonLabels {
        btn1: HINT_BACK,
        btn2: HINT_CONFIRM,
        btn3: HINT_PREVIOUS,
        btn4: HINT_NEXT,
    }
}

impl<S, F, Fac> SettingsActivity<S, F, Fac>
where
    S: SettingsStore + Send + 'static,
    F: FrameSurface + Send + 'static,
    Fac: SubScreenFactory<SharedSurface<F>>,
{
    pub fn new(
        settings: SharedSettings<S>,
        surface: SharedSurface<F>,
        factory: Fac,
        config: SettingsScreenConfig,
    ) -> Self {
        Self {
            settings,
            surface,
            factory,
            config,
            shared: Arc::new(RenderShared::new(ViewState::new(default_labels()))),
            render_task: None,
            child: None,
        }
    }

    /// Enter the screen: first category, tab row focused, render task running.
    pub fn on_enter(&mut self) {
        log::info!("[SETTINGS] enter");
        self.view_reset();
        self.start_render_task();
    }

    /// Leave the screen.
    ///
    /// Blocks until no frame is in flight before the render task stops.
    pub fn on_exit(&mut self) {
        if let Some(task) = self.render_task.take() {
            task.stop();
        }
        {
            let shared = Arc::clone(&self.shared);
            let _gate = shared.acquire_render_gate();
            self.exit_child();
        }
        let ui_theme = lock_settings(&self.settings).settings().ui_theme;
        theme::reload(UiTheme::from_index(ui_theme));
        log::info!("[SETTINGS] exit");
    }

    /// Process one tick of input.
    pub fn tick(&mut self, input: &dyn InputSource) -> ActivityResult {
        if let Some(child) = self.child.as_mut() {
            child.screen.tick(input);
            if child.finished.load(Ordering::Acquire) {
                let shared = Arc::clone(&self.shared);
                let _gate = shared.acquire_render_gate();
                self.exit_child();
            }
            return ActivityResult::Consumed;
        }

        let labels = input.map_labels(HINT_BACK, HINT_CONFIRM, HINT_PREVIOUS, HINT_NEXT);
        let outcome = {
            let mut view = self.shared.view();
            if view.labels != labels {
                view.labels = labels;
                view.nav.mark_dirty();
            }
            view.nav.handle_tick(input, self.config.long_hold_ms)
        };

        match outcome {
            ControllerOutcome::Idle => ActivityResult::Ignored,
            ControllerOutcome::Moved | ControllerOutcome::CategoryChanged => {
                ActivityResult::Consumed
            }
            ControllerOutcome::Activate(index) => {
                self.toggle_setting(index);
                ActivityResult::Consumed
            }
            ControllerOutcome::Exit => {
                lock_settings(&self.settings).save_to_file();
                ActivityResult::NavigateBack
            }
        }
    }

    /// Activate the focused list item.
    ///
    /// Does nothing when the tab row has focus.
    pub fn toggle_current_setting(&mut self) {
        let focused = self.shared.view().nav.focused_setting();
        if let Some(index) = focused {
            self.toggle_setting(index);
            self.shared.request_redraw();
        }
    }

    fn toggle_setting(&mut self, index: usize) {
        let nav = self.navigation();
        let Some(setting) = nav.category().get(index) else {
            log::warn!(
                "[SETTINGS] no setting {} in {}",
                index,
                nav.category().name
            );
            return;
        };

        let change = {
            let mut store = lock_settings(&self.settings);
            setting.activate(store.settings_mut())
        };
        match change {
            SettingChange::Toggled(value) => {
                log::debug!("[SETTINGS] {} = {}", setting.name, value)
            }
            SettingChange::Cycled(value) | SettingChange::Stepped(value) => {
                log::debug!("[SETTINGS] {} = {}", setting.name, value)
            }
            SettingChange::Action(action) => self.enter_sub_screen(action),
        }
        lock_settings(&self.settings).save_to_file();
    }

    fn enter_sub_screen(&mut self, action: SettingAction) {
        let shared = Arc::clone(&self.shared);
        let _gate = shared.acquire_render_gate();
        self.exit_child();
        shared.set_child_active(true);

        let finished = Arc::new(AtomicBool::new(false));
        let on_complete: OnComplete = {
            let finished = Arc::clone(&finished);
            let shared = Arc::clone(&shared);
            Box::new(move || {
                finished.store(true, Ordering::Release);
                shared.request_redraw();
            })
        };
        let mut screen = self
            .factory
            .create(action, Arc::clone(&self.surface), on_complete);
        screen.on_enter();
        log::info!("[SETTINGS] handed off to {}", action.label());
        self.child = Some(ActiveChild {
            action,
            screen,
            finished,
        });
    }

    // Caller holds the render gate.
    fn exit_child(&mut self) {
        if let Some(mut child) = self.child.take() {
            child.screen.on_exit();
            self.shared.set_child_active(false);
            self.shared.request_redraw();
            log::info!("[SETTINGS] returned from {}", child.action.label());
        }
    }

    fn view_reset(&mut self) {
        let mut view = self.shared.view();
        view.nav.reset();
    }

    fn start_render_task(&mut self) {
        if self.render_task.is_some() {
            return;
        }
        match RenderTask::spawn(
            self.config.render_task_name,
            self.config.render_task_stack_bytes,
            self.config.render_interval,
            self.config.version,
            Arc::clone(&self.shared),
            Arc::clone(&self.settings),
            Arc::clone(&self.surface),
        ) {
            Ok(task) => self.render_task = Some(task),
            Err(err) => log::warn!("[SETTINGS] {}", err),
        }
    }

    /// Render one frame synchronously if a redraw is owed.
    ///
    /// Returns `true` when a frame was flushed.
    pub fn render_now(&self) -> bool {
        self.shared
            .render_if_dirty(&self.settings, &self.surface, self.config.version)
    }

    /// Snapshot of the current navigation state
    pub fn navigation(&self) -> NavigationState {
        self.shared.view().nav
    }

    pub fn is_dirty(&self) -> bool {
        self.shared.is_dirty()
    }

    pub fn has_child(&self) -> bool {
        self.child.is_some()
    }

    /// Action of the child screen that currently owns input and rendering
    pub fn active_action(&self) -> Option<SettingAction> {
        self.child.as_ref().map(|child| child.action)
    }

    pub fn is_render_task_running(&self) -> bool {
        self.render_task
            .as_ref()
            .is_some_and(RenderTask::is_running)
    }

    pub fn frames_rendered(&self) -> usize {
        self.shared.frames_rendered()
    }

    pub fn settings(&self) -> &SharedSettings<S> {
        &self.settings
    }

    pub fn surface(&self) -> &SharedSurface<F> {
        &self.surface
    }

    pub fn config(&self) -> &SettingsScreenConfig {
        &self.config
    }
}

impl<S, F, Fac> Drop for SettingsActivity<S, F, Fac>
where
    S: SettingsStore + Send + 'static,
    F: FrameSurface + Send + 'static,
    Fac: SubScreenFactory<SharedSurface<F>>,
{
    fn drop(&mut self) {
        if let Some(task) = self.render_task.take() {
            task.stop();
        }
        let shared = Arc::clone(&self.shared);
        let _gate = shared.acquire_render_gate();
        self.exit_child();
    }
}
