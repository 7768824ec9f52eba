//! Render scheduler: a periodic thread that redraws the settings screen
//! whenever navigation state is dirty and no child screen owns the display.
//!
//! The render gate is the screen's single exclusion lock. The render task
//! holds it only while drawing; sub-screen handoff and teardown hold it to
//! make sure no frame is mid-flight.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::device_settings::{lock_settings, SettingsStore};
use crate::input::ButtonLabels;
use crate::navigation::NavigationState;
use crate::render::{self, FrameInputs};
use crate::surface::{lock_surface, FrameSurface};
use crate::ui::theme::Theme;

/// State the controller publishes for the render task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub nav: NavigationState,
    pub labels: ButtonLabels,
}

impl ViewState {
    pub fn new(labels: ButtonLabels) -> Self {
        Self {
            nav: NavigationState::new(),
            labels,
        }
    }
}

/// Cross-task state shared by the controller and the render task
#[derive(Debug)]
pub struct RenderShared {
    view: Mutex<ViewState>,
    render_gate: Mutex<()>,
    child_active: AtomicBool,
    stop: AtomicBool,
    frames: AtomicUsize,
}

fn recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RenderShared {
    pub fn new(view: ViewState) -> Self {
        Self {
            view: Mutex::new(view),
            render_gate: Mutex::new(()),
            child_active: AtomicBool::new(false),
            stop: AtomicBool::new(false),
            frames: AtomicUsize::new(0),
        }
    }

    /// Short-lived lock on the published view state.
    pub fn view(&self) -> MutexGuard<'_, ViewState> {
        recover(&self.view)
    }

    /// Block until no frame is being drawn, then hold off new ones.
    pub fn acquire_render_gate(&self) -> MutexGuard<'_, ()> {
        recover(&self.render_gate)
    }

    pub fn request_redraw(&self) {
        self.view().nav.mark_dirty();
    }

    pub fn is_dirty(&self) -> bool {
        self.view().nav.is_dirty()
    }

    pub fn set_child_active(&self, active: bool) {
        self.child_active.store(active, Ordering::Release);
    }

    pub fn child_active(&self) -> bool {
        self.child_active.load(Ordering::Acquire)
    }

    fn stop_requested(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Frames drawn since the screen was entered
    pub fn frames_rendered(&self) -> usize {
        self.frames.load(Ordering::Acquire)
    }

    /// Draw one frame if a redraw is owed and no child owns the display.
    ///
    /// Returns `true` when a frame was flushed.
    pub fn render_if_dirty<S, F>(
        &self,
        settings: &Mutex<S>,
        surface: &Mutex<F>,
        version: &str,
    ) -> bool
    where
        S: SettingsStore,
        F: FrameSurface,
    {
        if self.child_active() || self.stop_requested() {
            return false;
        }
        let view = {
            let mut view = self.view();
            if !view.nav.take_dirty() {
                return false;
            }
            *view
        };

        let _gate = self.acquire_render_gate();
        // A handoff or teardown may have won the gate; the child owns the
        // display now and its exit will request a fresh frame.
        if self.child_active() || self.stop_requested() {
            return false;
        }

        let settings = *lock_settings(settings).settings();
        let mut surface = lock_surface(surface);
        let frame = FrameInputs {
            nav: &view.nav,
            settings: &settings,
            labels: view.labels,
            version,
        };
        match render::render_settings_frame(&mut *surface, &Theme::active(), frame) {
            Ok(()) => {
                self.frames.fetch_add(1, Ordering::AcqRel);
                true
            }
            Err(err) => {
                log::warn!("[SETTINGS-RENDER] frame dropped: {:?}", err);
                false
            }
        }
    }
}

/// Handle to the running render thread
pub struct RenderTask {
    shared: Arc<RenderShared>,
    handle: Option<JoinHandle<()>>,
}

impl RenderTask {
    /// Start the periodic render loop.
    pub fn spawn<S, F>(
        name: &str,
        stack_bytes: usize,
        interval: Duration,
        version: &'static str,
        shared: Arc<RenderShared>,
        settings: Arc<Mutex<S>>,
        surface: Arc<Mutex<F>>,
    ) -> Result<Self, String>
    where
        S: SettingsStore + Send + 'static,
        F: FrameSurface + Send + 'static,
    {
        shared.stop.store(false, Ordering::Release);
        let task_shared = Arc::clone(&shared);
        log::info!(
            "[SETTINGS-RENDER] spawn render task stack={}B interval={}ms",
            stack_bytes,
            interval.as_millis()
        );
        let handle = thread::Builder::new()
            .name(name.to_string())
            .stack_size(stack_bytes)
            .spawn(move || {
                while !task_shared.stop_requested() {
                    task_shared.render_if_dirty(&settings, &surface, version);
                    thread::sleep(interval);
                }
                log::debug!("[SETTINGS-RENDER] render loop exited");
            })
            .map_err(|e| format!("Unable to start render task: {}", e))?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Wait for any in-flight frame, then stop and join the thread.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        {
            let _gate = self.shared.acquire_render_gate();
            self.shared.stop.store(true, Ordering::Release);
        }
        if handle.join().is_err() {
            log::warn!("[SETTINGS-RENDER] render task panicked");
        }
        log::info!("[SETTINGS-RENDER] render task stopped");
    }
}

impl Drop for RenderTask {
    fn drop(&mut self) {
        self.shutdown();
    }
}
