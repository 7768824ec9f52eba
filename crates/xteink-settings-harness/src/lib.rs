//! Host-side scenario test harness for scripted settings-screen flows.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Alignment, Text},
};
use png::{BitDepth, ColorType, Encoder};
use xteink_settings::test_display::TestDisplay;
use xteink_settings::ui::{ActivityResult, OnComplete, SubScreen, SubScreenFactory};
use xteink_settings::{
    lock_settings, lock_surface, shared_settings, Button, DeviceSettings, FrameSurface,
    FrontButtonLayout, InMemorySettingsStore, InputEvent, InputSource, MappedInput,
    SettingAction, SettingsActivity, SettingsScreenConfig, SettingsStore, SharedSurface,
};

/// Lifecycle events recorded by placeholder child screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildEvent {
    Entered(SettingAction),
    Exited(SettingAction),
}

pub type ChildLog = Arc<Mutex<Vec<ChildEvent>>>;

/// Stand-in for the remap / sync / browser / cache / update screens.
///
/// Draws its title on enter and completes when Back is pressed.
pub struct PlaceholderScreen {
    action: SettingAction,
    surface: SharedSurface<TestDisplay>,
    on_complete: OnComplete,
    log: ChildLog,
}

impl SubScreen for PlaceholderScreen {
    fn on_enter(&mut self) {
        self.log
            .lock()
            .expect("child log lock")
            .push(ChildEvent::Entered(self.action));

        let mut display = lock_surface(&self.surface);
        display.clear_screen();
        let center = display.bounding_box().center();
        let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
        Text::with_alignment(self.action.label(), center, style, Alignment::Center)
            .draw(&mut *display)
            .expect("placeholder draw");
        display.display_buffer();
    }

    fn on_exit(&mut self) {
        self.log
            .lock()
            .expect("child log lock")
            .push(ChildEvent::Exited(self.action));
    }

    fn tick(&mut self, input: &dyn InputSource) {
        if input.was_pressed(Button::Back) {
            (self.on_complete)();
        }
    }
}

/// Factory producing [`PlaceholderScreen`]s and recording their lifecycle.
#[derive(Default)]
pub struct PlaceholderFactory {
    log: ChildLog,
}

impl PlaceholderFactory {
    pub fn log(&self) -> ChildLog {
        Arc::clone(&self.log)
    }
}

impl SubScreenFactory<SharedSurface<TestDisplay>> for PlaceholderFactory {
    fn create(
        &mut self,
        action: SettingAction,
        surface: SharedSurface<TestDisplay>,
        on_complete: OnComplete,
    ) -> Box<dyn SubScreen> {
        Box::new(PlaceholderScreen {
            action,
            surface,
            on_complete,
            log: Arc::clone(&self.log),
        })
    }
}

pub type HarnessScreen = SettingsActivity<InMemorySettingsStore, TestDisplay, PlaceholderFactory>;

/// Couples the settings screen, a scripted input source with a fake clock,
/// and a test framebuffer.
pub struct ScenarioHarness {
    screen: HarnessScreen,
    input: MappedInput,
    clock_ms: u64,
    children: ChildLog,
}

impl ScenarioHarness {
    /// Time between press and release for a plain tap
    pub const TAP_MS: u64 = 50;

    pub fn new(settings: DeviceSettings) -> Self {
        Self::with_config(settings, SettingsScreenConfig::default())
    }

    pub fn with_config(settings: DeviceSettings, config: SettingsScreenConfig) -> Self {
        let factory = PlaceholderFactory::default();
        let children = factory.log();
        let screen = SettingsActivity::new(
            shared_settings(InMemorySettingsStore::new(settings)),
            Arc::new(Mutex::new(TestDisplay::default_size())),
            factory,
            config,
        );
        Self {
            screen,
            input: MappedInput::new(),
            clock_ms: 0,
            children,
        }
    }

    /// Enter the screen, starting its render task.
    pub fn enter(&mut self) {
        self.screen.on_enter();
    }

    /// Leave the screen, stopping its render task.
    pub fn exit(&mut self) {
        self.screen.on_exit();
    }

    pub fn advance(&mut self, ms: u64) {
        self.clock_ms += ms;
    }

    /// Run one tick with no new input.
    pub fn tick(&mut self) -> ActivityResult {
        self.input.begin_tick(self.clock_ms);
        self.screen.tick(&self.input)
    }

    fn tick_with(&mut self, event: InputEvent) -> ActivityResult {
        self.input.begin_tick(self.clock_ms);
        self.input.handle_event(event);
        self.screen.tick(&self.input)
    }

    /// Press and release `button` after a short tap.
    ///
    /// Returns the first non-idle result of the two ticks. After
    /// `NavigateBack` the screen is not ticked again.
    pub fn tap(&mut self, button: Button) -> ActivityResult {
        self.hold(button, Self::TAP_MS)
    }

    /// Press `button`, keep it down for `ms`, then release.
    pub fn hold(&mut self, button: Button, ms: u64) -> ActivityResult {
        let pressed = self.tick_with(InputEvent::Press(button));
        self.advance(ms);
        if pressed == ActivityResult::NavigateBack {
            self.input.begin_tick(self.clock_ms);
            self.input.handle_event(InputEvent::Release(button));
            return pressed;
        }
        let released = self.tick_with(InputEvent::Release(button));
        if pressed != ActivityResult::Ignored {
            pressed
        } else {
            released
        }
    }

    pub fn set_front_layout(&mut self, layout: FrontButtonLayout) {
        self.input.set_layout(layout);
    }

    /// Render synchronously if a redraw is owed.
    pub fn render(&mut self) -> bool {
        self.screen.render_now()
    }

    /// Wait for the render task to have drawn at least `frames` frames.
    pub fn wait_for_frames(&self, frames: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.screen.frames_rendered() < frames {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(2));
        }
        true
    }

    /// Wait until the render task has consumed the pending redraw.
    pub fn wait_until_clean(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.screen.is_dirty() {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(Duration::from_millis(2));
        }
        true
    }

    pub fn screen(&self) -> &HarnessScreen {
        &self.screen
    }

    /// Snapshot of the bound settings
    pub fn settings(&self) -> DeviceSettings {
        *lock_settings(self.screen.settings()).settings()
    }

    pub fn save_count(&self) -> usize {
        lock_settings(self.screen.settings()).save_count()
    }

    pub fn child_events(&self) -> Vec<ChildEvent> {
        self.children.lock().expect("child log lock").clone()
    }

    /// Snapshot of the framebuffer
    pub fn display(&self) -> TestDisplay {
        lock_surface(self.screen.surface()).clone()
    }

    /// Save the current framebuffer to a PNG (white = Off, black = On).
    pub fn save_screenshot_png(&self, path: impl AsRef<Path>) -> Result<(), String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let display = self.display();
        let (width, height) = display.dimensions();
        let mut data = Vec::with_capacity((width * height) as usize);
        for pixel in display.pixels() {
            let value = match pixel {
                BinaryColor::On => 0u8,
                BinaryColor::Off => 255u8,
            };
            data.push(value);
        }

        let file = File::create(path).map_err(|e| e.to_string())?;
        let writer = BufWriter::new(file);
        let mut encoder = Encoder::new(writer, width, height);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::Eight);
        let mut png_writer = encoder.write_header().map_err(|e| e.to_string())?;
        png_writer
            .write_image_data(&data)
            .map_err(|e| e.to_string())
    }
}
