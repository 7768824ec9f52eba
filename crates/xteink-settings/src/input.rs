//! Logical button input for the settings screen.
//!
//! Physical decoding (ADC ladders, GPIO) happens below this layer. Screens
//! only see logical buttons and per-tick edge queries through [`InputSource`].

/// Logical device buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    // Front row
    Back,
    Confirm,
    Left,
    Right,
    // Side rocker
    Up,
    Down,
}

impl Button {
    /// All logical buttons in bit order
    pub const ALL: [Self; 6] = [
        Self::Back,
        Self::Confirm,
        Self::Left,
        Self::Right,
        Self::Up,
        Self::Down,
    ];

    const fn bit(self) -> u8 {
        match self {
            Self::Back => 1 << 0,
            Self::Confirm => 1 << 1,
            Self::Left => 1 << 2,
            Self::Right => 1 << 3,
            Self::Up => 1 << 4,
            Self::Down => 1 << 5,
        }
    }
}

/// Input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Press(Button),
    Release(Button),
}

/// Hint labels for the four front buttons, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLabels {
    pub btn1: &'static str,
    pub btn2: &'static str,
    pub btn3: &'static str,
    pub btn4: &'static str,
}

impl ButtonLabels {
    pub const fn as_array(&self) -> [&'static str; 4] {
        [self.btn1, self.btn2, self.btn3, self.btn4]
    }
}

/// Per-tick input queries consumed by screens.
pub trait InputSource {
    /// Button went down during the current tick.
    fn was_pressed(&self, button: Button) -> bool;

    /// Button went up during the current tick.
    fn was_released(&self, button: Button) -> bool;

    /// Duration of the current (or just released) hold in milliseconds.
    fn held_time_ms(&self) -> u32;

    /// Map semantic hint labels onto the physical front-button order.
    fn map_labels(
        &self,
        back: &'static str,
        confirm: &'static str,
        previous: &'static str,
        next: &'static str,
    ) -> ButtonLabels;
}

/// Semantic role of a front button slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontRole {
    Back,
    Confirm,
    Previous,
    Next,
}

/// Front-button arrangement, slot 0 is the leftmost physical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontButtonLayout(pub [FrontRole; 4]);

impl Default for FrontButtonLayout {
    fn default() -> Self {
        Self([
            FrontRole::Back,
            FrontRole::Confirm,
            FrontRole::Previous,
            FrontRole::Next,
        ])
    }
}

/// Tick-based input tracker.
///
/// Feed raw [`InputEvent`]s with [`MappedInput::handle_event`] and call
/// [`MappedInput::begin_tick`] once per loop iteration before the screen
/// reads it. Edges (`was_pressed` / `was_released`) are visible for exactly
/// one tick.
#[derive(Debug, Clone, Default)]
pub struct MappedInput {
    down: u8,
    pressed: u8,
    released: u8,
    now_ms: u64,
    hold_started_ms: Option<u64>,
    last_hold_ms: u32,
    layout: FrontButtonLayout,
}

impl MappedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: FrontButtonLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn set_layout(&mut self, layout: FrontButtonLayout) {
        self.layout = layout;
    }

    pub fn layout(&self) -> FrontButtonLayout {
        self.layout
    }

    /// Start a new tick at `now_ms`, dropping edges from the previous one.
    pub fn begin_tick(&mut self, now_ms: u64) {
        self.pressed = 0;
        self.released = 0;
        self.now_ms = now_ms.max(self.now_ms);
    }

    /// Record an event at the current tick time.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(button) => {
                if self.down == 0 {
                    self.hold_started_ms = Some(self.now_ms);
                }
                self.down |= button.bit();
                self.pressed |= button.bit();
            }
            InputEvent::Release(button) => {
                if self.down & button.bit() == 0 {
                    return;
                }
                self.down &= !button.bit();
                self.released |= button.bit();
                if self.down == 0 {
                    if let Some(start) = self.hold_started_ms.take() {
                        self.last_hold_ms = Self::clamp_ms(self.now_ms.saturating_sub(start));
                    }
                }
            }
        }
    }

    pub fn is_down(&self, button: Button) -> bool {
        self.down & button.bit() != 0
    }

    fn clamp_ms(ms: u64) -> u32 {
        u32::try_from(ms).unwrap_or(u32::MAX)
    }

    fn label_for(
        role: FrontRole,
        back: &'static str,
        confirm: &'static str,
        previous: &'static str,
        next: &'static str,
    ) -> &'static str {
        match role {
            FrontRole::Back => back,
            FrontRole::Confirm => confirm,
            FrontRole::Previous => previous,
            FrontRole::Next => next,
        }
    }
}

impl InputSource for MappedInput {
    fn was_pressed(&self, button: Button) -> bool {
        self.pressed & button.bit() != 0
    }

    fn was_released(&self, button: Button) -> bool {
        self.released & button.bit() != 0
    }

    fn held_time_ms(&self) -> u32 {
        match self.hold_started_ms {
            Some(start) => Self::clamp_ms(self.now_ms.saturating_sub(start)),
            None => self.last_hold_ms,
        }
    }

    fn map_labels(
        &self,
        back: &'static str,
        confirm: &'static str,
        previous: &'static str,
        next: &'static str,
    ) -> ButtonLabels {
        let [a, b, c, d] = self
            .layout
            .0
            .map(|role| Self::label_for(role, back, confirm, previous, next));
        ButtonLabels {
            btn1: a,
            btn2: b,
            btn3: c,
            btn4: d,
        }
    }
}
