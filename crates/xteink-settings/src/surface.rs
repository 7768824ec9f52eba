//! Rendering surface shared between a screen, its render task and child screens.

use core::fmt::Debug;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

/// Frame buffer a screen draws into before flushing to the panel.
pub trait FrameSurface: DrawTarget<Color = BinaryColor, Error: Debug> {
    /// Reset the whole frame to white.
    fn clear_screen(&mut self);

    /// Push the current frame to the panel.
    fn display_buffer(&mut self);
}

/// Surface handle passed to the render task and to child screens.
#[cfg(feature = "std")]
pub type SharedSurface<F> = std::sync::Arc<std::sync::Mutex<F>>;

/// Lock a shared surface, recovering from poisoning.
#[cfg(feature = "std")]
pub fn lock_surface<F>(surface: &std::sync::Mutex<F>) -> std::sync::MutexGuard<'_, F> {
    surface
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
