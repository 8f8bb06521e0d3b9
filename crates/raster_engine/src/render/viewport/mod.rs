//! Platform window surface abstraction
//!
//! A viewport hosts rendered output on some display surface. The set of
//! backends is closed and selected at configuration time, so the engine
//! dispatches over a plain enum instead of trait objects:
//!
//! - [`NativeViewport`] — a top-level window on the native windowing system.
//! - [`EmbeddedViewport`] — a named pixel target inside a host toolkit.
//! - [`AcceleratedViewport`] — a window with a live hardware context.
//!
//! Every backend offers the same capability surface: `frame_begin` before
//! rasterization, `flush` to deliver a completed frame, `poll_events` to
//! drain platform input, and `should_close` as the loop stop condition.

mod accelerated;
mod embedded;
mod input;
mod native;

pub use accelerated::AcceleratedViewport;
pub use embedded::{EmbeddedViewport, SharedSurface, SurfaceRegistry};
pub use native::NativeViewport;

use crate::render::framebuffer::PixelBlock;
use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Input events a window surface subscribes to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EventMask: u32 {
        /// Redraw/exposure notifications.
        const EXPOSURE = 1 << 0;
        /// A pointer button was pressed.
        const BUTTON_PRESS = 1 << 1;
        /// A pointer button was released.
        const BUTTON_RELEASE = 1 << 2;
        /// The pointer entered the window.
        const ENTER_WINDOW = 1 << 3;
        /// The pointer left the window.
        const LEAVE_WINDOW = 1 << 4;
        /// Pointer motion.
        const POINTER_MOTION = 1 << 5;
        /// Pointer motion while a button is held.
        const BUTTON_MOTION = 1 << 6;
        /// A key was pressed.
        const KEY_PRESS = 1 << 7;
        /// A key was released.
        const KEY_RELEASE = 1 << 8;
    }
}

impl EventMask {
    /// The fixed subscription set used by windowed backends.
    ///
    /// Resize is deliberately absent: viewports are fixed-size for their
    /// lifetime and the windows are created non-resizable to match.
    pub const SUBSCRIBED: Self = Self::EXPOSURE
        .union(Self::BUTTON_PRESS)
        .union(Self::BUTTON_RELEASE)
        .union(Self::ENTER_WINDOW)
        .union(Self::LEAVE_WINDOW)
        .union(Self::POINTER_MOTION)
        .union(Self::BUTTON_MOTION)
        .union(Self::KEY_PRESS)
        .union(Self::KEY_RELEASE);
}

/// Window surface construction errors.
///
/// Both variants are fatal at startup: construction either completes with
/// every resource acquired or fails having released everything it opened.
#[derive(Error, Debug)]
pub enum ViewportError {
    /// The display/windowing backend could not be reached.
    #[error("cannot connect to the display backend: {0}")]
    DisplayConnection(String),

    /// The display session opened but the window could not be created; no
    /// window resources are held when this error propagates.
    #[error("cannot create the platform window: {0}")]
    WindowCreation(String),
}

/// The active display surface, one of the closed backend set.
pub enum Viewport {
    /// Native windowing-system backend.
    Native(NativeViewport),
    /// Toolkit-embedded surface backend.
    Embedded(EmbeddedViewport),
    /// Hardware-accelerated surface backend.
    Accelerated(AcceleratedViewport),
}

impl Viewport {
    /// Backend hook invoked before each frame is rasterized.
    pub fn frame_begin(&mut self) {
        match self {
            Self::Native(v) => v.frame_begin(),
            Self::Embedded(v) => v.frame_begin(),
            Self::Accelerated(v) => v.frame_begin(),
        }
    }

    /// Deliver a completed frame to the display surface.
    ///
    /// Delivery failures are logged and swallowed inside the backend; a
    /// dropped frame is never retried, the next frame supersedes it.
    pub fn flush(&mut self, block: &PixelBlock<'_>) {
        match self {
            Self::Native(v) => v.flush(block),
            Self::Embedded(v) => v.flush(block),
            Self::Accelerated(v) => v.flush(block),
        }
    }

    /// Drain pending platform events and apply input-driven camera motion.
    pub fn poll_events(&mut self) {
        match self {
            Self::Native(v) => v.poll_events(),
            Self::Embedded(v) => v.poll_events(),
            Self::Accelerated(v) => v.poll_events(),
        }
    }

    /// Whether the surface has asked the main loop to stop.
    pub fn should_close(&self) -> bool {
        match self {
            Self::Native(v) => v.should_close(),
            Self::Embedded(v) => v.should_close(),
            Self::Accelerated(v) => v.should_close(),
        }
    }

    /// Surface size in pixels, fixed at construction.
    pub fn size(&self) -> (usize, usize) {
        match self {
            Self::Native(v) => v.size(),
            Self::Embedded(v) => v.size(),
            Self::Accelerated(v) => v.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_mask_covers_the_fixed_event_set() {
        let mask = EventMask::SUBSCRIBED;
        assert!(mask.contains(EventMask::EXPOSURE));
        assert!(mask.contains(EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE));
        assert!(mask.contains(EventMask::ENTER_WINDOW | EventMask::LEAVE_WINDOW));
        assert!(mask.contains(EventMask::POINTER_MOTION | EventMask::BUTTON_MOTION));
        assert!(mask.contains(EventMask::KEY_PRESS | EventMask::KEY_RELEASE));
        // Nine event kinds, no resize bit defined at all.
        assert_eq!(mask.bits().count_ones(), 9);
    }

    #[test]
    fn construction_errors_name_the_failing_stage() {
        let conn = ViewportError::DisplayConnection("no display".into());
        assert!(conn.to_string().contains("display backend"));
        let win = ViewportError::WindowCreation("out of handles".into());
        assert!(win.to_string().contains("platform window"));
    }
}
