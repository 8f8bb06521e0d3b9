//! Hardware-accelerated surface backend (GLFW with a live context)

use super::input::move_camera;
use super::{EventMask, ViewportError};
use crate::render::camera::Camera;
use crate::render::framebuffer::PixelBlock;
use glfw::Context;
use std::cell::RefCell;
use std::rc::Rc;

/// Window surface with a hardware context.
///
/// Shares the native backend's construction and teardown contract but
/// creates a context-bearing window; presentation is a buffer swap. The
/// exported [`PixelBlock`] layout is the contract a context-side blit
/// reads from.
pub struct AcceleratedViewport {
    width: usize,
    height: usize,
    camera: Rc<RefCell<Camera>>,
    // Window before session: destroyed before the library terminates.
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    glfw: glfw::Glfw,
}

impl AcceleratedViewport {
    /// Open a display session and create a fixed-size context window.
    ///
    /// Same atomicity contract as the native backend: a session-open
    /// failure reports [`ViewportError::DisplayConnection`] without
    /// touching window creation, and a window failure propagates
    /// [`ViewportError::WindowCreation`] with no window resources held.
    pub fn new(
        width: usize,
        height: usize,
        title: &str,
        camera: Rc<RefCell<Camera>>,
    ) -> Result<Self, ViewportError> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| ViewportError::DisplayConnection(e.to_string()))?;

        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let (mut window, events) = glfw
            .create_window(width as u32, height as u32, title, glfw::WindowMode::Windowed)
            .ok_or_else(|| {
                ViewportError::WindowCreation(format!("{width}x{height} context window refused"))
            })?;

        window.set_close_polling(true);
        window.set_key_polling(EventMask::SUBSCRIBED.contains(EventMask::KEY_PRESS));
        window.make_current();
        window.show();
        glfw.poll_events();

        log::info!("accelerated viewport opened ({width}x{height})");
        Ok(Self {
            width,
            height,
            camera,
            window,
            events,
            glfw,
        })
    }

    /// Make the context current before rasterization results are uploaded.
    pub fn frame_begin(&mut self) {
        self.window.make_current();
    }

    /// Present the frame by swapping buffers.
    pub fn flush(&mut self, block: &PixelBlock<'_>) {
        log::trace!("accelerated flush: {}x{} pixels", block.width, block.height);
        self.window.swap_buffers();
    }

    /// Drain the platform queue.
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
