//! Toolkit-embedded surface backend
//!
//! Instead of owning a window, this backend presents into a named pixel
//! target registered by a host toolkit. The host owns its own event loop
//! and surface lifetime; the engine only needs the name to resolve at
//! flush time. A missing target is a non-fatal, logged condition: the
//! frame is dropped and the loop continues.
//!
//! Because no display connection is involved, this backend also serves as
//! the headless surface for tests.

use crate::render::framebuffer::PixelBlock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct SurfaceData {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

/// A pixel target owned by the host toolkit.
///
/// Cloning shares the same underlying storage.
#[derive(Clone)]
pub struct SharedSurface {
    inner: Arc<Mutex<SurfaceData>>,
}

impl SharedSurface {
    /// Allocate a black target of the given size (3 bytes per pixel).
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SurfaceData {
                width,
                height,
                bytes: vec![0; 3 * width * height],
            })),
        }
    }

    /// Target size in pixels.
    pub fn dimensions(&self) -> (usize, usize) {
        let data = self.inner.lock().expect("surface lock poisoned");
        (data.width, data.height)
    }

    /// Copy of the current target bytes, 3 per pixel, row-major.
    pub fn snapshot(&self) -> Vec<u8> {
        self.inner.lock().expect("surface lock poisoned").bytes.clone()
    }

    /// Write an exported frame into the target, placing each channel at
    /// the offset the block prescribes. Overlapping area only; the target
    /// keeps its own size.
    fn put_block(&self, block: &PixelBlock<'_>) {
        let mut data = self.inner.lock().expect("surface lock poisoned");
        let rows = data.height.min(block.height);
        let cols = data.width.min(block.width);
        let dst_pitch = 3 * data.width;
        for y in 0..rows {
            for x in 0..cols {
                let src = y * block.pitch + x * block.pixel_size;
                let dst = y * dst_pitch + x * 3;
                for channel in 0..3 {
                    data.bytes[dst + block.offsets[channel]] = block.bytes[src + channel];
                }
            }
        }
    }
}

/// Name-to-surface lookup shared between the host toolkit and the engine.
///
/// Cloning shares the same registry.
#[derive(Clone, Default)]
pub struct SurfaceRegistry {
    surfaces: Arc<Mutex<HashMap<String, SharedSurface>>>,
}

impl SurfaceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target under `name`, returning a handle to it. An
    /// existing target of the same name is replaced.
    pub fn register(&self, name: impl Into<String>, width: usize, height: usize) -> SharedSurface {
        let surface = SharedSurface::new(width, height);
        self.surfaces
            .lock()
            .expect("registry lock poisoned")
            .insert(name.into(), surface.clone());
        surface
    }

    /// Look up a target by name.
    pub fn find(&self, name: &str) -> Option<SharedSurface> {
        self.surfaces
            .lock()
            .expect("registry lock poisoned")
            .get(name)
            .cloned()
    }
}

/// Viewport presenting into a named target of a host toolkit.
pub struct EmbeddedViewport {
    width: usize,
    height: usize,
    target: String,
    registry: SurfaceRegistry,
    frames_presented: u64,
    close_requested: bool,
}

impl EmbeddedViewport {
    /// Create a viewport that presents into `target`.
    ///
    /// Construction is infallible: the host toolkit owns the display
    /// session, and the target is resolved per flush so it may be
    /// registered before or after the viewport exists.
    pub fn new(width: usize, height: usize, target: impl Into<String>, registry: SurfaceRegistry) -> Self {
        let target = target.into();
        log::info!("embedded viewport created ({width}x{height}, target {target:?})");
        Self {
            width,
            height,
            target,
            registry,
            frames_presented: 0,
            close_requested: false,
        }
    }

    /// Pre-rasterization hook; nothing to prepare on an embedded target.
    pub fn frame_begin(&mut self) {}

    /// Deliver a completed frame to the named target.
    ///
    /// When the target is not registered the frame is dropped with a
    /// diagnostic and presentation resumes with the next frame that finds
    /// the target in place; dropped frames are never replayed.
    pub fn flush(&mut self, block: &PixelBlock<'_>) {
        match self.registry.find(&self.target) {
            Some(surface) => {
                surface.put_block(block);
                self.frames_presented += 1;
            }
            None => {
                log::error!("image target {:?} not found; dropping frame", self.target);
            }
        }
    }

    /// The host toolkit pumps its own event queue; nothing to drain here.
    pub fn poll_events(&mut self) {}

    /// Whether [`EmbeddedViewport::request_close`] was called.
    pub fn should_close(&self) -> bool {
        self.close_requested
    }

    /// Ask the main loop to stop after the current iteration.
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Surface size in pixels.
    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of frames actually delivered (dropped frames excluded).
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}
