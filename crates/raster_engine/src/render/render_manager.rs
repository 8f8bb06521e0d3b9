//! Per-frame rendering: camera transform, projection, scanline fill

use crate::render::camera::Camera;
use crate::render::color::Color3;
use crate::render::framebuffer::FrameBuffer;
use crate::render::mesh::Mesh;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// A renderable placement of a mesh in the scene.
#[derive(Clone)]
pub struct SceneObject {
    /// Shared mesh geometry.
    pub mesh: Arc<Mesh>,
    /// World-space translation applied to every vertex.
    pub position: crate::foundation::math::Vec3,
    /// Flat fill color.
    pub color: Color3,
}

/// Owns the framebuffer and scene state and produces one frame at a time.
///
/// Every frame is complete before anyone else sees it: `render_frame` runs
/// the whole clear-transform-project-fill sequence on the privately owned
/// framebuffer, and the viewport only ever receives the finished export.
/// All pixel writes go through [`FrameBuffer::scanline`], so rasterization
/// can never write out of bounds.
pub struct RenderManager {
    framebuffer: FrameBuffer,
    camera: Rc<RefCell<Camera>>,
    scene: Vec<SceneObject>,
}

impl RenderManager {
    /// Create a render manager with its own framebuffer.
    pub fn new(
        width: usize,
        height: usize,
        background: Color3,
        camera: Rc<RefCell<Camera>>,
    ) -> Self {
        log::info!("render manager created ({width}x{height} framebuffer)");
        Self {
            framebuffer: FrameBuffer::with_background(width, height, background),
            camera,
            scene: Vec::new(),
        }
    }

    /// Add an object to the scene.
    pub fn add_object(&mut self, object: SceneObject) {
        self.scene.push(object);
    }

    /// Remove every object from the scene.
    pub fn clear_scene(&mut self) {
        self.scene.clear();
    }

    /// Number of objects currently in the scene.
    pub fn object_count(&self) -> usize {
        self.scene.len()
    }

    /// The completed frame, for export to a viewport.
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Rasterize the scene into the framebuffer using the current camera
    /// state.
    ///
    /// The camera is snapshotted once at entry, so input-driven camera
    /// movement mid-frame cannot tear the view: every triangle of the
    /// frame sees the same camera. Triangles with any vertex at or in
    /// front of the near plane are skipped.
    pub fn render_frame(&mut self) {
        let camera = self.camera.borrow().clone();
        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());
        let (x_origin, y_origin) = self.framebuffer.origin();

        self.framebuffer.clear();
        for object in &self.scene {
            for triangle in &object.mesh.triangles {
                let projected = triangle.map(|i| {
                    let world = object.mesh.vertices[i as usize] + object.position;
                    camera
                        .project(camera.to_camera_space(world), width, height)
                        .map(|(x, y)| (x.saturating_add(x_origin), y.saturating_add(y_origin)))
                });
                if let [Some(a), Some(b), Some(c)] = projected {
                    fill_triangle(&mut self.framebuffer, [a, b, c], object.color);
                }
            }
        }
        log::trace!("frame rendered ({} objects)", self.scene.len());
    }
}

/// Flat-fill a projected triangle, one scanline per row.
///
/// Vertices are sorted by row; each row's span is found by interpolating
/// along the long edge and whichever short edge brackets the row. The row
/// walk and every span are clamped to the framebuffer first: projection
/// saturates vertices that land far off axis to the integer limits, and
/// those coordinates must not drive loop bounds or arithmetic directly.
fn fill_triangle(fb: &mut FrameBuffer, mut points: [(i32, i32); 3], color: Color3) {
    points.sort_by_key(|p| p.1);
    let [(x0, y0), (x1, y1), (x2, y2)] = points;
    let width = fb.width() as i32;
    let height = fb.height() as i32;

    if y0 == y2 {
        if (0..height).contains(&y0) {
            let left = x0.min(x1).min(x2).max(0);
            let right = x0.max(x1).max(x2).min(width - 1);
            if left <= right {
                fb.scanline(left, right + 1, y0, color);
            }
        }
        return;
    }

    for y in y0.max(0)..=y2.min(height - 1) {
        let xa = edge_x(x0, y0, x2, y2, y);
        let xb = if y < y1 {
            edge_x(x0, y0, x1, y1, y)
        } else {
            edge_x(x1, y1, x2, y2, y)
        };
        let left = xa.min(xb).max(0);
        let right = xa.max(xb).min(width - 1);
        if left <= right {
            fb.scanline(left, right + 1, y, color);
        }
    }
}

/// X coordinate where the edge `(x0, y0) - (x1, y1)` crosses row `y`.
///
/// Interpolates in `f64` so endpoint coordinates at the integer limits
/// stay exact; the final cast saturates instead of wrapping.
fn edge_x(x0: i32, y0: i32, x1: i32, y1: i32, y: i32) -> i32 {
    if y1 == y0 {
        return x1;
    }
    let t = (f64::from(y) - f64::from(y0)) / (f64::from(y1) - f64::from(y0));
    (f64::from(x0) + t * (f64::from(x1) - f64::from(x0))).round() as i32
}
