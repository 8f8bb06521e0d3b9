//! Perspective camera
//!
//! The camera is shared state: the render manager reads it to transform and
//! project geometry, and the viewport mutates it from user input. The
//! engine runs single threaded, so sharing is an `Rc<RefCell<_>>` at the
//! owning sites and each frame snapshots one consistent camera state.

use crate::foundation::math::{deg_to_rad, Vec3};

/// Camera with position, orientation, and perspective projection parameters.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera is looking at in world space.
    pub target: Vec3,
    /// Up vector for camera orientation, typically `(0, 1, 0)`.
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Distance to the near clipping plane.
    pub near: f32,
    /// Distance to the far clipping plane.
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin with Y up.
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Move the camera, preserving target and orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        log::trace!("camera position updated to {position}");
    }

    /// Re-aim the camera without moving it.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("camera target updated to {target}");
    }

    /// Set target and up vector together.
    ///
    /// The up vector need not be perpendicular to the view direction; the
    /// basis computation orthonormalizes it.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        self.target = target;
        self.up = up;
    }

    /// Update the aspect ratio used for projection.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Orthonormal camera basis `(right, up, forward)` in world space.
    ///
    /// Forward points from the camera toward the target. Degenerate input
    /// (target at the camera position) leaves the vectors unnormalized
    /// rather than producing NaNs; see `Vec3::normalize`.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(&self.up).normalize();
        let up = right.cross(&forward);
        (right, up, forward)
    }

    /// Transform a world-space point into camera space.
    ///
    /// Camera space is right-handed with X right, Y up, and Z the view
    /// direction, so visible points have `z > near`.
    pub fn to_camera_space(&self, point: Vec3) -> Vec3 {
        let (right, up, forward) = self.basis();
        let rel = point - self.position;
        Vec3::new(rel.dot(&right), rel.dot(&up), rel.dot(&forward))
    }

    /// Project a camera-space point to integer screen coordinates.
    ///
    /// Returns `None` for points at or in front of the near plane. Screen
    /// rows run top to bottom, matching the framebuffer's export layout.
    pub fn project(&self, point: Vec3, width: usize, height: usize) -> Option<(i32, i32)> {
        if point.z < self.near {
            return None;
        }
        let focal = 1.0 / (self.fov * 0.5).tan();
        let ndc_x = focal * point.x / (self.aspect * point.z);
        let ndc_y = focal * point.y / point.z;
        let sx = (ndc_x + 1.0) * 0.5 * width as f32;
        let sy = (1.0 - ndc_y) * 0.5 * height as f32;
        Some((sx as i32, sy as i32))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(Vec3::new(0.0, 3.0, 3.0), 45.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_camera() -> Camera {
        let mut cam = Camera::perspective(Vec3::new(0.0, 0.0, -5.0), 90.0, 1.0, 0.1, 100.0);
        cam.set_target(Vec3::zeros());
        cam
    }

    #[test]
    fn basis_is_orthonormal() {
        let cam = Camera::default();
        let (right, up, forward) = cam.basis();
        assert_relative_eq!(right.length(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(up.length(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(forward.length(), 1.0, epsilon = 1.0e-5);
        assert_relative_eq!(right.dot(&up), 0.0, epsilon = 1.0e-5);
        assert_relative_eq!(right.dot(&forward), 0.0, epsilon = 1.0e-5);
        assert_relative_eq!(up.dot(&forward), 0.0, epsilon = 1.0e-5);
    }

    #[test]
    fn target_point_projects_to_screen_center() {
        let cam = test_camera();
        let cam_space = cam.to_camera_space(Vec3::zeros());
        assert_relative_eq!(cam_space, Vec3::new(0.0, 0.0, 5.0), epsilon = 1.0e-4);
        let (sx, sy) = cam.project(cam_space, 64, 64).unwrap();
        assert_eq!((sx, sy), (32, 32));
    }

    #[test]
    fn points_behind_the_near_plane_are_rejected() {
        let cam = test_camera();
        assert!(cam.project(Vec3::new(0.0, 0.0, 0.0), 64, 64).is_none());
        assert!(cam.project(Vec3::new(0.0, 0.0, -2.0), 64, 64).is_none());
    }

    #[test]
    fn points_above_center_land_in_upper_rows() {
        let cam = test_camera();
        let above = cam.to_camera_space(Vec3::new(0.0, 1.0, 0.0));
        let (_, sy) = cam.project(above, 64, 64).unwrap();
        assert!(sy < 32, "world +Y should map to a smaller row index, got {sy}");
    }
}
