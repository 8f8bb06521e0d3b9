//! Camera input shared by the windowed backends

use crate::foundation::math::Vec3;
use crate::render::camera::Camera;
use std::cell::RefCell;
use std::rc::Rc;

/// Units moved per dolly/strafe key press.
pub(super) const MOVE_STEP: f32 = 0.25;
/// Radians of orbit per pixel of buttoned pointer motion.
pub(super) const ORBIT_STEP: f32 = 0.005;

/// Apply a movement key to the camera. Returns `false` for keys this
/// handler does not know, so backends can layer their own bindings.
pub(super) fn move_camera(camera: &Rc<RefCell<Camera>>, key: glfw::Key) -> bool {
    let mut camera = camera.borrow_mut();
    let (right, _, forward) = camera.basis();
    let step = match key {
        glfw::Key::W => forward * MOVE_STEP,
        glfw::Key::S => -(forward * MOVE_STEP),
        glfw::Key::A => -(right * MOVE_STEP),
        glfw::Key::D => right * MOVE_STEP,
        _ => return false,
    };
    let p = camera.position + step;
    camera.set_position(p);
    true
}

/// Rotate the camera position around the target's vertical axis.
pub(super) fn orbit_camera(camera: &Rc<RefCell<Camera>>, angle: f32) {
    let mut camera = camera.borrow_mut();
    let offset = camera.position - camera.target;
    let (sin, cos) = angle.sin_cos();
    let rotated = Vec3::new(
        cos * offset.x + sin * offset.z,
        offset.y,
        -sin * offset.x + cos * offset.z,
    );
    let p = camera.target + rotated;
    camera.set_position(p);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn shared_camera() -> Rc<RefCell<Camera>> {
        Rc::new(RefCell::new(Camera::perspective(
            Vec3::new(0.0, 0.0, -5.0),
            90.0,
            1.0,
            0.1,
            100.0,
        )))
    }

    #[test]
    fn dolly_moves_along_the_view_direction() {
        let camera = shared_camera();
        assert!(move_camera(&camera, glfw::Key::W));
        let p = camera.borrow().position;
        assert_relative_eq!(p, Vec3::new(0.0, 0.0, -4.75), epsilon = 1.0e-4);
    }

    #[test]
    fn unknown_keys_are_left_to_the_backend() {
        let camera = shared_camera();
        let before = camera.borrow().position;
        assert!(!move_camera(&camera, glfw::Key::F1));
        assert_eq!(camera.borrow().position, before);
    }

    #[test]
    fn orbit_preserves_the_distance_to_the_target() {
        let camera = shared_camera();
        orbit_camera(&camera, 0.7);
        let cam = camera.borrow();
        let offset = cam.position - cam.target;
        assert_relative_eq!(offset.length(), 5.0, epsilon = 1.0e-4);
        assert_relative_eq!(offset.y, 0.0, epsilon = 1.0e-6);
    }
}
