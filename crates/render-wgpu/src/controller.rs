use crate::camera::Camera;
use pyramid_input::MouseController;

/// Field-of-view change per wheel line, fed to [`Camera::zoom`].
const ZOOM_PER_LINE: f32 = 1.0 / 30.0;

/// Trackball-style controller: dragging with the left button orbits the
/// camera around its look-at center.
#[derive(Debug, Clone)]
pub struct CameraController {
    camera: Camera,
    scale: f32,
    lmb_pressed: bool,
    last: (f64, f64),
}

impl CameraController {
    pub fn new(camera: Camera) -> Self {
        Self::with_scale(camera, 0.02)
    }

    /// `scale` is radians of rotation per pixel of cursor motion.
    pub fn with_scale(camera: Camera, scale: f32) -> Self {
        Self {
            camera,
            scale,
            lmb_pressed: false,
            last: (0.0, 0.0),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn is_dragging(&self) -> bool {
        self.lmb_pressed
    }

    fn rotate_camera(&mut self, dx: f32, dy: f32) {
        let up = self.camera.y();
        self.camera.rotate_around_center(-self.scale * dx, up);
        let right = self.camera.x();
        self.camera.rotate_around_center(-self.scale * dy, right);
    }

    fn drag_to(&mut self, x: f64, y: f64) {
        let dx = (x - self.last.0) as f32;
        let dy = (y - self.last.1) as f32;
        self.last = (x, y);
        self.rotate_camera(dx, dy);
    }
}

impl MouseController for CameraController {
    fn lmb_pressed(&mut self, x: f64, y: f64) {
        self.lmb_pressed = true;
        self.last = (x, y);
        tracing::debug!("camera drag started");
    }

    fn lmb_released(&mut self, x: f64, y: f64) {
        if !self.lmb_pressed {
            return;
        }
        self.lmb_pressed = false;
        self.drag_to(x, y);
        tracing::debug!("camera drag finished");
    }

    fn mouse_moved(&mut self, x: f64, y: f64) {
        if self.lmb_pressed {
            self.drag_to(x, y);
        }
    }

    fn scrolled(&mut self, dy: f64) {
        self.camera.zoom(-(dy as f32) * ZOOM_PER_LINE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn motion_without_button_does_nothing() {
        let mut ctl = CameraController::new(Camera::new());
        let before = ctl.camera().clone();
        ctl.mouse_moved(100.0, 50.0);
        assert_eq!(*ctl.camera(), before);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn drag_orbits_around_center() {
        let mut ctl = CameraController::new(Camera::new());
        let start = ctl.camera().position();
        let dist = start.distance(ctl.camera().center());

        ctl.lmb_pressed(10.0, 10.0);
        assert!(ctl.is_dragging());
        ctl.mouse_moved(30.0, 10.0);
        ctl.lmb_released(30.0, 10.0);

        let cam = ctl.camera();
        assert_ne!(cam.position(), start);
        assert!((cam.position().distance(cam.center()) - dist).abs() < 1e-5);
        assert!(!ctl.is_dragging());
    }

    #[test]
    fn horizontal_drag_keeps_up_axis() {
        let mut ctl = CameraController::new(Camera::new());
        let up = ctl.camera().y();
        ctl.lmb_pressed(0.0, 0.0);
        ctl.mouse_moved(25.0, 0.0);
        assert!(ctl.camera().y().abs_diff_eq(up, 1e-5));
        assert!(!ctl.camera().x().abs_diff_eq(Vec3::X, 1e-3));
    }

    #[test]
    fn release_applies_final_delta_once() {
        let mut a = CameraController::new(Camera::new());
        a.lmb_pressed(0.0, 0.0);
        a.lmb_released(10.0, 5.0);

        let mut b = CameraController::new(Camera::new());
        b.lmb_pressed(0.0, 0.0);
        b.mouse_moved(10.0, 5.0);
        b.lmb_released(10.0, 5.0);

        assert!(a.camera().position().abs_diff_eq(b.camera().position(), 1e-5));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut ctl = CameraController::new(Camera::new());
        let before = ctl.camera().clone();
        ctl.lmb_released(40.0, 40.0);
        assert_eq!(*ctl.camera(), before);
    }

    #[test]
    fn wheel_up_narrows_fov() {
        let mut ctl = CameraController::new(Camera::new());
        let fov = ctl.camera().fov();
        ctl.scrolled(1.0);
        assert!(ctl.camera().fov() < fov);
    }
}
