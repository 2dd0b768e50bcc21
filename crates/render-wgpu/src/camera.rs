use glam::{Mat4, Quat, Vec3};
use pyramid_common::CameraConfig;
use std::f32::consts::PI;

const MIN_FOV: f32 = 1.0e-3;
const MAX_FOV: f32 = PI - 1.0e-3;

fn logistic(y: f32) -> f32 {
    1.0 / (1.0 + (-y).exp())
}

fn inverse_logistic(x: f32) -> f32 {
    (x / (1.0 - x)).ln()
}

/// Look-at camera with a perspective projection.
///
/// The orientation is kept as an orthonormal basis: `x` points right, `y` up
/// and `z` from the look-at center towards the eye, all in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    center: Vec3,
    x: Vec3,
    y: Vec3,
    z: Vec3,
    fov: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        let mut cam = Self {
            position: Vec3::Z,
            center: Vec3::ZERO,
            x: Vec3::X,
            y: Vec3::Y,
            z: Vec3::Z,
            fov: PI / 2.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        };
        cam.look_at(Vec3::new(0.0, 1.0, 1.0), Vec3::ZERO, Vec3::Y);
        cam
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a camera from configuration with the given aspect ratio.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        let mut cam = Self::default();
        cam.look_at(config.eye, config.target, config.up);
        cam.perspective(
            config.fov_degrees.to_radians(),
            aspect,
            config.near,
            config.far,
        );
        cam
    }

    /// Place the camera at `eye` looking at `center`. A degenerate request
    /// (`eye == center`, or `up` parallel to the view direction) is ignored.
    pub fn look_at(&mut self, eye: Vec3, center: Vec3, up: Vec3) {
        let Some(forward) = (center - eye).try_normalize() else {
            return;
        };
        let Some(x) = forward.cross(up).try_normalize() else {
            return;
        };
        self.x = x;
        self.y = x.cross(forward);
        self.z = -forward;
        self.position = eye;
        self.center = center;
    }

    pub fn perspective(&mut self, fov: f32, aspect: f32, near: f32, far: f32) {
        self.fov = fov;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn x(&self) -> Vec3 {
        self.x
    }

    pub fn y(&self) -> Vec3 {
        self.y
    }

    pub fn z(&self) -> Vec3 {
        self.z
    }

    /// Vertical field of view in radians.
    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view(&self) -> Mat4 {
        let (x, y, z, p) = (self.x, self.y, self.z, self.position);
        #[rustfmt::skip]
        let view = Mat4::from_cols_array(&[
            x.x, y.x, z.x, 0.0,
            x.y, y.y, z.y, 0.0,
            x.z, y.z, z.z, 0.0,
            -x.dot(p), -y.dot(p), -z.dot(p), 1.0,
        ]);
        view
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn projection_view(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Rotate the camera by `angle` radians about `axis` passing through `point`.
    pub fn rotate_around_point(&mut self, angle: f32, axis: Vec3, point: Vec3) {
        let Some(axis) = axis.try_normalize() else {
            return;
        };
        let rot = Quat::from_axis_angle(axis, angle);

        self.z = (rot * self.z).normalize();
        self.y = rot * self.y;
        self.x = self.y.cross(self.z).normalize();
        self.y = self.z.cross(self.x);

        self.position = point + rot * (self.position - point);
    }

    pub fn rotate_around_center(&mut self, angle: f32, axis: Vec3) {
        self.rotate_around_point(angle, axis, self.center);
    }

    /// Widen (positive offset) or narrow the field of view. The fov moves on a
    /// logistic curve so it never leaves (0, pi).
    pub fn zoom(&mut self, y_offset: f32) {
        let x = (self.fov / PI).clamp(MIN_FOV / PI, MAX_FOV / PI);
        let fov = PI * logistic(inverse_logistic(x) + y_offset);
        self.fov = fov.clamp(MIN_FOV, MAX_FOV);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat_close(a: Mat4, b: Mat4) -> bool {
        a.abs_diff_eq(b, 1e-5)
    }

    #[test]
    fn default_camera_looks_down_at_origin() {
        let cam = Camera::default();
        assert_eq!(cam.position(), Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(cam.center(), Vec3::ZERO);
        assert!((cam.fov() - PI / 2.0).abs() < 1e-6);
        let vp = cam.projection_view();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn view_equals_look_at_rh() {
        let mut cam = Camera::new();
        let eye = Vec3::new(2.0, 3.0, -4.0);
        let center = Vec3::new(0.5, 0.0, 1.0);
        cam.look_at(eye, center, Vec3::Y);
        assert!(mat_close(cam.view(), Mat4::look_at_rh(eye, center, Vec3::Y)));
    }

    #[test]
    fn set_aspect_only_changes_projection() {
        let mut cam = Camera::new();
        let view = cam.view();
        cam.set_aspect(2.0);
        assert_eq!(cam.aspect(), 2.0);
        assert_eq!(cam.view(), view);
        assert!(mat_close(
            cam.projection(),
            Mat4::perspective_rh(PI / 2.0, 2.0, 0.1, 100.0)
        ));
    }

    #[test]
    fn rotation_keeps_distance_and_target() {
        let mut cam = Camera::new();
        let dist = cam.position().distance(cam.center());
        cam.rotate_around_center(0.7, cam.y());
        cam.rotate_around_center(-0.3, cam.x());

        assert!((cam.position().distance(cam.center()) - dist).abs() < 1e-5);
        // still looking at the center
        let to_eye = (cam.position() - cam.center()).normalize();
        assert!(to_eye.abs_diff_eq(cam.z(), 1e-5));
        assert!((cam.x().dot(cam.y())).abs() < 1e-5);
    }

    #[test]
    fn full_turn_returns_home() {
        let mut cam = Camera::new();
        let start = cam.position();
        cam.rotate_around_center(2.0 * PI, Vec3::Y);
        assert!(cam.position().abs_diff_eq(start, 1e-5));
    }

    #[test]
    fn zero_axis_is_ignored() {
        let mut cam = Camera::new();
        let before = cam.clone();
        cam.rotate_around_center(1.0, Vec3::ZERO);
        assert_eq!(cam, before);
    }

    #[test]
    fn degenerate_look_at_keeps_previous_basis() {
        let mut cam = Camera::new();
        let before = cam.clone();

        cam.look_at(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert_eq!(cam, before);

        cam.look_at(Vec3::new(0.0, 2.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(cam, before);
        assert!(!cam.view().is_nan());
    }

    #[test]
    fn zoom_stays_in_range() {
        let mut cam = Camera::new();
        cam.zoom(0.0);
        assert!((cam.fov() - PI / 2.0).abs() < 1e-5);

        cam.zoom(-0.5);
        assert!(cam.fov() < PI / 2.0);

        cam.zoom(1000.0);
        assert!(cam.fov() < PI);
        cam.zoom(-1000.0);
        assert!(cam.fov() > 0.0);
    }

    #[test]
    fn from_config_uses_degrees() {
        let cfg = CameraConfig {
            fov_degrees: 60.0,
            ..CameraConfig::default()
        };
        let cam = Camera::from_config(&cfg, 1.5);
        assert!((cam.fov() - 60.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(cam.aspect(), 1.5);
        assert_eq!(cam.position(), cfg.eye);
    }
}
